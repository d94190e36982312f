use std::sync::Arc;

use alloy::primitives::Address;

use crate::swap::{
    errors::SwapError,
    evm::{
        backends::{router_registry::RouterRegistry, TokenMetadata},
        codecs::curve_routes::CurveRoutesCodec,
        constants::{DEFAULT_DEADLINE_WINDOW_SECS, DEFAULT_MAX_HOPS},
        swap_executors::EvmSwapExecutor,
    },
    swap_executor::SwapExecutor,
};

/// Builder pattern for constructing an `EvmSwapExecutor` with customizable options.
///
/// Token metadata, routers and the swapping account are required. The Curve max hops default to
/// 5 and the deadline window to 60 seconds.
pub struct SwapExecutorBuilder {
    token_metadata: Option<Arc<dyn TokenMetadata>>,
    router_registry: Option<RouterRegistry>,
    account: Option<Address>,
    max_hops: usize,
    deadline_window: u64,
}

impl Default for SwapExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapExecutorBuilder {
    pub fn new() -> Self {
        SwapExecutorBuilder {
            token_metadata: None,
            router_registry: None,
            account: None,
            max_hops: DEFAULT_MAX_HOPS,
            deadline_window: DEFAULT_DEADLINE_WINDOW_SECS,
        }
    }

    pub fn token_metadata(mut self, token_metadata: Arc<dyn TokenMetadata>) -> Self {
        self.token_metadata = Some(token_metadata);
        self
    }

    pub fn router_registry(mut self, router_registry: RouterRegistry) -> Self {
        self.router_registry = Some(router_registry);
        self
    }

    /// Sets the account swapping. It is the caller and the recipient of every swap.
    pub fn account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    /// Sets the maximum number of hops of a Curve route.
    /// Only routes of at most 5 hops can be sent to the on-chain Curve router.
    pub fn max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn deadline_window(mut self, seconds: u64) -> Self {
        self.deadline_window = seconds;
        self
    }

    /// Builds the `EvmSwapExecutor` instance.
    /// Returns an error if the token metadata, router registry or account have not been set.
    pub fn build(self) -> Result<Box<dyn SwapExecutor>, SwapError> {
        if let (Some(token_metadata), Some(router_registry), Some(account)) =
            (self.token_metadata, self.router_registry, self.account)
        {
            let curve_codec = CurveRoutesCodec::new(self.max_hops)?;
            Ok(Box::new(EvmSwapExecutor::new(
                token_metadata,
                router_registry,
                account,
                curve_codec,
                self.deadline_window,
            )?))
        } else {
            Err(SwapError::FatalError(
                "Please set the token metadata, router registry and account before building the executor"
                    .to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::evm::backends::token_metadata::TokenRegistry;

    #[test]
    fn test_build_requires_all_fields() {
        let result = SwapExecutorBuilder::new()
            .router_registry(RouterRegistry::new())
            .account(Address::with_last_byte(1))
            .build();
        assert!(matches!(result, Err(SwapError::FatalError(_))));
    }

    #[test]
    fn test_build_rejects_invalid_max_hops() {
        let result = SwapExecutorBuilder::new()
            .token_metadata(Arc::new(TokenRegistry::new()))
            .router_registry(RouterRegistry::new())
            .account(Address::with_last_byte(1))
            .max_hops(0)
            .build();
        assert!(matches!(result, Err(SwapError::InvalidInput(_))));
    }

    #[test]
    fn test_build() {
        let result = SwapExecutorBuilder::new()
            .token_metadata(Arc::new(TokenRegistry::new()))
            .router_registry(RouterRegistry::new())
            .account(Address::with_last_byte(1))
            .deadline_window(300)
            .build();
        assert!(result.is_ok());
    }
}
