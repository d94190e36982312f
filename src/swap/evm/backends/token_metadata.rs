use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use alloy::{primitives::Address, providers::DynProvider};
use tokio::{
    runtime::{Handle, Runtime},
    task::block_in_place,
};
use tracing::debug;

use crate::swap::{
    errors::SwapError,
    evm::{
        backends::{interfaces::IERC20Metadata, TokenMetadata},
        utils::{get_client, get_runtime},
    },
};

/// Token decimals known ahead of time.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    decimals: HashMap<Address, u8>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }
}

impl TokenMetadata for TokenRegistry {
    fn decimals(&self, token: Address) -> Result<u8, SwapError> {
        self.decimals
            .get(&token)
            .copied()
            .ok_or(SwapError::UnknownToken(token))
    }
}

/// Reads token decimals from the chain with `decimals()` and caches them.
///
/// Needs `RPC_URL` to be set (environment or `.env`).
pub struct RpcTokenMetadata {
    client: DynProvider,
    cache: RwLock<HashMap<Address, u8>>,
    runtime_handle: Handle,
    #[allow(dead_code)]
    runtime: Option<Arc<Runtime>>,
}

impl RpcTokenMetadata {
    pub fn new() -> Result<Self, SwapError> {
        let (handle, runtime) = get_runtime()?;
        let client = get_client()?;
        Ok(Self { client, cache: RwLock::new(HashMap::new()), runtime_handle: handle, runtime })
    }

    fn cached(&self, token: Address) -> Result<Option<u8>, SwapError> {
        let cache = self
            .cache
            .read()
            .map_err(|_| SwapError::FatalError("Token metadata cache is poisoned".to_string()))?;
        Ok(cache.get(&token).copied())
    }
}

impl TokenMetadata for RpcTokenMetadata {
    fn decimals(&self, token: Address) -> Result<u8, SwapError> {
        if let Some(decimals) = self.cached(token)? {
            return Ok(decimals);
        }

        let contract = IERC20Metadata::new(token, &self.client);
        let output = block_in_place(|| {
            self.runtime_handle
                .block_on(async { contract.decimals().call().await })
        });
        let decimals = output.map_err(|err| {
            SwapError::RecoverableError(format!("decimals() call on {token} failed: {err}"))
        })?;
        debug!(%token, decimals, "Fetched token decimals");

        self.cache
            .write()
            .map_err(|_| SwapError::FatalError("Token metadata cache is poisoned".to_string()))?
            .insert(token, decimals);
        Ok(decimals)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_token_registry() {
        let usdc = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
        let registry = TokenRegistry::new().with_token(usdc, 6);

        assert_eq!(registry.decimals(usdc), Ok(6));
        assert_eq!(
            registry.decimals(Address::with_last_byte(1)),
            Err(SwapError::UnknownToken(Address::with_last_byte(1)))
        );
    }

    #[cfg(feature = "fork-tests")]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_rpc_token_metadata() {
        let metadata = RpcTokenMetadata::new().unwrap();
        // USDC on Ethereum mainnet
        let usdc = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(metadata.decimals(usdc), Ok(6));
        // second read is served from the cache
        assert_eq!(metadata.cached(usdc), Ok(Some(6)));
    }
}
