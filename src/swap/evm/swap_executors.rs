use std::sync::Arc;

use alloy::primitives::{
    aliases::{U160, U24},
    Address, U256,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::swap::{
    errors::SwapError,
    evm::{
        backends::{
            interfaces::ISwapRouter::{ExactInputSingleParams, ExactOutputSingleParams},
            router_registry::RouterRegistry,
            TokenMetadata,
        },
        codecs::curve_routes::CurveRoutesCodec,
        fixed_point::{max_amount_in, min_amount_out},
    },
    models::{CurveRoutesConfig, PaddedRoute, Protocol, SwapConfig, SwapKind, UniswapParams},
    swap_executor::SwapExecutor,
};

/// Custom params of a validated config.
enum Backend {
    Uniswap(UniswapParams),
    Curve(CurveRoutesConfig),
}

/// Executes swap configs against the routers of a [`RouterRegistry`].
///
/// # Fields
/// * `token_metadata`: Source of the token decimals used to scale amounts
/// * `routers`: Backends, keyed by the router address found in the config custom params
/// * `account`: Account swapping, sent as caller and recipient of every swap
/// * `curve_codec`: Codec of the Curve custom params, sets the max hops of a route
/// * `deadline_window`: Seconds added to the current time to build single pool deadlines
pub struct EvmSwapExecutor {
    token_metadata: Arc<dyn TokenMetadata>,
    routers: RouterRegistry,
    account: Address,
    curve_codec: CurveRoutesCodec,
    deadline_window: u64,
}

impl EvmSwapExecutor {
    pub fn new(
        token_metadata: Arc<dyn TokenMetadata>,
        routers: RouterRegistry,
        account: Address,
        curve_codec: CurveRoutesCodec,
        deadline_window: u64,
    ) -> Result<Self, SwapError> {
        if account == Address::ZERO {
            return Err(SwapError::InvalidRecipient(account));
        }
        Ok(Self { token_metadata, routers, account, curve_codec, deadline_window })
    }

    fn parse_config(&self, config: &SwapConfig) -> Result<Backend, SwapError> {
        if config.protocol == Protocol::Undefined {
            return Err(SwapError::InvalidProtocol(Protocol::Undefined as u8));
        }
        if config.max_slippage.is_zero() {
            return Err(SwapError::MaxSlippageCannotBeZero);
        }
        match config.protocol {
            Protocol::Uniswap => {
                let params = UniswapParams::decode(&config.custom_params)?;
                params.validate()?;
                Ok(Backend::Uniswap(params))
            }
            Protocol::CurveRouter => Ok(Backend::Curve(
                self.curve_codec
                    .validate(&config.custom_params)?,
            )),
            Protocol::Undefined => Err(SwapError::InvalidProtocol(Protocol::Undefined as u8)),
        }
    }

    fn deadline(&self) -> U256 {
        let now = Utc::now().timestamp().max(0) as u64;
        U256::from(now.saturating_add(self.deadline_window))
    }

    fn token_decimals(&self, token_in: Address, token_out: Address) -> Result<(u8, u8), SwapError> {
        Ok((self.token_metadata.decimals(token_in)?, self.token_metadata.decimals(token_out)?))
    }

    /// Orients a matched route so it starts at `token_in`.
    fn oriented_route(route: &PaddedRoute, token_in: Address) -> PaddedRoute {
        if route.token_in() == token_in {
            route.clone()
        } else {
            route.reversed()
        }
    }

    fn uniswap_swap(
        &self,
        kind: SwapKind,
        params: &UniswapParams,
        token_in: Address,
        token_out: Address,
        amount: U256,
        limit: U256,
    ) -> Result<U256, SwapError> {
        let router = self
            .routers
            .single_pool(params.router)?;
        let fee = U24::try_from(params.fee_tier).map_err(|_| {
            SwapError::InvalidInput(format!("Fee tier {} does not fit in uint24", params.fee_tier))
        })?;
        debug!(?kind, router = %params.router, fee = params.fee_tier, %amount, %limit, "Swapping on single pool router");
        match kind {
            SwapKind::ExactInput => router.exact_input_single(
                self.account,
                ExactInputSingleParams {
                    tokenIn: token_in,
                    tokenOut: token_out,
                    fee,
                    recipient: self.account,
                    deadline: self.deadline(),
                    amountIn: amount,
                    amountOutMinimum: limit,
                    sqrtPriceLimitX96: U160::ZERO,
                },
            ),
            SwapKind::ExactOutput => router.exact_output_single(
                self.account,
                ExactOutputSingleParams {
                    tokenIn: token_in,
                    tokenOut: token_out,
                    fee,
                    recipient: self.account,
                    deadline: self.deadline(),
                    amountOut: amount,
                    amountInMaximum: limit,
                    sqrtPriceLimitX96: U160::ZERO,
                },
            ),
        }
    }

    fn curve_swap(
        &self,
        kind: SwapKind,
        config: &CurveRoutesConfig,
        token_in: Address,
        token_out: Address,
        amount: U256,
        limit: U256,
    ) -> Result<U256, SwapError> {
        let route = Self::oriented_route(config.find_route(token_in, token_out)?, token_in);
        let router = self
            .routers
            .aggregator(config.router)?;
        debug!(?kind, router = %config.router, hops = route.hops(), %amount, %limit, "Swapping on Curve router");
        match kind {
            SwapKind::ExactInput => {
                router.exchange(self.account, &route, amount, limit, self.account)
            }
            SwapKind::ExactOutput => {
                let dx = router.get_dx(&route, amount)?;
                if dx > limit {
                    warn!(%dx, maximum = %limit, "Curve quote exceeds the maximum input");
                    return Err(SwapError::InputAboveMaximum { amount: dx, maximum: limit });
                }
                let received = router.exchange(self.account, &route, dx, amount, self.account)?;
                if received < amount {
                    warn!(%received, minimum = %amount, "Curve router returned less than requested");
                    return Err(SwapError::OutputBelowMinimum { amount: received, minimum: amount });
                }
                Ok(dx)
            }
        }
    }

    fn dispatch(
        &self,
        kind: SwapKind,
        backend: &Backend,
        token_in: Address,
        token_out: Address,
        amount: U256,
        limit: U256,
    ) -> Result<U256, SwapError> {
        match backend {
            Backend::Uniswap(params) => {
                self.uniswap_swap(kind, params, token_in, token_out, amount, limit)
            }
            Backend::Curve(config) => {
                self.curve_swap(kind, config, token_in, token_out, amount, limit)
            }
        }
    }
}

impl SwapExecutor for EvmSwapExecutor {
    fn validate_config(&self, config: &SwapConfig) -> Result<(), SwapError> {
        self.parse_config(config).map(|_| ())
    }

    fn execute_exact_input(
        &self,
        config: &SwapConfig,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        price: U256,
    ) -> Result<U256, SwapError> {
        let backend = self.parse_config(config)?;
        if amount_in.is_zero() {
            return Err(SwapError::ZeroAmount);
        }
        let (decimals_in, decimals_out) = self.token_decimals(token_in, token_out)?;
        let min_out =
            min_amount_out(amount_in, decimals_in, decimals_out, price, config.max_slippage)?;

        let amount_out = self.dispatch(
            SwapKind::ExactInput,
            &backend,
            token_in,
            token_out,
            amount_in,
            min_out,
        )?;
        if amount_out < min_out {
            warn!(%amount_out, %min_out, "Rejecting exact input swap");
            return Err(SwapError::OutputBelowMinimum { amount: amount_out, minimum: min_out });
        }
        debug!(%token_in, %token_out, %amount_in, %amount_out, "Exact input swap executed");
        Ok(amount_out)
    }

    fn execute_exact_output(
        &self,
        config: &SwapConfig,
        token_in: Address,
        token_out: Address,
        amount_out: U256,
        price: U256,
    ) -> Result<U256, SwapError> {
        let backend = self.parse_config(config)?;
        if amount_out.is_zero() {
            return Err(SwapError::ZeroAmount);
        }
        let (decimals_in, decimals_out) = self.token_decimals(token_in, token_out)?;
        let max_in =
            max_amount_in(amount_out, decimals_in, decimals_out, price, config.max_slippage)?;

        let amount_in = self.dispatch(
            SwapKind::ExactOutput,
            &backend,
            token_in,
            token_out,
            amount_out,
            max_in,
        )?;
        if amount_in > max_in {
            warn!(%amount_in, %max_in, "Rejecting exact output swap");
            return Err(SwapError::InputAboveMaximum { amount: amount_in, maximum: max_in });
        }
        debug!(%token_in, %token_out, %amount_in, %amount_out, "Exact output swap executed");
        Ok(amount_in)
    }

    fn find_route(
        &self,
        data: &[u8],
        token_in: Address,
        token_out: Address,
    ) -> Result<(Address, PaddedRoute), SwapError> {
        self.curve_codec
            .find_route(data, token_in, token_out)
    }
}
