//! Collaborators the executor dispatches to.
//!
//! The executor never talks to a chain directly: routers and token metadata are reached through
//! the traits below, so the same validation and slippage logic runs against on-chain backends,
//! in-memory ones such as [`p2p_router::P2PRouter`], or test doubles.
use alloy::primitives::{Address, U256};

use crate::swap::{
    errors::SwapError,
    evm::backends::interfaces::ISwapRouter::{ExactInputSingleParams, ExactOutputSingleParams},
    models::PaddedRoute,
};

pub mod interfaces;
pub mod p2p_router;
pub mod router_registry;
pub mod token_metadata;

/// A router swapping through a single pool, with the Uniswap V3 `SwapRouter` interface.
///
/// `caller` is the account on whose behalf the swap is made. Implementations must enforce the
/// limits carried by the params (`amountOutMinimum`, `amountInMaximum`, `deadline`) themselves.
pub trait SinglePoolRouter: Send + Sync {
    /// Swaps exactly `params.amountIn` and returns the amount received.
    fn exact_input_single(
        &self,
        caller: Address,
        params: ExactInputSingleParams,
    ) -> Result<U256, SwapError>;

    /// Receives exactly `params.amountOut` and returns the amount spent.
    fn exact_output_single(
        &self,
        caller: Address,
        params: ExactOutputSingleParams,
    ) -> Result<U256, SwapError>;
}

/// A router executing multi-hop routes, with the Curve router `exchange`/`get_dx` interface.
pub trait AggregatorRouter: Send + Sync {
    /// Swaps `amount` of the route's first token and returns the amount of its last token sent to
    /// `receiver`. Fails if that amount is below `min_dy`.
    fn exchange(
        &self,
        caller: Address,
        route: &PaddedRoute,
        amount: U256,
        min_dy: U256,
        receiver: Address,
    ) -> Result<U256, SwapError>;

    /// Quotes the input amount needed to receive `amount_out` through `route`.
    fn get_dx(&self, route: &PaddedRoute, amount_out: U256) -> Result<U256, SwapError>;
}

/// Source of ERC20 decimals.
pub trait TokenMetadata: Send + Sync {
    fn decimals(&self, token: Address) -> Result<u8, SwapError>;
}
