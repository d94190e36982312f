use alloy::primitives::{Address, U256};

use crate::swap::{
    errors::SwapError,
    models::{PaddedRoute, SwapConfig},
};

/// A high-level interface for executing swaps described by a [`SwapConfig`].
///
/// The config only tells *where* to swap (protocol and its custom params) and *how much
/// deviation* is tolerated. The caller provides the reference `price` of every swap: the amount
/// of `token_in` paid for one unit of `token_out`, as an 18 decimals fixed point value. The
/// executor derives the slippage bound from it and never accepts a realized amount past that
/// bound, whatever the backend reports.
///
/// # Errors
///
/// Every method fails closed: a malformed config, a missing route or a realized amount out of
/// bounds returns an error and nothing is retried. See [`SwapError`] for the taxonomy.
pub trait SwapExecutor: Send + Sync {
    /// Checks a config is executable: defined protocol, non zero slippage and valid custom params
    /// for that protocol.
    ///
    /// # Returns
    /// - `Ok(())` if the config is valid.
    /// - `Err(SwapError)` naming the first problem found.
    fn validate_config(&self, config: &SwapConfig) -> Result<(), SwapError>;

    /// Swaps exactly `amount_in` of `token_in` for `token_out`.
    ///
    /// The output must be at least `amount_in / price * (1 - max_slippage)`, in `token_out`
    /// decimals.
    ///
    /// # Returns
    /// The amount of `token_out` received.
    fn execute_exact_input(
        &self,
        config: &SwapConfig,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        price: U256,
    ) -> Result<U256, SwapError>;

    /// Swaps `token_in` for exactly `amount_out` of `token_out`.
    ///
    /// The input must be at most `amount_out * price * (1 + max_slippage)`, in `token_in`
    /// decimals.
    ///
    /// # Returns
    /// The amount of `token_in` spent.
    fn execute_exact_output(
        &self,
        config: &SwapConfig,
        token_in: Address,
        token_out: Address,
        amount_out: U256,
        price: U256,
    ) -> Result<U256, SwapError>;

    /// Resolves the first route of packed Curve routes connecting the two tokens, in either
    /// direction.
    ///
    /// # Returns
    /// The router address and the route as encoded, padded to the configured max hops.
    fn find_route(
        &self,
        data: &[u8],
        token_in: Address,
        token_out: Address,
    ) -> Result<(Address, PaddedRoute), SwapError>;
}
