use std::io;

use alloy::primitives::{utils::UnitsError, Address, U256};
use thiserror::Error;

/// Represents the outer-level, user-facing errors of the swap library.
///
/// Every failure aborts the whole operation: nothing is retried internally and no partial state
/// is left behind. Variants are split in three families so callers can branch on them:
/// - Configuration errors: detectable from the `SwapConfig` alone, before any backend is called.
/// - Execution errors: raised while resolving a route or while a backend performs the swap.
/// - Generic errors: `InvalidInput`, `FatalError` (problem with the application setup) and
///   `RecoverableError` (a temporary issue, such as a network problem, retrying may succeed).
#[derive(Error, Debug, PartialEq)]
pub enum SwapError {
    // Configuration errors
    #[error("Invalid protocol: {0}")]
    InvalidProtocol(u8),
    #[error("Max slippage cannot be zero")]
    MaxSlippageCannotBeZero,
    #[error("Uniswap fee tier cannot be zero")]
    UniswapFeeTierCannotBeZero,
    #[error("Uniswap router cannot be the zero address")]
    UniswapRouterCannotBeZero,
    #[error("Curve router cannot be the zero address")]
    CurveRouterCannotBeZero,
    #[error("At least one route is required")]
    AtLeastOneRoute,
    #[error("Invalid route size {0}, must be odd and at least 3")]
    InvalidRouteLength(usize),
    #[error("Invalid swapParams length {actual}, expected {expected}")]
    SwapParamsCountMismatch { expected: usize, actual: usize },
    #[error("Invalid swapParams, each must have a length of 5 (got {0})")]
    InvalidSwapParamsLength(usize),
    #[error("Invalid pools length {actual}, expected {expected}")]
    PoolsCountMismatch { expected: usize, actual: usize },
    #[error("Route has {hops} hops, the maximum is {max_hops}")]
    TooManyHops { hops: usize, max_hops: usize },
    #[error("Too many routes: {0}, at most 255 fit in the route count byte")]
    TooManyRoutes(usize),
    #[error("Routes padded to {0} hops can't be sent to the fixed-shape Curve router ABI")]
    UnsupportedRouteShape(usize),

    // Decoding errors
    #[error("Unexpected end of data: needed {needed} bytes at offset {offset}, {available} left")]
    UnexpectedEndOfData { offset: usize, needed: usize, available: usize },
    #[error("{0} trailing bytes after the last route")]
    TrailingBytes(usize),
    #[error("ABI decoding failed: {0}")]
    AbiDecoding(String),

    // Execution errors
    #[error("No route found for {token_in} -> {token_out}")]
    RouteNotFound { token_in: Address, token_out: Address },
    #[error("Amount cannot be zero")]
    ZeroAmount,
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(Address),
    #[error("Transaction too old: deadline {deadline}, now {now}")]
    DeadlineExpired { deadline: U256, now: u64 },
    #[error("Account {account} is missing role {role}")]
    MissingRole { account: Address, role: String },
    #[error("No price set for {token_in} -> {token_out}")]
    PriceNotSet { token_in: Address, token_out: Address },
    #[error("The output amount is less than the slippage: got {amount}, minimum {minimum}")]
    OutputBelowMinimum { amount: U256, minimum: U256 },
    #[error("The input amount exceeds the slippage: got {amount}, maximum {maximum}")]
    InputAboveMaximum { amount: U256, maximum: U256 },
    #[error("No backend registered for router {0}")]
    UnknownRouter(Address),
    #[error("Unknown decimals for token {0}")]
    UnknownToken(Address),
    #[error("Arithmetic overflow while scaling amounts")]
    AmountOverflow,
    #[error("Division by zero while scaling amounts")]
    DivisionByZero,

    // Generic errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fatal error: {0}")]
    FatalError(String),
    #[error("Recoverable error: {0}")]
    RecoverableError(String),
}

impl SwapError {
    /// True for errors that can be detected from the configuration alone, without executing.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SwapError::InvalidProtocol(_) |
                SwapError::MaxSlippageCannotBeZero |
                SwapError::UniswapFeeTierCannotBeZero |
                SwapError::UniswapRouterCannotBeZero |
                SwapError::CurveRouterCannotBeZero |
                SwapError::AtLeastOneRoute |
                SwapError::InvalidRouteLength(_) |
                SwapError::SwapParamsCountMismatch { .. } |
                SwapError::InvalidSwapParamsLength(_) |
                SwapError::PoolsCountMismatch { .. } |
                SwapError::TooManyHops { .. } |
                SwapError::TooManyRoutes(_) |
                SwapError::UnexpectedEndOfData { .. } |
                SwapError::TrailingBytes(_) |
                SwapError::AbiDecoding(_)
        )
    }
}

impl From<io::Error> for SwapError {
    fn from(err: io::Error) -> Self {
        SwapError::FatalError(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::InvalidInput(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for SwapError {
    fn from(err: alloy::sol_types::Error) -> Self {
        SwapError::AbiDecoding(err.to_string())
    }
}

impl From<UnitsError> for SwapError {
    fn from(err: UnitsError) -> Self {
        SwapError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(SwapError::AtLeastOneRoute.is_configuration_error());
        assert!(SwapError::InvalidProtocol(0).is_configuration_error());
        assert!(!SwapError::ZeroAmount.is_configuration_error());
        assert!(!SwapError::RouteNotFound { token_in: Address::ZERO, token_out: Address::ZERO }
            .is_configuration_error());
    }

    #[test]
    fn test_slippage_messages_match_router_reverts() {
        let err = SwapError::OutputBelowMinimum { amount: U256::from(1), minimum: U256::from(2) };
        assert!(err
            .to_string()
            .starts_with("The output amount is less than the slippage"));
        let err = SwapError::InputAboveMaximum { amount: U256::from(3), maximum: U256::from(2) };
        assert!(err
            .to_string()
            .starts_with("The input amount exceeds the slippage"));
    }
}
