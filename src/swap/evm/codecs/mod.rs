//! Wire formats of the swap configuration.
//!
//! - [`swap_config`]: the top level `(uint8 protocol, uint256 maxSlippage, bytes customParams)`
//!   tuple.
//! - [`uniswap`]: the `(uint24 feeTier, address router)` custom params of single pool swaps.
//! - [`curve_routes`]: the hand packed list of multi-hop routes used by the Curve router.
pub mod curve_routes;
pub mod swap_config;
pub mod uniswap;
