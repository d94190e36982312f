use alloy::primitives::U256;

/// Number of decimals of the fixed point values used for prices and slippage.
pub const WAD_DECIMALS: u8 = 18;

/// `1.0` in 18 decimals fixed point.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Default maximum number of hops of a Curve route.
///
/// This matches the fixed-shape `exchange` function of the Curve router, which takes 11 route
/// addresses, 5 swap params rows and 5 pools.
pub const DEFAULT_MAX_HOPS: usize = 5;

/// Byte size of an address in the packed routes encoding.
pub const ADDRESS_SIZE: usize = 20;

/// Seconds added to the current time to build the deadline sent to single pool routers.
pub const DEFAULT_DEADLINE_WINDOW_SECS: u64 = 60;

/// Largest power of ten that fits in a `U256` (10^77).
pub const MAX_DECIMALS_DIFF: u8 = 77;
