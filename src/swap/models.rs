use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::swap::errors::SwapError;

/// Identifies which backend interprets the `custom_params` of a [`SwapConfig`].
///
/// Options:
///
/// - `Undefined`: Placeholder value, never valid for execution.
/// - `Uniswap`: Single pool swap through a Uniswap V3 style router. `custom_params` holds the
///   ABI encoded [`UniswapParams`].
/// - `CurveRouter`: Multi-hop swap through a Curve router. `custom_params` holds the packed list
///   of [`CurveRoute`]s.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Undefined = 0,
    Uniswap = 1,
    CurveRouter = 2,
}

impl TryFrom<u8> for Protocol {
    type Error = SwapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Protocol::Undefined),
            1 => Ok(Protocol::Uniswap),
            2 => Ok(Protocol::CurveRouter),
            other => Err(SwapError::InvalidProtocol(other)),
        }
    }
}

/// Swap configuration as stored by the integrating contract or service.
///
/// # Fields
/// * `protocol`: Backend used to execute the swap.
/// * `max_slippage`: Maximum tolerated deviation from the reference price, as an 18 decimals
///   fixed point fraction (`0.02e18` is 2%).
/// * `custom_params`: Opaque backend specific parameters, see [`Protocol`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapConfig {
    pub protocol: Protocol,
    pub max_slippage: U256,
    pub custom_params: Bytes,
}

/// Parameters of a single pool swap.
///
/// # Fields
/// * `fee_tier`: Fee identifier of the pool (uint24 on chain, e.g. `500` for 0.05%).
/// * `router`: Address of the router that executes the swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniswapParams {
    pub fee_tier: u32,
    pub router: Address,
}

/// Number of coin parameters every Curve hop carries: `[i, j, swap_type, pool_type, n_coins]`.
pub const SWAP_PARAMS_LEN: usize = 5;

/// Parameters of one Curve hop, see [`SWAP_PARAMS_LEN`].
pub type SwapParams = [u8; SWAP_PARAMS_LEN];

/// A multi-hop route through a Curve router, as given by the user (not padded).
///
/// `route` alternates tokens and pools: `[token, pool, token, pool, token, ...]`. Every hop has
/// one entry in `swap_params` and, optionally, one entry in `pools`. When `pools` is not given the
/// router resolves the pools itself, which is encoded as the zero address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveRoute {
    route: Vec<Address>,
    swap_params: Vec<SwapParams>,
    pools: Option<Vec<Address>>,
}

impl CurveRoute {
    pub fn new(
        route: Vec<Address>,
        swap_params: Vec<SwapParams>,
        pools: Option<Vec<Address>>,
    ) -> Result<Self, SwapError> {
        if route.len() < 3 || route.len() % 2 != 1 {
            return Err(SwapError::InvalidRouteLength(route.len()));
        }
        let hops = (route.len() - 1) / 2;
        if swap_params.len() != hops {
            return Err(SwapError::SwapParamsCountMismatch {
                expected: hops,
                actual: swap_params.len(),
            });
        }
        if let Some(pools) = &pools {
            if pools.len() != hops {
                return Err(SwapError::PoolsCountMismatch { expected: hops, actual: pools.len() });
            }
        }
        Ok(Self { route, swap_params, pools })
    }

    /// Builds a route from untyped parameter rows, checking each row has exactly five values.
    pub fn from_params(
        route: Vec<Address>,
        swap_params: Vec<Vec<u8>>,
        pools: Option<Vec<Address>>,
    ) -> Result<Self, SwapError> {
        let swap_params = swap_params
            .into_iter()
            .map(|row| {
                let len = row.len();
                SwapParams::try_from(row).map_err(|_| SwapError::InvalidSwapParamsLength(len))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(route, swap_params, pools)
    }

    pub fn hops(&self) -> usize {
        self.swap_params.len()
    }

    pub fn route(&self) -> &[Address] {
        &self.route
    }

    pub fn swap_params(&self) -> &[SwapParams] {
        &self.swap_params
    }

    /// Pools of the route, defaulting every hop to the zero address when none were given.
    pub fn pools(&self) -> Vec<Address> {
        match &self.pools {
            Some(pools) => pools.clone(),
            None => vec![Address::ZERO; self.hops()],
        }
    }

    pub fn token_in(&self) -> Address {
        self.route[0]
    }

    pub fn token_out(&self) -> Address {
        self.route[self.route.len() - 1]
    }

    /// Size in bytes of this route in the packed routes encoding.
    pub fn encoded_len(&self) -> usize {
        let hops = self.hops();
        1 + 20 * (2 * hops + 1) + SWAP_PARAMS_LEN * hops + 20 * hops
    }
}

/// A decoded route padded to a fixed number of hops.
///
/// Callers always get the same shape regardless of the actual length of the route: `2 * max + 1`
/// route addresses, `max` swap params rows and `max` pools, with zero padding after the last
/// real hop. The real hop count is kept so the valid prefix can be read back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedRoute {
    hops: usize,
    route: Vec<Address>,
    swap_params: Vec<SwapParams>,
    pools: Vec<Address>,
}

impl PaddedRoute {
    pub fn pad(route: &CurveRoute, max_hops: usize) -> Result<Self, SwapError> {
        let hops = route.hops();
        if hops > max_hops {
            return Err(SwapError::TooManyHops { hops, max_hops });
        }
        let mut padded_route = vec![Address::ZERO; 2 * max_hops + 1];
        padded_route[..route.route().len()].copy_from_slice(route.route());
        let mut swap_params = vec![[0u8; SWAP_PARAMS_LEN]; max_hops];
        swap_params[..hops].copy_from_slice(route.swap_params());
        let mut pools = vec![Address::ZERO; max_hops];
        pools[..hops].copy_from_slice(&route.pools());
        Ok(Self { hops, route: padded_route, swap_params, pools })
    }

    pub fn hops(&self) -> usize {
        self.hops
    }

    pub fn max_hops(&self) -> usize {
        self.pools.len()
    }

    /// The real route addresses, without padding.
    pub fn route(&self) -> &[Address] {
        &self.route[..2 * self.hops + 1]
    }

    pub fn swap_params(&self) -> &[SwapParams] {
        &self.swap_params[..self.hops]
    }

    pub fn pools(&self) -> &[Address] {
        &self.pools[..self.hops]
    }

    pub fn padded_route(&self) -> &[Address] {
        &self.route
    }

    pub fn padded_swap_params(&self) -> &[SwapParams] {
        &self.swap_params
    }

    pub fn padded_pools(&self) -> &[Address] {
        &self.pools
    }

    pub fn token_in(&self) -> Address {
        self.route[0]
    }

    pub fn token_out(&self) -> Address {
        self.route[2 * self.hops]
    }

    /// Returns the same route traversed from its last token to its first.
    ///
    /// Hops are visited in reverse order and the coin indexes `i` and `j` of each hop are
    /// swapped. This mirrors plain exchange hops (swap type 1); other swap types are not
    /// symmetric and should be encoded in both directions explicitly.
    pub fn reversed(&self) -> Self {
        let mut route: Vec<Address> = self.route().iter().rev().copied().collect();
        route.resize(self.route.len(), Address::ZERO);

        let mut swap_params: Vec<SwapParams> = self
            .swap_params()
            .iter()
            .rev()
            .map(|params| {
                let mut params = *params;
                params.swap(0, 1);
                params
            })
            .collect();
        swap_params.resize(self.swap_params.len(), [0u8; SWAP_PARAMS_LEN]);

        let mut pools: Vec<Address> = self.pools().iter().rev().copied().collect();
        pools.resize(self.pools.len(), Address::ZERO);

        Self { hops: self.hops, route, swap_params, pools }
    }

    /// Converts back to the unpadded form.
    pub fn to_curve_route(&self) -> CurveRoute {
        CurveRoute {
            route: self.route().to_vec(),
            swap_params: self.swap_params().to_vec(),
            pools: Some(self.pools().to_vec()),
        }
    }
}

/// Decoded custom params of a [`Protocol::CurveRouter`] config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveRoutesConfig {
    pub router: Address,
    pub routes: Vec<PaddedRoute>,
}

/// Kind of swap requested to the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapKind {
    ExactInput,
    ExactOutput,
}
