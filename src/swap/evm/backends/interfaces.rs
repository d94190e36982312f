use alloy::{
    primitives::{Address, U256},
    sol,
};

use crate::swap::{
    errors::SwapError,
    evm::constants::DEFAULT_MAX_HOPS,
    models::{PaddedRoute, SWAP_PARAMS_LEN},
};

sol! {
    #[sol(all_derives)]
    interface ISwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        struct ExactOutputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountOut;
            uint256 amountInMaximum;
            uint160 sqrtPriceLimitX96;
        }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        function exactOutputSingle(ExactOutputSingleParams calldata params) external payable returns (uint256 amountIn);
    }

    #[sol(all_derives)]
    interface ICurveRouter {
        function exchange(
            address[11] _route,
            uint256[5][5] _swap_params,
            uint256 _amount,
            uint256 _min_dy,
            address[5] _pools,
            address _receiver
        ) external payable returns (uint256);
        function get_dx(
            address[11] _route,
            uint256[5][5] _swap_params,
            uint256 _out_amount,
            address[5] _pools,
            address[5] _base_pools,
            address[5] _base_tokens
        ) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IERC20Metadata {
        function decimals() external view returns (uint8);
    }
}

type FixedRoute = [Address; 2 * DEFAULT_MAX_HOPS + 1];
type FixedSwapParams = [[U256; SWAP_PARAMS_LEN]; DEFAULT_MAX_HOPS];
type FixedPools = [Address; DEFAULT_MAX_HOPS];

impl PaddedRoute {
    fn fixed_shape(&self) -> Result<(FixedRoute, FixedSwapParams, FixedPools), SwapError> {
        if self.max_hops() != DEFAULT_MAX_HOPS {
            return Err(SwapError::UnsupportedRouteShape(self.max_hops()));
        }
        let route: FixedRoute = self
            .padded_route()
            .try_into()
            .map_err(|_| SwapError::UnsupportedRouteShape(self.max_hops()))?;
        let pools: FixedPools = self
            .padded_pools()
            .try_into()
            .map_err(|_| SwapError::UnsupportedRouteShape(self.max_hops()))?;
        let mut swap_params: FixedSwapParams = Default::default();
        for (row, params) in swap_params
            .iter_mut()
            .zip(self.padded_swap_params())
        {
            for (value, param) in row.iter_mut().zip(params) {
                *value = U256::from(*param);
            }
        }
        Ok((route, swap_params, pools))
    }

    /// Builds the Curve router `exchange` call for this route.
    ///
    /// Meant for `AggregatorRouter` implementations that send the call through an alloy provider.
    /// Only routes padded to the default five hops fit the router ABI.
    pub fn exchange_call(
        &self,
        amount: U256,
        min_dy: U256,
        receiver: Address,
    ) -> Result<ICurveRouter::exchangeCall, SwapError> {
        let (route, swap_params, pools) = self.fixed_shape()?;
        Ok(ICurveRouter::exchangeCall {
            _route: route,
            _swap_params: swap_params,
            _amount: amount,
            _min_dy: min_dy,
            _pools: pools,
            _receiver: receiver,
        })
    }

    /// Builds the Curve router `get_dx` call, quoting the input needed for `out_amount`.
    ///
    /// Like [`Self::exchange_call`], this is the calldata an alloy-backed `AggregatorRouter` sends.
    pub fn get_dx_call(&self, out_amount: U256) -> Result<ICurveRouter::get_dxCall, SwapError> {
        let (route, swap_params, pools) = self.fixed_shape()?;
        Ok(ICurveRouter::get_dxCall {
            _route: route,
            _swap_params: swap_params,
            _out_amount: out_amount,
            _pools: pools,
            _base_pools: [Address::ZERO; DEFAULT_MAX_HOPS],
            _base_tokens: [Address::ZERO; DEFAULT_MAX_HOPS],
        })
    }
}
