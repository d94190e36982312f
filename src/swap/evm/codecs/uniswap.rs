use alloy::{
    primitives::{aliases::U24, Address},
    sol,
    sol_types::SolValue,
};

use crate::swap::{errors::SwapError, models::UniswapParams};

sol! {
    /// ABI layout of the custom params of a Uniswap swap config.
    struct UniswapCustomParams {
        uint24 feeTier;
        address router;
    }
}

impl UniswapParams {
    pub fn new(fee_tier: u32, router: Address) -> Self {
        Self { fee_tier, router }
    }

    /// ABI encodes the params as `(uint24 feeTier, address router)`.
    pub fn encode(&self) -> Result<Vec<u8>, SwapError> {
        let fee_tier = U24::try_from(self.fee_tier).map_err(|_| {
            SwapError::InvalidInput(format!("Fee tier {} does not fit in uint24", self.fee_tier))
        })?;
        Ok(UniswapCustomParams { feeTier: fee_tier, router: self.router }.abi_encode_params())
    }

    pub fn decode(data: &[u8]) -> Result<Self, SwapError> {
        let params = UniswapCustomParams::abi_decode_params_validate(data)?;
        Ok(Self { fee_tier: params.feeTier.to::<u32>(), router: params.router })
    }

    pub fn validate(&self) -> Result<(), SwapError> {
        if self.fee_tier == 0 {
            return Err(SwapError::UniswapFeeTierCannotBeZero);
        }
        if self.router == Address::ZERO {
            return Err(SwapError::UniswapRouterCannotBeZero);
        }
        Ok(())
    }
}
