use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolValue,
};

use crate::swap::{
    errors::SwapError,
    evm::codecs::curve_routes::CurveRoutesCodec,
    models::{CurveRoute, Protocol, SwapConfig, UniswapParams},
};

sol! {
    /// ABI layout of a swap config.
    struct SwapConfigData {
        uint8 protocol;
        uint256 maxSlippage;
        bytes customParams;
    }
}

impl SwapConfig {
    pub fn new(protocol: Protocol, max_slippage: U256, custom_params: Bytes) -> Self {
        Self { protocol, max_slippage, custom_params }
    }

    /// Builds a config that swaps on a single Uniswap pool.
    pub fn uniswap(
        max_slippage: U256,
        fee_tier: u32,
        router: Address,
    ) -> Result<Self, SwapError> {
        let params = UniswapParams::new(fee_tier, router).encode()?;
        Ok(Self::new(Protocol::Uniswap, max_slippage, params.into()))
    }

    /// Builds a config that swaps through a Curve router using the given routes.
    ///
    /// Routes don't need to be padded and `pools` is optional on each of them.
    pub fn curve(
        max_slippage: U256,
        router: Address,
        routes: &[CurveRoute],
    ) -> Result<Self, SwapError> {
        let params = CurveRoutesCodec::default().encode(router, routes)?;
        Ok(Self::new(Protocol::CurveRouter, max_slippage, params.into()))
    }

    /// ABI encodes the config as `(uint8 protocol, uint256 maxSlippage, bytes customParams)`.
    pub fn encode(&self) -> Vec<u8> {
        SwapConfigData {
            protocol: self.protocol as u8,
            maxSlippage: self.max_slippage,
            customParams: self.custom_params.clone(),
        }
        .abi_encode_params()
    }

    /// Decodes an ABI encoded config.
    ///
    /// An `Undefined` protocol is accepted here: the config is only rejected when validated.
    /// Discriminators outside the known range fail with `InvalidProtocol`. Words with dirty high
    /// bits, like a `uint8` protocol above 255, fail with `AbiDecoding`.
    pub fn decode(data: &[u8]) -> Result<Self, SwapError> {
        let decoded = SwapConfigData::abi_decode_params_validate(data)?;
        Ok(Self {
            protocol: Protocol::try_from(decoded.protocol)?,
            max_slippage: decoded.maxSlippage,
            custom_params: decoded.customParams,
        })
    }
}
