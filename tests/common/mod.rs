#![allow(dead_code)]
use std::sync::Arc;

use alloy::primitives::{address, Address, U256};
use swap_library::swap::{
    evm::{
        backends::{
            p2p_router::{P2PRouter, Role},
            router_registry::RouterRegistry,
            token_metadata::TokenRegistry,
        },
        executor_builder::SwapExecutorBuilder,
        fixed_point::parse_amount,
    },
    models::CurveRoute,
    swap_executor::SwapExecutor,
};

pub const SWAPPER: Address = address!("0000000000000000000000000000000000005a5a");
pub const ADMIN: Address = address!("000000000000000000000000000000000000ad01");
pub const PRICER: Address = address!("000000000000000000000000000000000000fee0");
/// Address the in-memory P2P router is registered under.
pub const P2P_ROUTER: Address = address!("00000000000000000000000000000000000052e2");

pub fn uniswap_router() -> Address {
    address!("E592427A0AEce92De3Edee1F18E0157C05861564")
}

pub fn curve_router() -> Address {
    address!("F0d4c12A5768D806021F80a262B4d39d26C58b8D")
}

pub fn usdc() -> Address {
    address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174")
}

pub fn usdc_native() -> Address {
    address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359")
}

pub fn usdm() -> Address {
    address!("59D9356E565Ab3A36dD77763Fc0d87fEaf85508C")
}

pub fn crv_usd() -> Address {
    address!("c4Ce1D6F5D98D65eE25Cf85e9F2E9DcFEe6Cb5d6")
}

pub fn wmatic() -> Address {
    address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270")
}

/// An 18 decimals token with no on-chain counterpart.
pub fn token_18_decimals() -> Address {
    address!("1818181818181818181818181818181818181818")
}

pub fn pool_usdc_native_crv_usd() -> Address {
    address!("5225010A0AE133B357861782B0B865a48471b2C5")
}

pub fn pool_usdc_crv_usd() -> Address {
    address!("864490Cf55dc2Dee3f0ca4D06F5f80b2BB154a03")
}

pub fn pool_usdc_native_usdm() -> Address {
    address!("d8001cE95A13168AA4F7D70b5298962b7cADf6Dd")
}

/// Parses a decimal string into an 18 decimals fixed point value.
pub fn wad(value: &str) -> U256 {
    parse_amount(value, 18).unwrap()
}

/// Parses a decimal string into a 6 decimals token amount.
pub fn usdc_amount(value: &str) -> U256 {
    parse_amount(value, 6).unwrap()
}

pub fn token_registry() -> TokenRegistry {
    TokenRegistry::new()
        .with_token(usdc(), 6)
        .with_token(usdc_native(), 6)
        .with_token(usdm(), 18)
        .with_token(crv_usd(), 18)
        .with_token(wmatic(), 18)
        .with_token(token_18_decimals(), 18)
}

/// A P2P router where `PRICER` sets prices and `SWAPPER` may swap.
pub fn p2p_router() -> Arc<P2PRouter> {
    let router = P2PRouter::new(ADMIN, Arc::new(token_registry()));
    router
        .grant_role(ADMIN, Role::Pricer, PRICER)
        .unwrap();
    router
        .grant_role(ADMIN, Role::Swap, SWAPPER)
        .unwrap();
    Arc::new(router)
}

pub fn executor(router_registry: RouterRegistry) -> Box<dyn SwapExecutor> {
    SwapExecutorBuilder::new()
        .token_metadata(Arc::new(token_registry()))
        .router_registry(router_registry)
        .account(SWAPPER)
        .build()
        .unwrap()
}

/// The Polygon routes between USDC, USDC native and USDM, listed in both directions.
pub fn polygon_curve_routes() -> Vec<CurveRoute> {
    vec![
        CurveRoute::new(
            vec![
                usdc_native(),
                pool_usdc_native_crv_usd(),
                crv_usd(),
                pool_usdc_crv_usd(),
                usdc(),
            ],
            vec![[1, 0, 1, 1, 2], [0, 1, 1, 1, 2]],
            Some(vec![pool_usdc_native_crv_usd(), pool_usdc_crv_usd()]),
        )
        .unwrap(),
        CurveRoute::new(
            vec![
                usdc(),
                pool_usdc_crv_usd(),
                crv_usd(),
                pool_usdc_native_crv_usd(),
                usdc_native(),
            ],
            vec![[1, 0, 1, 1, 2], [0, 1, 1, 1, 2]],
            Some(vec![pool_usdc_crv_usd(), pool_usdc_native_crv_usd()]),
        )
        .unwrap(),
        CurveRoute::new(
            vec![
                usdm(),
                pool_usdc_native_usdm(),
                usdc_native(),
                pool_usdc_native_crv_usd(),
                crv_usd(),
                pool_usdc_crv_usd(),
                usdc(),
            ],
            vec![[1, 0, 1, 1, 2], [1, 0, 1, 1, 2], [0, 1, 1, 1, 2]],
            Some(vec![pool_usdc_native_usdm(), pool_usdc_native_crv_usd(), pool_usdc_crv_usd()]),
        )
        .unwrap(),
        CurveRoute::new(
            vec![
                usdc(),
                pool_usdc_crv_usd(),
                crv_usd(),
                pool_usdc_native_crv_usd(),
                usdc_native(),
                pool_usdc_native_usdm(),
                usdm(),
            ],
            vec![[1, 0, 1, 1, 2], [0, 1, 1, 1, 2], [0, 1, 1, 1, 2]],
            Some(vec![pool_usdc_crv_usd(), pool_usdc_native_crv_usd(), pool_usdc_native_usdm()]),
        )
        .unwrap(),
    ]
}
