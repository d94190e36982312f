mod common;

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use common::*;
use rstest::rstest;
use swap_library::swap::{
    errors::SwapError,
    evm::backends::{
        p2p_router::{P2PRouter, Role},
        router_registry::RouterRegistry,
    },
    models::{Protocol, SwapConfig},
    swap_executor::SwapExecutor,
};

fn p2p_config() -> SwapConfig {
    SwapConfig::uniswap(wad("0.02"), 500, P2P_ROUTER).unwrap()
}

fn setup() -> (Arc<P2PRouter>, Box<dyn SwapExecutor>) {
    let router = p2p_router();
    let executor = executor(RouterRegistry::new().register_single_pool(P2P_ROUTER, router.clone()));
    (router, executor)
}

#[test]
fn test_exact_input_at_reference_price() {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), wad("0.62"))
        .unwrap();

    let amount_out = executor
        .execute_exact_input(&p2p_config(), usdc(), wmatic(), usdc_amount("10"), wad("0.62"))
        .unwrap();

    // 10 / 0.62, rounded down
    assert_eq!(amount_out, U256::from(16_129_032_258_064_516_129u128));
}

#[test]
fn test_exact_input_from_18_decimals_token() {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, wmatic(), usdc(), wad("1.1"))
        .unwrap();

    let amount_out = executor
        .execute_exact_input(&p2p_config(), wmatic(), usdc(), wad("5"), wad("1.1"))
        .unwrap();

    // 5 / 1.1 in 6 decimals
    assert_eq!(amount_out, U256::from(4_545_454u64));
}

#[rstest]
#[case::reference_above_market(wad("0.62"), wad("0.64"))]
#[case::reference_below_market(wad("0.63"), wad("0.62"))]
fn test_exact_input_inside_slippage(#[case] market: U256, #[case] reference: U256) {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), market)
        .unwrap();

    assert!(executor
        .execute_exact_input(&p2p_config(), usdc(), wmatic(), usdc_amount("10"), reference)
        .is_ok());
}

#[rstest]
#[case::market_price_too_high(wad("0.65"), wad("0.62"))]
#[case::reference_price_too_low(wad("0.62"), wad("0.60"))]
fn test_exact_input_outside_slippage(#[case] market: U256, #[case] reference: U256) {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), market)
        .unwrap();

    let err = executor
        .execute_exact_input(&p2p_config(), usdc(), wmatic(), usdc_amount("10"), reference)
        .unwrap_err();
    assert!(matches!(err, SwapError::OutputBelowMinimum { .. }));
    assert!(err
        .to_string()
        .starts_with("The output amount is less than the slippage"));
}

#[test]
fn test_router_rejection_is_returned_unchanged() {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), wad("0.65"))
        .unwrap();

    // 10 / 0.65 from the router against a minimum of 10 / 0.62 * 0.98
    assert_eq!(
        executor.execute_exact_input(&p2p_config(), usdc(), wmatic(), usdc_amount("10"), wad("0.62")),
        Err(SwapError::OutputBelowMinimum {
            amount: U256::from(15_384_615_384_615_384_615u128),
            minimum: U256::from(15_806_451_612_903_225_806u128),
        })
    );
}

#[rstest]
#[case::six_decimals_in(usdc(), wmatic(), wad("10"), wad("0.65"), usdc_amount("6.5"))]
#[case::eighteen_decimals_in(wmatic(), usdc(), usdc_amount("5"), wad("1.1"), wad("5.5"))]
#[case::both_eighteen_decimals(token_18_decimals(), wmatic(), wad("10"), wad("0.65"), wad("6.5"))]
fn test_exact_output(
    #[case] token_in: Address,
    #[case] token_out: Address,
    #[case] amount_out: U256,
    #[case] price: U256,
    #[case] expected_in: U256,
) {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, token_in, token_out, price)
        .unwrap();

    let amount_in = executor
        .execute_exact_output(&p2p_config(), token_in, token_out, amount_out, price)
        .unwrap();
    assert_eq!(amount_in, expected_in);
}

#[rstest]
#[case::reference_above_market(wad("0.65"), wad("0.67"), usdc_amount("6.5"))]
#[case::reference_below_market(wad("0.63"), wad("0.619"), usdc_amount("6.3"))]
fn test_exact_output_inside_slippage(
    #[case] market: U256,
    #[case] reference: U256,
    #[case] expected_in: U256,
) {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), market)
        .unwrap();

    let amount_in = executor
        .execute_exact_output(&p2p_config(), usdc(), wmatic(), wad("10"), reference)
        .unwrap();
    assert_eq!(amount_in, expected_in);
}

#[rstest]
#[case::market_price_too_high(wad("1.15"), wad("1.1"))]
#[case::reference_price_too_low(wad("1.1"), wad("1.04"))]
fn test_exact_output_outside_slippage(#[case] market: U256, #[case] reference: U256) {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), market)
        .unwrap();

    let err = executor
        .execute_exact_output(&p2p_config(), usdc(), wmatic(), wad("10"), reference)
        .unwrap_err();
    assert!(matches!(err, SwapError::InputAboveMaximum { .. }));
    assert!(err
        .to_string()
        .starts_with("The input amount exceeds the slippage"));
}

#[test]
fn test_undefined_protocol_never_swaps() {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), wmatic(), wad("0.62"))
        .unwrap();
    let config = SwapConfig::new(Protocol::Undefined, wad("0.02"), Bytes::from(vec![0u8]));

    assert_eq!(
        executor.execute_exact_input(&config, usdc(), wmatic(), usdc_amount("10"), wad("0.62")),
        Err(SwapError::InvalidProtocol(0))
    );
    assert_eq!(
        executor.execute_exact_output(&config, usdc(), wmatic(), usdc_amount("10"), wad("0.62")),
        Err(SwapError::InvalidProtocol(0))
    );
}

#[rstest]
#[case::zero_slippage(SwapConfig::uniswap(U256::ZERO, 500, P2P_ROUTER).unwrap(), SwapError::MaxSlippageCannotBeZero)]
#[case::zero_fee_tier(SwapConfig::uniswap(wad("0.02"), 0, P2P_ROUTER).unwrap(), SwapError::UniswapFeeTierCannotBeZero)]
#[case::zero_router(SwapConfig::uniswap(wad("0.02"), 500, Address::ZERO).unwrap(), SwapError::UniswapRouterCannotBeZero)]
#[case::undefined_protocol(SwapConfig::new(Protocol::Undefined, wad("0.02"), Bytes::from(vec![0u8])), SwapError::InvalidProtocol(0))]
fn test_validate_config(#[case] config: SwapConfig, #[case] expected: SwapError) {
    let (_, executor) = setup();
    assert_eq!(executor.validate_config(&config), Err(expected));
    assert_eq!(executor.validate_config(&p2p_config()), Ok(()));
}

#[test]
fn test_swapper_without_role_is_rejected() {
    let (router, executor) = setup();
    router
        .set_current_price(PRICER, usdc(), usdc_native(), wad("1"))
        .unwrap();
    router
        .revoke_role(ADMIN, Role::Swap, SWAPPER)
        .unwrap();

    assert!(matches!(
        executor.execute_exact_input(&p2p_config(), usdc(), usdc_native(), usdc_amount("100"), wad("1")),
        Err(SwapError::MissingRole { .. })
    ));
}

#[test]
fn test_missing_price_propagates() {
    let (_, executor) = setup();
    assert_eq!(
        executor.execute_exact_input(&p2p_config(), usdc(), usdc_native(), usdc_amount("100"), wad("1")),
        Err(SwapError::PriceNotSet { token_in: usdc(), token_out: usdc_native() })
    );
}
