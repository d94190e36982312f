// This module is used in integration tests as well
use std::sync::Mutex;

use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};

use crate::swap::{
    errors::SwapError,
    evm::backends::{
        interfaces::ISwapRouter::{ExactInputSingleParams, ExactOutputSingleParams},
        AggregatorRouter, SinglePoolRouter,
    },
    models::PaddedRoute,
};

/// Single pool router returning fixed amounts, whatever the params.
///
/// It does not enforce `amountOutMinimum` nor `amountInMaximum`, so the caller's own slippage
/// checks can be observed. Every call is recorded with its caller.
#[derive(Debug, Default)]
pub struct MockSinglePoolRouter {
    pub amount_out: U256,
    pub amount_in: U256,
    exact_input_calls: Mutex<Vec<(Address, ExactInputSingleParams)>>,
    exact_output_calls: Mutex<Vec<(Address, ExactOutputSingleParams)>>,
}

impl MockSinglePoolRouter {
    pub fn new(amount_out: U256, amount_in: U256) -> Self {
        Self { amount_out, amount_in, ..Default::default() }
    }

    pub fn exact_input_calls(&self) -> Vec<(Address, ExactInputSingleParams)> {
        self.exact_input_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn exact_output_calls(&self) -> Vec<(Address, ExactOutputSingleParams)> {
        self.exact_output_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SinglePoolRouter for MockSinglePoolRouter {
    fn exact_input_single(
        &self,
        caller: Address,
        params: ExactInputSingleParams,
    ) -> Result<U256, SwapError> {
        self.exact_input_calls
            .lock()
            .map_err(|_| SwapError::FatalError("Mock lock poisoned".to_string()))?
            .push((caller, params));
        Ok(self.amount_out)
    }

    fn exact_output_single(
        &self,
        caller: Address,
        params: ExactOutputSingleParams,
    ) -> Result<U256, SwapError> {
        self.exact_output_calls
            .lock()
            .map_err(|_| SwapError::FatalError("Mock lock poisoned".to_string()))?
            .push((caller, params));
        Ok(self.amount_in)
    }
}

/// An `exchange` call received by [`MockAggregator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeCall {
    pub caller: Address,
    pub route: PaddedRoute,
    pub amount: U256,
    pub min_dy: U256,
    pub receiver: Address,
    /// ABI encoded `exchange` calldata, as it would be sent to the Curve router.
    pub calldata: Vec<u8>,
}

/// Aggregator returning `amount_out` from `exchange` and quoting `dx` from `get_dx`.
///
/// Like [`MockSinglePoolRouter`] it does not enforce `min_dy`.
#[derive(Debug, Default)]
pub struct MockAggregator {
    pub amount_out: U256,
    pub dx: U256,
    exchange_calls: Mutex<Vec<ExchangeCall>>,
    get_dx_calls: Mutex<Vec<(PaddedRoute, U256)>>,
}

impl MockAggregator {
    pub fn new(amount_out: U256, dx: U256) -> Self {
        Self { amount_out, dx, ..Default::default() }
    }

    pub fn exchange_calls(&self) -> Vec<ExchangeCall> {
        self.exchange_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn get_dx_calls(&self) -> Vec<(PaddedRoute, U256)> {
        self.get_dx_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl AggregatorRouter for MockAggregator {
    fn exchange(
        &self,
        caller: Address,
        route: &PaddedRoute,
        amount: U256,
        min_dy: U256,
        receiver: Address,
    ) -> Result<U256, SwapError> {
        let calldata = route
            .exchange_call(amount, min_dy, receiver)?
            .abi_encode();
        self.exchange_calls
            .lock()
            .map_err(|_| SwapError::FatalError("Mock lock poisoned".to_string()))?
            .push(ExchangeCall {
                caller,
                route: route.clone(),
                amount,
                min_dy,
                receiver,
                calldata,
            });
        Ok(self.amount_out)
    }

    fn get_dx(&self, route: &PaddedRoute, amount_out: U256) -> Result<U256, SwapError> {
        self.get_dx_calls
            .lock()
            .map_err(|_| SwapError::FatalError("Mock lock poisoned".to_string()))?
            .push((route.clone(), amount_out));
        Ok(self.dx)
    }
}
