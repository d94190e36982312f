use std::{collections::HashMap, sync::Arc};

use alloy::primitives::Address;

use crate::swap::{
    errors::SwapError,
    evm::backends::{AggregatorRouter, SinglePoolRouter},
};

/// Registry of the routers a swap config may point to, keyed by router address.
///
/// The address stored in the config custom params is resolved here at execution time, so a
/// config naming an unregistered router fails with `UnknownRouter` instead of being sent anywhere.
#[derive(Clone, Default)]
pub struct RouterRegistry {
    single_pool: HashMap<Address, Arc<dyn SinglePoolRouter>>,
    aggregators: HashMap<Address, Arc<dyn AggregatorRouter>>,
}

impl RouterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_single_pool(
        mut self,
        address: Address,
        router: Arc<dyn SinglePoolRouter>,
    ) -> Self {
        self.single_pool.insert(address, router);
        self
    }

    pub fn register_aggregator(
        mut self,
        address: Address,
        router: Arc<dyn AggregatorRouter>,
    ) -> Self {
        self.aggregators.insert(address, router);
        self
    }

    pub fn single_pool(&self, address: Address) -> Result<Arc<dyn SinglePoolRouter>, SwapError> {
        self.single_pool
            .get(&address)
            .cloned()
            .ok_or(SwapError::UnknownRouter(address))
    }

    pub fn aggregator(&self, address: Address) -> Result<Arc<dyn AggregatorRouter>, SwapError> {
        self.aggregators
            .get(&address)
            .cloned()
            .ok_or(SwapError::UnknownRouter(address))
    }
}
