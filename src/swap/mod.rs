pub mod errors;
pub mod evm;
pub mod models;
pub mod swap_executor;
