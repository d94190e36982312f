pub mod backends;
pub mod codecs;
pub mod constants;
pub mod executor_builder;
pub mod fixed_point;
pub mod swap_executors;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing_utils;
pub mod utils;
