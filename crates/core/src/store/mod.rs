//! Store module
//!
//! Configuration, retry policy and the connector that produces the pool.

mod config;
mod connector;
mod retry;

pub use config::{Dialect, StoreConfig};
pub use connector::connect_with_retry;
pub use retry::RetryPolicy;
