//! Core library for the todo service
//!
//! This crate contains everything below the HTTP layer:
//! - Task model and update patches
//! - The task repository interface and its SQL implementation
//! - Store configuration and the retrying connector

pub mod error;
pub mod store;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
