//! # copygate-core
//!
//! Core crate for CopyGate. Contains configuration schemas, shared value
//! types, domain events, the upstream-collaborator traits, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other CopyGate crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
