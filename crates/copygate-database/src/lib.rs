//! # copygate-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the approval request and entity tables.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
