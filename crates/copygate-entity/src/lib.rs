//! # copygate-entity
//!
//! Domain entity models for CopyGate. Every row struct derives `Debug`,
//! `Clone`, `Serialize`, `Deserialize`, and `sqlx::FromRow`. The crate also
//! owns [`entity::forest::EntityForest`], the in-memory traversal index
//! over one request's entity forest.

pub mod entity;
pub mod request;
