//! HTTP handlers, organized by domain.

pub mod health;
pub mod request;
pub mod review;
