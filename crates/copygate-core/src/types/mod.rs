//! Shared value types used across crates.

pub mod node;
pub mod pagination;
pub mod pipeline;
pub mod sorting;

pub use node::{Node, NodeKind, NodeStatus};
pub use pagination::{PageRequest, PageResponse};
pub use pipeline::CopyJob;
pub use sorting::{EntityOrderBy, SortDirection};
