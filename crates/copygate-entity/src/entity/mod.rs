//! Request-scoped entity rows and the forest index over them.

pub mod forest;
pub mod model;

pub use forest::EntityForest;
pub use model::{CopyStatus, CreateEntity, Entity, EntityKind, ParentLink, ReviewStatus};
