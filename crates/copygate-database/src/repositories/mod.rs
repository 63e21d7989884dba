//! Concrete repository implementations.

pub mod entity;
pub mod request;

pub use entity::EntityRepository;
pub use request::RequestRepository;
