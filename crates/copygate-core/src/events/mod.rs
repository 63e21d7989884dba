//! Domain events emitted to the notification service.

pub mod copy_request;

pub use copy_request::{CopyRequestEvent, EventTarget, Location, ReviewAction};
