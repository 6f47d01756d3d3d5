pub mod fixtures;
pub mod tracing;

pub use fixtures::Workspace;
pub use self::tracing::{CapturedEvent, capture_events};
