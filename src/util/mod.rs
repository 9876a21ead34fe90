//! Small shared utilities: identifiers and addressing constants.

pub mod ids;

pub use ids::{is_broadcast, MessageId, BROADCAST};
