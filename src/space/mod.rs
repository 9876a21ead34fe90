//! The `Space`: agent membership, lifecycle, and the pluggable transport
//! agents are wired to.

pub mod amqp;
pub mod client;
pub mod config;
pub mod local;
mod space;
pub mod transport;

pub use amqp::AmqpTransport;
pub use client::ExternalClient;
pub use config::{AmqpConfig, SpaceConfig, SpaceConfigBuilder};
pub use local::LocalTransport;
pub use space::Space;
pub use transport::{Transport, TransportError};
