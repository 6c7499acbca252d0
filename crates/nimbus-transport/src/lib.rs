//! Nimbus Transport Coordination
//!
//! Holds the desired transport module location and tunnel endpoint, and
//! lazily re-applies them to the underlying connection whenever both are
//! known. Partial configuration is legal and simply deferred.

mod connection;
mod coordinator;
mod error;

pub use connection::{TransportConnection, TunnelArgs};
pub use coordinator::{resolve_transport, TransportCoordinator};
pub use error::TransportError;

pub type Result<T> = std::result::Result<T, TransportError>;
