//! Transport connection boundary
//!
//! The wire-level tunneling protocol is out of scope; this is the single
//! call the coordinator makes against it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Endpoint record handed to the connection alongside the module
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelArgs {
    /// Tunnel endpoint URL
    pub wisp: String,
}

#[async_trait]
pub trait TransportConnection: Send + Sync {
    /// Apply a transport module and its endpoint arguments as one unit.
    /// May suspend on connection setup. Must be idempotent under
    /// repeated identical application.
    async fn set_transport(&self, location: &str, args: &[TunnelArgs]) -> Result<()>;
}
