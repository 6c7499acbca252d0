//! Transport coordinator

use parking_lot::RwLock;
use std::sync::Arc;

use crate::connection::{TransportConnection, TunnelArgs};
use crate::Result;

/// Known transport short names and their pinned module locations.
const TRANSPORT_PRESETS: &[(&str, &str)] = &[
    (
        "epoxy",
        "https://unpkg.com/@mercuryworkshop/epoxy-transport@2.1.27/dist/index.mjs",
    ),
    (
        "libcurl",
        "https://unpkg.com/@mercuryworkshop/libcurl-transport@1.5.0/dist/index.mjs",
    ),
];

/// Resolve a short name to its module location. Unknown values pass
/// through unchanged, the escape hatch for custom transports.
pub fn resolve_transport(value: &str) -> String {
    TRANSPORT_PRESETS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, location)| location.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Stores the desired transport module location and tunnel endpoint and
/// reconciles them onto the connection once both are known.
///
/// Apply failures propagate to the caller of the setter that triggered
/// reconciliation; the stored values are kept as the last requested
/// configuration either way. There is no automatic retry.
pub struct TransportCoordinator {
    connection: Arc<dyn TransportConnection>,
    transport_location: RwLock<Option<String>>,
    tunnel_endpoint: RwLock<Option<String>>,
}

impl TransportCoordinator {
    pub fn new(connection: Arc<dyn TransportConnection>) -> Self {
        Self {
            connection,
            transport_location: RwLock::new(None),
            tunnel_endpoint: RwLock::new(None),
        }
    }

    /// Set the transport by short name or custom module location, then
    /// attempt reconciliation.
    pub async fn set_transport(&self, value: &str) -> Result<()> {
        let location = resolve_transport(value);
        tracing::info!(transport = %location, "Setting transport");
        *self.transport_location.write() = Some(location);

        self.reconcile().await
    }

    /// Set the tunnel endpoint verbatim, then attempt reconciliation.
    pub async fn set_tunnel_endpoint(&self, value: &str) -> Result<()> {
        tracing::info!(endpoint = %value, "Setting tunnel endpoint");
        *self.tunnel_endpoint.write() = Some(value.to_string());

        self.reconcile().await
    }

    /// The resolved module location, not the short name it may have been
    /// set from. Callers that need the short name must track it
    /// themselves.
    pub fn transport(&self) -> Option<String> {
        self.transport_location.read().clone()
    }

    pub fn tunnel_endpoint(&self) -> Option<String> {
        self.tunnel_endpoint.read().clone()
    }

    /// Apply the stored configuration as a single unit. Deferred until
    /// both values are set; a half-updated configuration is never
    /// applied.
    async fn reconcile(&self) -> Result<()> {
        let location = self.transport_location.read().clone();
        let endpoint = self.tunnel_endpoint.read().clone();

        let (Some(location), Some(endpoint)) = (location, endpoint) else {
            tracing::debug!("Transport configuration incomplete, deferring apply");
            return Ok(());
        };

        tracing::info!(transport = %location, endpoint = %endpoint, "Applying transport configuration");
        self.connection
            .set_transport(&location, &[TunnelArgs { wisp: endpoint }])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransportError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingConnection {
        applied: Mutex<Vec<(String, Vec<TunnelArgs>)>>,
        fail: Mutex<bool>,
    }

    #[async_trait]
    impl TransportConnection for RecordingConnection {
        async fn set_transport(&self, location: &str, args: &[TunnelArgs]) -> Result<()> {
            if *self.fail.lock() {
                return Err(TransportError::Apply("connection refused".to_string()));
            }
            self.applied
                .lock()
                .push((location.to_string(), args.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_resolve_short_names() {
        assert!(resolve_transport("epoxy").contains("epoxy-transport"));
        assert!(resolve_transport("libcurl").contains("libcurl-transport"));
        assert_eq!(
            resolve_transport("https://example.com/custom.mjs"),
            "https://example.com/custom.mjs"
        );
    }

    #[tokio::test]
    async fn test_partial_configuration_defers() {
        let conn = Arc::new(RecordingConnection::default());
        let coordinator = TransportCoordinator::new(Arc::clone(&conn) as _);

        coordinator.set_transport("epoxy").await.unwrap();
        assert!(conn.applied.lock().is_empty());

        let other = Arc::new(RecordingConnection::default());
        let coordinator = TransportCoordinator::new(Arc::clone(&other) as _);
        coordinator
            .set_tunnel_endpoint("wss://wisp.example/")
            .await
            .unwrap();
        assert!(other.applied.lock().is_empty());
    }

    #[tokio::test]
    async fn test_applies_once_both_set_then_on_every_change() {
        let conn = Arc::new(RecordingConnection::default());
        let coordinator = TransportCoordinator::new(Arc::clone(&conn) as _);

        coordinator.set_transport("epoxy").await.unwrap();
        coordinator
            .set_tunnel_endpoint("wss://wisp.example/")
            .await
            .unwrap();
        assert_eq!(conn.applied.lock().len(), 1);

        coordinator.set_transport("libcurl").await.unwrap();
        assert_eq!(conn.applied.lock().len(), 2);

        coordinator
            .set_tunnel_endpoint("wss://other.example/")
            .await
            .unwrap();
        let applied = conn.applied.lock();
        assert_eq!(applied.len(), 3);
        assert_eq!(
            applied[2].1,
            vec![TunnelArgs {
                wisp: "wss://other.example/".to_string()
            }]
        );
        assert!(applied[2].0.contains("libcurl-transport"));
    }

    #[tokio::test]
    async fn test_apply_failure_propagates_and_keeps_values() {
        let conn = Arc::new(RecordingConnection::default());
        let coordinator = TransportCoordinator::new(Arc::clone(&conn) as _);

        coordinator.set_transport("epoxy").await.unwrap();
        *conn.fail.lock() = true;

        let result = coordinator.set_tunnel_endpoint("wss://wisp.example/").await;
        assert!(result.is_err());

        // No rollback: the stored values remain the last requested ones
        assert_eq!(
            coordinator.tunnel_endpoint().as_deref(),
            Some("wss://wisp.example/")
        );
        assert!(coordinator.transport().unwrap().contains("epoxy-transport"));

        // A later change retries the full pair
        *conn.fail.lock() = false;
        coordinator.set_transport("libcurl").await.unwrap();
        assert_eq!(conn.applied.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_getter_returns_resolved_location() {
        let conn = Arc::new(RecordingConnection::default());
        let coordinator = TransportCoordinator::new(conn as _);

        coordinator.set_transport("epoxy").await.unwrap();
        let stored = coordinator.transport().unwrap();
        assert_ne!(stored, "epoxy");
        assert!(stored.starts_with("https://"));
    }
}
