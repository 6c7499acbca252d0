//! Session bootstrap
//!
//! Two once-at-startup concerns: initializing the modern rewriting
//! engine's runtime, and registering the network-interception worker.
//! Both degrade gracefully; neither failure destabilizes tab management.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nimbus_proxy::{BackendSelector, EngineConfig, EngineLoader};

use crate::error::CoreError;
use crate::Result;

/// Where the host page is being served from.
#[derive(Debug, Clone)]
pub struct OriginInfo {
    /// URL scheme including the trailing colon, e.g. `https:`
    pub protocol: String,
    pub hostname: String,
}

/// Interception-worker boundary. The worker's request-handling logic is
/// out of scope; this contract is "exists and accepts registration".
#[async_trait]
pub trait WorkerRegistrar: Send + Sync {
    /// Whether the host supports worker registration at all.
    fn capability_available(&self) -> bool;

    /// Whether this is the top-level rendering context. Nested contexts
    /// never register.
    fn is_top_level(&self) -> bool;

    fn origin(&self) -> OriginInfo;

    async fn register(&self, script: &str) -> Result<()>;
}

pub struct Bootstrap {
    runtime_initialized: AtomicBool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self {
            runtime_initialized: AtomicBool::new(false),
        }
    }

    /// Load and start the modern rewriting engine, then hand the
    /// controller to the selector. Runs once per process; later calls
    /// are no-ops.
    pub async fn init_rewrite_runtime(
        &self,
        loader: Arc<dyn EngineLoader>,
        selector: &BackendSelector,
        config: &EngineConfig,
    ) -> Result<()> {
        if self.runtime_initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("Rewrite runtime already initialized, skipping");
            return Ok(());
        }

        let engine = loader.load_modern(config).await?;
        engine.init().await?;
        selector.install_modern(engine);

        tracing::info!("Rewrite runtime initialized");
        Ok(())
    }

    /// Register the interception worker at its fixed script location.
    ///
    /// Errors here describe a configuration problem (insecure origin,
    /// missing capability); callers log them and continue without
    /// network interception.
    pub async fn register_intercept_worker(
        &self,
        registrar: &dyn WorkerRegistrar,
        script: &str,
        allowed_insecure_hostnames: &[String],
    ) -> Result<()> {
        if !registrar.is_top_level() {
            tracing::debug!("Not a top-level context, skipping worker registration");
            return Ok(());
        }

        if !registrar.capability_available() {
            let origin = registrar.origin();
            if origin.protocol != "https:"
                && !allowed_insecure_hostnames.contains(&origin.hostname)
            {
                return Err(CoreError::Config(
                    "Interception workers cannot be registered without https.".to_string(),
                ));
            }

            return Err(CoreError::Config(
                "This host doesn't support interception workers.".to_string(),
            ));
        }

        registrar.register(script).await?;
        tracing::info!(script, "Interception worker registered");
        Ok(())
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}
