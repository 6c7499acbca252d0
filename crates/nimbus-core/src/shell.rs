//! Top-level orchestration shell
//!
//! Owns every coordinator and wires them together. The UI substrate
//! supplies the boundary objects (frame host, engine loader, transport
//! connection, worker registrar) and subscribes to tab events; all
//! state flows through here.

use parking_lot::RwLock;
use std::sync::Arc;

use nimbus_navigation::{AddressNormalizer, HistoryLog, HistoryRecord};
use nimbus_proxy::{BackendId, BackendSelector, EngineLoader};
use nimbus_storage::Database;
use nimbus_tabs::{FrameHost, TabEvent, TabManager};
use nimbus_transport::{TransportConnection, TransportCoordinator};

use crate::bootstrap::{Bootstrap, WorkerRegistrar};
use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Shell {
    config: Config,
    db: Database,
    normalizer: Arc<RwLock<AddressNormalizer>>,
    history: HistoryLog,
    tab_manager: TabManager,
    selector: Arc<BackendSelector>,
    coordinator: Arc<TransportCoordinator>,
    bootstrap: Arc<Bootstrap>,
    loader: Arc<dyn EngineLoader>,
}

impl Shell {
    pub fn new(
        config: Config,
        loader: Arc<dyn EngineLoader>,
        connection: Arc<dyn TransportConnection>,
    ) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::open(&config.database_path)?;

        let normalizer = Arc::new(RwLock::new(AddressNormalizer::with_search_template(
            config.search_template.clone(),
        )));
        let history = HistoryLog::new(db.clone());
        let tab_manager = TabManager::new(history.clone());
        let selector = Arc::new(BackendSelector::new(
            Arc::clone(&normalizer),
            Arc::clone(&loader),
            config.engine.clone(),
        ));
        let coordinator = Arc::new(TransportCoordinator::new(connection));

        Ok(Self {
            config,
            db,
            normalizer,
            history,
            tab_manager,
            selector,
            coordinator,
            bootstrap: Arc::new(Bootstrap::new()),
            loader,
        })
    }

    /// Run the startup sequence: apply persisted settings, initialize
    /// the rewrite runtime, and register the interception worker.
    ///
    /// Bootstrap failures are logged, never escalated; the shell stays
    /// usable in degraded mode without them.
    pub async fn initialize(&self, registrar: Option<&dyn WorkerRegistrar>) -> Result<()> {
        if let Some(template) = self.db.get_setting("search_template")? {
            self.normalizer.write().set_search_template(template);
        }

        if let Err(e) = self
            .bootstrap
            .init_rewrite_runtime(Arc::clone(&self.loader), &self.selector, &self.config.engine)
            .await
        {
            tracing::error!("Failed to initialize rewrite runtime: {}", e);
        }

        if let Some(registrar) = registrar {
            if let Err(e) = self
                .bootstrap
                .register_intercept_worker(
                    registrar,
                    &self.config.worker_script,
                    &self.config.allowed_insecure_hostnames,
                )
                .await
            {
                tracing::error!("Failed to register interception worker: {}", e);
            }
        }

        tracing::info!("Shell initialized");
        Ok(())
    }

    // === Tab operations ===

    pub fn tab_manager(&self) -> &TabManager {
        &self.tab_manager
    }

    pub fn attach_container(&self, host: Arc<dyn FrameHost>) -> Result<Option<u64>> {
        Ok(self.tab_manager.attach_container(host)?)
    }

    pub fn create_tab(&self) -> Result<Option<u64>> {
        Ok(self.tab_manager.create_tab()?)
    }

    pub fn focus_tab(&self, ordinal: u64) -> Result<()> {
        Ok(self.tab_manager.focus_tab(ordinal)?)
    }

    pub fn close_tab(&self, ordinal: u64) -> Result<()> {
        Ok(self.tab_manager.close_tab(ordinal)?)
    }

    pub fn handle_frame_load(&self, ordinal: u64) {
        self.tab_manager.handle_frame_load(ordinal);
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.tab_manager.subscribe(callback);
    }

    pub fn address_bar(&self) -> String {
        self.tab_manager.address_bar()
    }

    pub fn current_tab(&self) -> Option<u64> {
        self.tab_manager.current()
    }

    /// Encode user input with the active backend and load it into the
    /// focused frame.
    pub fn open(&self, input: &str) -> Result<()> {
        let encoded = self.selector.encode(input);
        if encoded.is_empty() {
            return Err(CoreError::NotInitialized);
        }

        self.tab_manager.navigate_current(&encoded)?;
        Ok(())
    }

    // === Proxy backend operations ===

    pub fn encode(&self, input: &str) -> String {
        self.selector.encode(input)
    }

    pub async fn activate_backend(&self, id: BackendId) -> Result<()> {
        Ok(self.selector.activate(id).await?)
    }

    pub fn active_backend(&self) -> BackendId {
        self.selector.active()
    }

    // === Transport operations ===

    pub async fn set_transport(&self, value: &str) -> Result<()> {
        Ok(self.coordinator.set_transport(value).await?)
    }

    pub async fn set_tunnel_endpoint(&self, value: &str) -> Result<()> {
        Ok(self.coordinator.set_tunnel_endpoint(value).await?)
    }

    pub fn transport(&self) -> Option<String> {
        self.coordinator.transport()
    }

    pub fn tunnel_endpoint(&self) -> Option<String> {
        self.coordinator.tunnel_endpoint()
    }

    // === Navigation operations ===

    pub fn normalize(&self, input: &str) -> String {
        self.normalizer.read().normalize(input)
    }

    pub fn recent_history(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        Ok(self.history.entries(limit)?)
    }

    pub fn clear_history(&self) -> Result<()> {
        Ok(self.history.clear()?)
    }

    pub fn search_template(&self) -> String {
        self.normalizer.read().search_template().to_string()
    }

    pub fn set_search_template(&self, template: String) -> Result<()> {
        self.normalizer
            .write()
            .set_search_template(template.clone());
        self.db.set_setting("search_template", &template)?;
        Ok(())
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for Shell {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            normalizer: Arc::clone(&self.normalizer),
            history: self.history.clone(),
            tab_manager: self.tab_manager.clone(),
            selector: Arc::clone(&self.selector),
            coordinator: Arc::clone(&self.coordinator),
            bootstrap: Arc::clone(&self.bootstrap),
            loader: Arc::clone(&self.loader),
        }
    }
}
