//! Nimbus Core
//!
//! Central coordination layer: configuration, the once-per-process
//! bootstrap sequence, and the `Shell` that wires tab management, proxy
//! backend selection, and transport coordination together.

mod bootstrap;
mod config;
mod error;
mod shell;

pub use bootstrap::{Bootstrap, OriginInfo, WorkerRegistrar};
pub use config::Config;
pub use error::CoreError;
pub use shell::Shell;

// Re-export core components
pub use nimbus_navigation::{AddressNormalizer, HistoryLog, HistoryRecord, NavigationError};
pub use nimbus_proxy::{
    BackendId, BackendSelector, EngineConfig, EngineFiles, EngineFlags, EngineLoader,
    LegacyEngine, ProxyError, RewriteEngine,
};
pub use nimbus_storage::{Database, StorageError};
pub use nimbus_tabs::{
    Frame, FrameHost, Tab, TabError, TabEvent, TabManager, TabState,
};
pub use nimbus_transport::{
    resolve_transport, TransportConnection, TransportCoordinator, TransportError, TunnelArgs,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
