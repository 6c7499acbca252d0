//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] nimbus_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] nimbus_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] nimbus_navigation::NavigationError),

    #[error("Proxy error: {0}")]
    Proxy(#[from] nimbus_proxy::ProxyError),

    #[error("Transport error: {0}")]
    Transport(#[from] nimbus_transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Proxy backend not initialized")]
    NotInitialized,
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
