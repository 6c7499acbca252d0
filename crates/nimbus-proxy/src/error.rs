//! Proxy error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to load engine runtime: {0}")]
    EngineLoad(String),

    #[error("Engine runtime failed to initialize: {0}")]
    EngineInit(String),

    #[error("Unknown backend identifier: {0}")]
    UnknownBackend(String),
}
