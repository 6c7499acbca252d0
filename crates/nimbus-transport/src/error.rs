//! Transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to apply transport configuration: {0}")]
    Apply(String),
}
