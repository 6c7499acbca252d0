//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(u64),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("No frame container attached")]
    NoContainer,

    #[error("No tab is focused")]
    NoFocusedTab,

    #[error("Frame host error: {0}")]
    Host(String),
}
