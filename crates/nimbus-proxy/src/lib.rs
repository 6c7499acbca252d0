//! Nimbus Proxy Backend Selection
//!
//! The two rewriting engines are independent third-party runtimes with
//! incompatible contracts: the modern one is a constructed controller,
//! the legacy one a process-wide prefix plus encode function. This crate
//! adapts both into a single `encode` contract behind a tagged variant,
//! so adding an engine means one variant and one dispatch arm.

mod engine;
mod error;
mod selector;

pub use engine::{EngineConfig, EngineFiles, EngineFlags, EngineLoader, LegacyEngine, RewriteEngine};
pub use error::ProxyError;
pub use selector::{BackendId, BackendSelector};

pub type Result<T> = std::result::Result<T, ProxyError>;
