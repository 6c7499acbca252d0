//! Rewriting-engine boundary
//!
//! The engines themselves (encode/decode algorithms, runtime injection)
//! live outside this crate. These traits are the narrow surface the
//! selector and bootstrapper program against.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::Result;

/// Resource locations handed to the modern engine's controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineFiles {
    /// Binary rewriter payload
    pub wasm: String,
    /// Aggregate runtime script
    pub all: String,
    /// Synchronization script
    pub sync: String,
}

/// Feature flags for the modern engine. All default off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineFlags {
    /// Rewriter diagnostic logging
    pub rewriter_logs: bool,
    /// Naive rewriting fallback for pages the default rewriter breaks on
    pub naive_rewriter: bool,
    /// Auto-instrumentation mode
    pub auto_instrument: bool,
}

/// Full controller construction input: resource locations, global flags,
/// and per-site overrides keyed by hostname-matching pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub files: EngineFiles,
    pub flags: EngineFlags,
    pub site_flags: HashMap<String, EngineFlags>,
}

/// The modern rewriting engine's controller.
#[async_trait]
pub trait RewriteEngine: Send + Sync {
    /// Start the controller. Called once by the bootstrapper.
    async fn init(&self) -> Result<()>;

    /// Encode a target URL into this engine's proxied form.
    fn encode_url(&self, url: &str) -> String;
}

/// The legacy rewriting engine. No init call: the presence of the
/// runtime object is the readiness signal.
pub trait LegacyEngine: Send + Sync {
    /// Path prefix prepended to every encoded URL.
    fn prefix(&self) -> &str;

    fn encode_url(&self, url: &str) -> String;
}

/// Loads engine runtime bundles on demand. Models dynamic module import;
/// implementations may suspend on network or disk.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load_modern(&self, config: &EngineConfig) -> Result<Arc<dyn RewriteEngine>>;

    /// Loads the legacy runtime bundle and its sibling configuration
    /// module as one unit.
    async fn load_legacy(&self) -> Result<Arc<dyn LegacyEngine>>;
}
