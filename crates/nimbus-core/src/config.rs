//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use nimbus_proxy::{EngineConfig, EngineFiles, EngineFlags};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Search engine URL template (%s replaced with the query)
    pub search_template: String,
    /// Fixed location of the network-interception worker script
    pub worker_script: String,
    /// Hostnames allowed to register the worker without https
    pub allowed_insecure_hostnames: Vec<String>,
    /// Modern rewriting engine construction input
    pub engine: EngineConfig,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        // Search-engine result and consent pages are known to break
        // under the default rewriter; force the naive fallback there.
        let mut site_flags = HashMap::new();
        site_flags.insert(
            "https://www.google.com/(search|sorry).*".to_string(),
            EngineFlags {
                naive_rewriter: true,
                ..EngineFlags::default()
            },
        );

        Self {
            database_path: data_dir.join("nimbus.db"),
            search_template: "https://search.brave.com/search?q=%s".to_string(),
            worker_script: "/interceptworker.js".to_string(),
            allowed_insecure_hostnames: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            engine: EngineConfig {
                files: EngineFiles {
                    wasm: "/engine/rewriter.wasm".to_string(),
                    all: "/engine/runtime.js".to_string(),
                    sync: "/engine/sync.js".to_string(),
                },
                flags: EngineFlags::default(),
                site_flags,
            },
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Nimbus"))
            .unwrap_or_else(|| PathBuf::from(".nimbus"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
