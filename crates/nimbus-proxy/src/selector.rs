//! Backend selection and encode dispatch

use parking_lot::RwLock;
use std::sync::Arc;

use nimbus_navigation::AddressNormalizer;

use crate::engine::{EngineConfig, EngineLoader, LegacyEngine, RewriteEngine};
use crate::error::ProxyError;
use crate::Result;

/// Identifier of a rewriting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendId {
    /// Modern controller-based engine
    Scram,
    /// Legacy prefix + encode-function engine
    Uv,
}

impl BackendId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Scram => "scram",
            BackendId::Uv => "uv",
        }
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendId {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scram" => Ok(BackendId::Scram),
            "uv" => Ok(BackendId::Uv),
            other => Err(ProxyError::UnknownBackend(other.to_string())),
        }
    }
}

/// Holds the active backend and the loaded engine runtimes, and
/// dispatches `encode` to whichever engine is active.
pub struct BackendSelector {
    normalizer: Arc<RwLock<AddressNormalizer>>,
    loader: Arc<dyn EngineLoader>,
    engine_config: EngineConfig,
    active: RwLock<BackendId>,
    modern: RwLock<Option<Arc<dyn RewriteEngine>>>,
    legacy: RwLock<Option<Arc<dyn LegacyEngine>>>,
}

impl BackendSelector {
    pub fn new(
        normalizer: Arc<RwLock<AddressNormalizer>>,
        loader: Arc<dyn EngineLoader>,
        engine_config: EngineConfig,
    ) -> Self {
        Self {
            normalizer,
            loader,
            engine_config,
            // Matches the pre-selection default: the legacy engine's
            // globals are what an unconfigured process encodes through.
            active: RwLock::new(BackendId::Uv),
            modern: RwLock::new(None),
            legacy: RwLock::new(None),
        }
    }

    /// Switch the active backend, loading its runtime bundle first if it
    /// has not been loaded in this process. Activation failure leaves
    /// the previous backend active.
    ///
    /// Already-loaded frames are not re-encoded by a switch.
    pub async fn activate(&self, id: BackendId) -> Result<()> {
        match id {
            BackendId::Scram => {
                if self.modern.read().is_none() {
                    let engine = self.loader.load_modern(&self.engine_config).await?;
                    // A concurrent load may have won; the duplicate is
                    // discarded.
                    let mut slot = self.modern.write();
                    if slot.is_none() {
                        *slot = Some(engine);
                    }
                }
            }
            BackendId::Uv => {
                if self.legacy.read().is_none() {
                    let engine = self.loader.load_legacy().await?;
                    let mut slot = self.legacy.write();
                    if slot.is_none() {
                        *slot = Some(engine);
                    }
                }
            }
        }

        *self.active.write() = id;
        tracing::info!(backend = %id, "Activated proxy backend");
        Ok(())
    }

    /// Store the backend selection without loading anything. Used when
    /// the runtime is supplied out of band (the bootstrapper installs
    /// the modern engine it initialized).
    pub fn set_backend(&self, id: BackendId) {
        *self.active.write() = id;
    }

    pub fn active(&self) -> BackendId {
        *self.active.read()
    }

    /// Install an already-initialized modern engine runtime.
    pub fn install_modern(&self, engine: Arc<dyn RewriteEngine>) {
        *self.modern.write() = Some(engine);
    }

    /// Install an already-present legacy engine runtime.
    pub fn install_legacy(&self, engine: Arc<dyn LegacyEngine>) {
        *self.legacy.write() = Some(engine);
    }

    /// Normalize the input and encode it with the active engine.
    ///
    /// Returns an empty string when the active engine's runtime is not
    /// available, since this is called from contexts where no session
    /// exists yet.
    pub fn encode(&self, input: &str) -> String {
        let url = self.normalizer.read().normalize(input);

        match *self.active.read() {
            BackendId::Scram => self
                .modern
                .read()
                .as_ref()
                .map(|engine| engine.encode_url(&url))
                .unwrap_or_default(),
            BackendId::Uv => self
                .legacy
                .read()
                .as_ref()
                .map(|engine| format!("{}{}", engine.prefix(), engine.encode_url(&url)))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::engine::{EngineFiles, EngineFlags};

    struct FakeModern;

    #[async_trait]
    impl RewriteEngine for FakeModern {
        async fn init(&self) -> Result<()> {
            Ok(())
        }

        fn encode_url(&self, url: &str) -> String {
            format!("/scram/{}", url)
        }
    }

    struct FakeLegacy;

    impl LegacyEngine for FakeLegacy {
        fn prefix(&self) -> &str {
            "/uv/service/"
        }

        fn encode_url(&self, url: &str) -> String {
            format!("enc({})", url)
        }
    }

    #[derive(Default)]
    struct CountingLoader {
        modern_loads: AtomicUsize,
        legacy_loads: AtomicUsize,
    }

    #[async_trait]
    impl EngineLoader for CountingLoader {
        async fn load_modern(&self, _config: &EngineConfig) -> Result<Arc<dyn RewriteEngine>> {
            self.modern_loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(FakeModern))
        }

        async fn load_legacy(&self) -> Result<Arc<dyn LegacyEngine>> {
            self.legacy_loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(FakeLegacy))
        }
    }

    fn engine_config() -> EngineConfig {
        EngineConfig {
            files: EngineFiles {
                wasm: "/scram/rewriter.wasm".to_string(),
                all: "/scram/all.js".to_string(),
                sync: "/scram/sync.js".to_string(),
            },
            flags: EngineFlags::default(),
            site_flags: HashMap::new(),
        }
    }

    fn selector(loader: Arc<CountingLoader>) -> BackendSelector {
        BackendSelector::new(
            Arc::new(RwLock::new(AddressNormalizer::new())),
            loader,
            engine_config(),
        )
    }

    #[test]
    fn test_backend_id_parse() {
        assert_eq!("scram".parse::<BackendId>().unwrap(), BackendId::Scram);
        assert_eq!("uv".parse::<BackendId>().unwrap(), BackendId::Uv);
        assert!("other".parse::<BackendId>().is_err());
    }

    #[test]
    fn test_encode_without_runtime_is_empty() {
        let sel = selector(Arc::new(CountingLoader::default()));
        assert_eq!(sel.encode("example.com"), "");
    }

    #[tokio::test]
    async fn test_legacy_encode_is_prefix_plus_encoded() {
        let sel = selector(Arc::new(CountingLoader::default()));
        sel.activate(BackendId::Uv).await.unwrap();

        assert_eq!(
            sel.encode("example.com"),
            "/uv/service/enc(http://example.com/)"
        );
    }

    #[tokio::test]
    async fn test_modern_encode_uses_controller() {
        let sel = selector(Arc::new(CountingLoader::default()));
        sel.activate(BackendId::Scram).await.unwrap();

        assert_eq!(sel.encode("example.com"), "/scram/http://example.com/");
    }

    #[tokio::test]
    async fn test_runtime_loaded_at_most_once() {
        let loader = Arc::new(CountingLoader::default());
        let sel = selector(Arc::clone(&loader));

        sel.activate(BackendId::Uv).await.unwrap();
        sel.activate(BackendId::Scram).await.unwrap();
        sel.activate(BackendId::Uv).await.unwrap();
        sel.activate(BackendId::Uv).await.unwrap();

        assert_eq!(loader.legacy_loads.load(Ordering::SeqCst), 1);
        assert_eq!(loader.modern_loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_switch_changes_dispatch() {
        let sel = selector(Arc::new(CountingLoader::default()));

        sel.activate(BackendId::Uv).await.unwrap();
        assert!(sel.encode("example.com").starts_with("/uv/service/"));

        sel.activate(BackendId::Scram).await.unwrap();
        assert!(sel.encode("example.com").starts_with("/scram/"));
        assert_eq!(sel.active(), BackendId::Scram);
    }

    #[test]
    fn test_install_modern_enables_encode() {
        let sel = selector(Arc::new(CountingLoader::default()));
        sel.install_modern(Arc::new(FakeModern));
        sel.set_backend(BackendId::Scram);

        assert_eq!(sel.encode("example.com"), "/scram/http://example.com/");
    }
}
