//! Tab Manager
//!
//! Single owner of the live tab set, the focus pointer, and the address
//! bar value. All shared UI state lives here rather than in module
//! globals, so multiple independent managers can coexist under test.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use nimbus_navigation::{percent, HistoryLog};

use crate::error::TabError;
use crate::events::{EventBus, TabEvent};
use crate::frame::FrameHost;
use crate::state::TabState;
use crate::tab::Tab;
use crate::Result;

/// Initial address every new tab's frame is bound to.
pub const NEW_TAB_ADDRESS: &str = "/newtab";

/// Display-only pseudo-scheme shown for the local new-tab page.
const NEW_TAB_DISPLAY: &str = "nimbus://newtab";

pub struct TabManager {
    /// Live tabs keyed by ordinal. BTreeMap keeps focus transfer on
    /// close deterministic (lowest remaining ordinal wins).
    tabs: Arc<RwLock<BTreeMap<u64, Tab>>>,
    /// Ordinal allocator; never reset, so ordinals are never reused
    counter: Arc<AtomicU64>,
    /// Ordinal of the focused tab
    current: Arc<RwLock<Option<u64>>>,
    /// Decoded, human-readable location of the focused tab
    address_bar: Arc<RwLock<String>>,
    host: Arc<RwLock<Option<Arc<dyn FrameHost>>>>,
    history: HistoryLog,
    events: Arc<EventBus>,
    /// In-flight initialization guard: a second create request while one
    /// is under way is dropped, not queued
    initializing: Arc<AtomicBool>,
}

impl TabManager {
    pub fn new(history: HistoryLog) -> Self {
        Self {
            tabs: Arc::new(RwLock::new(BTreeMap::new())),
            counter: Arc::new(AtomicU64::new(0)),
            current: Arc::new(RwLock::new(None)),
            address_bar: Arc::new(RwLock::new(String::new())),
            host: Arc::new(RwLock::new(None)),
            history,
            events: Arc::new(EventBus::default()),
            initializing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register a lifecycle notification subscriber.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback);
    }

    /// Bind the container that will host frames. In the top-level
    /// context, ensures at least one tab exists.
    ///
    /// Returns the ordinal of the tab created here, if any. `Ok(None)`
    /// means no creation was needed or a creation was already in flight.
    pub fn attach_container(&self, host: Arc<dyn FrameHost>) -> Result<Option<u64>> {
        let top_level = host.is_top_level();
        *self.host.write() = Some(host);

        if top_level && self.tabs.read().is_empty() {
            return self.create_tab();
        }

        Ok(None)
    }

    /// Create a tab on the next ordinal, bound to the new-tab page, and
    /// focus it.
    ///
    /// Returns `Ok(None)` when dropped by the in-flight guard: a create
    /// request that arrives while another is initializing is not queued.
    pub fn create_tab(&self) -> Result<Option<u64>> {
        if self
            .initializing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Tab initialization already in flight, dropping create request");
            return Ok(None);
        }

        let result = self.create_tab_inner();
        self.initializing.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    fn create_tab_inner(&self) -> Result<u64> {
        let host = self
            .host
            .read()
            .as_ref()
            .cloned()
            .ok_or(TabError::NoContainer)?;

        let ordinal = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let frame = host.create_frame(ordinal, NEW_TAB_ADDRESS)?;
        self.tabs.write().insert(ordinal, Tab::new(ordinal, frame));

        tracing::info!(ordinal, "Created tab");
        self.events.emit(TabEvent::Created { ordinal });

        self.focus_tab(ordinal)?;
        Ok(ordinal)
    }

    /// Focus a tab: hide every other frame, show the target, move the
    /// focus pointer, and refresh the address bar from the target's live
    /// location when it is resolvable.
    ///
    /// Unknown ordinals are an error and emit nothing.
    pub fn focus_tab(&self, ordinal: u64) -> Result<()> {
        {
            let mut tabs = self.tabs.write();
            if !tabs.contains_key(&ordinal) {
                return Err(TabError::NotFound(ordinal));
            }

            for (&other, tab) in tabs.iter_mut() {
                if other == ordinal {
                    tab.frame.show();
                    tab.focus()?;
                } else {
                    tab.frame.hide();
                    tab.background()?;
                }
            }

            *self.current.write() = Some(ordinal);

            if let Some(href) = tabs.get(&ordinal).and_then(|tab| tab.frame.location()) {
                *self.address_bar.write() = display_address(&href);
            }
        }

        self.events.emit(TabEvent::Focused { ordinal });
        Ok(())
    }

    /// Close a tab and remove it from the live set permanently. If it
    /// was focused, focus transfers to the lowest remaining ordinal, or
    /// a replacement tab is created when none remain.
    ///
    /// The closed notification is emitted unconditionally, even for
    /// ordinals that are no longer (or never were) live.
    pub fn close_tab(&self, ordinal: u64) -> Result<()> {
        let removed = self.tabs.write().remove(&ordinal);

        if let Some(mut tab) = removed {
            tab.frame.detach();
            tab.close()?;
            tracing::info!(ordinal, "Closed tab");

            if *self.current.read() == Some(ordinal) {
                *self.current.write() = None;

                let next = self.tabs.read().keys().next().copied();
                match next {
                    Some(next) => self.focus_tab(next)?,
                    None => {
                        self.create_tab()?;
                    }
                }
            }
        }

        self.events.emit(TabEvent::Closed { ordinal });
        Ok(())
    }

    /// Load an (already encoded) destination into the focused frame.
    pub fn navigate_current(&self, url: &str) -> Result<()> {
        let current = self.current.read().ok_or(TabError::NoFocusedTab)?;
        let tabs = self.tabs.read();
        let tab = tabs.get(&current).ok_or(TabError::NotFound(current))?;
        tab.frame.navigate(url);
        Ok(())
    }

    /// Navigation-completion handling, fired by the frame's own load
    /// signal. Background tabs never touch shared UI state.
    pub fn handle_frame_load(&self, ordinal: u64) {
        if *self.current.read() != Some(ordinal) {
            return;
        }

        let mut address = String::new();
        let mut title = String::new();

        {
            let mut tabs = self.tabs.write();
            let Some(tab) = tabs.get_mut(&ordinal) else {
                return;
            };

            if let Some(href) = tab.frame.location() {
                address = display_address(&href);
                title = tab
                    .frame
                    .title()
                    .unwrap_or_else(|| "New Tab".to_string());
            }

            tab.title = title.clone();
        }

        // History is best-effort; a failed write never blocks navigation
        if let Err(e) = self.history.append(&address, &title) {
            tracing::error!("Failed to update history: {}", e);
        }

        self.events.emit(TabEvent::Navigated {
            ordinal,
            title,
            address: address.clone(),
        });

        // The local new-tab page shows as a pseudo-scheme, never its
        // real path
        if address == "newtab" {
            address = NEW_TAB_DISPLAY.to_string();
        }

        *self.address_bar.write() = address;
    }

    pub fn address_bar(&self) -> String {
        self.address_bar.read().clone()
    }

    pub fn current(&self) -> Option<u64> {
        *self.current.read()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.read().len()
    }

    pub fn ordinals(&self) -> Vec<u64> {
        self.tabs.read().keys().copied().collect()
    }

    pub fn tab_state(&self, ordinal: u64) -> Option<TabState> {
        self.tabs.read().get(&ordinal).map(|tab| tab.state)
    }

    pub fn tab_title(&self, ordinal: u64) -> Option<String> {
        self.tabs.read().get(&ordinal).map(|tab| tab.title.clone())
    }
}

impl Clone for TabManager {
    fn clone(&self) -> Self {
        Self {
            tabs: Arc::clone(&self.tabs),
            counter: Arc::clone(&self.counter),
            current: Arc::clone(&self.current),
            address_bar: Arc::clone(&self.address_bar),
            host: Arc::clone(&self.host),
            history: self.history.clone(),
            events: Arc::clone(&self.events),
            initializing: Arc::clone(&self.initializing),
        }
    }
}

/// Decoded display form of a frame location: the last path segment,
/// percent-decoded. Proxied locations carry the destination there.
fn display_address(href: &str) -> String {
    percent::decode(href.rsplit('/').next().unwrap_or(""))
}
