//! Frame rendering boundary
//!
//! The rendering surface (and the DOM container that hosts it) lives in
//! the UI substrate. The manager only needs this much of it.

use crate::Result;

/// One isolated rendering surface, exclusively owned by its tab.
pub trait Frame: Send + Sync {
    fn show(&self);

    fn hide(&self);

    /// Remove the surface from the container permanently.
    fn detach(&self);

    /// Point the frame at a new (already encoded) destination.
    fn navigate(&self, url: &str);

    /// The frame's live location, when resolvable. Cross-origin frames
    /// may not expose one.
    fn location(&self) -> Option<String>;

    /// Title of the currently loaded document, if any.
    fn title(&self) -> Option<String>;
}

/// The container that frames are created into.
pub trait FrameHost: Send + Sync {
    fn create_frame(&self, ordinal: u64, src: &str) -> Result<Box<dyn Frame>>;

    /// Whether this container lives in the top-level rendering context.
    /// Only the top-level context auto-creates an initial tab.
    fn is_top_level(&self) -> bool;
}
