//! strand-engine: Headless navigation engine for strand timelines
//!
//! This crate decides which timeline item is active and where the scroll
//! container must be, independent of any renderer:
//! - Input normalization (keys, wheel, clicks → intents)
//! - Active index state machine with debounced settling
//! - Scroll offset calculation for linear and tree layouts
//! - A single-writer scroll synchronizer

pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod item;
pub mod layout;
pub mod navigation;
pub mod scroll;
pub mod sync;
pub mod timeline;

// Re-export commonly used types
pub use clock::{Clock, DebounceTimer, ManualClock, SystemClock};
pub use config::{TimelineConfig, TimelineDocument};
pub use error::{ConfigError, TimelineError};
pub use input::{normalize, InputEvent, Intent, NavKey, Normalized};
pub use item::{ItemId, ItemRecord, TimelineItem};
pub use layout::{Axis, Geometry, LayoutMode, ModeStrategy, TitlePosition};
pub use navigation::{NavControls, NavigationState, DEFAULT_DEBOUNCE_MS};
pub use scroll::{compute_offset, scroll_target, Extents, GeometryReport, ScrollTarget};
pub use sync::{ScrollContainer, ScrollPosition, ScrollSynchronizer, ScrollViewport};
pub use timeline::{Settled, Timeline};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
