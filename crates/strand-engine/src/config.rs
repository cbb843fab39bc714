//! Configuration and input documents.
//!
//! A [`TimelineDocument`] is the JSON file a caller hands to strand: the
//! layout configuration plus the ordered item records.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::item::ItemRecord;
use crate::layout::{LayoutMode, TitlePosition};
use crate::navigation::DEFAULT_DEBOUNCE_MS;
use crate::scroll::Extents;

/// Layout configuration for one timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Layout mode.
    #[serde(default)]
    pub mode: LayoutMode,

    /// Width of one item in horizontal mode.
    #[serde(default = "default_item_width")]
    pub item_width: i64,

    /// Height of one item in vertical mode.
    #[serde(default = "default_item_height")]
    pub item_height: i64,

    /// Title placement for every item.
    #[serde(default)]
    pub title_position: TitlePosition,

    /// Quiet period before a raw index change settles.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_item_width() -> i64 {
    320
}

fn default_item_height() -> i64 {
    200
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            item_width: default_item_width(),
            item_height: default_item_height(),
            title_position: TitlePosition::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl TimelineConfig {
    /// Default configuration for the given mode.
    pub fn for_mode(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Check extents are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_width <= 0 {
            return Err(ConfigError::InvalidExtent {
                name: "item_width",
                value: self.item_width,
            });
        }
        if self.item_height <= 0 {
            return Err(ConfigError::InvalidExtent {
                name: "item_height",
                value: self.item_height,
            });
        }
        Ok(())
    }

    /// Uniform item extents for the linear modes.
    pub fn extents(&self) -> Extents {
        Extents {
            item_width: self.item_width,
            item_height: self.item_height,
        }
    }

    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// A complete timeline description: configuration plus items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDocument {
    #[serde(default)]
    pub config: TimelineConfig,

    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl TimelineDocument {
    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    /// Parse a document from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let document: Self = serde_json::from_str(content).map_err(ConfigError::Parse)?;
        document.config.validate()?;
        Ok(document)
    }

    /// Save the document as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// A small document used by `strand init`.
    pub fn sample() -> Self {
        let items = [
            ("1969", "Apollo 11 lands on the Moon."),
            ("1971", "Intel ships the 4004 microprocessor."),
            ("1983", "ARPANET switches to TCP/IP."),
            ("1991", "The first web page goes online."),
            ("2015", "Rust 1.0 is released.\nStability as a deliverable."),
        ]
        .into_iter()
        .map(|(title, content)| ItemRecord::new(title, content))
        .collect();

        Self {
            config: TimelineConfig::default(),
            items,
        }
    }
}
