//! Layout modes and the per-mode strategy table.
//!
//! Every mode-dependent decision (which arrow keys navigate, which scroll
//! axis is written, whether geometry is uniform or measured) is read from
//! [`ModeStrategy`]. Adding a mode means adding one table entry.

use serde::{Deserialize, Serialize};

use crate::input::NavKey;

/// How the timeline lays out its items. Fixed for the life of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Items side by side, scrolled horizontally.
    #[default]
    Horizontal,
    /// Items stacked, scrolled vertically.
    Vertical,
    /// Alternating branches with content-dependent heights.
    Tree,
}

/// Scroll axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `scrollLeft`.
    X,
    /// `scrollTop`.
    Y,
}

/// Where item extents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// All items share one configured extent; offset is arithmetic.
    Uniform,
    /// Items measure themselves and report upward once rendered.
    Measured,
}

/// Per-mode behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStrategy {
    pub axis: Axis,
    pub geometry: Geometry,
    pub next_key: NavKey,
    pub prev_key: NavKey,
}

const HORIZONTAL: ModeStrategy = ModeStrategy {
    axis: Axis::X,
    geometry: Geometry::Uniform,
    next_key: NavKey::Right,
    prev_key: NavKey::Left,
};

const VERTICAL: ModeStrategy = ModeStrategy {
    axis: Axis::Y,
    geometry: Geometry::Uniform,
    next_key: NavKey::Down,
    prev_key: NavKey::Up,
};

const TREE: ModeStrategy = ModeStrategy {
    axis: Axis::Y,
    geometry: Geometry::Measured,
    next_key: NavKey::Down,
    prev_key: NavKey::Up,
};

impl LayoutMode {
    /// All modes, in display order.
    pub const ALL: [LayoutMode; 3] = [Self::Horizontal, Self::Vertical, Self::Tree];

    /// Strategy entry for this mode.
    pub const fn strategy(self) -> &'static ModeStrategy {
        match self {
            Self::Horizontal => &HORIZONTAL,
            Self::Vertical => &VERTICAL,
            Self::Tree => &TREE,
        }
    }

    /// Scroll axis written by the synchronizer.
    pub const fn axis(self) -> Axis {
        self.strategy().axis
    }

    /// Whether items are uniformly sized in this mode.
    pub fn is_linear(self) -> bool {
        self.strategy().geometry == Geometry::Uniform
    }

    /// Lowercase name, as used in documents and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Tree => "tree",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "tree" => Ok(Self::Tree),
            other => Err(format!("unknown layout mode: {other}")),
        }
    }
}

/// Where an item's title sits relative to its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TitlePosition {
    #[default]
    Top,
    Bottom,
}

impl std::str::FromStr for TitlePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(format!("unknown title position: {other}")),
        }
    }
}
