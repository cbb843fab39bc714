//! Scroll offset calculation.
//!
//! Linear modes compute the offset from the index. Tree mode takes it from
//! the geometry the active item reports after it has been laid out.

use crate::layout::{Geometry, LayoutMode};

/// Geometry reported upward by an item once it has rendered as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryReport {
    /// Index of the reporting item.
    pub index: usize,
    /// Distance from the top of the scroll container.
    pub offset_top: i64,
    /// Adjustment chosen by the item, e.g. to center itself.
    pub element_offset: i64,
    /// Rendered height of the item.
    pub element_height: i64,
}

/// Where the container should scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Uniform items laid out edge to edge.
    Linear { index: usize, extent: i64 },
    /// Offset measured by the item itself.
    Measured(GeometryReport),
}

impl ScrollTarget {
    /// Absolute offset for this target.
    pub fn offset(&self) -> i64 {
        match *self {
            Self::Linear { index, extent } => {
                i64::try_from(index).unwrap_or(i64::MAX).saturating_mul(extent)
            }
            Self::Measured(report) => report.offset_top.saturating_add(report.element_offset),
        }
    }
}

/// Per-item extents for the linear modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extents {
    pub item_width: i64,
    pub item_height: i64,
}

impl Extents {
    /// Extent along the scroll axis of `mode`, or `None` for measured modes.
    pub fn along(&self, mode: LayoutMode) -> Option<i64> {
        match mode {
            LayoutMode::Horizontal => Some(self.item_width),
            LayoutMode::Vertical => Some(self.item_height),
            LayoutMode::Tree => None,
        }
    }
}

/// Build the scroll target for the settled index.
///
/// Returns `None` when the mode needs measured geometry and none is
/// available for `settled`; the caller keeps its previous offset.
pub fn scroll_target(
    mode: LayoutMode,
    settled: usize,
    extents: Extents,
    geometry: Option<&GeometryReport>,
) -> Option<ScrollTarget> {
    match mode.strategy().geometry {
        Geometry::Uniform => extents.along(mode).map(|extent| ScrollTarget::Linear {
            index: settled,
            extent,
        }),
        Geometry::Measured => geometry
            .filter(|report| report.index == settled)
            .copied()
            .map(ScrollTarget::Measured),
    }
}

/// Offset the container must adopt, if it can be computed yet.
pub fn compute_offset(
    mode: LayoutMode,
    settled: usize,
    extents: Extents,
    geometry: Option<&GeometryReport>,
) -> Option<i64> {
    scroll_target(mode, settled, extents, geometry).map(|target| target.offset())
}
