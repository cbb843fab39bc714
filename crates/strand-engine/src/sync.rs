//! Scroll synchronization.
//!
//! [`ScrollSynchronizer`] is the only owner of a mutable scroll container.
//! Everything else sees the container through [`ScrollViewport`], which
//! has no setters.

use tracing::debug;

use crate::layout::{Axis, LayoutMode};

/// Read-only view of a scroll container.
pub trait ScrollViewport {
    fn scroll_left(&self) -> i64;
    fn scroll_top(&self) -> i64;
}

/// Write capability on a scroll container.
pub trait ScrollContainer: ScrollViewport {
    fn set_scroll_left(&mut self, offset: i64);
    fn set_scroll_top(&mut self, offset: i64);
}

/// Plain scroll position, clamped at zero like a browser container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    left: i64,
    top: i64,
}

impl ScrollPosition {
    pub fn new(left: i64, top: i64) -> Self {
        Self {
            left: left.max(0),
            top: top.max(0),
        }
    }
}

impl ScrollViewport for ScrollPosition {
    fn scroll_left(&self) -> i64 {
        self.left
    }

    fn scroll_top(&self) -> i64 {
        self.top
    }
}

impl ScrollContainer for ScrollPosition {
    fn set_scroll_left(&mut self, offset: i64) {
        self.left = offset.max(0);
    }

    fn set_scroll_top(&mut self, offset: i64) {
        self.top = offset.max(0);
    }
}

/// Writes computed offsets to the container along the mode's axis.
#[derive(Debug)]
pub struct ScrollSynchronizer<S = ScrollPosition> {
    container: S,
    axis: Axis,
}

impl<S: ScrollContainer> ScrollSynchronizer<S> {
    pub fn new(container: S, mode: LayoutMode) -> Self {
        Self {
            container,
            axis: mode.axis(),
        }
    }

    /// Shared access to the container. Writes go through [`Self::apply`].
    pub fn viewport(&self) -> &S {
        &self.container
    }

    /// Current offset along the written axis.
    pub fn current(&self) -> i64 {
        match self.axis {
            Axis::X => self.container.scroll_left(),
            Axis::Y => self.container.scroll_top(),
        }
    }

    /// Write `offset` to the container. Returns `true` if anything changed.
    pub fn apply(&mut self, offset: i64) -> bool {
        if offset == self.current() {
            return false;
        }
        match self.axis {
            Axis::X => self.container.set_scroll_left(offset),
            Axis::Y => self.container.set_scroll_top(offset),
        }
        debug!(axis = ?self.axis, offset, actual = self.current(), "scroll written");
        true
    }
}
