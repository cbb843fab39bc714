//! Timeline pane rendering.
//!
//! This module provides:
//! - [`ViewLayout`] - Layout pass mapping items and scroll position to cells
//! - [`TimelineWidget`] - Widget for the pane in every layout mode
//! - [`ControlsWidget`] - Previous/next buttons and position counter

mod controls;
mod layout;
mod widget;

pub use controls::{button_rects, ControlsWidget, NEXT_LABEL, PREVIOUS_LABEL};
pub use layout::{
    tree_text_width, wrap_body, Slot, ViewLayout, CONTROLS_HEIGHT, MIN_CARD_COLS, MIN_CARD_ROWS,
};
pub use widget::{truncate_to_width, TimelineWidget};
