//! Layout pass for the timeline view.
//!
//! Runs before every draw. Places each item in content space along the
//! scroll axis, maps the engine's scroll position onto the viewport, and
//! measures the active item for tree mode.

use ratatui::layout::{Position, Rect};
use strand_engine::{
    Clock, GeometryReport, LayoutMode, ScrollViewport, Timeline, TimelineItem, TitlePosition,
};

use super::controls::button_rects;
use crate::metrics::{px_to_cols, px_to_rows, rows_to_px};

/// Height of the control bar under the timeline pane.
pub const CONTROLS_HEIGHT: u16 = 1;

/// Narrowest card in horizontal mode, in columns.
pub const MIN_CARD_COLS: i64 = 8;

/// Shortest card in vertical mode, in rows.
pub const MIN_CARD_ROWS: i64 = 3;

/// One item placed in content space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    /// Start along the scroll axis, in cells.
    pub start: i64,
    /// Extent along the scroll axis, in cells. Includes the trailing gap.
    pub extent: i64,
    /// Content wrapped to the item's text width.
    pub body: Vec<String>,
}

impl Slot {
    /// Cells actually covered by the item, without the trailing gap.
    pub fn occupied(&self) -> i64 {
        (self.extent - 1).max(1)
    }
}

/// Result of the layout pass.
#[derive(Debug, Clone)]
pub struct ViewLayout {
    pub mode: LayoutMode,
    pub title_position: TitlePosition,
    /// Bordered timeline pane.
    pub frame: Rect,
    /// Area inside the border where items are drawn.
    pub viewport: Rect,
    /// Control bar.
    pub controls: Rect,
    pub previous_button: Rect,
    pub next_button: Rect,
    pub slots: Vec<Slot>,
    /// Extent of one item in engine pixels along the axis. Zero in tree mode.
    pub item_px: i64,
    /// Scroll along the axis in cells, clamped to the content.
    pub scroll: i64,
}

impl ViewLayout {
    /// Lay out `timeline` inside `area`.
    pub fn compute<C: Clock>(timeline: &Timeline<C>, area: Rect) -> Self {
        let pane_height = area.height.saturating_sub(CONTROLS_HEIGHT);
        let frame = Rect::new(area.x, area.y, area.width, pane_height);
        let viewport = Rect::new(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            frame.width.saturating_sub(2),
            frame.height.saturating_sub(2),
        );
        let controls = Rect::new(
            area.x,
            area.y + pane_height,
            area.width,
            area.height.min(CONTROLS_HEIGHT),
        );
        let (previous_button, next_button) = button_rects(controls);

        let config = timeline.config();
        let mode = config.mode;
        let (slots, item_px) = match mode {
            LayoutMode::Horizontal => {
                let card = px_to_cols(config.item_width).max(MIN_CARD_COLS);
                let slots = uniform_slots(timeline.items(), card, card - 2);
                (slots, config.item_width)
            }
            LayoutMode::Vertical => {
                let card = px_to_rows(config.item_height).max(MIN_CARD_ROWS);
                let slots = uniform_slots(timeline.items(), card, i64::from(viewport.width) - 4);
                (slots, config.item_height)
            }
            LayoutMode::Tree => (tree_slots(timeline.items(), tree_text_width(viewport)), 0),
        };

        let mut view = Self {
            mode,
            title_position: config.title_position,
            frame,
            viewport,
            controls,
            previous_button,
            next_button,
            slots,
            item_px,
            scroll: 0,
        };
        view.sync_scroll(&timeline.scroll_position());
        view
    }

    /// Map the container's scroll position onto the viewport.
    pub fn sync_scroll(&mut self, position: &impl ScrollViewport) {
        let raw = match self.mode {
            LayoutMode::Horizontal => self.card_scroll(position.scroll_left()),
            LayoutMode::Vertical => self.card_scroll(position.scroll_top()),
            LayoutMode::Tree => px_to_rows(position.scroll_top()),
        };
        let max = (self.content_len() - self.viewport_len()).max(0);

        self.scroll = match self.mode {
            // Keep cards column-aligned so none starts off the left edge.
            LayoutMode::Horizontal => {
                let card = self.slots.first().map_or(1, |slot| slot.extent);
                raw.min(round_up(max, card))
            }
            LayoutMode::Vertical | LayoutMode::Tree => raw.min(max),
        };
    }

    /// Scale a linear-mode pixel offset from item extents to card extents.
    ///
    /// Cards are whole cells and never narrower than the minimum, so the
    /// pixel extent does not convert to cells exactly. An offset of
    /// `index * item_px` always lands on the start of card `index`.
    fn card_scroll(&self, offset: i64) -> i64 {
        let card = self.slots.first().map_or(0, |slot| slot.extent);
        if self.item_px <= 0 || card <= 0 {
            return 0;
        }
        let cells = i128::from(offset.max(0)) * i128::from(card) / i128::from(self.item_px);
        i64::try_from(cells).unwrap_or(i64::MAX)
    }

    /// Total content length along the scroll axis, in cells.
    pub fn content_len(&self) -> i64 {
        self.slots
            .last()
            .map_or(0, |slot| slot.start.saturating_add(slot.extent))
    }

    /// Viewport length along the scroll axis, in cells.
    pub fn viewport_len(&self) -> i64 {
        match self.mode {
            LayoutMode::Horizontal => i64::from(self.viewport.width),
            LayoutMode::Vertical | LayoutMode::Tree => i64::from(self.viewport.height),
        }
    }

    /// Screen rect of a slot, clipped to the viewport.
    ///
    /// Horizontal cards that start left of the viewport are not drawn and
    /// have no rect.
    pub fn slot_rect(&self, slot: &Slot) -> Option<Rect> {
        let pos = slot.start - self.scroll;
        let len = self.viewport_len();
        match self.mode {
            LayoutMode::Horizontal => {
                if pos < 0 || pos >= len {
                    return None;
                }
                let width = slot.extent.min(len - pos);
                Some(Rect::new(
                    self.viewport.x + to_u16(pos),
                    self.viewport.y,
                    to_u16(width),
                    self.viewport.height,
                ))
            }
            LayoutMode::Vertical | LayoutMode::Tree => {
                let top = pos.max(0);
                let bottom = pos.saturating_add(slot.occupied()).min(len);
                if top >= bottom {
                    return None;
                }
                Some(Rect::new(
                    self.viewport.x,
                    self.viewport.y + to_u16(top),
                    self.viewport.width,
                    to_u16(bottom - top),
                ))
            }
        }
    }

    /// Index of the item drawn at a screen cell.
    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.slots
            .iter()
            .find(|slot| {
                self.slot_rect(slot)
                    .is_some_and(|rect| rect.contains(position))
            })
            .map(|slot| slot.index)
    }

    /// Geometry of item `index` as reported to the engine in tree mode.
    ///
    /// The element offset centers the item in the viewport when it fits.
    pub fn geometry_report(&self, index: usize) -> Option<GeometryReport> {
        if self.mode != LayoutMode::Tree {
            return None;
        }
        let slot = self.slots.get(index)?;
        let height = slot.occupied();
        let slack = (i64::from(self.viewport.height) - height).max(0);

        Some(GeometryReport {
            index,
            offset_top: rows_to_px(slot.start),
            element_offset: -rows_to_px(slack / 2),
            element_height: rows_to_px(height),
        })
    }
}

/// Text column width on each side of the tree's center line.
pub fn tree_text_width(viewport: Rect) -> i64 {
    (i64::from(viewport.width) / 2 - 3).max(4)
}

fn uniform_slots(items: &[TimelineItem], extent: i64, text_width: i64) -> Vec<Slot> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Slot {
            index,
            start: to_i64(index).saturating_mul(extent),
            extent,
            body: wrap_body(&item.content, text_width),
        })
        .collect()
}

fn tree_slots(items: &[TimelineItem], text_width: i64) -> Vec<Slot> {
    let mut start = 0;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let body = wrap_body(&item.content, text_width);
            // title + body + gap
            let extent = to_i64(body.len()) + 2;
            let slot = Slot {
                index,
                start,
                extent,
                body,
            };
            start = start.saturating_add(extent);
            slot
        })
        .collect()
}

/// Wrap item content to `width` columns. Empty content yields no lines.
pub fn wrap_body(content: &str, width: i64) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let width = usize::try_from(width.max(1)).unwrap_or(1);
    textwrap::wrap(content, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

fn round_up(value: i64, step: i64) -> i64 {
    if step <= 0 {
        return value;
    }
    value.saturating_add(step - 1) / step * step
}

fn to_u16(value: i64) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
