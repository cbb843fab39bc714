//! Timeline widget for rendering items in each layout mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use strand_engine::{Clock, LayoutMode, Timeline, TimelineItem, TitlePosition};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::controls::ControlsWidget;
use super::layout::{tree_text_width, Slot, ViewLayout};
use crate::theme::Theme;

const ACTIVE_MARKER: &str = "\u{25c6}"; // ◆
const MARKER: &str = "\u{25cf}"; // ●
const LINE_V: &str = "\u{2502}"; // │
const LINE_H: &str = "\u{2500}"; // ─

/// Timeline pane plus control bar.
pub struct TimelineWidget<'a, C: Clock> {
    timeline: &'a Timeline<C>,
    view: &'a ViewLayout,
    theme: &'a Theme,
}

impl<'a, C: Clock> TimelineWidget<'a, C> {
    pub fn new(timeline: &'a Timeline<C>, view: &'a ViewLayout, theme: &'a Theme) -> Self {
        Self {
            timeline,
            view,
            theme,
        }
    }

    fn marker(&self, item: &TimelineItem) -> (&'static str, Style) {
        if item.active {
            (ACTIVE_MARKER, Style::default().fg(self.theme.primary))
        } else {
            (MARKER, Style::default().fg(self.theme.muted))
        }
    }

    fn title_style(&self, item: &TimelineItem) -> Style {
        if item.active {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        }
    }

    fn body_style(&self, item: &TimelineItem) -> Style {
        if item.active {
            Style::default().fg(self.theme.text)
        } else {
            Style::default().fg(self.theme.subtext)
        }
    }

    fn line_style(&self) -> Style {
        Style::default().fg(self.theme.muted)
    }

    /// Cards side by side on a horizontal outline.
    fn render_horizontal(&self, buf: &mut Buffer) {
        let area = self.view.viewport;
        let mid = area.y + area.height / 2;
        buf.set_string(
            area.x,
            mid,
            LINE_H.repeat(area.width as usize),
            self.line_style(),
        );

        for slot in &self.view.slots {
            let Some(rect) = self.view.slot_rect(slot) else {
                continue;
            };
            let item = &self.timeline.items()[slot.index];
            let text_x = rect.x + 1;
            let text_w = usize::from(rect.width.saturating_sub(2));

            let half = u16::try_from(slot.extent / 2).unwrap_or(u16::MAX);
            let center = rect.x.saturating_add(half);
            if center < rect.right() {
                let (marker, style) = self.marker(item);
                buf.set_string(center, mid, marker, style);
            }

            let below = (mid + 1)..area.bottom();
            let above = area.y..mid;
            let (title_row, body_rows): (Option<u16>, Vec<u16>) = match self.view.title_position {
                TitlePosition::Top => (above.last(), below.collect()),
                TitlePosition::Bottom => {
                    let rows: Vec<_> = above.collect();
                    let keep = rows.len().min(slot.body.len());
                    (below.min(), rows[rows.len() - keep..].to_vec())
                }
            };

            if let Some(row) = title_row {
                let title = truncate_to_width(&item.title, text_w);
                buf.set_string(text_x, row, title, self.title_style(item));
            }
            for (row, line) in body_rows.into_iter().zip(&slot.body) {
                let line = truncate_to_width(line, text_w);
                buf.set_string(text_x, row, line, self.body_style(item));
            }
        }
    }

    /// Cards stacked along a vertical rail on the left.
    fn render_vertical(&self, buf: &mut Buffer) {
        let area = self.view.viewport;
        let rail_x = area.x + 1;
        let text_x = area.x + 3;
        let text_w = usize::from(area.width.saturating_sub(4));
        let last = self.view.slots.len().saturating_sub(1);
        let visible_end = self.view.scroll.saturating_add(self.view.viewport_len());

        for slot in &self.view.slots {
            let item = &self.timeline.items()[slot.index];
            let body_room = usize::try_from(slot.occupied() - 1).unwrap_or(0);
            let lines = card_lines(item, slot, self.view.title_position, body_room);

            // only the rows of this card that fall inside the viewport
            let first = (self.view.scroll - slot.start).max(0);
            let end = (visible_end - slot.start).min(slot.extent);
            for k in first..end {
                let Some(row) = self.row_at(slot.start + k) else {
                    continue;
                };
                match lines.get(usize::try_from(k).unwrap_or(usize::MAX)) {
                    Some(CardLine::Title(title)) => {
                        let (marker, style) = self.marker(item);
                        buf.set_string(rail_x, row, marker, style);
                        let title = truncate_to_width(title, text_w);
                        buf.set_string(text_x, row, title, self.title_style(item));
                    }
                    Some(CardLine::Body(line)) => {
                        buf.set_string(rail_x, row, LINE_V, self.line_style());
                        let line = truncate_to_width(line, text_w);
                        buf.set_string(text_x, row, line, self.body_style(item));
                    }
                    None if slot.index < last => {
                        buf.set_string(rail_x, row, LINE_V, self.line_style());
                    }
                    None => {}
                }
            }
        }
    }

    /// Items alternating left and right of a center trunk.
    fn render_tree(&self, buf: &mut Buffer) {
        let area = self.view.viewport;
        if area.width == 0 {
            return;
        }
        let trunk_x = area.x + area.width / 2;
        for row in area.y..area.bottom() {
            buf.set_string(trunk_x, row, LINE_V, self.line_style());
        }

        let text_w = usize::try_from(tree_text_width(area)).unwrap_or(0);
        for slot in &self.view.slots {
            let item = &self.timeline.items()[slot.index];
            let lines = card_lines(item, slot, self.view.title_position, slot.body.len());
            let left_side = slot.index % 2 == 0;

            for (k, line) in lines.iter().enumerate() {
                let Some(row) = self.row_at(slot.start + i64::try_from(k).unwrap_or(i64::MAX))
                else {
                    continue;
                };
                let (text, style) = match line {
                    CardLine::Title(title) => {
                        let (marker, style) = self.marker(item);
                        buf.set_string(trunk_x, row, marker, style);
                        (truncate_to_width(title, text_w), self.title_style(item))
                    }
                    CardLine::Body(body) => (truncate_to_width(body, text_w), self.body_style(item)),
                };
                let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
                let x = if left_side {
                    trunk_x.saturating_sub(2 + width)
                } else {
                    trunk_x + 2
                };
                buf.set_string(x, row, text, style);
            }
        }
    }

    /// Screen row for a content-space row, if it is inside the viewport.
    fn row_at(&self, content_row: i64) -> Option<u16> {
        let pos = content_row - self.view.scroll;
        if pos < 0 || pos >= i64::from(self.view.viewport.height) {
            return None;
        }
        u16::try_from(pos).ok().map(|pos| self.view.viewport.y + pos)
    }
}

impl<C: Clock> Widget for TimelineWidget<'_, C> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let mode = self.timeline.mode();
        let block = Block::default()
            .title(format!(" Timeline \u{b7} {mode} "))
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.base));
        block.render(self.view.frame, buf);

        if self.view.viewport.height > 0 {
            match mode {
                LayoutMode::Horizontal => self.render_horizontal(buf),
                LayoutMode::Vertical => self.render_vertical(buf),
                LayoutMode::Tree => self.render_tree(buf),
            }
        }

        ControlsWidget::new(
            self.timeline.controls(),
            self.timeline.settled_index(),
            self.timeline.items().len(),
            self.theme,
        )
        .render(self.view.controls, buf);
    }
}

enum CardLine<'a> {
    Title(&'a str),
    Body(&'a str),
}

/// Title and at most `body_room` body lines, ordered by title position.
fn card_lines<'a>(
    item: &'a TimelineItem,
    slot: &'a Slot,
    position: TitlePosition,
    body_room: usize,
) -> Vec<CardLine<'a>> {
    let body = slot
        .body
        .iter()
        .take(body_room)
        .map(|line| CardLine::Body(line.as_str()));
    let title = std::iter::once(CardLine::Title(item.title.as_str()));
    match position {
        TitlePosition::Top => title.chain(body).collect(),
        TitlePosition::Bottom => body.chain(title).collect(),
    }
}

/// Truncate `s` to at most `max` display columns, adding an ellipsis if cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}
