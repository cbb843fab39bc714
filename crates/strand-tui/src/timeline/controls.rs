//! Previous/next navigation controls.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use strand_engine::NavControls;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

pub const PREVIOUS_LABEL: &str = " \u{25c0} Prev "; // ◀
pub const NEXT_LABEL: &str = " Next \u{25b6} "; // ▶

/// Screen rects of the previous and next buttons inside `area`.
pub fn button_rects(area: Rect) -> (Rect, Rect) {
    let height = area.height.min(1);
    let prev_w = label_width(PREVIOUS_LABEL).min(area.width);
    let next_w = label_width(NEXT_LABEL).min(area.width.saturating_sub(prev_w));

    let previous = Rect::new(area.x, area.y, prev_w, height);
    let next = Rect::new(area.right().saturating_sub(next_w), area.y, next_w, height);
    (previous, next)
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

/// Control bar widget: previous button, position counter, next button.
pub struct ControlsWidget<'a> {
    controls: NavControls,
    position: usize,
    len: usize,
    theme: &'a Theme,
}

impl<'a> ControlsWidget<'a> {
    /// `position` is the zero-based settled index.
    pub fn new(controls: NavControls, position: usize, len: usize, theme: &'a Theme) -> Self {
        Self {
            controls,
            position,
            len,
            theme,
        }
    }

    fn button_style(&self, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(self.theme.muted)
        } else {
            Style::default()
                .fg(self.theme.text)
                .bg(self.theme.surface)
                .add_modifier(Modifier::BOLD)
        }
    }
}

impl Widget for ControlsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let (previous, next) = button_rects(area);
        buf.set_stringn(
            previous.x,
            previous.y,
            PREVIOUS_LABEL,
            previous.width as usize,
            self.button_style(self.controls.previous_disabled),
        );
        buf.set_stringn(
            next.x,
            next.y,
            NEXT_LABEL,
            next.width as usize,
            self.button_style(self.controls.next_disabled),
        );

        let counter = format!("{}/{}", self.position + 1, self.len);
        let counter_w = label_width(&counter);
        let gap_start = previous.right();
        let gap = next.x.saturating_sub(gap_start);
        if counter_w <= gap {
            let x = gap_start + (gap - counter_w) / 2;
            buf.set_string(x, area.y, counter, Style::default().fg(self.theme.subtext));
        }
    }
}
