//! Application state for the strand TUI.
//!
//! Translates terminal events into engine input, runs the layout pass,
//! and closes the tree-mode geometry handshake before each draw.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Position, layout::Rect, widgets::Widget};
use strand_engine::{
    Clock, GeometryReport, InputEvent, Normalized, Settled, SystemClock, Timeline,
};
use tracing::debug;

use crate::event::{key_to_action, Action};
use crate::theme::Theme;
use crate::timeline::{TimelineWidget, ViewLayout};

/// Wheel delta forwarded for one scroll notch.
const WHEEL_STEP: f64 = 1.0;

/// Main application state.
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub timeline: Timeline<C>,
    pub theme: Theme,
    pub should_quit: bool,
    /// Layout from the most recent draw, used for hit testing.
    view: Option<ViewLayout>,
    /// Last geometry sent to the engine.
    last_report: Option<GeometryReport>,
}

impl<C: Clock> App<C> {
    pub fn new(timeline: Timeline<C>) -> Self {
        Self {
            timeline,
            theme: Theme::from_env(),
            should_quit: false,
            view: None,
            last_report: None,
        }
    }

    /// Layout computed by the last draw.
    pub fn view(&self) -> Option<&ViewLayout> {
        self.view.as_ref()
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) -> Normalized {
        match key_to_action(key) {
            Action::Quit => {
                self.should_quit = true;
                Normalized::default()
            }
            Action::Navigate(nav_key) => self.timeline.handle_input(&InputEvent::Key(nav_key)),
        }
    }

    /// Handle wheel and click input.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.timeline.handle_input(&InputEvent::Wheel {
                    delta_y: WHEEL_STEP,
                });
            }
            MouseEventKind::ScrollUp => {
                self.timeline.handle_input(&InputEvent::Wheel {
                    delta_y: -WHEEL_STEP,
                });
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let Some(view) = &self.view else {
            return;
        };
        let position = Position::new(column, row);
        let controls = self.timeline.controls();

        if view.previous_button.contains(position) {
            if !controls.previous_disabled {
                self.timeline.previous();
            }
            return;
        }
        if view.next_button.contains(position) {
            if !controls.next_disabled {
                self.timeline.next();
            }
            return;
        }
        if !view.viewport.contains(position) {
            return;
        }

        let id = view
            .item_at(column, row)
            .map(|index| self.timeline.items()[index].id.clone());
        debug!(column, row, ?id, "click");
        self.timeline.handle_input(&InputEvent::Click { id });
    }

    /// Let the debounce timer fire.
    pub fn tick(&mut self) -> Option<Settled> {
        self.timeline.tick()
    }

    /// Run the layout pass for `area`.
    ///
    /// In tree mode the settled item's geometry is reported to the engine
    /// when it is awaited or has changed since the last report.
    pub fn layout(&mut self, area: Rect) -> &ViewLayout {
        let mut view = ViewLayout::compute(&self.timeline, area);

        if let Some(report) = view.geometry_report(self.timeline.settled_index()) {
            if self.timeline.awaiting_geometry() || self.last_report != Some(report) {
                self.last_report = Some(report);
                if self.timeline.report_geometry(report).is_some() {
                    view.sync_scroll(&self.timeline.scroll_position());
                }
            }
        }

        self.view.insert(view)
    }

    /// Lay out and render the whole screen.
    pub fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        self.layout(area);
        if let Some(view) = &self.view {
            TimelineWidget::new(&self.timeline, view, &self.theme).render(area, buf);
        }
    }
}
