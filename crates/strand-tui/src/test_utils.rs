//! Test utilities for rendering the TUI into strings.

use crate::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use strand_engine::{Clock, ItemRecord, LayoutMode, ManualClock, Timeline, TimelineConfig};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with `count` items titled `Item 0`, `Item 1`, ...
pub fn create_test_app(count: usize, mode: LayoutMode) -> App<ManualClock> {
    let records = (0..count)
        .map(|i| ItemRecord::new(format!("Item {i}"), format!("Content for item {i}")))
        .collect();
    let timeline =
        Timeline::with_clock(records, TimelineConfig::for_mode(mode), ManualClock::new())
            .expect("Failed to create test timeline");
    App::new(timeline)
}

/// Draw the app into a fresh buffer of the given size and return it as a string.
pub fn render_app_to_string<C: Clock>(app: &mut App<C>, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.draw(area, &mut buffer);
    buffer_to_string(&buffer)
}

/// Convert a buffer to a string representation for snapshot testing.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 6, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "ab", ratatui::style::Style::default());
        buffer.set_string(2, 1, "cd", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buffer), "ab\n  cd");
    }

    #[test]
    fn test_render_app_to_string() {
        let mut app = create_test_app(2, LayoutMode::Vertical);
        let text = render_app_to_string(&mut app, 40, 12);
        assert!(text.contains("Item 0"));
        assert!(text.contains("1/2"));
    }
}
