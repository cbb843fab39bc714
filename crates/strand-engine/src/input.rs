//! Input normalization.
//!
//! Maps raw key, wheel and click events onto navigation intents. This is a
//! pure mapping; applying the intent is the state machine's job.

use crate::item::ItemId;
use crate::layout::LayoutMode;

/// Arrow keys as seen by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left,
    Up,
    Right,
    Down,
    /// Any key that is not an arrow.
    Other,
}

impl NavKey {
    /// Map a DOM `keyCode` (37-40 are the arrow keys).
    pub const fn from_code(code: u32) -> Self {
        match code {
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            _ => Self::Other,
        }
    }
}

/// A raw input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed while the timeline has focus.
    Key(NavKey),
    /// Wheel scrolled; positive `delta_y` scrolls down.
    Wheel { delta_y: f64 },
    /// Pointer click on an item. `None` when the target could not be resolved.
    Click { id: Option<ItemId> },
}

/// A normalized navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    Select(ItemId),
}

/// Result of normalizing one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    pub intent: Option<Intent>,
    /// The caller should swallow the event (no default action, no propagation).
    pub suppress: bool,
}

impl Normalized {
    const IGNORED: Self = Self {
        intent: None,
        suppress: false,
    };

    fn key(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            suppress: true,
        }
    }

    fn pass(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            suppress: false,
        }
    }
}

/// Normalize `event` for a timeline in `mode`.
pub fn normalize(event: &InputEvent, mode: LayoutMode) -> Normalized {
    match event {
        InputEvent::Key(key) => {
            let strategy = mode.strategy();
            if *key == strategy.next_key {
                Normalized::key(Intent::Next)
            } else if *key == strategy.prev_key {
                Normalized::key(Intent::Previous)
            } else {
                Normalized::IGNORED
            }
        }
        InputEvent::Wheel { delta_y } => {
            if *delta_y > 0.0 {
                Normalized::pass(Intent::Next)
            } else if *delta_y < 0.0 {
                Normalized::pass(Intent::Previous)
            } else {
                Normalized::IGNORED
            }
        }
        InputEvent::Click { id } => match id {
            Some(id) => Normalized::pass(Intent::Select(id.clone())),
            None => Normalized::IGNORED,
        },
    }
}
