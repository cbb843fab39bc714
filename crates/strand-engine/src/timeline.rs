//! Timeline controller.
//!
//! Owns the items, the navigation state and the scroll synchronizer, and
//! runs the pipeline: input → intent → raw index → (debounce) → settled
//! index → active flags + scroll offset.

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::input::{normalize, InputEvent, Intent, Normalized};
use crate::item::{ItemId, ItemRecord, TimelineItem};
use crate::layout::LayoutMode;
use crate::navigation::{NavControls, NavigationState};
use crate::scroll::{compute_offset, GeometryReport};
use crate::sync::{ScrollPosition, ScrollSynchronizer};

/// Emitted when the settled index changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// New settled index.
    pub index: usize,
    /// Offset written to the container, if it could be computed.
    ///
    /// Always `None` in tree mode; the offset follows the geometry report.
    pub offset: Option<i64>,
}

/// A navigable timeline.
#[derive(Debug)]
pub struct Timeline<C: Clock = SystemClock> {
    items: Vec<TimelineItem>,
    config: TimelineConfig,
    nav: NavigationState,
    sync: ScrollSynchronizer<ScrollPosition>,
    awaiting_geometry: bool,
    clock: C,
}

impl Timeline<SystemClock> {
    /// Build a timeline driven by the wall clock.
    pub fn new(records: Vec<ItemRecord>, config: TimelineConfig) -> Result<Self, TimelineError> {
        Self::with_clock(records, config, SystemClock)
    }
}

impl<C: Clock> Timeline<C> {
    /// Build a timeline driven by `clock`.
    ///
    /// Item 0 starts active. In tree mode the first geometry report
    /// positions the container.
    pub fn with_clock(
        records: Vec<ItemRecord>,
        config: TimelineConfig,
        clock: C,
    ) -> Result<Self, TimelineError> {
        config.validate()?;
        let mut items = TimelineItem::from_records(records, config.title_position)?;
        items[0].active = true;

        let nav = NavigationState::new(items.len(), config.debounce());
        let sync = ScrollSynchronizer::new(ScrollPosition::default(), config.mode);

        debug!(
            mode = %config.mode,
            items = items.len(),
            debounce_ms = config.debounce_ms,
            "timeline created"
        );

        Ok(Self {
            awaiting_geometry: !config.mode.is_linear(),
            items,
            config,
            nav,
            sync,
            clock,
        })
    }

    /// Normalize a raw event and apply the resulting intent.
    ///
    /// The returned value tells the host whether to swallow the event.
    pub fn handle_input(&mut self, event: &InputEvent) -> Normalized {
        let normalized = normalize(event, self.config.mode);
        if let Some(intent) = &normalized.intent {
            self.apply(intent);
        }
        normalized
    }

    /// Apply an intent. Returns `true` if the raw index moved.
    pub fn apply(&mut self, intent: &Intent) -> bool {
        let now = self.clock.now();
        self.nav.apply(intent, &self.items, now)
    }

    /// Move to the next item.
    pub fn next(&mut self) -> bool {
        self.apply(&Intent::Next)
    }

    /// Move to the previous item.
    pub fn previous(&mut self) -> bool {
        self.apply(&Intent::Previous)
    }

    /// Move to the item with `id`.
    pub fn select(&mut self, id: &ItemId) -> bool {
        self.apply(&Intent::Select(id.clone()))
    }

    /// Fire the debounce timer if due and propagate a new settled index.
    pub fn tick(&mut self) -> Option<Settled> {
        let index = self.nav.tick(self.clock.now())?;

        for (i, item) in self.items.iter_mut().enumerate() {
            item.active = i == index;
        }

        let offset = if self.config.mode.is_linear() {
            let offset = compute_offset(self.config.mode, index, self.config.extents(), None);
            if let Some(offset) = offset {
                self.sync.apply(offset);
            }
            offset
        } else {
            self.awaiting_geometry = true;
            None
        };

        debug!(index, ?offset, "settled");
        Some(Settled { index, offset })
    }

    /// Accept geometry reported by a rendered item.
    ///
    /// Only reports for the settled item move the container; anything else
    /// is stale. Linear modes do not use reported geometry.
    pub fn report_geometry(&mut self, report: GeometryReport) -> Option<i64> {
        if self.config.mode.is_linear() {
            return None;
        }

        let Some(offset) = compute_offset(
            self.config.mode,
            self.nav.settled(),
            self.config.extents(),
            Some(&report),
        ) else {
            trace!(
                reported = report.index,
                settled = self.nav.settled(),
                "ignoring stale geometry"
            );
            return None;
        };

        self.awaiting_geometry = false;
        self.sync.apply(offset);
        Some(offset)
    }

    /// All items, in order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// The item whose `active` flag is set.
    pub fn active_item(&self) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.active)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn mode(&self) -> LayoutMode {
        self.config.mode
    }

    pub fn raw_index(&self) -> usize {
        self.nav.raw()
    }

    pub fn settled_index(&self) -> usize {
        self.nav.settled()
    }

    /// Whether a raw change has not settled yet.
    pub fn is_settling(&self) -> bool {
        self.nav.is_settling()
    }

    /// Whether tree mode is waiting for the active item to report geometry.
    pub fn awaiting_geometry(&self) -> bool {
        self.awaiting_geometry
    }

    /// Previous/next control state.
    pub fn controls(&self) -> NavControls {
        self.nav.controls()
    }

    /// Current scroll position of the container.
    pub fn scroll_position(&self) -> ScrollPosition {
        *self.sync.viewport()
    }

    /// Current offset along the mode's scroll axis.
    pub fn scroll_offset(&self) -> i64 {
        self.sync.current()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::NavKey;
    use crate::sync::ScrollViewport;

    fn records(count: usize) -> Vec<ItemRecord> {
        (0..count)
            .map(|i| ItemRecord::new(format!("Item {i}"), format!("Content {i}")).with_id(format!("id-{i}")))
            .collect()
    }

    fn timeline(count: usize, mode: LayoutMode) -> Timeline<ManualClock> {
        Timeline::with_clock(records(count), TimelineConfig::for_mode(mode), ManualClock::new())
            .unwrap()
    }

    fn active_flags<C: Clock>(timeline: &Timeline<C>) -> Vec<bool> {
        timeline.items().iter().map(|item| item.active).collect()
    }

    #[test]
    fn test_initial_state() {
        let timeline = timeline(5, LayoutMode::Horizontal);
        assert_eq!(timeline.raw_index(), 0);
        assert_eq!(timeline.settled_index(), 0);
        assert_eq!(active_flags(&timeline), vec![true, false, false, false, false]);
        assert_eq!(timeline.scroll_position(), ScrollPosition::default());
        assert!(!timeline.awaiting_geometry());
    }

    #[test]
    fn test_empty_timeline_rejected() {
        let err = Timeline::new(Vec::new(), TimelineConfig::default()).unwrap_err();
        assert!(matches!(err, TimelineError::NoItems));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TimelineConfig {
            item_width: 0,
            ..TimelineConfig::default()
        };
        let err = Timeline::new(records(2), config).unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
    }

    #[test]
    fn test_horizontal_burst_scenario() {
        let mut timeline = timeline(5, LayoutMode::Horizontal);

        for _ in 0..3 {
            let normalized = timeline.handle_input(&InputEvent::Key(NavKey::Right));
            assert!(normalized.suppress);
            assert_eq!(timeline.tick(), None);
        }
        assert_eq!(timeline.raw_index(), 3);
        assert_eq!(timeline.settled_index(), 0);
        assert_eq!(timeline.scroll_offset(), 0);

        timeline.clock().advance_ms(49);
        assert_eq!(timeline.tick(), None);
        assert_eq!(timeline.settled_index(), 0);

        timeline.clock().advance_ms(11);
        let settled = timeline.tick().unwrap();
        assert_eq!(
            settled,
            Settled {
                index: 3,
                offset: Some(960)
            }
        );
        assert_eq!(timeline.settled_index(), 3);
        assert_eq!(timeline.scroll_position().scroll_left(), 960);
        assert_eq!(timeline.scroll_position().scroll_top(), 0);
    }

    #[test]
    fn test_vertical_scrolls_top() {
        let mut timeline = timeline(5, LayoutMode::Vertical);
        timeline.handle_input(&InputEvent::Wheel { delta_y: 1.0 });
        timeline.handle_input(&InputEvent::Wheel { delta_y: 1.0 });
        timeline.clock().advance_ms(50);

        assert_eq!(timeline.tick().and_then(|s| s.offset), Some(400));
        assert_eq!(timeline.scroll_position().scroll_top(), 400);
        assert_eq!(timeline.scroll_position().scroll_left(), 0);
    }

    #[test]
    fn test_exactly_one_active_after_each_settle() {
        let mut timeline = timeline(6, LayoutMode::Vertical);
        let script = [
            Intent::Next,
            Intent::Next,
            Intent::Previous,
            Intent::Select(ItemId::new("id-5")),
            Intent::Next,
            Intent::Select(ItemId::new("id-0")),
            Intent::Previous,
        ];

        let mut previous = active_flags(&timeline);
        for intent in &script {
            timeline.apply(intent);
            timeline.clock().advance_ms(50);
            timeline.tick();

            let flags = active_flags(&timeline);
            assert_eq!(flags.iter().filter(|active| **active).count(), 1);
            assert!(flags[timeline.settled_index()]);

            let changed = flags.iter().zip(&previous).filter(|(a, b)| a != b).count();
            assert!(changed == 0 || changed == 2);
            previous = flags;
        }
    }

    #[test]
    fn test_bounds_are_noops() {
        let mut timeline = timeline(3, LayoutMode::Horizontal);

        assert!(!timeline.previous());
        assert!(!timeline.is_settling());
        timeline.clock().advance_ms(100);
        assert_eq!(timeline.tick(), None);

        timeline.next();
        timeline.next();
        timeline.clock().advance_ms(50);
        assert_eq!(timeline.tick().map(|s| s.index), Some(2));
        let before = timeline.scroll_position();

        assert!(!timeline.next());
        assert!(!timeline.is_settling());
        timeline.clock().advance_ms(100);
        assert_eq!(timeline.tick(), None);
        assert_eq!(timeline.raw_index(), 2);
        assert_eq!(timeline.scroll_position(), before);
    }

    #[test]
    fn test_select_by_click() {
        let mut timeline = timeline(5, LayoutMode::Horizontal);

        let normalized = timeline.handle_input(&InputEvent::Click {
            id: Some(ItemId::new("id-4")),
        });
        assert!(!normalized.suppress);
        assert_eq!(timeline.raw_index(), 4);

        timeline.handle_input(&InputEvent::Click {
            id: Some(ItemId::new("nope")),
        });
        timeline.handle_input(&InputEvent::Click { id: None });
        assert_eq!(timeline.raw_index(), 4);

        timeline.clock().advance_ms(50);
        assert_eq!(timeline.tick().and_then(|s| s.offset), Some(1280));
        assert_eq!(timeline.active_item().map(|item| item.id.as_str()), Some("id-4"));
    }

    #[test]
    fn test_generated_ids_are_selectable() {
        let records = (0..3).map(|i| ItemRecord::new(format!("T{i}"), "")).collect();
        let mut timeline =
            Timeline::with_clock(records, TimelineConfig::default(), ManualClock::new()).unwrap();
        let id = timeline.items()[2].id.clone();

        assert!(timeline.select(&id));
        assert_eq!(timeline.raw_index(), 2);
    }

    #[test]
    fn test_tree_scroll_follows_geometry() {
        let mut timeline = timeline(4, LayoutMode::Tree);
        assert!(timeline.awaiting_geometry());

        timeline.handle_input(&InputEvent::Key(NavKey::Down));
        timeline.clock().advance_ms(50);
        let settled = timeline.tick().unwrap();
        assert_eq!(settled, Settled { index: 1, offset: None });
        assert!(timeline.awaiting_geometry());
        assert_eq!(timeline.scroll_offset(), 0);

        let offset = timeline.report_geometry(GeometryReport {
            index: 1,
            offset_top: 500,
            element_offset: -40,
            element_height: 120,
        });
        assert_eq!(offset, Some(460));
        assert!(!timeline.awaiting_geometry());
        assert_eq!(timeline.scroll_position().scroll_top(), 460);
        assert_eq!(timeline.scroll_position().scroll_left(), 0);
    }

    #[test]
    fn test_tree_stale_geometry_keeps_offset() {
        let mut timeline = timeline(4, LayoutMode::Tree);
        timeline.report_geometry(GeometryReport {
            index: 0,
            offset_top: 30,
            element_offset: 0,
            element_height: 20,
        });
        assert_eq!(timeline.scroll_offset(), 30);

        timeline.next();
        timeline.clock().advance_ms(50);
        timeline.tick();

        let stale = timeline.report_geometry(GeometryReport {
            index: 0,
            offset_top: 90,
            element_offset: 0,
            element_height: 20,
        });
        assert_eq!(stale, None);
        assert_eq!(timeline.scroll_offset(), 30);
        assert!(timeline.awaiting_geometry());
    }

    #[test]
    fn test_linear_ignores_geometry_reports() {
        let mut timeline = timeline(3, LayoutMode::Horizontal);
        let result = timeline.report_geometry(GeometryReport {
            index: 0,
            offset_top: 50,
            element_offset: 0,
            element_height: 10,
        });
        assert_eq!(result, None);
        assert_eq!(timeline.scroll_position(), ScrollPosition::default());
    }

    #[test]
    fn test_controls_track_settled_index() {
        let mut timeline = timeline(3, LayoutMode::Horizontal);
        assert!(timeline.controls().previous_disabled);
        assert!(!timeline.controls().next_disabled);

        timeline.next();
        assert!(timeline.controls().previous_disabled);

        timeline.clock().advance_ms(50);
        timeline.tick();
        assert!(!timeline.controls().previous_disabled);
        assert!(!timeline.controls().next_disabled);

        timeline.next();
        timeline.clock().advance_ms(50);
        timeline.tick();
        assert!(!timeline.controls().previous_disabled);
        assert!(timeline.controls().next_disabled);
    }

    #[test]
    fn test_custom_debounce_window() {
        let config = TimelineConfig {
            debounce_ms: 200,
            ..TimelineConfig::default()
        };
        let mut timeline = Timeline::with_clock(records(3), config, ManualClock::new()).unwrap();

        timeline.next();
        timeline.clock().advance_ms(150);
        assert_eq!(timeline.tick(), None);
        timeline.clock().advance_ms(50);
        assert_eq!(timeline.tick().map(|s| s.index), Some(1));
    }
}
