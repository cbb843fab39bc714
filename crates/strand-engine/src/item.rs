//! Timeline items.
//!
//! Items are built once from caller records and never reordered or
//! resized. Only the `active` flag changes afterwards.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TimelineError;
use crate::layout::TitlePosition;

/// Stable identifier of an item, unique within one timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied input for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Title shown on the item.
    pub title: String,

    /// Body text.
    #[serde(default)]
    pub content: String,

    /// Optional explicit id. Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ItemRecord {
    /// Create a record without an explicit id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            id: None,
        }
    }

    /// Attach an explicit id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One navigable unit of the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    /// Title placement, fixed at construction.
    pub position: TitlePosition,
    /// Derived from the settled index.
    pub active: bool,
}

impl TimelineItem {
    /// Build the item list from records.
    ///
    /// Records without an id get a fresh one. Explicit ids must be unique.
    pub fn from_records(
        records: Vec<ItemRecord>,
        position: TitlePosition,
    ) -> Result<Vec<Self>, TimelineError> {
        if records.is_empty() {
            return Err(TimelineError::NoItems);
        }

        let mut seen = HashSet::new();
        records
            .into_iter()
            .map(|record| {
                let id = match record.id {
                    Some(id) => {
                        if !seen.insert(id.clone()) {
                            return Err(TimelineError::DuplicateId(id));
                        }
                        ItemId::new(id)
                    }
                    None => ItemId::generate(),
                };
                Ok(Self {
                    id,
                    title: record.title,
                    content: record.content,
                    position,
                    active: false,
                })
            })
            .collect()
    }
}
