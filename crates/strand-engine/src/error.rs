//! Error types for the strand engine.
//!
//! Navigation itself never fails (out-of-range intents are absorbed), so
//! these only cover construction and configuration I/O.

/// Errors raised while building a timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// The caller supplied no items.
    #[error("Timeline needs at least one item")]
    NoItems,

    /// Two records carried the same explicit id.
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    /// Configuration could not be loaded or was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing document JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing a document to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An item extent was zero or negative.
    #[error("Invalid {name}: {value} (must be positive)")]
    InvalidExtent { name: &'static str, value: i64 },
}
