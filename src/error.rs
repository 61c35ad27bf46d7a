//! Error types. Absence of a key is never an error; lookups return `Option`.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,
    #[error("load factor threshold must be finite and positive, got {0}")]
    InvalidLoadFactor(f64),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is exhausted")]
    Exhausted,
    #[error("table was structurally modified after the cursor was created")]
    TableModified,
}
