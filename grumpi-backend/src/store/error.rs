use std::fmt;

/// Errors surfaced by the trainer store.
///
/// Lookup and validation failures are returned to the caller as values;
/// nothing on a request path panics past the store boundary.
#[derive(Debug)]
pub enum StoreError {
    /// No trainer record matches the given name.
    NotFound(String),
    /// A monetary amount was non-positive or not a number.
    InvalidAmount(String),
    /// The durable store could not be written.
    Io(std::io::Error),
    /// The table could not be serialized.
    Parse(serde_json::Error),
}

impl StoreError {
    pub fn not_found(name: &str) -> Self {
        StoreError::NotFound(format!("no trainer named '{}'", name))
    }

    /// Stable category string used in HTTP error envelopes.
    pub fn category(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::InvalidAmount(_) => "invalid_amount",
            StoreError::Io(_) => "io",
            StoreError::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "{}", msg),
            StoreError::InvalidAmount(msg) => write!(f, "{}", msg),
            StoreError::Io(e) => write!(f, "store file error: {}", e),
            StoreError::Parse(e) => write!(f, "store serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}
