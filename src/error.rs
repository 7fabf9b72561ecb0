//! Error types for layered-config.

/// Result type alias for layered-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when working with configuration.
///
/// A key that is simply not present in any source is *not* an error at the
/// lookup layer: it is represented as `None` (or `Ok(None)` for typed
/// accessors) and only escalates to [`ConfigError::RequiredPropertyMissing`]
/// through an explicit `require` call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A property demanded via `require` was absent from every source.
    #[error("Required configuration property not found: {0}")]
    RequiredPropertyMissing(String),

    /// A `FileLocator` was built without enough information to reference a file.
    #[error("Invalid file locator: {0}")]
    InvalidLocator(&'static str),

    /// A present value could not be parsed in the requested type.
    #[error("Malformed value for '{key}': cannot parse '{value}' as {expected}")]
    MalformedValue {
        /// The configuration key that was queried.
        key: String,
        /// The raw value found for the key.
        value: String,
        /// The type the value was expected to parse as.
        expected: &'static str,
    },

    /// Every location strategy was exhausted without producing a URL.
    #[error("Could not locate: {0}")]
    UnresolvableLocation(String),

    /// Failed to load configuration data from a source.
    #[error("Failed to load configuration: {0}")]
    Load(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
