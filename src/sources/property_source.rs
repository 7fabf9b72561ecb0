//! Priority-carrying property sources.

use crate::core::PropertyRetriever;
use crate::error::Result;
use crate::sources::properties::load_properties_file;
use std::collections::HashMap;
use std::path::Path;

/// An immutable origin of `key -> value` pairs with a merge priority.
///
/// A source is constructed once from its origin (a map, a properties file, an
/// environment snapshot) and never mutated afterwards; it is safe to share
/// freely without synchronization.
///
/// Priority is the sort key for [`merge`](crate::sources::merge): higher
/// priority sources are applied later and win on conflicting keys. Suggested
/// defaults, mirroring the usual layering:
/// - Environment snapshot: 300
/// - Environment-specific file: 200
/// - Default file: 100
#[derive(Debug, Clone)]
pub struct PropertySource {
    name: String,
    properties: HashMap<String, String>,
    priority: i32,
}

impl PropertySource {
    /// Create a source from an owned map.
    pub fn from_map(name: impl Into<String>, properties: HashMap<String, String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            properties,
            priority,
        }
    }

    /// Create a source by parsing a `key=value` properties file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_properties_file(path: impl AsRef<Path>, priority: i32) -> Result<Self> {
        let path = path.as_ref();
        let properties = load_properties_file(path)?;
        Ok(Self {
            name: format!("file:{}", path.display()),
            properties,
            priority,
        })
    }

    /// Create a source from a snapshot of the process environment taken now.
    ///
    /// Unlike [`PropertyRetriever::environment`], no key case folding is
    /// applied: the snapshot holds variables under their literal names.
    pub fn env_snapshot(priority: i32) -> Self {
        Self {
            name: "env".to_string(),
            properties: std::env::vars().collect(),
            priority,
        }
    }

    /// Look up a key in this source alone.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// A human-readable name for logging and error context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The merge priority of this source (higher = wins on conflict).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The underlying property map.
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Adapt this source into a [`PropertyRetriever`] for `or`-chaining.
    ///
    /// Note the precedence direction flips at this boundary: in an `or`
    /// chain, position decides, not this source's priority.
    pub fn retriever(&self) -> PropertyRetriever {
        PropertyRetriever::from_map(self.properties.clone())
    }
}
