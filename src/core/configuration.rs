//! The configuration facade queried by applications.

use crate::core::PropertyRetriever;
use crate::error::{ConfigError, Result};
use crate::sources::{PropertySource, merge};

/// A read-only view over one [`PropertyRetriever`] chain.
///
/// Applications build the chain once — typically defaults first overridden by
/// files, environment and secrets — and query keys through this facade.
///
/// # Examples
///
/// ```rust
/// use layered_config::prelude::*;
/// use std::collections::HashMap;
///
/// let defaults = PropertyRetriever::from_map(HashMap::from([
///     ("server.port".to_string(), "8080".to_string()),
/// ]));
///
/// // Earlier retrievers take precedence.
/// let config = Configuration::of([PropertyRetriever::environment(), defaults]);
/// assert_eq!(config.get_or("server.port", "80"), "8080");
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    func: PropertyRetriever,
}

impl Configuration {
    /// Create a configuration answering absent for every key.
    pub fn empty() -> Self {
        Self::from_retriever(PropertyRetriever::find_nothing())
    }

    /// Wrap a single retriever (or an already-built chain).
    pub fn from_retriever(func: PropertyRetriever) -> Self {
        Self { func }
    }

    /// Fold an ordered list of retrievers into one facade with `or` chaining.
    ///
    /// Precedence is **first-wins**: the first retriever with a present value
    /// for a key answers for it. Place the highest-precedence origin first.
    pub fn of(retrievers: impl IntoIterator<Item = PropertyRetriever>) -> Self {
        let folded = retrievers
            .into_iter()
            .fold(PropertyRetriever::find_nothing(), PropertyRetriever::or);
        Self::from_retriever(folded)
    }

    /// Build a facade from priority-ordered sources via [`merge`].
    ///
    /// This inherits merge's convention: the source with the **highest**
    /// priority wins on conflict, ties broken by later list position.
    pub fn from_sources(sources: &[PropertySource]) -> Self {
        Self::from_retriever(PropertyRetriever::from_map(merge(sources)))
    }

    /// Look up a key. Absence is `None`, never an error.
    pub fn get(&self, key: &str) -> Option<String> {
        self.func.get(key)
    }

    /// Look up a key, substituting `default` on absence.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Look up a key that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RequiredPropertyMissing`] carrying the key when
    /// the whole chain reports absence.
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| ConfigError::RequiredPropertyMissing(key.to_string()))
    }

    /// Look up a key and parse it as a signed integer.
    ///
    /// # Errors
    ///
    /// An absent key is `Ok(None)`. A present value that does not parse is
    /// [`ConfigError::MalformedValue`] — malformed is not missing, and
    /// silently substituting a default would mask authoring errors.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        self.parse_present(key, "integer", |raw| raw.parse().ok())
    }

    /// Look up a key and parse it as a float. Same contract as [`get_i64`](Self::get_i64).
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.parse_present(key, "float", |raw| raw.parse().ok())
    }

    /// Look up a key and parse it as a boolean (`true`/`false`, any case).
    /// Same contract as [`get_i64`](Self::get_i64).
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.parse_present(key, "boolean", |raw| {
            match raw.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            }
        })
    }

    /// Extend the chain with a lower-precedence fallback retriever.
    pub fn or(&self, next: PropertyRetriever) -> Configuration {
        Self::from_retriever(self.func.clone().or(next))
    }

    fn parse_present<T>(
        &self,
        key: &str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match parse(raw.trim()) {
                Some(value) => Ok(Some(value)),
                None => Err(ConfigError::MalformedValue {
                    key: key.to_string(),
                    value: raw,
                    expected,
                }),
            },
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_retriever(pairs: &[(&str, &str)]) -> PropertyRetriever {
        PropertyRetriever::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_empty_is_absent_for_all_keys() {
        let config = Configuration::empty();
        assert_eq!(config.get("anything"), None);
    }

    #[test]
    fn test_require_missing_carries_key() {
        let config = Configuration::empty();
        let err = config.require("missing.key").unwrap_err();
        match err {
            ConfigError::RequiredPropertyMissing(key) => assert_eq!(key, "missing.key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_of_first_retriever_wins() {
        let config = Configuration::of([
            map_retriever(&[("port", "9090")]),
            map_retriever(&[("port", "8080"), ("host", "localhost")]),
        ]);
        assert_eq!(config.get("port").as_deref(), Some("9090"));
        assert_eq!(config.get("host").as_deref(), Some("localhost"));
    }

    #[test]
    fn test_get_or_substitutes_default_only_on_absence() {
        let config = Configuration::from_retriever(map_retriever(&[("set", "")]));
        assert_eq!(config.get_or("set", "fallback"), "");
        assert_eq!(config.get_or("unset", "fallback"), "fallback");
    }

    #[test]
    fn test_typed_getters_parse() {
        let config = Configuration::from_retriever(map_retriever(&[
            ("port", "8080"),
            ("ratio", "0.75"),
            ("enabled", "TRUE"),
        ]));
        assert_eq!(config.get_i64("port").unwrap(), Some(8080));
        assert_eq!(config.get_f64("ratio").unwrap(), Some(0.75));
        assert_eq!(config.get_bool("enabled").unwrap(), Some(true));
    }

    #[test]
    fn test_typed_getter_absent_is_ok_none() {
        let config = Configuration::empty();
        assert_eq!(config.get_i64("port").unwrap(), None);
        assert_eq!(config.get_bool("enabled").unwrap(), None);
    }

    #[test]
    fn test_typed_getter_malformed_is_error() {
        let config = Configuration::from_retriever(map_retriever(&[("port", "eighty")]));
        let err = config.get_i64("port").unwrap_err();
        match err {
            ConfigError::MalformedValue { key, value, expected } => {
                assert_eq!(key, "port");
                assert_eq!(value, "eighty");
                assert_eq!(expected, "integer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bool_rejects_non_boolean_text() {
        let config = Configuration::from_retriever(map_retriever(&[("enabled", "yes")]));
        assert!(config.get_bool("enabled").is_err());
    }

    #[test]
    fn test_from_sources_highest_priority_wins() {
        let low = PropertySource::from_map(
            "defaults",
            HashMap::from([("port".to_string(), "8080".to_string())]),
            1,
        );
        let high = PropertySource::from_map(
            "overrides",
            HashMap::from([("port".to_string(), "9090".to_string())]),
            2,
        );
        let config = Configuration::from_sources(&[high, low]);
        assert_eq!(config.get("port").as_deref(), Some("9090"));
    }

    #[test]
    fn test_or_extends_with_lower_precedence() {
        let config = Configuration::from_retriever(map_retriever(&[("a", "1")]))
            .or(map_retriever(&[("a", "2"), ("b", "2")]));
        assert_eq!(config.get("a").as_deref(), Some("1"));
        assert_eq!(config.get("b").as_deref(), Some("2"));
    }
}
