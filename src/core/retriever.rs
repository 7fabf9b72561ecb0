//! The chainable property-lookup function underlying every configuration facade.

use crate::error::Result;
use crate::sources::SecretStore;
use crate::sources::properties::load_properties_file;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Type alias for the boxed lookup functions a retriever wraps.
type RetrieveFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A pure `key -> value | absent` lookup with chainable fallback.
///
/// Retrievers are the functional building block of layered configuration:
/// each one answers for a single origin (a map, the environment, a properties
/// file, a secrets store) and chains are built with [`or`](Self::or).
///
/// # Precedence
///
/// `or` is **first-wins**: `a.or(b)` consults `a` and falls back to `b` only
/// when `a` reports absence. This is the opposite direction from the
/// priority-ordered [`merge`](crate::sources::merge), where the highest
/// priority source wins; both conventions are deliberate and each is
/// documented where it is defined.
///
/// # Examples
///
/// ```rust
/// use layered_config::core::PropertyRetriever;
/// use std::collections::HashMap;
///
/// let defaults = PropertyRetriever::from_map(HashMap::from([
///     ("port".to_string(), "8080".to_string()),
/// ]));
/// let overrides = PropertyRetriever::from_map(HashMap::from([
///     ("port".to_string(), "9090".to_string()),
/// ]));
///
/// // Earlier retrievers in the chain win.
/// let chained = overrides.or(defaults);
/// assert_eq!(chained.get("port").as_deref(), Some("9090"));
/// ```
#[derive(Clone)]
pub struct PropertyRetriever {
    func: RetrieveFn,
}

impl PropertyRetriever {
    /// Wrap an arbitrary lookup function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// The zero-value retriever: absent for every key.
    ///
    /// Useful as the identity element when folding a chain of retrievers.
    pub fn find_nothing() -> Self {
        Self::new(|_| None)
    }

    /// A retriever backed by an owned map snapshot.
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self::new(move |key| map.get(key).cloned())
    }

    /// A retriever over the process environment with the upper-case fold quirk:
    /// `get("db.host")` looks up the variable `DB.HOST`.
    ///
    /// Lookups hit the live environment, not a snapshot taken at construction.
    pub fn environment() -> Self {
        Self::new(|key| std::env::var(key.to_uppercase()).ok())
    }

    /// A retriever over the process environment with keys looked up verbatim.
    ///
    /// This is the runtime-property counterpart to [`environment`](Self::environment):
    /// no case folding is applied.
    pub fn process() -> Self {
        Self::new(|key| std::env::var(key).ok())
    }

    /// A retriever backed by a `key=value` properties file, parsed eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn properties_file(path: impl AsRef<Path>) -> Result<Self> {
        let map = load_properties_file(path.as_ref())?;
        Ok(Self::from_map(map))
    }

    /// A retriever delegating to an external secrets store.
    ///
    /// Only the one-method [`SecretStore`] contract is depended on; the
    /// transport used to reach the store is the implementor's business.
    pub fn secrets(store: Arc<dyn SecretStore>) -> Self {
        Self::new(move |key| store.get(key))
    }

    /// Look up a key. Absence is `None`, never an error.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.func)(key)
    }

    /// Chain a fallback retriever: `self` is tried first, `fallback` only
    /// when `self` reports absence for the key.
    ///
    /// Associative but not commutative; `s1.or(s2).or(s3)` yields the
    /// precedence `s1 > s2 > s3`.
    pub fn or(self, fallback: PropertyRetriever) -> PropertyRetriever {
        PropertyRetriever::new(move |key| self.get(key).or_else(|| fallback.get(key)))
    }
}

impl std::fmt::Debug for PropertyRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyRetriever").finish_non_exhaustive()
    }
}
