//! The immutable symbolic file reference and its builder.

use crate::error::{ConfigError, Result};
use crate::locate::strategy::{FileSystem, LocationStrategy};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// An immutable, possibly-partial description of a file's location.
///
/// A locator carries up to three location facets — file name, base path and
/// source URL — plus an encoding and the optional collaborators used to
/// resolve it (a [`FileSystem`] handle and a [`LocationStrategy`]). At least
/// one of file name or source URL must be present; this is enforced when the
/// builder's [`build`](FileLocatorBuilder::build) runs.
///
/// Locators are never mutated. Changing any facet goes through a builder
/// seeded from the existing instance ([`FileLocator::builder_from`]), which
/// produces a new locator.
///
/// # Examples
///
/// ```rust
/// use layered_config::locate::FileLocator;
///
/// let locator = FileLocator::builder()
///     .file_name("app.properties")
///     .base_path("/etc/myapp")
///     .build()
///     .unwrap();
/// assert_eq!(locator.file_name(), Some("app.properties"));
/// assert!(!locator.is_fully_initialized());
/// ```
#[derive(Clone)]
pub struct FileLocator {
    file_name: Option<String>,
    base_path: Option<PathBuf>,
    source_url: Option<Url>,
    encoding: Option<String>,
    file_system: Option<Arc<dyn FileSystem>>,
    location_strategy: Option<LocationStrategy>,
}

impl FileLocator {
    /// Start building a locator from scratch.
    pub fn builder() -> FileLocatorBuilder {
        FileLocatorBuilder::default()
    }

    /// Start building a locator with all properties copied from `src`.
    ///
    /// The usual way to produce a locator that shares collaborators and
    /// encoding with an existing one but points elsewhere.
    pub fn builder_from(src: &FileLocator) -> FileLocatorBuilder {
        FileLocatorBuilder {
            file_name: src.file_name.clone(),
            base_path: src.base_path.clone(),
            source_url: src.source_url.clone(),
            encoding: src.encoding.clone(),
            file_system: src.file_system.clone(),
            location_strategy: src.location_strategy.clone(),
        }
    }

    /// The file name, if set.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The base path, if set.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// The source URL, if set.
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// The encoding, if set.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// The filesystem handle to probe with, if one was supplied.
    pub fn file_system(&self) -> Option<&Arc<dyn FileSystem>> {
        self.file_system.as_ref()
    }

    /// The explicit location strategy, if one was supplied.
    pub fn location_strategy(&self) -> Option<&LocationStrategy> {
        self.location_strategy.as_ref()
    }

    /// Whether all three location facets (file name, base path, source URL)
    /// are populated.
    ///
    /// A locator does not need to be fully initialized to reference a file —
    /// the URL alone is enough — but a fully initialized one can be handed to
    /// I/O without a further `locate` pass.
    pub fn is_fully_initialized(&self) -> bool {
        self.base_path.is_some() && self.file_name.is_some() && self.source_url.is_some()
    }
}

// Equality covers the location facets and encoding only. The filesystem
// handle and strategy are resolution collaborators, not location state.
impl PartialEq for FileLocator {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.base_path == other.base_path
            && self.source_url == other.source_url
            && self.encoding == other.encoding
    }
}

impl Eq for FileLocator {}

impl std::fmt::Debug for FileLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLocator")
            .field("file_name", &self.file_name)
            .field("base_path", &self.base_path)
            .field("source_url", &self.source_url.as_ref().map(Url::as_str))
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FileLocator`] instances.
///
/// All properties default to unset; [`build`](Self::build) fails unless at
/// least one of file name or source URL was provided.
#[derive(Default)]
pub struct FileLocatorBuilder {
    file_name: Option<String>,
    base_path: Option<PathBuf>,
    source_url: Option<Url>,
    encoding: Option<String>,
    file_system: Option<Arc<dyn FileSystem>>,
    location_strategy: Option<LocationStrategy>,
}

impl FileLocatorBuilder {
    /// Set the file name.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the base path.
    pub fn base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the source URL.
    pub fn source_url(mut self, source_url: Url) -> Self {
        self.source_url = Some(source_url);
        self
    }

    /// Set the encoding.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Set the filesystem handle used for existence probes.
    pub fn file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    /// Set an explicit location strategy, overriding the default chain.
    pub fn location_strategy(mut self, strategy: LocationStrategy) -> Self {
        self.location_strategy = Some(strategy);
        self
    }

    /// Build the locator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocator`] if neither a file name nor a
    /// source URL was set. This is a programmer error and fails fast.
    pub fn build(self) -> Result<FileLocator> {
        if self.file_name.is_none() && self.source_url.is_none() {
            return Err(ConfigError::InvalidLocator(
                "a file locator needs at least a file name or a source URL",
            ));
        }
        Ok(FileLocator {
            file_name: self.file_name,
            base_path: self.base_path,
            source_url: self.source_url,
            encoding: self.encoding,
            file_system: self.file_system,
            location_strategy: self.location_strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_name_or_url() {
        let result = FileLocator::builder().base_path("/etc").build();
        assert!(matches!(result, Err(ConfigError::InvalidLocator(_))));
    }

    #[test]
    fn test_build_with_name_only() {
        let locator = FileLocator::builder().file_name("app.conf").build().unwrap();
        assert_eq!(locator.file_name(), Some("app.conf"));
        assert!(!locator.is_fully_initialized());
    }

    #[test]
    fn test_build_with_url_only() {
        let url = Url::parse("file:///etc/app.conf").unwrap();
        let locator = FileLocator::builder().source_url(url.clone()).build().unwrap();
        assert_eq!(locator.source_url(), Some(&url));
        assert!(!locator.is_fully_initialized());
    }

    #[test]
    fn test_fully_initialized_needs_all_three_facets() {
        let url = Url::parse("file:///etc/app.conf").unwrap();
        let full = FileLocator::builder()
            .file_name("app.conf")
            .base_path("/etc")
            .source_url(url.clone())
            .build()
            .unwrap();
        assert!(full.is_fully_initialized());

        let missing_base = FileLocator::builder()
            .file_name("app.conf")
            .source_url(url)
            .build()
            .unwrap();
        assert!(!missing_base.is_fully_initialized());
    }

    #[test]
    fn test_builder_from_copies_all_properties() {
        let src = FileLocator::builder()
            .file_name("app.conf")
            .base_path("/etc")
            .encoding("utf-8")
            .build()
            .unwrap();
        let copy = FileLocator::builder_from(&src).build().unwrap();
        assert_eq!(copy, src);
    }

    #[test]
    fn test_builder_from_repoints_without_touching_rest() {
        let src = FileLocator::builder()
            .file_name("app.conf")
            .base_path("/etc")
            .encoding("utf-8")
            .build()
            .unwrap();
        let repointed = FileLocator::builder_from(&src)
            .file_name("other.conf")
            .build()
            .unwrap();
        assert_eq!(repointed.file_name(), Some("other.conf"));
        assert_eq!(repointed.base_path(), src.base_path());
        assert_eq!(repointed.encoding(), Some("utf-8"));
    }

    #[test]
    fn test_equality_ignores_collaborators() {
        let a = FileLocator::builder()
            .file_name("app.conf")
            .location_strategy(LocationStrategy::ProvidedUrl)
            .build()
            .unwrap();
        let b = FileLocator::builder().file_name("app.conf").build().unwrap();
        assert_eq!(a, b);
    }
}
