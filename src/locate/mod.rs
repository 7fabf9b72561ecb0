//! Locating files from symbolic references.
//!
//! A [`FileLocator`] describes a file symbolically (name, base path, URL); the
//! functions here run it through a [`LocationStrategy`] chain to obtain a
//! concrete URL, and can derive the remaining facets from that URL to produce
//! a fully initialized locator. [`FileHandle`] adds the concurrency-safe,
//! lazily-resolving wrapper around a locator plus its managed payload.

mod handle;
mod locator;
mod strategy;

pub use handle::{ByteIo, FileBased, FileHandle, StdByteIo};
pub use locator::{FileLocator, FileLocatorBuilder};
pub use strategy::{FileSystem, LocationStrategy, ResourceResolver, SearchPath, StdFileSystem};

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Whether `locator` is non-`None` with all three location facets populated.
pub fn is_fully_initialized(locator: Option<&FileLocator>) -> bool {
    locator.is_some_and(FileLocator::is_fully_initialized)
}

/// Resolve `locator` to a URL.
///
/// Uses the locator's own strategy and filesystem handle when present,
/// otherwise [`LocationStrategy::default_chain`] over the local filesystem.
/// `None` means every strategy was exhausted: the location is unresolvable,
/// and the caller decides whether that is fatal.
pub fn locate(locator: &FileLocator) -> Option<Url> {
    let fs = obtain_file_system(locator);
    match locator.location_strategy() {
        Some(strategy) => strategy.resolve(fs.as_ref(), locator),
        None => LocationStrategy::default_chain().resolve(fs.as_ref(), locator),
    }
}

/// Resolve `locator` to a URL, escalating exhaustion to an error.
///
/// # Errors
///
/// Returns [`ConfigError::UnresolvableLocation`] when [`locate`] yields `None`.
pub fn locate_or_fail(locator: &FileLocator) -> Result<Url> {
    locate(locator).ok_or_else(|| ConfigError::UnresolvableLocation(format!("{locator:?}")))
}

/// Produce a locator whose location is fully defined, if possible.
///
/// - A locator that is already fully initialized is returned unchanged; the
///   facets are **not** re-checked for mutual consistency.
/// - Otherwise the strategy chain runs. On success, a copy of the locator is
///   returned with the source URL, and a file name and base path derived from
///   it, filled in — but only for facets that were previously unset; facets
///   the caller already pinned are never overwritten.
/// - `None` when the chain is exhausted.
///
/// Idempotent: feeding the result back in returns it unchanged.
pub fn fully_initialized_locator(locator: &FileLocator) -> Option<FileLocator> {
    if locator.is_fully_initialized() {
        return Some(locator.clone());
    }

    let url = locate(locator)?;
    let mut builder = FileLocator::builder_from(locator);
    if locator.source_url().is_none() {
        builder = builder.source_url(url.clone());
    }
    if locator.file_name().is_none() {
        if let Some(name) = file_name_from_url(&url) {
            builder = builder.file_name(name);
        }
    }
    if locator.base_path().is_none() {
        if let Some(base) = base_path_from_url(&url) {
            builder = builder.base_path(base);
        }
    }
    // The URL facet is set above, so the build cannot be rejected.
    builder.build().ok()
}

/// Compose a base path and file name into one path.
///
/// A blank base or an absolute file name short-circuits to the name alone.
pub fn construct_file_path(base_path: Option<&Path>, file_name: &str) -> PathBuf {
    match base_path {
        Some(base) if !base.as_os_str().is_empty() && !Path::new(file_name).is_absolute() => {
            base.join(file_name)
        }
        _ => PathBuf::from(file_name),
    }
}

fn obtain_file_system(locator: &FileLocator) -> Arc<dyn FileSystem> {
    locator
        .file_system()
        .cloned()
        .unwrap_or_else(|| Arc::new(StdFileSystem))
}

/// The last non-empty path segment of a URL, if any.
pub(crate) fn file_name_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

/// The parent location of a URL's path as a filesystem path.
///
/// For `file:` URLs that point at an existing directory the directory itself
/// is returned; otherwise the parent. For other schemes the URL path up to
/// the last `/` is used.
pub(crate) fn base_path_from_url(url: &Url) -> Option<PathBuf> {
    if url.scheme() == "file" {
        let path = url.to_file_path().ok()?;
        if path.is_dir() {
            Some(path)
        } else {
            path.parent().map(Path::to_path_buf)
        }
    } else {
        let path = url.path();
        let split = path.rfind('/')?;
        Some(PathBuf::from(&path[..=split]))
    }
}

/// Convert a filesystem path to a `file:` URL, absolutizing relative paths.
///
/// Existing paths are canonicalized; a path that does not exist yet (a save
/// target) is anchored at the current directory. `None` if conversion fails.
pub(crate) fn path_to_url(path: &Path) -> Option<Url> {
    let absolute = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) if path.is_absolute() => path.to_path_buf(),
        Err(_) => std::env::current_dir().ok()?.join(path),
    };
    Url::from_file_path(absolute).ok()
}
