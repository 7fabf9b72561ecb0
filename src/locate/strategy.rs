//! Location strategies: resolvers that turn a locator into a concrete URL.

use crate::locate::{FileLocator, construct_file_path, path_to_url};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Bounded existence probe over some filesystem.
///
/// The default [`StdFileSystem`] probes the local filesystem; tests and
/// embedders can supply their own handle (e.g. over an archive or a virtual
/// tree). Probes are synchronous and prompt — no streaming reads happen here.
pub trait FileSystem: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// External collaborator resolving a bare resource name to a URL.
///
/// Stands in for a classloader-style resource lookup: given a name like
/// `app.conf`, return a URL for it or `None`. Absence is the only failure
/// signal, so the strategy chain can fall through to the next resolver.
pub trait ResourceResolver: Send + Sync {
    /// Resolve a resource name to a URL, or `None` if unknown.
    fn resolve(&self, name: &str) -> Option<Url>;
}

/// A two-tier directory-based [`ResourceResolver`].
///
/// Probes a primary list of roots first, then a fallback list, returning a
/// `file:` URL for the first hit. The two tiers mirror the usual
/// context-then-system lookup order of classloader resource resolution.
#[derive(Debug, Clone)]
pub struct SearchPath {
    primary: Vec<PathBuf>,
    fallback: Vec<PathBuf>,
}

impl SearchPath {
    /// A resolver probing the given roots.
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            primary: roots.into_iter().collect(),
            fallback: Vec::new(),
        }
    }

    /// Add fallback roots probed only when the primary tier misses.
    pub fn with_fallback(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        self.fallback = roots.into_iter().collect();
        self
    }

    fn probe(roots: &[PathBuf], name: &str) -> Option<Url> {
        roots.iter().find_map(|root| {
            let candidate = root.join(name);
            candidate.is_file().then(|| path_to_url(&candidate)).flatten()
        })
    }
}

impl Default for SearchPath {
    /// A resolver rooted at the current working directory.
    fn default() -> Self {
        Self::new([PathBuf::from(".")])
    }
}

impl ResourceResolver for SearchPath {
    fn resolve(&self, name: &str) -> Option<Url> {
        if let Some(url) = Self::probe(&self.primary, name) {
            debug!(resource = name, %url, "resolved resource from primary search path");
            return Some(url);
        }
        let url = Self::probe(&self.fallback, name)?;
        debug!(resource = name, %url, "resolved resource from fallback search path");
        Some(url)
    }
}

/// A resolver for turning a [`FileLocator`] into a concrete URL.
///
/// The variants form a closed set dispatched through [`resolve`](Self::resolve).
/// No variant ever signals failure by erroring: a `None` result lets the next
/// strategy in a [`Combined`](Self::Combined) chain take its turn.
#[derive(Clone)]
pub enum LocationStrategy {
    /// Return the locator's source URL, if it has one.
    ProvidedUrl,
    /// Treat the file name as an absolute path and verify it exists.
    AbsoluteName,
    /// Probe `base_path/file_name` on the filesystem handle; with no base
    /// path, try to parse the file name itself as a URL.
    FileSystem,
    /// Resolve the file name relative to the base path and verify existence.
    /// Requires both facets to be set.
    BasePath,
    /// Resolve the file name through an external [`ResourceResolver`].
    Classpath(Arc<dyn ResourceResolver>),
    /// Apply each sub-strategy in order; the first non-`None` URL wins.
    Combined(Vec<LocationStrategy>),
}

impl LocationStrategy {
    /// The default resolution chain, in fixed order: provided URL short
    /// circuit, filesystem probe, absolute name, base-path resolution, then
    /// resource lookup rooted at the working directory.
    pub fn default_chain() -> LocationStrategy {
        Self::default_chain_with(Arc::new(SearchPath::default()))
    }

    /// The default chain with a caller-supplied resource resolver in the
    /// final position.
    pub fn default_chain_with(resolver: Arc<dyn ResourceResolver>) -> LocationStrategy {
        LocationStrategy::Combined(vec![
            LocationStrategy::ProvidedUrl,
            LocationStrategy::FileSystem,
            LocationStrategy::AbsoluteName,
            LocationStrategy::BasePath,
            LocationStrategy::Classpath(resolver),
        ])
    }

    /// Try to resolve `locator` to a URL using the given filesystem handle.
    ///
    /// Returns `None` when this strategy cannot find the file; that is the
    /// failure signal, never an error.
    pub fn resolve(&self, fs: &dyn FileSystem, locator: &FileLocator) -> Option<Url> {
        match self {
            LocationStrategy::ProvidedUrl => locator.source_url().cloned(),

            LocationStrategy::AbsoluteName => {
                let name = locator.file_name()?;
                let path = Path::new(name);
                (path.is_absolute() && fs.exists(path))
                    .then(|| path_to_url(path))
                    .flatten()
            }

            LocationStrategy::FileSystem => {
                let name = locator.file_name()?;
                match locator.base_path() {
                    // No base path: the name may itself be a full URL.
                    None => Url::parse(name).ok(),
                    Some(base) => {
                        let path = construct_file_path(Some(base), name);
                        if fs.exists(&path) {
                            path_to_url(&path)
                        } else {
                            debug!(file = name, base = %base.display(), "file not found on filesystem");
                            None
                        }
                    }
                }
            }

            LocationStrategy::BasePath => {
                let name = locator.file_name()?;
                let base = locator.base_path()?;
                let path = construct_file_path(Some(base), name);
                fs.exists(&path).then(|| path_to_url(&path)).flatten()
            }

            LocationStrategy::Classpath(resolver) => {
                let name = locator.file_name()?;
                resolver.resolve(name)
            }

            LocationStrategy::Combined(strategies) => strategies
                .iter()
                .find_map(|strategy| strategy.resolve(fs, locator)),
        }
    }
}

impl std::fmt::Debug for LocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProvidedUrl => f.write_str("ProvidedUrl"),
            Self::AbsoluteName => f.write_str("AbsoluteName"),
            Self::FileSystem => f.write_str("FileSystem"),
            Self::BasePath => f.write_str("BasePath"),
            Self::Classpath(_) => f.write_str("Classpath"),
            Self::Combined(subs) => f.debug_tuple("Combined").field(subs).finish(),
        }
    }
}
