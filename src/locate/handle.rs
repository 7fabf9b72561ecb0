//! The concurrency-safe handle coupling a locator to a loadable payload.

use crate::error::{ConfigError, Result};
use crate::locate::{
    FileLocator, base_path_from_url, construct_file_path, file_name_from_url,
    fully_initialized_locator, locate, path_to_url,
};
use arc_swap::ArcSwap;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;
use url::Url;

/// A payload that can be read from and written to a byte stream.
///
/// Implement this on the object a [`FileHandle`] manages — typically a parsed
/// configuration — to let the handle drive persistence through its resolved
/// location.
pub trait FileBased: Send {
    /// Populate this object from the given reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or interpreting the bytes fails.
    fn read(&mut self, reader: &mut dyn Read) -> Result<()>;

    /// Serialize this object to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, writer: &mut dyn Write) -> Result<()>;
}

/// The byte-level I/O collaborator.
///
/// The handle only ever *computes* a URL; opening it for reading or writing
/// is delegated here. The default [`StdByteIo`] supports `file:` URLs.
pub trait ByteIo: Send + Sync {
    /// Open the resource behind `url` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or opening fails.
    fn open_read(&self, url: &Url) -> Result<Box<dyn Read>>;

    /// Open the resource behind `url` for writing, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or opening fails.
    fn open_write(&self, url: &Url) -> Result<Box<dyn Write>>;
}

/// Standard filesystem implementation of [`ByteIo`] for `file:` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdByteIo;

impl StdByteIo {
    fn to_path(url: &Url) -> Result<PathBuf> {
        url.to_file_path()
            .map_err(|()| ConfigError::Load(format!("Unsupported URL for file IO: {url}")))
    }
}

impl ByteIo for StdByteIo {
    fn open_read(&self, url: &Url) -> Result<Box<dyn Read>> {
        let path = Self::to_path(url)?;
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn open_write(&self, url: &Url) -> Result<Box<dyn Write>> {
        let path = Self::to_path(url)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Box::new(std::fs::File::create(path)?))
    }
}

/// A thread-safe handle around an atomically-swappable [`FileLocator`] and an
/// optional managed payload.
///
/// Multiple threads may share one handle and call [`locate`](Self::locate)
/// and the read accessors concurrently. The only mutable state is the single
/// reference to the current locator; every read takes one consistent snapshot
/// of it, so no partially-updated locator is ever observable. Writers never
/// block: resolution races are settled by a compare-and-swap retry loop.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::locate::{FileHandle, FileLocator};
///
/// let locator = FileLocator::builder()
///     .file_name("app.properties")
///     .base_path("/etc/myapp")
///     .build()
///     .unwrap();
/// let handle = FileHandle::new(locator);
///
/// if handle.locate() {
///     println!("resolved to {:?}", handle.url());
/// }
/// ```
pub struct FileHandle {
    /// The current locator; the sole synchronization point of the handle.
    locator: ArcSwap<FileLocator>,
    content: Option<Mutex<Box<dyn FileBased>>>,
    io: Arc<dyn ByteIo>,
}

impl FileHandle {
    /// Create a handle for a location only, with no managed payload.
    ///
    /// Such a handle can resolve and answer location queries but cannot
    /// [`load`](Self::load) or [`save`](Self::save).
    pub fn new(locator: FileLocator) -> Self {
        Self {
            locator: ArcSwap::from_pointee(locator),
            content: None,
            io: Arc::new(StdByteIo),
        }
    }

    /// Create a handle managing `content` at the given location.
    pub fn with_content(locator: FileLocator, content: Box<dyn FileBased>) -> Self {
        Self {
            locator: ArcSwap::from_pointee(locator),
            content: Some(Mutex::new(content)),
            io: Arc::new(StdByteIo),
        }
    }

    /// Replace the byte I/O collaborator.
    pub fn with_io(mut self, io: Arc<dyn ByteIo>) -> Self {
        self.io = io;
        self
    }

    /// A snapshot of the current locator.
    pub fn locator(&self) -> FileLocator {
        FileLocator::clone(&self.locator.load())
    }

    /// Resolve the handle's locator into a fully-initialized one.
    ///
    /// Idempotent and lock-free: the fully-initialized replacement is
    /// installed with a compare-and-swap, and a failed swap means another
    /// caller resolved first — the loop then re-reads and re-evaluates from
    /// that caller's result. A locator that is already fully initialized
    /// returns `true` without performing any I/O.
    ///
    /// Returns `false` only when the strategy chain cannot resolve the
    /// observed locator.
    pub fn locate(&self) -> bool {
        loop {
            let current = self.locator.load_full();
            if current.is_fully_initialized() {
                return true;
            }
            let Some(full) = fully_initialized_locator(&current) else {
                debug!(locator = ?*current, "location could not be resolved");
                return false;
            };
            let prev = self.locator.compare_and_swap(&current, Arc::new(full));
            if Arc::ptr_eq(&prev, &current) {
                return true;
            }
            // Lost the race to another caller; retry against its result.
        }
    }

    /// Whether the current locator is fully initialized.
    pub fn is_located(&self) -> bool {
        self.locator.load().is_fully_initialized()
    }

    /// The file name, derived from the URL when only a URL is set.
    pub fn file_name(&self) -> Option<String> {
        let locator = self.locator.load();
        locator
            .file_name()
            .map(str::to_string)
            .or_else(|| locator.source_url().and_then(file_name_from_url))
    }

    /// The base path, derived from the URL when only a URL is set.
    pub fn base_path(&self) -> Option<PathBuf> {
        let locator = self.locator.load();
        locator
            .base_path()
            .map(PathBuf::from)
            .or_else(|| locator.source_url().and_then(base_path_from_url))
    }

    /// The URL: the locator's own source URL, or the result of running the
    /// strategy chain against the current snapshot.
    pub fn url(&self) -> Option<Url> {
        let locator = self.locator.load();
        locator.source_url().cloned().or_else(|| locate(&locator))
    }

    /// The encoding, if one was set on the locator.
    pub fn encoding(&self) -> Option<String> {
        self.locator.load().encoding().map(str::to_string)
    }

    /// Re-point the handle at a different file name.
    ///
    /// Replaces the locator wholesale; previously derived facets other than
    /// the ones carried over by the builder are discarded, and the next
    /// [`locate`](Self::locate) starts over.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt locator would be invalid.
    pub fn set_file_name(&self, file_name: impl Into<String>) -> Result<()> {
        let rebuilt = FileLocator::builder_from(&self.locator.load())
            .file_name(file_name)
            .build()?;
        self.locator.store(Arc::new(rebuilt));
        Ok(())
    }

    /// Re-point the handle at a different base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt locator would be invalid.
    pub fn set_base_path(&self, base_path: impl Into<PathBuf>) -> Result<()> {
        let rebuilt = FileLocator::builder_from(&self.locator.load())
            .base_path(base_path)
            .build()?;
        self.locator.store(Arc::new(rebuilt));
        Ok(())
    }

    /// Re-point the handle at an explicit URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuilt locator would be invalid.
    pub fn set_source_url(&self, url: Url) -> Result<()> {
        let rebuilt = FileLocator::builder_from(&self.locator.load())
            .source_url(url)
            .build()?;
        self.locator.store(Arc::new(rebuilt));
        Ok(())
    }

    /// Load the managed payload from the resolved location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvableLocation`] when the strategy chain
    /// is exhausted, [`ConfigError::Load`] when the handle has no payload,
    /// and propagates I/O and payload read errors.
    pub fn load(&self) -> Result<()> {
        let content = self.require_content()?;
        let locator = self.locator.load_full();
        let url = locate(&locator)
            .ok_or_else(|| ConfigError::UnresolvableLocation(format!("{:?}", *locator)))?;
        let mut reader = self.io.open_read(&url)?;
        let mut payload = content.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        payload.read(reader.as_mut())
    }

    /// Save the managed payload to the handle's location.
    ///
    /// Unlike loading, saving cannot rely on the strategy chain — the target
    /// may not exist yet. The URL is the locator's own source URL when set,
    /// otherwise it is constructed from the base path and file name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvableLocation`] when no target URL can
    /// be determined, [`ConfigError::Load`] when the handle has no payload,
    /// and propagates I/O and payload write errors.
    pub fn save(&self) -> Result<()> {
        let content = self.require_content()?;
        let locator = self.locator.load_full();
        let url = locator
            .source_url()
            .cloned()
            .or_else(|| {
                let name = locator.file_name()?;
                path_to_url(&construct_file_path(locator.base_path(), name))
            })
            .ok_or_else(|| ConfigError::UnresolvableLocation(format!("{:?}", *locator)))?;
        let mut writer = self.io.open_write(&url)?;
        let payload = content.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        payload.write(writer.as_mut())?;
        writer.flush()?;
        Ok(())
    }

    fn require_content(&self) -> Result<&Mutex<Box<dyn FileBased>>> {
        self.content
            .as_ref()
            .ok_or_else(|| ConfigError::Load("No content associated with this file handle".to_string()))
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("locator", &*self.locator.load())
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}
