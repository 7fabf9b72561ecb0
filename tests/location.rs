//! Integration tests for the file-location strategy chain and handle resolution.

use layered_config::locate::{
    FileHandle, FileLocator, FileSystem, LocationStrategy, ResourceResolver, SearchPath,
    fully_initialized_locator, locate,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use tempfile::TempDir;
use url::Url;

#[test]
fn test_default_chain_resolves_base_path_and_name() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.conf"), "k=v\n").unwrap();

    let locator = FileLocator::builder()
        .file_name("app.conf")
        .base_path(dir.path())
        .build()
        .unwrap();

    let url = locate(&locator).unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/app.conf"));
}

#[test]
fn test_provided_url_short_circuits_the_chain() {
    // The URL wins even though the name/base point nowhere.
    let url = Url::parse("file:///definitely/not/probed/app.conf").unwrap();
    let locator = FileLocator::builder()
        .file_name("unrelated.conf")
        .base_path("/nonexistent-layered-config")
        .source_url(url.clone())
        .build()
        .unwrap();
    assert_eq!(locate(&locator), Some(url));
}

#[test]
fn test_chain_falls_through_to_search_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("resource.conf"), "x").unwrap();

    let locator = FileLocator::builder()
        .file_name("resource.conf")
        .location_strategy(LocationStrategy::default_chain_with(Arc::new(
            SearchPath::new([dir.path().to_path_buf()]),
        )))
        .build()
        .unwrap();

    let url = locate(&locator).unwrap();
    assert!(url.path().ends_with("/resource.conf"));
}

#[test]
fn test_classpath_resolution_fills_all_facets() {
    struct FixedClasspath;
    impl ResourceResolver for FixedClasspath {
        fn resolve(&self, name: &str) -> Option<Url> {
            Url::parse(&format!("classpath:/{name}")).ok()
        }
    }

    let locator = FileLocator::builder()
        .file_name("app.conf")
        .location_strategy(LocationStrategy::Classpath(Arc::new(FixedClasspath)))
        .build()
        .unwrap();

    let full = fully_initialized_locator(&locator).unwrap();
    assert!(full.is_fully_initialized());
    assert_eq!(full.file_name(), Some("app.conf"));
    assert_eq!(full.base_path(), Some(Path::new("/")));
    assert_eq!(
        full.source_url(),
        Some(&Url::parse("classpath:/app.conf").unwrap())
    );
}

#[test]
fn test_explicitly_set_facets_are_never_overwritten() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("real-name.conf"), "x").unwrap();

    let pinned_base = PathBuf::from("/pinned/base");
    let locator = FileLocator::builder()
        .source_url(Url::from_file_path(dir.path().join("real-name.conf")).unwrap())
        .base_path(&pinned_base)
        .build()
        .unwrap();

    let full = fully_initialized_locator(&locator).unwrap();
    // The derived file name is filled in; the pinned base path stays.
    assert_eq!(full.file_name(), Some("real-name.conf"));
    assert_eq!(full.base_path(), Some(pinned_base.as_path()));
}

/// Filesystem wrapper counting existence probes.
struct CountingFs {
    probes: AtomicUsize,
}

impl CountingFs {
    fn new() -> Self {
        Self {
            probes: AtomicUsize::new(0),
        }
    }
}

impl FileSystem for CountingFs {
    fn exists(&self, path: &Path) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        path.exists()
    }
}

#[test]
fn test_concurrent_locate_adopts_one_resolution() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.conf"), "k=v\n").unwrap();

    let fs = Arc::new(CountingFs::new());
    let locator = FileLocator::builder()
        .file_name("app.conf")
        .base_path(dir.path())
        .file_system(fs.clone())
        .build()
        .unwrap();
    let handle = Arc::new(FileHandle::new(locator));

    let threads = 10;
    let barrier = Arc::new(Barrier::new(threads));
    let workers: Vec<_> = (0..threads)
        .map(|_| {
            let handle = Arc::clone(&handle);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                handle.locate()
            })
        })
        .collect();

    for worker in workers {
        // Every caller observes success once the first swap lands.
        assert!(worker.join().unwrap());
    }

    assert!(handle.is_located());
    let adopted = handle.locator();
    assert!(adopted.is_fully_initialized());

    // A subsequent call is a pure cache hit: no further filesystem probes.
    let probes_before = fs.probes.load(Ordering::SeqCst);
    assert!(handle.locate());
    assert_eq!(fs.probes.load(Ordering::SeqCst), probes_before);
    assert_eq!(handle.locator(), adopted);
}

#[test]
fn test_unresolvable_handle_reports_false_from_all_threads() {
    let locator = FileLocator::builder()
        .file_name("missing-always.conf")
        .base_path("/nonexistent-layered-config")
        .build()
        .unwrap();
    let handle = Arc::new(FileHandle::new(locator));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            std::thread::spawn(move || handle.locate())
        })
        .collect();

    for worker in workers {
        assert!(!worker.join().unwrap());
    }
    assert!(!handle.is_located());
}
