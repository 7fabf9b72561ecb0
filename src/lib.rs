//! # layered-config
//!
//! Layered configuration resolution with priority-ordered sources and a
//! file-location strategy chain.
//!
//! ## Overview
//!
//! `layered-config` provides two composable primitives for modelling layered
//! configuration:
//! - A [`PropertyRetriever`](core::PropertyRetriever) chain: pure
//!   `key -> value | absent` lookups combined with `or`, where the first
//!   retriever holding a key wins.
//! - A priority-ordered [`merge`](sources::merge) of immutable
//!   [`PropertySource`](sources::PropertySource) snapshots, where the highest
//!   priority source wins.
//!
//! Independently, the [`locate`] module turns a symbolic file reference —
//! name, optional base path, optional URL — into a concrete URL through a
//! chain of location strategies, and [`FileHandle`](locate::FileHandle)
//! caches the resolved location behind a lock-free atomically-swappable
//! reference.
//!
//! ## Quick Start
//!
//! ```rust
//! use layered_config::prelude::*;
//! use std::collections::HashMap;
//!
//! # fn example() -> layered_config::error::Result<()> {
//! let defaults = PropertyRetriever::from_map(HashMap::from([
//!     ("server.port".to_string(), "8080".to_string()),
//! ]));
//!
//! // Environment overrides beat file-backed defaults.
//! let config = Configuration::of([PropertyRetriever::environment(), defaults]);
//!
//! let port = config.require("server.port")?;
//! assert_eq!(port, "8080");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Locating files
//!
//! ```rust,no_run
//! use layered_config::locate::{FileHandle, FileLocator};
//!
//! let locator = FileLocator::builder()
//!     .file_name("app.properties")
//!     .base_path("/etc/myapp")
//!     .build()?;
//!
//! let handle = FileHandle::new(locator);
//! if handle.locate() {
//!     println!("resolved: {:?}", handle.url());
//! }
//! # Ok::<(), layered_config::error::ConfigError>(())
//! ```
//!
//! ## Precedence conventions
//!
//! The two composition primitives deliberately run in opposite directions:
//! `or` chains are **first-wins**, while `merge` is
//! **highest-priority-wins**. Each is documented at its definition; pick the
//! one whose direction reads naturally for your composition and do not
//! assume they are interchangeable.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod locate;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{Configuration, PropertyRetriever};
    pub use crate::error::{ConfigError, Result};
    pub use crate::locate::{FileHandle, FileLocator, LocationStrategy};
    pub use crate::sources::{PropertySource, SecretStore, merge};
}
