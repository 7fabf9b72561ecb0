//! Property sources and their priority-ordered merging.

mod merger;
pub mod properties;
mod property_source;
mod secrets;

pub use merger::merge;
pub use property_source::PropertySource;
pub use secrets::SecretStore;
