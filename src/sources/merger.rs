//! Priority-ordered merging of property sources.

use crate::sources::PropertySource;
use std::collections::HashMap;
use tracing::trace;

/// Merge sources into one flattened map, respecting priority order.
///
/// Sources are stably sorted ascending by [`priority`](PropertySource::priority)
/// and folded in that order, so a later (higher-priority) source overwrites
/// keys already inserted by a lower-priority one. Ties keep their relative
/// list order, meaning the source appearing **later** in `sources` wins.
///
/// # Precedence
///
/// This is **highest-priority-wins** — the opposite direction from the
/// first-wins [`or`](crate::core::PropertyRetriever::or) chain. Both
/// conventions are kept deliberately; pick the primitive whose direction
/// matches the composition you are expressing.
///
/// Missing keys are plain absence; merging never fails.
pub fn merge(sources: &[PropertySource]) -> HashMap<String, String> {
    let mut ordered: Vec<&PropertySource> = sources.iter().collect();
    // sort_by_key is stable: equal priorities keep list order.
    ordered.sort_by_key(|source| source.priority());

    let mut merged = HashMap::new();
    for source in ordered {
        trace!(source = source.name(), priority = source.priority(), "merging source");
        for (key, value) in source.properties() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
