//! In-memory session cache for store app details.
//!
//! Entries are keyed by app id, never evicted and never replaced: once an
//! app's details are cached, every later lookup returns the same `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::GameDetail;

/// Shared handle to the detail cache. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct DetailCache {
    entries: Arc<RwLock<HashMap<u32, Arc<GameDetail>>>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached details for `app_id`, if any.
    pub fn get(&self, app_id: u32) -> Option<Arc<GameDetail>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&app_id).cloned()
    }

    /// Caches `detail` under `app_id` unless an entry already exists.
    ///
    /// Returns the entry that ended up in the cache.
    pub fn insert(&self, app_id: u32, detail: GameDetail) -> Arc<GameDetail> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(app_id)
            .or_insert_with(|| Arc::new(detail))
            .clone()
    }

    pub fn contains(&self, app_id: u32) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&app_id)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
