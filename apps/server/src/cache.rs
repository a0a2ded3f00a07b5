use dashmap::DashMap;

use crate::api::overview::Overview;

/// Per-user cache of the composed overview page. Entries are dropped whenever
/// one of the user's categories, expenses or budget shifts changes, so reads
/// after a write are always fresh.
#[derive(Default)]
pub struct OverviewCache {
    entries: DashMap<String, Overview>,
}

impl OverviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<Overview> {
        self.entries.get(user_id).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, user_id: &str, overview: Overview) {
        self.entries.insert(user_id.to_string(), overview);
    }

    pub fn invalidate(&self, user_id: &str) {
        self.entries.remove(user_id);
    }
}
