//! Memoized candidate outcomes.

use std::collections::HashMap;

use crate::frontend::compilation::DeclId;
use crate::generator::outcome::Outcome;

/// Outcomes keyed by declaration and compilation version.
///
/// Only one version is kept: storing outcomes for a new version drops everything older.
#[derive(Debug, Default)]
pub struct GenerationCache {
    version: u64,
    entries: HashMap<DeclId, Outcome>,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, decl: DeclId, version: u64) -> Option<&Outcome> {
        if version != self.version {
            return None;
        }
        self.entries.get(&decl)
    }

    pub fn insert(&mut self, decl: DeclId, version: u64, outcome: Outcome) {
        if version != self.version {
            self.entries.clear();
            self.version = version;
        }
        self.entries.insert(decl, outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::compilation::FileId;
    use crate::generator::outcome::{GeneratedUnit, Skip, SkipReason};

    fn decl(ordinal: usize) -> DeclId {
        DeclId { file: FileId(0), ordinal }
    }

    #[test]
    fn test_hit_on_same_version_only() {
        let mut cache = GenerationCache::new();
        cache.insert(decl(0), 3, Ok(GeneratedUnit::new("A.generated", "text")));
        assert!(cache.get(decl(0), 3).is_some());
        assert!(cache.get(decl(0), 4).is_none());
        assert!(cache.get(decl(1), 3).is_none());
    }

    #[test]
    fn test_new_version_evicts_old_entries() {
        let mut cache = GenerationCache::new();
        cache.insert(decl(0), 1, Err(Skip::new(SkipReason::NoMarker)));
        cache.insert(decl(1), 1, Err(Skip::new(SkipReason::NoMarker)));
        cache.insert(decl(2), 2, Err(Skip::new(SkipReason::NotPartial)));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(decl(0), 1).is_none());
    }
}
