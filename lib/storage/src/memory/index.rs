use rdf_loom_model::Triple;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Maps a key (one or two components of a triple) to all triples that have this key.
///
/// The triples of a single key are kept in insertion order.
#[derive(Debug, Clone)]
pub(super) struct TripleIndex<TKey> {
    entries: FxHashMap<TKey, Vec<Triple>>,
}

impl<TKey: Hash + Eq> TripleIndex<TKey> {
    /// Adds `triple` to the entry of `key`. The caller ensures that the triple is new.
    pub(super) fn insert(&mut self, key: TKey, triple: Triple) {
        self.entries.entry(key).or_default().push(triple);
    }

    /// Removes `triple` from the entry of `key`. Empty entries are dropped.
    pub(super) fn remove(&mut self, key: &TKey, triple: &Triple) {
        if let Some(triples) = self.entries.get_mut(key) {
            triples.retain(|t| t != triple);
            if triples.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    /// Returns the triples of `key`.
    pub(super) fn get(&self, key: &TKey) -> &[Triple] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<TKey> Default for TripleIndex<TKey> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}
