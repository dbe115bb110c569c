use crate::collections::OutputCollection;
use rdf_loom_model::Node;
use rustc_hash::FxHashMap;

/// Maps the key nodes of collections to the collections.
///
/// The key of an implicit collection is the head of the list, the key of an explicit collection
/// is its blank node. Iteration follows the insertion order.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    keys: Vec<Node>,
    collections: FxHashMap<Node, OutputCollection>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `collection` under `key`. An existing collection is replaced but keeps its
    /// position.
    pub fn insert(&mut self, key: Node, collection: OutputCollection) -> Option<OutputCollection> {
        let previous = self.collections.insert(key.clone(), collection);
        if previous.is_none() {
            self.keys.push(key);
        }
        previous
    }

    pub fn get(&self, key: &Node) -> Option<&OutputCollection> {
        self.collections.get(key)
    }

    pub fn get_mut(&mut self, key: &Node) -> Option<&mut OutputCollection> {
        self.collections.get_mut(key)
    }

    pub fn contains_key(&self, key: &Node) -> bool {
        self.collections.contains_key(key)
    }

    /// Removes the collection of `key`.
    pub fn remove(&mut self, key: &Node) -> Option<OutputCollection> {
        let removed = self.collections.remove(key)?;
        self.keys.retain(|k| k != key);
        Some(removed)
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Node> {
        self.keys.iter()
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &OutputCollection)> {
        self.keys
            .iter()
            .filter_map(|key| Some((key, self.collections.get(key)?)))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
