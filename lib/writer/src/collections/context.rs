use crate::collections::CollectionRegistry;
use rdf_loom_common::GraphIndex;
use rdf_loom_model::Triple;
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Formatter};

/// The shared state of the collection analysis.
///
/// The context borrows the graph and owns the registry of collections and the set of *claimed*
/// triples. A claimed triple is written as part of a collection and must not be written on its
/// own. The graph itself is never modified.
pub struct CollectionContext<'graph> {
    graph: &'graph dyn GraphIndex,
    pub(super) collections: CollectionRegistry,
    pub(super) claimed: FxHashSet<Triple>,
}

impl<'graph> CollectionContext<'graph> {
    /// Creates a new context with an empty registry.
    pub fn new(graph: &'graph dyn GraphIndex) -> Self {
        Self {
            graph,
            collections: CollectionRegistry::default(),
            claimed: FxHashSet::default(),
        }
    }

    pub fn graph(&self) -> &'graph dyn GraphIndex {
        self.graph
    }

    pub fn collections(&self) -> &CollectionRegistry {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut CollectionRegistry {
        &mut self.collections
    }

    pub fn claimed(&self) -> &FxHashSet<Triple> {
        &self.claimed
    }

    /// Returns whether `triple` is written as part of a collection.
    pub fn is_claimed(&self, triple: &Triple) -> bool {
        self.claimed.contains(triple)
    }

    /// Returns the registry and the claimed triples.
    pub fn into_parts(self) -> (CollectionRegistry, FxHashSet<Triple>) {
        (self.collections, self.claimed)
    }
}

impl Debug for CollectionContext<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionContext")
            .field("collections", &self.collections)
            .field("claimed", &self.claimed.len())
            .finish()
    }
}
