//! Finds the collections of a graph that can be written with compact syntax.
//!
//! There are two kinds of collections:
//! - *Implicit* collections are RDF lists (`rdf:first`/`rdf:rest` chains) that can be written as
//!   `( a b c )`.
//! - *Explicit* collections are blank nodes that can be written as `[ p o ; q o2 ]` (or `[]` if
//!   the blank node has no own triples).
//!
//! [find_collections] runs the individual phases of the analysis on a [CollectionContext]. The
//! phases are also exposed on their own.

mod context;
mod finder;
mod registry;

pub use context::CollectionContext;
pub use finder::{
    claim_collection_triples, collection_claims, find_collections, find_explicit_collections,
    find_implicit_collections, remove_cyclic_collections, remove_ineligible_collections,
    revoke_overused_collections,
};
pub use registry::CollectionRegistry;

use rdf_loom_model::{Node, Triple};

/// Restricts the kinds of collections that are searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionSearchMode {
    /// Search for implicit and explicit collections.
    #[default]
    All,
    ExplicitOnly,
    ImplicitOnly,
}

impl CollectionSearchMode {
    pub fn includes_implicit(self) -> bool {
        matches!(
            self,
            CollectionSearchMode::All | CollectionSearchMode::ImplicitOnly
        )
    }

    pub fn includes_explicit(self) -> bool {
        matches!(
            self,
            CollectionSearchMode::All | CollectionSearchMode::ExplicitOnly
        )
    }
}

/// A collection that may be written with compact syntax.
///
/// For an implicit collection, the triples are the `rdf:first` triples of the list nodes in list
/// order. For an explicit collection, the triples are the triples that are written inside the
/// brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCollection {
    is_explicit: bool,
    has_been_written: bool,
    triples: Vec<Triple>,
}

impl OutputCollection {
    /// Creates an explicit collection with the given `triples`.
    pub fn explicit(triples: Vec<Triple>) -> Self {
        Self {
            is_explicit: true,
            has_been_written: false,
            triples,
        }
    }

    /// Creates an implicit collection from the `rdf:first` triples of its list nodes.
    pub fn implicit(triples: Vec<Triple>) -> Self {
        Self {
            is_explicit: false,
            has_been_written: false,
            triples,
        }
    }

    pub fn is_explicit(&self) -> bool {
        self.is_explicit
    }

    pub fn has_been_written(&self) -> bool {
        self.has_been_written
    }

    /// Marks the collection as written.
    pub fn mark_written(&mut self) {
        self.has_been_written = true;
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Returns the objects of the triples. For an implicit collection, these are the items of the
    /// list.
    pub fn items(&self) -> impl Iterator<Item = &Node> {
        self.triples.iter().map(Triple::object)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
