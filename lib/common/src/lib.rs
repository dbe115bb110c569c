//! Contains the abstractions that are shared between the storage layer, the pattern evaluator, and
//! the writers of RDF Loom.

mod graph_index;

pub use graph_index::{GraphIndex, TripleIter};
