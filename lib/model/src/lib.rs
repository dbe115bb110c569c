//! The data model of RDF Loom.
//!
//! A [Node] is an immutable, cheaply clonable handle to an RDF term or a query variable. A [Triple]
//! is an ordered subject, predicate, and object tuple of nodes. Both build on the data model of
//! Oxigraph, which is re-exported from this crate.

mod error;
mod node;
mod triple;
pub mod vocab;

pub use error::*;
pub use node::*;
pub use triple::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, IriParseError, LanguageTagParseError, Literal, NamedNode,
    Subject, Term, Variable, VariableNameParseError,
};
