//! Provides the RDF vocabularies used by RDF Loom.
//!
//! The `rdf_*` functions return shared [Node] handles of the RDF list vocabulary that is used by the
//! collection analysis.

use crate::Node;
pub use oxrdf::vocab::{rdf, rdfs, xsd};
use std::sync::LazyLock;

static RDF_FIRST: LazyLock<Node> = LazyLock::new(|| rdf::FIRST.into_owned().into());
static RDF_REST: LazyLock<Node> = LazyLock::new(|| rdf::REST.into_owned().into());
static RDF_NIL: LazyLock<Node> = LazyLock::new(|| rdf::NIL.into_owned().into());
static RDF_TYPE: LazyLock<Node> = LazyLock::new(|| rdf::TYPE.into_owned().into());

/// `rdf:first`
pub fn rdf_first() -> Node {
    RDF_FIRST.clone()
}

/// `rdf:rest`
pub fn rdf_rest() -> Node {
    RDF_REST.clone()
}

/// `rdf:nil`
pub fn rdf_nil() -> Node {
    RDF_NIL.clone()
}

/// `rdf:type`
pub fn rdf_type() -> Node {
    RDF_TYPE.clone()
}
