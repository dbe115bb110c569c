use rdf_loom_model::{IriParseError, Node};
use std::io;

/// An error that is raised if the structure of an RDF collection is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CollectionError {
    /// A list node has more than one `rdf:first` triple.
    #[error("The list node {node} has multiple rdf:first triples")]
    MultipleFirsts { node: Node },
}

/// An error that is raised while registering a prefix.
#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    /// The prefix name cannot be used in a prefixed name.
    #[error("Invalid prefix name '{0}'")]
    InvalidName(String),
    /// The namespace is not a valid IRI.
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
}

/// An error that is raised while writing a graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WriterError {
    /// An error of the underlying writer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The graph contains a malformed collection.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl From<WriterError> for io::Error {
    #[inline]
    fn from(error: WriterError) -> Self {
        match error {
            WriterError::Io(error) => error,
            WriterError::Collection(error) => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}
