use crate::Node;

/// An error raised when a [Triple](crate::Triple) is created from nodes that are not allowed in
/// the given position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TripleConstructionError {
    /// Only URIs and blank nodes can be subjects.
    #[error("{0} can not be used as the subject of a triple")]
    InvalidSubject(Node),
    /// Only URIs can be predicates.
    #[error("{0} can not be used as the predicate of a triple")]
    InvalidPredicate(Node),
    /// Variables can not be objects of a triple.
    #[error("{0} can not be used as the object of a triple")]
    InvalidObject(Node),
}
