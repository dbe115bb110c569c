/// An error raised while constructing a [TriplePattern](crate::TriplePattern).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PatternConstructionError {
    /// The predicate position holds a blank-node placeholder.
    #[error("A blank node placeholder ({0}) cannot be used in the predicate position")]
    BlankNodePredicate(String),
}
