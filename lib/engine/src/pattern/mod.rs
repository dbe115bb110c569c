//! Triple patterns and the selection of the index used to evaluate them.

mod index_type;
mod item;
mod triple_pattern;

pub use index_type::IndexType;
pub use item::PatternItem;
pub use triple_pattern::TriplePattern;

use std::fmt::{Display, Formatter};

/// One of the three positions of a triple or a triple pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriplePosition {
    Subject,
    Predicate,
    Object,
}

impl TriplePosition {
    /// All positions in the order subject, predicate, object.
    pub const ALL: [TriplePosition; 3] = [
        TriplePosition::Subject,
        TriplePosition::Predicate,
        TriplePosition::Object,
    ];

    /// Returns the index of the position in [Self::ALL].
    pub fn index(self) -> usize {
        match self {
            TriplePosition::Subject => 0,
            TriplePosition::Predicate => 1,
            TriplePosition::Object => 2,
        }
    }
}

impl Display for TriplePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TriplePosition::Subject => f.write_str("subject"),
            TriplePosition::Predicate => f.write_str("predicate"),
            TriplePosition::Object => f.write_str("object"),
        }
    }
}
