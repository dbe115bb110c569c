mod error;
mod eval;
mod options;
pub mod pattern;
pub mod solution;

pub use error::PatternConstructionError;
pub use eval::EvaluationContext;
pub use options::EvaluationOptions;
pub use pattern::{IndexType, PatternItem, TriplePattern, TriplePosition};
pub use solution::{Multiset, Solution};
