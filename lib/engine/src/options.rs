/// Options for evaluating triple patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Whether the pair indexes (subject-predicate, subject-object, predicate-object) may be used
    /// when selecting the index of a pattern.
    pub full_triple_indexing: bool,
    /// If enabled, a variable only accepts values that the incoming multiset binds for it.
    pub rigorous_evaluation: bool,
}

impl EvaluationOptions {
    #[must_use]
    pub fn with_full_triple_indexing(mut self, full_triple_indexing: bool) -> Self {
        self.full_triple_indexing = full_triple_indexing;
        self
    }

    #[must_use]
    pub fn with_rigorous_evaluation(mut self, rigorous_evaluation: bool) -> Self {
        self.rigorous_evaluation = rigorous_evaluation;
        self
    }
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            full_triple_indexing: true,
            rigorous_evaluation: false,
        }
    }
}
