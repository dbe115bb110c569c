use crate::pattern::{PatternItem, TriplePosition};
use std::fmt::{Display, Formatter};

/// The index that is used for finding the candidate triples of a pattern.
///
/// The index is named after the positions of the pattern that hold a fixed node. Indexes that are
/// keyed by more positions yield fewer candidates, so [IndexType::select] prefers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    Subject,
    Predicate,
    Object,
    SubjectPredicate,
    SubjectObject,
    PredicateObject,
    /// Every position is fixed. Evaluation is a single membership test.
    NoVariables,
    /// No position is fixed. Evaluation relies on the incoming bindings or scans the graph.
    None,
}

impl IndexType {
    /// Selects the index for a pattern with the given items.
    ///
    /// If `full_triple_indexing` is disabled, a fixed subject always selects
    /// [IndexType::Subject] and a fixed predicate always selects [IndexType::Predicate].
    pub fn select(
        subject: &PatternItem,
        predicate: &PatternItem,
        object: &PatternItem,
        full_triple_indexing: bool,
    ) -> Self {
        if subject.is_fixed() && predicate.is_fixed() && object.is_fixed() {
            return IndexType::NoVariables;
        }

        if subject.is_fixed() {
            if full_triple_indexing && predicate.is_fixed() {
                IndexType::SubjectPredicate
            } else if full_triple_indexing && object.is_fixed() {
                IndexType::SubjectObject
            } else {
                IndexType::Subject
            }
        } else if predicate.is_fixed() {
            if full_triple_indexing && object.is_fixed() {
                IndexType::PredicateObject
            } else {
                IndexType::Predicate
            }
        } else if object.is_fixed() {
            IndexType::Object
        } else {
            IndexType::None
        }
    }

    /// Returns the positions that key the index.
    pub fn positions(self) -> &'static [TriplePosition] {
        match self {
            IndexType::Subject => &[TriplePosition::Subject],
            IndexType::Predicate => &[TriplePosition::Predicate],
            IndexType::Object => &[TriplePosition::Object],
            IndexType::SubjectPredicate => &[TriplePosition::Subject, TriplePosition::Predicate],
            IndexType::SubjectObject => &[TriplePosition::Subject, TriplePosition::Object],
            IndexType::PredicateObject => &[TriplePosition::Predicate, TriplePosition::Object],
            IndexType::NoVariables => &TriplePosition::ALL,
            IndexType::None => &[],
        }
    }
}

impl Display for IndexType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndexType::Subject => "Subject",
            IndexType::Predicate => "Predicate",
            IndexType::Object => "Object",
            IndexType::SubjectPredicate => "SubjectPredicate",
            IndexType::SubjectObject => "SubjectObject",
            IndexType::PredicateObject => "PredicateObject",
            IndexType::NoVariables => "NoVariables",
            IndexType::None => "None",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::Node;

    fn fixed(local: &str) -> PatternItem {
        PatternItem::fixed(Node::uri_unchecked(format!("http://example.com/{local}")))
    }

    fn var(name: &str) -> PatternItem {
        PatternItem::variable(name)
    }

    #[test]
    fn fixed_subject_and_object_selects_subject_object() {
        let (s, p, o) = (fixed("s"), var("p"), fixed("o"));
        assert_eq!(IndexType::select(&s, &p, &o, true), IndexType::SubjectObject);
        assert_eq!(IndexType::select(&s, &p, &o, false), IndexType::Subject);
    }

    #[test]
    fn selection_prefers_subject_predicate() {
        let (s, p, o) = (fixed("s"), fixed("p"), var("o"));
        assert_eq!(
            IndexType::select(&s, &p, &o, true),
            IndexType::SubjectPredicate
        );
        assert_eq!(IndexType::select(&s, &p, &o, false), IndexType::Subject);
    }

    #[test]
    fn selection_without_fixed_subject() {
        let (s, p, o) = (var("s"), fixed("p"), fixed("o"));
        assert_eq!(
            IndexType::select(&s, &p, &o, true),
            IndexType::PredicateObject
        );
        assert_eq!(IndexType::select(&s, &p, &o, false), IndexType::Predicate);
        assert_eq!(
            IndexType::select(&s, &var("p"), &o, true),
            IndexType::Object
        );
        assert_eq!(
            IndexType::select(&s, &var("p"), &var("o"), true),
            IndexType::None
        );
    }

    #[test]
    fn all_fixed_always_selects_no_variables() {
        let (s, p, o) = (fixed("s"), fixed("p"), fixed("o"));
        assert_eq!(IndexType::select(&s, &p, &o, true), IndexType::NoVariables);
        assert_eq!(IndexType::select(&s, &p, &o, false), IndexType::NoVariables);
    }

    #[test]
    fn selection_is_deterministic() {
        let items = [fixed("a"), var("b"), PatternItem::blank_node("c")];
        for s in &items {
            for p in &items {
                for o in &items {
                    for full in [true, false] {
                        assert_eq!(
                            IndexType::select(s, p, o, full),
                            IndexType::select(s, p, o, full)
                        );
                    }
                }
            }
        }
    }
}
