use crate::error::PatternConstructionError;
use crate::options::EvaluationOptions;
use crate::pattern::{IndexType, PatternItem, TriplePosition};
use std::fmt::{Display, Formatter};

/// A pattern that matches the triples of a graph.
///
/// The distinct binding names of the pattern and its [IndexType] are computed once during
/// construction. Afterward, the pattern is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    items: [PatternItem; 3],
    /// The distinct binding names, sorted.
    variables: Vec<String>,
    index_type: IndexType,
}

impl TriplePattern {
    /// Creates a new [TriplePattern] using the default [EvaluationOptions].
    pub fn new(
        subject: impl Into<PatternItem>,
        predicate: impl Into<PatternItem>,
        object: impl Into<PatternItem>,
    ) -> Result<Self, PatternConstructionError> {
        Self::new_with_options(subject, predicate, object, &EvaluationOptions::default())
    }

    /// Creates a new [TriplePattern]. The index type is selected based on
    /// [EvaluationOptions::full_triple_indexing].
    ///
    /// Returns an error if `predicate` is a blank-node placeholder.
    pub fn new_with_options(
        subject: impl Into<PatternItem>,
        predicate: impl Into<PatternItem>,
        object: impl Into<PatternItem>,
        options: &EvaluationOptions,
    ) -> Result<Self, PatternConstructionError> {
        let mut items = [subject.into(), predicate.into(), object.into()];
        if let PatternItem::BlankNode { name, .. } = &items[1] {
            return Err(PatternConstructionError::BlankNodePredicate(name.clone()));
        }

        let mut variables: Vec<String> = Vec::new();
        for item in &mut items {
            let Some(name) = item.binding_name() else {
                continue;
            };
            let repeated = variables.iter().any(|v| v == name);
            if !repeated {
                variables.push(name.to_owned());
            }
            item.set_repeated(repeated);
        }
        variables.sort_unstable();

        let [subject, predicate, object] = &items;
        let index_type =
            IndexType::select(subject, predicate, object, options.full_triple_indexing);

        Ok(Self {
            items,
            variables,
            index_type,
        })
    }

    pub fn subject(&self) -> &PatternItem {
        &self.items[0]
    }

    pub fn predicate(&self) -> &PatternItem {
        &self.items[1]
    }

    pub fn object(&self) -> &PatternItem {
        &self.items[2]
    }

    /// Returns the item at the given `position`.
    pub fn item(&self, position: TriplePosition) -> &PatternItem {
        &self.items[position.index()]
    }

    /// Returns the items in the order subject, predicate, object.
    pub fn items(&self) -> &[PatternItem; 3] {
        &self.items
    }

    /// Returns the sorted, distinct binding names of the pattern.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Returns whether every position holds a fixed node.
    pub fn has_no_variables(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns whether the pattern contains no named variables. Blank-node placeholders may still
    /// be present.
    pub fn has_no_explicit_variables(&self) -> bool {
        !self.items.iter().any(PatternItem::is_variable)
    }

    /// Returns whether the pattern consists of three distinct variables and therefore accepts any
    /// triple.
    pub fn is_accept_all(&self) -> bool {
        self.items.iter().all(PatternItem::is_variable) && self.variables.len() == 3
    }

    /// Returns the first position that binds `name`.
    pub fn first_position_of(&self, name: &str) -> Option<TriplePosition> {
        TriplePosition::ALL
            .into_iter()
            .find(|p| self.item(*p).binding_name() == Some(name))
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [subject, predicate, object] = &self.items;
        write!(f, "{subject} {predicate} {object}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::Node;

    fn uri(local: &str) -> Node {
        Node::uri_unchecked(format!("http://example.com/{local}"))
    }

    #[test]
    fn blank_node_predicate_is_rejected() {
        let result = TriplePattern::new(
            PatternItem::variable("s"),
            PatternItem::blank_node("p"),
            PatternItem::variable("o"),
        );
        assert_eq!(
            result,
            Err(PatternConstructionError::BlankNodePredicate("_:p".to_owned()))
        );
    }

    #[test]
    fn repeated_variables_are_marked() {
        let pattern = TriplePattern::new(
            PatternItem::variable("x"),
            PatternItem::variable("x"),
            PatternItem::variable("x"),
        )
        .unwrap();
        assert!(!pattern.subject().is_repeated());
        assert!(pattern.predicate().is_repeated());
        assert!(pattern.object().is_repeated());
        assert_eq!(pattern.variables(), ["x"]);
        assert!(!pattern.is_accept_all());
    }

    #[test]
    fn variables_are_sorted_and_distinct() {
        let pattern = TriplePattern::new(
            PatternItem::variable("z"),
            PatternItem::variable("a"),
            PatternItem::blank_node("b"),
        )
        .unwrap();
        assert_eq!(pattern.variables(), ["_:b", "a", "z"]);
        assert!(!pattern.has_no_explicit_variables());
        assert_eq!(pattern.index_type(), IndexType::None);
    }

    #[test]
    fn fixed_pattern_has_no_variables() {
        let pattern = TriplePattern::new(uri("a"), uri("p"), uri("b")).unwrap();
        assert!(pattern.has_no_variables());
        assert_eq!(pattern.index_type(), IndexType::NoVariables);
    }

    #[test]
    fn index_type_follows_options() {
        let options = EvaluationOptions::default().with_full_triple_indexing(false);
        let pattern =
            TriplePattern::new_with_options(uri("a"), PatternItem::variable("p"), uri("b"), &options)
                .unwrap();
        assert_eq!(pattern.index_type(), IndexType::Subject);
    }

    #[test]
    fn display_uses_sparql_syntax() {
        let pattern = TriplePattern::new(
            PatternItem::variable("s"),
            uri("p"),
            PatternItem::blank_node("o"),
        )
        .unwrap();
        assert_eq!(pattern.to_string(), "?s <http://example.com/p> _:o");
        assert!(!pattern.has_no_explicit_variables());
        assert_eq!(pattern.first_position_of("_:o"), Some(TriplePosition::Object));
    }
}
