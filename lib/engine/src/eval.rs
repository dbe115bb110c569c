use crate::options::EvaluationOptions;
use crate::pattern::{IndexType, PatternItem, TriplePattern, TriplePosition};
use crate::solution::{Multiset, Solution};
use rdf_loom_common::{GraphIndex, TripleIter};
use rdf_loom_model::{Node, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{Debug, Formatter};
use tracing::{debug, trace};

static IDENTITY: Multiset = Multiset::Identity;

/// The state that is required for evaluating a [TriplePattern].
///
/// A context borrows the graph and the incoming multiset. Concurrent evaluations over the same
/// graph must each use their own context. The graph must not be modified while a context is
/// alive.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'ctx> {
    graph: &'ctx dyn GraphIndex,
    input: &'ctx Multiset,
    options: EvaluationOptions,
}

impl<'ctx> EvaluationContext<'ctx> {
    /// Creates a new context over `graph`. The incoming multiset is the identity.
    pub fn new(graph: &'ctx dyn GraphIndex) -> Self {
        Self {
            graph,
            input: &IDENTITY,
            options: EvaluationOptions::default(),
        }
    }

    /// Sets the incoming multiset.
    #[must_use]
    pub fn with_input(mut self, input: &'ctx Multiset) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn graph(&self) -> &'ctx dyn GraphIndex {
        self.graph
    }

    pub fn input(&self) -> &'ctx Multiset {
        self.input
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    /// Returns the binding name of `item` if the incoming multiset binds it in every solution.
    fn bound_name<'item>(&self, item: &'item PatternItem) -> Option<&'item str> {
        item.binding_name()
            .filter(|name| self.input.binds_everywhere(name))
    }
}

impl Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("graph_len", &self.graph.len())
            .field("input_len", &self.input.len())
            .field("options", &self.options)
            .finish()
    }
}

impl TriplePattern {
    /// Evaluates the pattern against the graph and the incoming multiset of `context`.
    ///
    /// A pattern without variables yields [Multiset::Identity] if the graph contains the triple
    /// and [Multiset::Null] otherwise. Any other pattern yields one solution per accepted
    /// candidate triple.
    pub fn evaluate(&self, context: &EvaluationContext<'_>) -> Multiset {
        debug!(pattern = %self, index_type = %self.index_type(), "Evaluating triple pattern");

        if self.index_type() == IndexType::NoVariables {
            let [subject, predicate, object] = self.items().each_ref().map(PatternItem::fixed_node);
            let (Some(subject), Some(predicate), Some(object)) = (subject, predicate, object)
            else {
                return Multiset::Null;
            };
            let triple = Triple::new_unchecked(subject.clone(), predicate.clone(), object.clone());
            return if context.graph().contains(&triple) {
                Multiset::Identity
            } else {
                Multiset::Null
            };
        }

        let acceptor = Acceptor::new(self, context);
        let mut output = Multiset::with_variables(self.variables().iter().cloned());
        for triple in self.candidate_triples(context) {
            if acceptor.accepts(&triple) {
                output.push(self.create_solution(&triple));
            }
        }

        trace!(solutions = output.len(), "Evaluated triple pattern");
        output
    }

    /// Returns the triples that may match the pattern.
    ///
    /// The positions that key the index of the pattern are looked up with their fixed nodes. If
    /// the incoming multiset binds the variables of other positions, the graph is probed once per
    /// distinct combination of their values instead. Every returned triple must still pass
    /// [Self::accepts].
    pub fn candidate_triples<'ctx>(&self, context: &EvaluationContext<'ctx>) -> TripleIter<'ctx> {
        let graph = context.graph();
        let index_positions = self.index_type().positions();

        let mut lookup: [Option<Node>; 3] = [None, None, None];
        let mut bound_positions = Vec::new();
        let mut bound_names = Vec::new();
        for position in TriplePosition::ALL {
            let item = self.item(position);
            if index_positions.contains(&position) {
                lookup[position.index()] = item.fixed_node().cloned();
            } else if let Some(name) = context.bound_name(item) {
                bound_positions.push(position);
                bound_names.push(name);
            }
        }

        if bound_names.is_empty() {
            let [subject, predicate, object] = lookup;
            return graph.triples_matching(subject.as_ref(), predicate.as_ref(), object.as_ref());
        }

        let rows = context.input().distinct_rows(&bound_names);
        trace!(
            probes = rows.len(),
            bound = ?bound_positions,
            "Probing graph with bound values"
        );
        Box::new(rows.into_iter().flat_map(move |row| {
            let mut lookup = lookup.clone();
            for (position, value) in bound_positions.iter().zip(row) {
                lookup[position.index()] = Some(value);
            }
            let [subject, predicate, object] = lookup;
            graph.triples_matching(subject.as_ref(), predicate.as_ref(), object.as_ref())
        }))
    }

    /// Returns whether `triple` matches the pattern given the incoming multiset of `context`.
    pub fn accepts(&self, context: &EvaluationContext<'_>, triple: &Triple) -> bool {
        Acceptor::new(self, context).accepts(triple)
    }

    /// Creates the solution that binds the variables of the pattern to the nodes of `triple`.
    /// Repeated variables are bound by their first position.
    pub fn create_solution(&self, triple: &Triple) -> Solution {
        let mut solution = Solution::new();
        for (item, node) in self.items().iter().zip(triple_nodes(triple)) {
            if let Some(name) = item.binding_name() {
                if !item.is_repeated() {
                    solution.insert(name, node.clone());
                }
            }
        }
        solution
    }
}

fn triple_nodes(triple: &Triple) -> [&Node; 3] {
    [triple.subject(), triple.predicate(), triple.object()]
}

/// Decides whether candidate triples match a pattern.
struct Acceptor<'pattern> {
    pattern: &'pattern TriplePattern,
    /// The values that a binding name may take. Only populated in rigorous evaluation for names
    /// that are bound in every incoming solution.
    allowed_values: FxHashMap<&'pattern str, FxHashSet<Node>>,
}

impl<'pattern> Acceptor<'pattern> {
    fn new(pattern: &'pattern TriplePattern, context: &EvaluationContext<'_>) -> Self {
        let mut allowed_values = FxHashMap::default();
        if context.options().rigorous_evaluation {
            for item in pattern.items() {
                if let Some(name) = context.bound_name(item) {
                    allowed_values
                        .entry(name)
                        .or_insert_with(|| context.input().distinct_values(name).into_iter().collect());
                }
            }
        }
        Self {
            pattern,
            allowed_values,
        }
    }

    fn accepts(&self, triple: &Triple) -> bool {
        let nodes = triple_nodes(triple);
        self.pattern
            .items()
            .iter()
            .zip(nodes)
            .all(|(item, node)| match item {
                PatternItem::NodeMatch(expected) => expected == node,
                PatternItem::Variable { name, repeated } | PatternItem::BlankNode { name, repeated } => {
                    if *repeated {
                        self.pattern
                            .first_position_of(name)
                            .is_some_and(|first| nodes[first.index()] == node)
                    } else {
                        match self.allowed_values.get(name.as_str()) {
                            Some(values) => values.contains(node),
                            None => true,
                        }
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rdf_loom_model::vocab::rdf_type;
    use rdf_loom_storage::memory::MemoryGraph;

    fn uri(local: &str) -> Node {
        Node::uri_unchecked(format!("http://example.com/{local}"))
    }

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new_unchecked(uri(s), uri(p), uri(o))
    }

    fn var(name: &str) -> PatternItem {
        PatternItem::variable(name)
    }

    fn example_graph() -> MemoryGraph {
        [
            triple("a", "knows", "b"),
            triple("a", "knows", "c"),
            triple("b", "knows", "c"),
            triple("c", "likes", "a"),
            triple("a", "a", "b"),
            triple("a", "c", "b"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn repeated_variable_requires_equal_nodes() {
        let graph = example_graph();
        let pattern = TriplePattern::new(var("x"), var("x"), var("o")).unwrap();
        let result = pattern.evaluate(&EvaluationContext::new(&graph));
        assert_snapshot!(result, @"{?o = <http://example.com/b>, ?x = <http://example.com/a>}");
    }

    #[test]
    fn repeated_object_is_compared_to_its_first_position() {
        let graph: MemoryGraph = [triple("a", "p", "a"), triple("a", "p", "b")]
            .into_iter()
            .collect();
        let pattern = TriplePattern::new(var("x"), uri("p"), var("x")).unwrap();
        let result = pattern.evaluate(&EvaluationContext::new(&graph));
        assert_snapshot!(result, @"{?x = <http://example.com/a>}");
    }

    #[test]
    fn fixed_pattern_yields_identity_or_null() {
        let mut graph = MemoryGraph::new();
        graph.insert(Triple::new_unchecked(uri("a"), rdf_type(), uri("b")));
        let pattern = TriplePattern::new(uri("a"), rdf_type(), uri("b")).unwrap();
        assert_eq!(
            pattern.evaluate(&EvaluationContext::new(&graph)),
            Multiset::Identity
        );

        let empty = MemoryGraph::new();
        let result = pattern.evaluate(&EvaluationContext::new(&empty));
        assert_eq!(result, Multiset::Null);
        assert!(result.is_null());
    }

    #[test]
    fn subject_index_scans_subject() {
        let graph = example_graph();
        let pattern = TriplePattern::new(uri("a"), var("p"), var("o")).unwrap();
        assert_eq!(pattern.index_type(), IndexType::Subject);
        let result = pattern.evaluate(&EvaluationContext::new(&graph));
        assert_snapshot!(result, @r"
        {?o = <http://example.com/b>, ?p = <http://example.com/knows>}
        {?o = <http://example.com/c>, ?p = <http://example.com/knows>}
        {?o = <http://example.com/b>, ?p = <http://example.com/a>}
        {?o = <http://example.com/b>, ?p = <http://example.com/c>}
        ");
    }

    #[test]
    fn bound_variables_probe_the_graph() {
        let graph = example_graph();
        let input = Multiset::from_solutions([
            Solution::from_iter([("o", uri("c"))]),
            Solution::from_iter([("o", uri("c"))]),
            Solution::from_iter([("o", uri("z"))]),
        ]);
        let pattern = TriplePattern::new(var("s"), uri("knows"), var("o")).unwrap();
        let context = EvaluationContext::new(&graph).with_input(&input);
        let result = pattern.evaluate(&context);
        assert_snapshot!(result, @r"
        {?o = <http://example.com/c>, ?s = <http://example.com/a>}
        {?o = <http://example.com/c>, ?s = <http://example.com/b>}
        ");
    }

    #[test]
    fn fully_bound_variables_use_existence_probes() {
        let graph = example_graph();
        let input = Multiset::from_solutions([
            Solution::from_iter([("s", uri("a")), ("o", uri("b"))]),
            Solution::from_iter([("s", uri("b")), ("o", uri("a"))]),
        ]);
        let pattern = TriplePattern::new(var("s"), uri("knows"), var("o")).unwrap();
        let context = EvaluationContext::new(&graph).with_input(&input);
        assert_eq!(pattern.candidate_triples(&context).count(), 1);
        assert_snapshot!(pattern.evaluate(&context), @"{?o = <http://example.com/b>, ?s = <http://example.com/a>}");
    }

    #[test]
    fn partially_bound_variable_is_not_probed() {
        let graph = example_graph();
        let input = Multiset::from_solutions([
            Solution::from_iter([("o", uri("c"))]),
            Solution::from_iter([("x", uri("c"))]),
        ]);
        let pattern = TriplePattern::new(var("s"), uri("knows"), var("o")).unwrap();
        let context = EvaluationContext::new(&graph).with_input(&input);
        assert_eq!(pattern.evaluate(&context).len(), 3);
    }

    #[test]
    fn unindexed_pattern_probes_bound_subject() {
        let graph = example_graph();
        let input = Multiset::from_solutions([Solution::from_iter([("s", uri("c"))])]);
        let pattern = TriplePattern::new(var("s"), var("p"), var("o")).unwrap();
        assert!(pattern.is_accept_all());
        let context = EvaluationContext::new(&graph).with_input(&input);
        assert_snapshot!(pattern.evaluate(&context), @"{?o = <http://example.com/a>, ?p = <http://example.com/likes>, ?s = <http://example.com/c>}");
        assert_eq!(
            pattern.evaluate(&EvaluationContext::new(&graph)).len(),
            graph.len()
        );
    }

    #[test]
    fn results_do_not_depend_on_full_indexing() {
        let indexed = example_graph();
        let unindexed: MemoryGraph = {
            let mut graph = MemoryGraph::with_full_indexing(false);
            graph.extend(indexed.iter().cloned());
            graph
        };
        let options = EvaluationOptions::default().with_full_triple_indexing(false);
        let fast = TriplePattern::new(uri("a"), var("p"), uri("b")).unwrap();
        let slow = TriplePattern::new_with_options(uri("a"), var("p"), uri("b"), &options).unwrap();
        assert_eq!(fast.index_type(), IndexType::SubjectObject);
        assert_eq!(slow.index_type(), IndexType::Subject);
        assert_eq!(
            fast.evaluate(&EvaluationContext::new(&indexed)),
            slow.evaluate(&EvaluationContext::new(&unindexed).with_options(options))
        );
    }

    #[test]
    fn rigorous_evaluation_restricts_values() {
        let graph = example_graph();
        let input = Multiset::from_solutions([Solution::from_iter([("o", uri("c"))])]);
        let pattern = TriplePattern::new(uri("a"), var("p"), var("o")).unwrap();
        let context = EvaluationContext::new(&graph).with_input(&input);
        let candidate = triple("a", "knows", "b");
        assert!(pattern.accepts(&context, &candidate));

        let rigorous = context.with_options(EvaluationOptions::default().with_rigorous_evaluation(true));
        assert!(!pattern.accepts(&rigorous, &candidate));
        assert!(pattern.accepts(&rigorous, &triple("a", "knows", "c")));
    }

    #[test]
    fn blank_node_placeholders_bind_values() {
        let graph = example_graph();
        let pattern = TriplePattern::new(
            PatternItem::blank_node("x"),
            uri("likes"),
            var("o"),
        )
        .unwrap();
        assert!(!pattern.has_no_explicit_variables());
        assert_snapshot!(pattern.evaluate(&EvaluationContext::new(&graph)), @"{_:x = <http://example.com/c>, ?o = <http://example.com/a>}");
    }
}
