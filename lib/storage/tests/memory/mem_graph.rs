use crate::{example_triple, triple, uri};
use insta::assert_snapshot;
use rdf_loom_common::GraphIndex;
use rdf_loom_model::{Node, Triple};
use rdf_loom_storage::memory::MemoryGraph;

fn render(triples: impl Iterator<Item = Triple>) -> String {
    triples
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn example_graph(full_indexing: bool) -> MemoryGraph {
    let mut graph = MemoryGraph::with_full_indexing(full_indexing);
    graph.extend([
        triple("a", "p", "b"),
        triple("a", "q", "b"),
        triple("a", "p", "c"),
        triple("c", "p", "b"),
    ]);
    graph
}

#[test]
fn insert_triple() {
    let mut graph = MemoryGraph::new();

    assert!(graph.insert(example_triple()));
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(&example_triple()));
}

#[test]
fn insert_duplicate_triple() {
    let mut graph = MemoryGraph::new();

    assert!(graph.insert(example_triple()));
    assert!(!graph.insert(example_triple()));
    assert_eq!(graph.len(), 1);
}

#[test]
fn remove_triple_updates_all_indexes() {
    let mut graph = example_graph(true);

    assert!(graph.remove(&triple("a", "p", "b")));
    assert!(!graph.remove(&triple("a", "p", "b")));

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.triples_with_subject(&uri("a")).count(), 2);
    assert_eq!(
        graph
            .triples_with_subject_predicate(&uri("a"), &uri("p"))
            .count(),
        1
    );
    assert_eq!(
        graph
            .triples_with_predicate_object(&uri("p"), &uri("b"))
            .count(),
        1
    );
}

#[test]
fn single_component_lookups() {
    let graph = example_graph(true);

    assert_snapshot!(render(graph.triples_with_subject(&uri("a"))), @r"
    <http://example.com/a> <http://example.com/p> <http://example.com/b> .
    <http://example.com/a> <http://example.com/q> <http://example.com/b> .
    <http://example.com/a> <http://example.com/p> <http://example.com/c> .
    ");
    assert_eq!(graph.triples_with_predicate(&uri("p")).count(), 3);
    assert_eq!(graph.triples_with_object(&uri("b")).count(), 3);
    assert_eq!(graph.triples_with_object(&uri("unknown")).count(), 0);
}

#[test]
fn pair_lookups_agree_with_and_without_full_indexing() {
    let indexed = example_graph(true);
    let filtered = example_graph(false);
    assert!(indexed.has_full_indexing());
    assert!(!filtered.has_full_indexing());

    for graph in [&indexed, &filtered] {
        insta::allow_duplicates! {
            assert_snapshot!(render(graph.triples_with_subject_predicate(&uri("a"), &uri("p"))), @r"
            <http://example.com/a> <http://example.com/p> <http://example.com/b> .
            <http://example.com/a> <http://example.com/p> <http://example.com/c> .
            ");
            assert_snapshot!(render(graph.triples_with_subject_object(&uri("a"), &uri("b"))), @r"
            <http://example.com/a> <http://example.com/p> <http://example.com/b> .
            <http://example.com/a> <http://example.com/q> <http://example.com/b> .
            ");
            assert_snapshot!(render(graph.triples_with_predicate_object(&uri("p"), &uri("b"))), @r"
            <http://example.com/a> <http://example.com/p> <http://example.com/b> .
            <http://example.com/c> <http://example.com/p> <http://example.com/b> .
            ");
        }
    }
}

#[test]
fn triples_matching_with_all_positions_bound() {
    let graph = example_graph(true);

    let found = graph
        .triples_matching(Some(&uri("a")), Some(&uri("q")), Some(&uri("b")))
        .count();
    let missing = graph
        .triples_matching(Some(&uri("b")), Some(&uri("q")), Some(&uri("a")))
        .count();

    assert_eq!(found, 1);
    assert_eq!(missing, 0);
    assert_eq!(graph.triples_matching(None, None, None).count(), 4);
}

#[test]
fn triples_mentioning_counts_each_triple_once() {
    let mut graph = MemoryGraph::new();
    graph.insert(triple("a", "a", "a"));
    graph.insert(triple("a", "p", "b"));
    graph.insert(triple("b", "a", "c"));
    graph.insert(triple("c", "p", "a"));
    graph.insert(triple("c", "p", "d"));

    assert_eq!(graph.count_mentions(&uri("a")), 4);
    assert_eq!(graph.count_mentions(&uri("d")), 1);
}

#[test]
fn blank_nodes_in_first_seen_order() {
    let mut graph = MemoryGraph::new();
    let b0 = Node::blank_unchecked("b0");
    let b1 = Node::blank_unchecked("b1");
    graph.insert(Triple::new(uri("a"), uri("p"), b1.clone()).unwrap());
    graph.insert(Triple::new(b1.clone(), uri("p"), b0.clone()).unwrap());
    graph.insert(Triple::new(b0.clone(), uri("p"), uri("a")).unwrap());

    assert_eq!(graph.blank_nodes(), vec![b1, b0]);
}

#[test]
fn clear_removes_everything() {
    let mut graph = example_graph(true);
    graph.clear();

    assert!(graph.is_empty());
    assert_eq!(
        graph
            .triples_with_subject_predicate(&uri("a"), &uri("p"))
            .count(),
        0
    );
}

#[test]
fn extend_counts_new_triples() {
    let mut graph = example_graph(true);
    let inserted = graph.extend([triple("a", "p", "b"), triple("d", "p", "a")]);
    assert_eq!(inserted, 1);
    assert_eq!(graph.len(), 5);
}

#[test]
fn is_empty_follows_len() {
    let mut graph = MemoryGraph::new();
    let index: &dyn GraphIndex = &graph;
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);

    graph.insert(example_triple());
    let index: &dyn GraphIndex = &graph;
    assert!(!index.is_empty());
    assert_eq!(index.len(), 1);
}
