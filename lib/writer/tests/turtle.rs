use crate::{blank, canonical, parse, triple, uri};
use insta::assert_snapshot;
use rdf_loom_model::vocab::{rdf_first, rdf_nil, rdf_rest, rdf_type};
use rdf_loom_model::Node;
use rdf_loom_storage::memory::MemoryGraph;
use rdf_loom_writer::turtle::{CompressionLevel, TurtleWriter, TurtleWriterOptions};
use rdf_loom_writer::{CollectionError, WriterError};

fn options() -> TurtleWriterOptions {
    TurtleWriterOptions::default()
        .with_prefix("ex", "http://example.com/")
        .unwrap()
}

fn write(graph: &MemoryGraph, options: TurtleWriterOptions) -> String {
    let mut output = Vec::new();
    TurtleWriter::new(options).write(graph, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

fn list_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), uri("p"), blank("l1")));
    graph.insert(triple(blank("l1"), rdf_first(), uri("a")));
    graph.insert(triple(blank("l1"), rdf_rest(), blank("l2")));
    graph.insert(triple(blank("l2"), rdf_first(), uri("b")));
    graph.insert(triple(blank("l2"), rdf_rest(), blank("l3")));
    graph.insert(triple(blank("l3"), rdf_first(), uri("c")));
    graph.insert(triple(blank("l3"), rdf_rest(), rdf_nil()));
    graph
}

/// A graph with blank nodes that must keep their labels.
fn mixed_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), uri("p"), blank("b")));
    graph.insert(triple(uri("t"), uri("p"), blank("b")));
    graph.insert(triple(blank("b"), uri("q"), Node::simple_literal("1")));
    graph.insert(triple(uri("s"), uri("list"), blank("l1")));
    graph.insert(triple(blank("l1"), rdf_first(), blank("i")));
    graph.insert(triple(blank("l1"), rdf_rest(), rdf_nil()));
    graph.insert(triple(blank("i"), uri("q"), Node::simple_literal("2")));
    graph.insert(triple(uri("u"), uri("p"), blank("single")));
    graph
}

#[test]
fn single_node_list_is_written_as_collection() {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), uri("p"), blank("l1")));
    graph.insert(triple(blank("l1"), rdf_first(), uri("a")));
    graph.insert(triple(blank("l1"), rdf_rest(), rdf_nil()));

    assert_snapshot!(write(&graph, options()), @r"
    @prefix ex: <http://example.com/> .

    ex:s ex:p ( ex:a ) .
    ");
}

#[test]
fn longer_list_is_written_as_triples() {
    let options = options()
        .with_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#")
        .unwrap();
    assert_snapshot!(write(&list_graph(), options), @r"
    @prefix ex: <http://example.com/> .
    @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

    ex:s ex:p _:l1 .
    _:l1 rdf:first ex:a ;
        rdf:rest _:l2 .
    _:l2 rdf:first ex:b ;
        rdf:rest _:l3 .
    _:l3 rdf:first ex:c ;
        rdf:rest rdf:nil .
    ");
}

#[test]
fn nested_blank_nodes_are_written_inline() {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), uri("p"), blank("b")));
    graph.insert(triple(blank("b"), uri("q"), uri("o1")));
    graph.insert(triple(blank("b"), uri("r"), blank("c")));
    graph.insert(triple(blank("c"), uri("t"), Node::simple_literal("x")));

    assert_snapshot!(write(&graph, options()), @r#"
    @prefix ex: <http://example.com/> .

    ex:s ex:p [ ex:q ex:o1 ; ex:r [ ex:t "x" ] ] .
    "#);
}

#[test]
fn shared_blank_nodes_keep_their_labels() {
    assert_snapshot!(write(&mixed_graph(), options()), @r#"
    @prefix ex: <http://example.com/> .

    ex:s ex:p _:b ;
        ex:list ( _:i ) .
    ex:t ex:p _:b .
    _:b ex:q "1" .
    _:i ex:q "2" .
    ex:u ex:p [] .
    "#);
}

#[test]
fn minimal_compression_groups_triples() {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), uri("p"), uri("o1")));
    graph.insert(triple(uri("s"), uri("p"), uri("o2")));
    graph.insert(triple(uri("s"), uri("q"), uri("o3")));
    graph.insert(triple(uri("t"), rdf_type(), uri("o1")));

    let options = TurtleWriterOptions::default().with_compression_level(CompressionLevel::MINIMAL);
    assert_snapshot!(write(&graph, options), @r"
    <http://example.com/s> <http://example.com/p> <http://example.com/o1>, <http://example.com/o2> ;
        <http://example.com/q> <http://example.com/o3> .
    <http://example.com/t> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/o1> .
    ");
}

#[test]
fn default_compression_abbreviates_iris() {
    let mut graph = MemoryGraph::new();
    graph.insert(triple(uri("s"), rdf_type(), uri("Class")));
    graph.insert(triple(uri("s"), uri("p"), blank("b")));
    graph.insert(triple(uri("s"), uri("p"), uri("with/slash")));

    let options = options().with_compression_level(CompressionLevel::DEFAULT);
    assert_snapshot!(write(&graph, options), @r"
    @prefix ex: <http://example.com/> .

    ex:s a ex:Class ;
        ex:p _:b, <http://example.com/with/slash> .
    ");
}

#[test]
fn no_compression_writes_one_statement_per_triple() {
    let options = TurtleWriterOptions::default().with_compression_level(CompressionLevel::NONE);
    let output = write(&list_graph(), options);
    assert_eq!(output.lines().count(), 7);
    assert_eq!(canonical(&parse(&output)), canonical(&list_graph()));
}

#[test]
fn malformed_list_is_an_error() {
    let mut graph = list_graph();
    graph.insert(triple(blank("l3"), rdf_first(), uri("d")));

    let result = TurtleWriter::new(options()).write(&graph, Vec::new());
    assert!(matches!(
        result,
        Err(WriterError::Collection(CollectionError::MultipleFirsts { .. }))
    ));
}

#[test]
fn written_graphs_are_isomorphic() {
    let mut cyclic = MemoryGraph::new();
    cyclic.insert(triple(uri("s"), uri("p"), blank("a")));
    cyclic.insert(triple(blank("a"), uri("q"), blank("b")));
    cyclic.insert(triple(blank("b"), uri("r"), blank("a")));

    let mut nested_lists = MemoryGraph::new();
    nested_lists.insert(triple(uri("s"), uri("p"), blank("outer")));
    nested_lists.insert(triple(blank("outer"), rdf_first(), blank("inner")));
    nested_lists.insert(triple(blank("outer"), rdf_rest(), rdf_nil()));
    nested_lists.insert(triple(blank("inner"), rdf_first(), uri("a")));
    nested_lists.insert(triple(blank("inner"), rdf_rest(), rdf_nil()));

    for graph in [list_graph(), mixed_graph(), cyclic, nested_lists] {
        for level in [
            CompressionLevel::NONE,
            CompressionLevel::MINIMAL,
            CompressionLevel::DEFAULT,
            CompressionLevel::MORE,
        ] {
            let output = write(&graph, options().with_compression_level(level));
            assert_eq!(
                canonical(&parse(&output)),
                canonical(&graph),
                "Output at level {level} is not isomorphic:\n{output}"
            );
        }
    }
}
