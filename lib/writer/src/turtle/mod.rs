//! A Turtle writer that compresses the output.

mod inline;
mod options;

pub use options::{CompressionLevel, TurtleWriterOptions};

use crate::collections::{
    collection_claims, find_collections, CollectionContext, CollectionRegistry,
    CollectionSearchMode,
};
use crate::error::WriterError;
use itertools::Itertools;
use rdf_loom_common::GraphIndex;
use rdf_loom_model::vocab::rdf_type;
use rdf_loom_model::{Node, Triple};
use rustc_hash::FxHashSet;
use std::io::Write;
use tracing::debug;

/// Writes graphs in the Turtle syntax.
///
/// ```
/// # use rdf_loom_model::{Node, Triple};
/// # use rdf_loom_storage::memory::MemoryGraph;
/// # use rdf_loom_writer::turtle::{TurtleWriter, TurtleWriterOptions};
/// let mut graph = MemoryGraph::new();
/// graph.insert(Triple::new_unchecked(
///     Node::uri_unchecked("http://example.com/s"),
///     Node::uri_unchecked("http://example.com/p"),
///     Node::simple_literal("o"),
/// ));
///
/// let options = TurtleWriterOptions::default().with_prefix("ex", "http://example.com/")?;
/// let mut output = Vec::new();
/// TurtleWriter::new(options).write(&graph, &mut output)?;
/// assert_eq!(
///     String::from_utf8(output)?,
///     "@prefix ex: <http://example.com/> .\n\nex:s ex:p \"o\" .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurtleWriter {
    options: TurtleWriterOptions,
}

impl TurtleWriter {
    pub fn new(options: TurtleWriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TurtleWriterOptions {
        &self.options
    }

    /// Writes `graph` to `writer`.
    ///
    /// Returns an error if writing fails or if the graph contains a malformed list.
    pub fn write(&self, graph: &dyn GraphIndex, mut writer: impl Write) -> Result<(), WriterError> {
        let level = self.options.compression_level();
        let (collections, claimed) = if level > CompressionLevel::DEFAULT {
            let mut context = CollectionContext::new(graph);
            find_collections(&mut context, CollectionSearchMode::All)?;
            let (mut collections, _) = context.into_parts();
            let claimed = inline::settle_collections(graph, &mut collections);
            (collections, claimed)
        } else {
            (CollectionRegistry::default(), FxHashSet::default())
        };
        debug!(
            %level,
            collections = collections.len(),
            claimed = claimed.len(),
            "Writing Turtle"
        );

        let mut serializer = Serializer {
            graph,
            options: &self.options,
            collections,
            claimed,
        };
        serializer.write_prefixes(&mut writer)?;
        if level < CompressionLevel::MINIMAL {
            serializer.write_statements(&mut writer)?;
        } else {
            serializer.write_subjects(&mut writer)?;
        }
        serializer.write_remaining_collections(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

struct Serializer<'a> {
    graph: &'a dyn GraphIndex,
    options: &'a TurtleWriterOptions,
    collections: CollectionRegistry,
    claimed: FxHashSet<Triple>,
}

impl Serializer<'_> {
    fn write_prefixes(&self, writer: &mut impl Write) -> Result<(), WriterError> {
        let mut has_prefixes = false;
        for (name, iri) in self.options.prefixes() {
            writeln!(writer, "@prefix {name}: <{iri}> .")?;
            has_prefixes = true;
        }
        if has_prefixes && !self.graph.is_empty() {
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes every triple as its own statement.
    fn write_statements(&self, writer: &mut impl Write) -> Result<(), WriterError> {
        for triple in self.graph.all_triples() {
            self.write_plain_triple(writer, &triple)?;
        }
        Ok(())
    }

    fn write_plain_triple(
        &self,
        writer: &mut impl Write,
        triple: &Triple,
    ) -> Result<(), WriterError> {
        writeln!(
            writer,
            "{} {} {} .",
            self.render_term(triple.subject(), false),
            self.render_term(triple.predicate(), true),
            self.render_term(triple.object(), false)
        )?;
        Ok(())
    }

    /// Writes the unclaimed triples grouped by subject. Subjects are written in the order of their
    /// first triple.
    fn write_subjects(&mut self, writer: &mut impl Write) -> Result<(), WriterError> {
        let subjects = self
            .graph
            .all_triples()
            .filter(|t| !self.claimed.contains(t))
            .map(|t| t.subject().clone())
            .unique()
            .collect::<Vec<_>>();

        for subject in subjects {
            let triples = self
                .graph
                .triples_with_subject(&subject)
                .filter(|t| !self.claimed.contains(t))
                .collect::<Vec<_>>();
            let rendered_subject = self.render_subject(&subject);
            let predicate_objects = self.render_predicate_objects(&triples, " ;\n    ");
            writeln!(writer, "{rendered_subject} {predicate_objects} .")?;
        }
        Ok(())
    }

    /// Writes the claimed triples of collections that were never reached. Their keys keep their
    /// labels.
    fn write_remaining_collections(&mut self, writer: &mut impl Write) -> Result<(), WriterError> {
        let remaining = self
            .collections
            .iter()
            .filter(|(_, collection)| !collection.has_been_written())
            .map(|(key, _)| key.clone())
            .collect::<Vec<_>>();
        for key in remaining {
            let Some(collection) = self.collections.remove(&key) else {
                continue;
            };
            for triple in collection_claims(&collection) {
                self.write_plain_triple(writer, &triple)?;
            }
        }
        Ok(())
    }

    fn render_subject(&mut self, subject: &Node) -> String {
        if let Some(collection) = self.collections.get_mut(subject) {
            if collection.is_explicit() && collection.is_empty() && !collection.has_been_written() {
                collection.mark_written();
                return "[]".to_owned();
            }
        }
        self.render_term(subject, false)
    }

    /// Renders the predicates and objects of `triples`, which must share their subject.
    /// Predicates are separated by `separator`, objects of the same predicate by `, `.
    fn render_predicate_objects(&mut self, triples: &[Triple], separator: &str) -> String {
        let mut groups: Vec<(&Node, Vec<&Node>)> = Vec::new();
        for triple in triples {
            match groups.iter_mut().find(|(p, _)| *p == triple.predicate()) {
                Some((_, objects)) => objects.push(triple.object()),
                None => groups.push((triple.predicate(), vec![triple.object()])),
            }
        }

        let mut parts = Vec::with_capacity(groups.len());
        for (predicate, objects) in groups {
            let objects = objects
                .into_iter()
                .map(|o| self.render_object(o))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("{} {objects}", self.render_term(predicate, true)));
        }
        parts.join(separator)
    }

    /// Renders `node` in the object position. Collections that have not been written are written
    /// inline.
    fn render_object(&mut self, node: &Node) -> String {
        let Some(collection) = self.collections.get_mut(node) else {
            return self.render_term(node, false);
        };
        if collection.has_been_written() {
            return self.render_term(node, false);
        }
        collection.mark_written();

        let is_explicit = collection.is_explicit();
        let triples = collection.triples().to_vec();
        if !is_explicit {
            let items = triples
                .iter()
                .map(|t| self.render_object(t.object()))
                .collect::<Vec<_>>();
            return format!("( {} )", items.join(" "));
        }
        if triples.is_empty() {
            return "[]".to_owned();
        }
        format!("[ {} ]", self.render_predicate_objects(&triples, " ; "))
    }

    fn render_term(&self, node: &Node, is_predicate: bool) -> String {
        if self.options.compression_level() >= CompressionLevel::DEFAULT {
            if is_predicate && *node == rdf_type() {
                return "a".to_owned();
            }
            if let Some(prefixed) = node
                .as_named_node()
                .and_then(|n| self.prefixed_name(n.as_str()))
            {
                return prefixed;
            }
        }
        node.as_str().to_owned()
    }

    /// Abbreviates `iri` with the longest matching prefix.
    fn prefixed_name(&self, iri: &str) -> Option<String> {
        self.options
            .prefixes()
            .filter_map(|(name, namespace)| {
                let local = iri.strip_prefix(namespace)?;
                is_plain_local_name(local).then_some((name, namespace.len(), local))
            })
            .max_by_key(|(_, len, _)| *len)
            .map(|(name, _, local)| format!("{name}:{local}"))
    }
}

fn is_plain_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
