//! API to access an in-memory RDF graph.
//!
//! The entry point of the module is the [`Store`] struct.
//!
//! Usage example:
//! ```
//! use rdf_loom::engine::{Multiset, PatternItem};
//! use rdf_loom::model::{Node, Triple};
//! use rdf_loom::store::Store;
//!
//! let store = Store::default();
//!
//! // insertion
//! let ex = Node::uri("http://example.com")?;
//! let triple = Triple::new(ex.clone(), ex.clone(), ex.clone())?;
//! store.insert(triple.clone());
//!
//! // pattern evaluation
//! let pattern = store.pattern(
//!     PatternItem::variable("s"),
//!     PatternItem::fixed(ex.clone()),
//!     PatternItem::fixed(ex.clone()),
//! )?;
//! let solutions = store.evaluate(&pattern, &Multiset::Identity);
//! assert_eq!(solutions.solutions()[0].get("s"), Some(&ex));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::{LoaderError, SerializerError};
use oxttl::TurtleParser;
use rdf_loom_common::GraphIndex;
use rdf_loom_engine::{
    EvaluationContext, EvaluationOptions, Multiset, PatternConstructionError, PatternItem,
    TriplePattern,
};
use rdf_loom_model::{Node, Triple};
use rdf_loom_storage::memory::MemoryGraph;
use rdf_loom_writer::collections::{
    find_collections, CollectionContext, CollectionRegistry, CollectionSearchMode,
};
use rdf_loom_writer::turtle::{TurtleWriter, TurtleWriterOptions};
use rdf_loom_writer::CollectionError;
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{Read, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// An in-memory RDF graph store.
///
/// Cloning a [Store] is cheap and the clones share the same graph. Reads (lookups, evaluations,
/// collection analysis, and serialization) may run concurrently. Writes wait until all readers
/// are done.
///
/// Usage example:
/// ```
/// use rdf_loom::store::Store;
///
/// let store = Store::new();
/// let file = b"@prefix ex: <http://example.com/> . ex:s ex:p [ ex:q ex:o ] .";
/// let inserted = store.load_turtle(file.as_ref(), None)?;
/// assert_eq!(inserted, 2);
/// assert_eq!(store.len(), 2);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Default)]
pub struct Store {
    graph: Arc<RwLock<MemoryGraph>>,
    options: EvaluationOptions,
}

/// The result of running the collection finder on the contents of a [Store].
#[derive(Debug)]
pub struct CollectionAnalysis {
    /// The collections that can be written with the compact syntax, keyed by their head.
    pub registry: CollectionRegistry,
    /// The triples that are written as part of a collection.
    pub claimed: FxHashSet<Triple>,
}

impl Store {
    /// Creates an empty [Store] with the default [EvaluationOptions].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty [Store] with the given `options`.
    ///
    /// The pair indexes of the graph are only maintained if
    /// [EvaluationOptions::full_triple_indexing] is set.
    pub fn with_options(options: EvaluationOptions) -> Self {
        Self {
            graph: Arc::new(RwLock::new(MemoryGraph::with_full_indexing(
                options.full_triple_indexing,
            ))),
            options,
        }
    }

    /// Returns the options that are used for evaluating patterns.
    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryGraph> {
        self.graph.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryGraph> {
        self.graph.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a triple to this store.
    ///
    /// Returns `true` if the triple was not already in the store.
    pub fn insert(&self, triple: Triple) -> bool {
        self.write().insert(triple)
    }

    /// Adds all `triples` to this store. Returns the number of triples that were new.
    pub fn extend(&self, triples: impl IntoIterator<Item = Triple>) -> usize {
        self.write().extend(triples)
    }

    /// Removes a triple from this store.
    ///
    /// Returns `true` if the triple was in the store and has been removed.
    pub fn remove(&self, triple: &Triple) -> bool {
        self.write().remove(triple)
    }

    /// Checks if this store contains a given triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.read().contains(triple)
    }

    /// Returns the number of triples in the store.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a snapshot of all triples in insertion order.
    pub fn triples(&self) -> Vec<Triple> {
        self.read().iter().cloned().collect()
    }

    /// Loads a Turtle document into the store. Returns the number of triples that were new.
    ///
    /// Relative IRIs are resolved against `base_iri`. The blank nodes of the document are replaced
    /// with fresh blank nodes, so loading the same document twice creates two distinct copies of
    /// its blank-node structure. Nothing is inserted if the document cannot be parsed.
    ///
    /// Usage example:
    /// ```
    /// use rdf_loom::model::{Node, Triple};
    /// use rdf_loom::store::Store;
    ///
    /// let store = Store::new();
    /// store.load_turtle(b"<s> <p> <o> .".as_ref(), Some("http://example.com/"))?;
    ///
    /// let triple = Triple::new(
    ///     Node::uri("http://example.com/s")?,
    ///     Node::uri("http://example.com/p")?,
    ///     Node::uri("http://example.com/o")?,
    /// )?;
    /// assert!(store.contains(&triple));
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_turtle(
        &self,
        reader: impl Read,
        base_iri: Option<&str>,
    ) -> Result<usize, LoaderError> {
        let mut parser = TurtleParser::new();
        if let Some(iri) = base_iri {
            parser = parser
                .with_base_iri(iri)
                .map_err(|error| LoaderError::InvalidBaseIri {
                    iri: iri.to_owned(),
                    error,
                })?;
        }

        let mut blank_nodes = FxHashMap::default();
        let triples = parser
            .for_reader(reader)
            .map(|triple| triple.map(|triple| rename_blank_nodes(triple.into(), &mut blank_nodes)))
            .collect::<Result<Vec<_>, _>>()?;

        let parsed = triples.len();
        let inserted = self.extend(triples);
        debug!(parsed, inserted, "Loaded Turtle document");
        Ok(inserted)
    }

    /// Creates a [TriplePattern] that uses the indexing strategy of this store.
    pub fn pattern(
        &self,
        subject: impl Into<PatternItem>,
        predicate: impl Into<PatternItem>,
        object: impl Into<PatternItem>,
    ) -> Result<TriplePattern, PatternConstructionError> {
        TriplePattern::new_with_options(subject, predicate, object, &self.options)
    }

    /// Evaluates `pattern` against the store, extending every solution of `input`.
    pub fn evaluate(&self, pattern: &TriplePattern, input: &Multiset) -> Multiset {
        let graph = self.read();
        let context = EvaluationContext::new(&*graph)
            .with_input(input)
            .with_options(self.options);
        pattern.evaluate(&context)
    }

    /// Finds the collections of the stored graph that can be written with the compact Turtle
    /// syntax.
    pub fn find_collections(
        &self,
        mode: CollectionSearchMode,
    ) -> Result<CollectionAnalysis, CollectionError> {
        let graph = self.read();
        let mut context = CollectionContext::new(&*graph);
        find_collections(&mut context, mode)?;
        let (registry, claimed) = context.into_parts();
        Ok(CollectionAnalysis { registry, claimed })
    }

    /// Dumps the store into a Turtle document.
    ///
    /// ```
    /// use rdf_loom::store::Store;
    /// use rdf_loom::writer::turtle::{CompressionLevel, TurtleWriterOptions};
    ///
    /// let file = "<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n";
    ///
    /// let store = Store::new();
    /// store.load_turtle(file.as_bytes(), None)?;
    ///
    /// let mut buffer = Vec::new();
    /// let options = TurtleWriterOptions::default().with_compression_level(CompressionLevel::NONE);
    /// store.dump_turtle(&mut buffer, options)?;
    /// assert_eq!(file.as_bytes(), buffer.as_slice());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn dump_turtle(
        &self,
        writer: impl Write,
        options: TurtleWriterOptions,
    ) -> Result<(), SerializerError> {
        let graph = self.read();
        TurtleWriter::new(options).write(&*graph, writer)?;
        Ok(())
    }
}

fn rename_blank_nodes(triple: Triple, mapping: &mut FxHashMap<Node, Node>) -> Triple {
    let (subject, predicate, object) = triple.into_parts();
    let mut rename = |node: Node| {
        if node.is_blank() {
            mapping.entry(node).or_insert_with(Node::new_blank).clone()
        } else {
            node
        }
    };
    let subject = rename(subject);
    let object = rename(object);
    Triple::new_unchecked(subject, predicate, object)
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("graph", &*self.read())
            .field("options", &self.options)
            .finish()
    }
}
