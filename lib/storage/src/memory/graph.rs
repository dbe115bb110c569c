use crate::memory::index::TripleIndex;
use rdf_loom_common::{GraphIndex, TripleIter};
use rdf_loom_model::{Node, Triple};
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Formatter};

/// Represents an in-memory RDF graph.
///
/// The graph always maintains an index for each single triple component (subject, predicate, and
/// object). If full indexing is enabled, the graph additionally maintains an index for every pair
/// of components (subject-predicate, subject-object, and predicate-object). Without the pair
/// indexes, lookups for two components filter the entries of a single-component index.
///
/// All lookups return triples in insertion order.
#[derive(Clone)]
pub struct MemoryGraph {
    /// All triples in insertion order.
    triples: Vec<Triple>,
    /// Membership set of [Self::triples].
    triple_set: FxHashSet<Triple>,
    by_subject: TripleIndex<Node>,
    by_predicate: TripleIndex<Node>,
    by_object: TripleIndex<Node>,
    /// The pair indexes, only present if full indexing is enabled.
    pairs: Option<PairIndexes>,
}

#[derive(Clone, Default)]
struct PairIndexes {
    subject_predicate: TripleIndex<(Node, Node)>,
    subject_object: TripleIndex<(Node, Node)>,
    predicate_object: TripleIndex<(Node, Node)>,
}

impl PairIndexes {
    fn insert(&mut self, triple: &Triple) {
        self.subject_predicate.insert(
            (triple.subject().clone(), triple.predicate().clone()),
            triple.clone(),
        );
        self.subject_object.insert(
            (triple.subject().clone(), triple.object().clone()),
            triple.clone(),
        );
        self.predicate_object.insert(
            (triple.predicate().clone(), triple.object().clone()),
            triple.clone(),
        );
    }

    fn remove(&mut self, triple: &Triple) {
        self.subject_predicate.remove(
            &(triple.subject().clone(), triple.predicate().clone()),
            triple,
        );
        self.subject_object.remove(
            &(triple.subject().clone(), triple.object().clone()),
            triple,
        );
        self.predicate_object.remove(
            &(triple.predicate().clone(), triple.object().clone()),
            triple,
        );
    }

    fn clear(&mut self) {
        self.subject_predicate.clear();
        self.subject_object.clear();
        self.predicate_object.clear();
    }
}

impl MemoryGraph {
    /// Creates a new, empty [MemoryGraph] with full indexing enabled.
    pub fn new() -> Self {
        Self::with_full_indexing(true)
    }

    /// Creates a new, empty [MemoryGraph]. The pair indexes are only maintained if
    /// `full_indexing` is true.
    pub fn with_full_indexing(full_indexing: bool) -> Self {
        Self {
            triples: Vec::new(),
            triple_set: FxHashSet::default(),
            by_subject: TripleIndex::default(),
            by_predicate: TripleIndex::default(),
            by_object: TripleIndex::default(),
            pairs: full_indexing.then(PairIndexes::default),
        }
    }

    /// Returns whether the pair indexes are maintained.
    pub fn has_full_indexing(&self) -> bool {
        self.pairs.is_some()
    }

    /// Inserts `triple` into the graph. Returns false if the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if !self.triple_set.insert(triple.clone()) {
            return false;
        }

        self.by_subject
            .insert(triple.subject().clone(), triple.clone());
        self.by_predicate
            .insert(triple.predicate().clone(), triple.clone());
        self.by_object.insert(triple.object().clone(), triple.clone());
        if let Some(pairs) = &mut self.pairs {
            pairs.insert(&triple);
        }
        self.triples.push(triple);
        true
    }

    /// Inserts all `triples` into the graph. Returns the number of triples that were new.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .map(|triple| self.insert(triple))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Removes `triple` from the graph. Returns false if the triple was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        if !self.triple_set.remove(triple) {
            return false;
        }

        self.by_subject.remove(triple.subject(), triple);
        self.by_predicate.remove(triple.predicate(), triple);
        self.by_object.remove(triple.object(), triple);
        if let Some(pairs) = &mut self.pairs {
            pairs.remove(triple);
        }
        self.triples.retain(|t| t != triple);
        true
    }

    /// Removes all triples from the graph.
    pub fn clear(&mut self) {
        self.triples.clear();
        self.triple_set.clear();
        self.by_subject.clear();
        self.by_predicate.clear();
        self.by_object.clear();
        if let Some(pairs) = &mut self.pairs {
            pairs.clear();
        }
    }

    /// Returns an iterator over all triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

impl GraphIndex for MemoryGraph {
    fn len(&self) -> usize {
        self.triples.len()
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.triple_set.contains(triple)
    }

    fn all_triples(&self) -> TripleIter<'_> {
        Box::new(self.triples.iter().cloned())
    }

    fn triples_with_subject(&self, subject: &Node) -> TripleIter<'_> {
        Box::new(self.by_subject.get(subject).iter().cloned())
    }

    fn triples_with_predicate(&self, predicate: &Node) -> TripleIter<'_> {
        Box::new(self.by_predicate.get(predicate).iter().cloned())
    }

    fn triples_with_object(&self, object: &Node) -> TripleIter<'_> {
        Box::new(self.by_object.get(object).iter().cloned())
    }

    fn triples_with_subject_predicate(&self, subject: &Node, predicate: &Node) -> TripleIter<'_> {
        match &self.pairs {
            Some(pairs) => Box::new(
                pairs
                    .subject_predicate
                    .get(&(subject.clone(), predicate.clone()))
                    .iter()
                    .cloned(),
            ),
            None => {
                let predicate = predicate.clone();
                Box::new(
                    self.by_subject
                        .get(subject)
                        .iter()
                        .filter(move |t| t.predicate() == &predicate)
                        .cloned(),
                )
            }
        }
    }

    fn triples_with_subject_object(&self, subject: &Node, object: &Node) -> TripleIter<'_> {
        match &self.pairs {
            Some(pairs) => Box::new(
                pairs
                    .subject_object
                    .get(&(subject.clone(), object.clone()))
                    .iter()
                    .cloned(),
            ),
            None => {
                let object = object.clone();
                Box::new(
                    self.by_subject
                        .get(subject)
                        .iter()
                        .filter(move |t| t.object() == &object)
                        .cloned(),
                )
            }
        }
    }

    fn triples_with_predicate_object(&self, predicate: &Node, object: &Node) -> TripleIter<'_> {
        match &self.pairs {
            Some(pairs) => Box::new(
                pairs
                    .predicate_object
                    .get(&(predicate.clone(), object.clone()))
                    .iter()
                    .cloned(),
            ),
            None => {
                let predicate = predicate.clone();
                Box::new(
                    self.by_object
                        .get(object)
                        .iter()
                        .filter(move |t| t.predicate() == &predicate)
                        .cloned(),
                )
            }
        }
    }

    fn blank_nodes(&self) -> Vec<Node> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        for triple in &self.triples {
            for node in [triple.subject(), triple.object()] {
                if node.is_blank() && seen.insert(node.clone()) {
                    result.push(node.clone());
                }
            }
        }
        result
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MemoryGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("len", &self.triples.len())
            .field("full_indexing", &self.has_full_indexing())
            .finish()
    }
}

impl Extend<Triple> for MemoryGraph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        MemoryGraph::extend(self, iter);
    }
}

impl FromIterator<Triple> for MemoryGraph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<'graph> IntoIterator for &'graph MemoryGraph {
    type Item = &'graph Triple;
    type IntoIter = std::slice::Iter<'graph, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
