use rdf_loom_model::{Node, Triple};

/// A boxed iterator over the triples of a [GraphIndex].
pub type TripleIter<'data> = Box<dyn Iterator<Item = Triple> + 'data>;

/// Provides indexed access to the triples of a single graph.
///
/// The pattern evaluator and the collection analysis only read from a [GraphIndex]. Implementations
/// must tolerate concurrent readers. It is the responsibility of the caller to ensure that no writer
/// modifies the graph while one of these components is running (e.g., by holding a read lock).
///
/// The returned iterators only borrow the index, never the nodes passed as arguments. The order of
/// the returned triples must be deterministic.
pub trait GraphIndex: Send + Sync {
    /// Returns the number of triples in the graph.
    fn len(&self) -> usize;

    /// Returns whether the graph contains no triples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether `triple` is part of the graph.
    fn contains(&self, triple: &Triple) -> bool;

    /// Returns all triples of the graph.
    fn all_triples(&self) -> TripleIter<'_>;

    /// Returns all triples with the given `subject`.
    fn triples_with_subject(&self, subject: &Node) -> TripleIter<'_>;

    /// Returns all triples with the given `predicate`.
    fn triples_with_predicate(&self, predicate: &Node) -> TripleIter<'_>;

    /// Returns all triples with the given `object`.
    fn triples_with_object(&self, object: &Node) -> TripleIter<'_>;

    /// Returns all triples with the given `subject` and `predicate`.
    fn triples_with_subject_predicate(&self, subject: &Node, predicate: &Node) -> TripleIter<'_>;

    /// Returns all triples with the given `subject` and `object`.
    fn triples_with_subject_object(&self, subject: &Node, object: &Node) -> TripleIter<'_>;

    /// Returns all triples with the given `predicate` and `object`.
    fn triples_with_predicate_object(&self, predicate: &Node, object: &Node) -> TripleIter<'_>;

    /// Returns the distinct blank nodes that appear as a subject or an object of the graph.
    fn blank_nodes(&self) -> Vec<Node>;

    /// Returns all triples that match the given positions. A [None] matches any node.
    fn triples_matching(
        &self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> TripleIter<'_> {
        match (subject, predicate, object) {
            (Some(s), Some(p), Some(o)) => {
                let triple = Triple::new_unchecked(s.clone(), p.clone(), o.clone());
                if self.contains(&triple) {
                    Box::new(std::iter::once(triple))
                } else {
                    Box::new(std::iter::empty())
                }
            }
            (Some(s), Some(p), None) => self.triples_with_subject_predicate(s, p),
            (Some(s), None, Some(o)) => self.triples_with_subject_object(s, o),
            (None, Some(p), Some(o)) => self.triples_with_predicate_object(p, o),
            (Some(s), None, None) => self.triples_with_subject(s),
            (None, Some(p), None) => self.triples_with_predicate(p),
            (None, None, Some(o)) => self.triples_with_object(o),
            (None, None, None) => self.all_triples(),
        }
    }

    /// Returns every triple that mentions `node` in any position. Each triple is returned once,
    /// even if it mentions `node` multiple times.
    fn triples_mentioning(&self, node: &Node) -> TripleIter<'_> {
        let as_predicate = {
            let node = node.clone();
            self.triples_with_predicate(&node)
                .filter(move |t| t.subject() != &node)
        };
        let as_object = {
            let node = node.clone();
            self.triples_with_object(&node)
                .filter(move |t| t.subject() != &node && t.predicate() != &node)
        };
        Box::new(
            self.triples_with_subject(node)
                .chain(as_predicate)
                .chain(as_object),
        )
    }

    /// Returns the number of triples that mention `node` in any position.
    fn count_mentions(&self, node: &Node) -> usize {
        self.triples_mentioning(node).count()
    }
}
