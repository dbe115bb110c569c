use crate::{Node, NodeKind, TripleConstructionError};
use oxrdf::Subject;
use std::fmt::{Debug, Display, Formatter};

/// An RDF triple.
///
/// The subject is a URI or a blank node, the predicate is a URI, and the object is a URI, a blank
/// node, or a literal. Triples are immutable and compared structurally.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    subject: Node,
    predicate: Node,
    object: Node,
}

impl Triple {
    /// Creates a new [Triple] after checking that each node is allowed in its position.
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<Node>,
        object: impl Into<Node>,
    ) -> Result<Self, TripleConstructionError> {
        let subject = subject.into();
        let predicate = predicate.into();
        let object = object.into();

        if !matches!(subject.kind(), NodeKind::Uri(_) | NodeKind::Blank(_)) {
            return Err(TripleConstructionError::InvalidSubject(subject));
        }
        if !predicate.is_uri() {
            return Err(TripleConstructionError::InvalidPredicate(predicate));
        }
        if object.is_variable() {
            return Err(TripleConstructionError::InvalidObject(object));
        }

        Ok(Self::new_unchecked(subject, predicate, object))
    }

    /// Creates a new [Triple] without validating the positions.
    ///
    /// Such triples are used as probes for membership tests. A probe with an illegal node in some
    /// position is never contained in a graph.
    pub fn new_unchecked(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    pub fn subject(&self) -> &Node {
        &self.subject
    }

    pub fn predicate(&self) -> &Node {
        &self.predicate
    }

    pub fn object(&self) -> &Node {
        &self.object
    }

    /// Returns true if `node` appears in any position of the triple.
    pub fn mentions(&self, node: &Node) -> bool {
        &self.subject == node || &self.predicate == node || &self.object == node
    }

    /// Decomposes the triple into its subject, predicate, and object.
    pub fn into_parts(self) -> (Node, Node, Node) {
        (self.subject, self.predicate, self.object)
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

impl Debug for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

impl From<oxrdf::Triple> for Triple {
    fn from(value: oxrdf::Triple) -> Self {
        Self::new_unchecked(
            value.subject.into(),
            value.predicate.into(),
            value.object.into(),
        )
    }
}

impl TryFrom<&Triple> for oxrdf::Triple {
    type Error = TripleConstructionError;

    fn try_from(value: &Triple) -> Result<Self, Self::Error> {
        let subject = match value.subject.kind() {
            NodeKind::Uri(inner) => Subject::from(inner.clone()),
            NodeKind::Blank(inner) => Subject::from(inner.clone()),
            NodeKind::Literal(_) | NodeKind::Variable(_) => {
                return Err(TripleConstructionError::InvalidSubject(value.subject.clone()));
            }
        };
        let Some(predicate) = value.predicate.as_named_node() else {
            return Err(TripleConstructionError::InvalidPredicate(
                value.predicate.clone(),
            ));
        };
        let Some(object) = value.object.to_term() else {
            return Err(TripleConstructionError::InvalidObject(value.object.clone()));
        };
        Ok(oxrdf::Triple::new(subject, predicate.clone(), object))
    }
}

impl TryFrom<Triple> for oxrdf::Triple {
    type Error = TripleConstructionError;

    fn try_from(value: Triple) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}
