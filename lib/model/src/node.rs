use oxrdf::{
    BlankNode, BlankNodeIdParseError, IriParseError, LanguageTagParseError, Literal, NamedNode,
    Subject, Term, Variable, VariableNameParseError,
};
use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The different kinds of nodes that can appear in a graph or in a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A URI (IRI) reference.
    Uri(NamedNode),
    /// A blank node. The identifier is scoped to the graph that owns the node.
    Blank(BlankNode),
    /// A literal consisting of a lexical value, a datatype, and an optional language tag.
    Literal(Literal),
    /// A query variable.
    Variable(Variable),
}

impl NodeKind {
    /// Returns the position of the kind in the total order of nodes.
    fn rank(&self) -> u8 {
        match self {
            NodeKind::Blank(_) => 0,
            NodeKind::Uri(_) => 1,
            NodeKind::Literal(_) => 2,
            NodeKind::Variable(_) => 3,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Uri(inner) => Display::fmt(inner, f),
            NodeKind::Blank(inner) => Display::fmt(inner, f),
            NodeKind::Literal(inner) => Display::fmt(inner, f),
            NodeKind::Variable(inner) => Display::fmt(inner, f),
        }
    }
}

/// An immutable node of an RDF graph or of a triple pattern.
///
/// Nodes are shared handles, so cloning a node never copies its content. The hash of a node is
/// computed once from its canonical N-Triples form (e.g., `<http://example.com/a>`, `_:b0`,
/// `"1"^^<http://www.w3.org/2001/XMLSchema#integer>`, or `?x`) and stays stable for the lifetime
/// of the node.
///
/// Two nodes are equal if they have the same kind and the same value. Colliding hashes are
/// resolved by comparing the full value.
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

struct NodeInner {
    kind: NodeKind,
    canonical: Box<str>,
    hash: u64,
}

impl Node {
    /// Creates a new [Node] of the given `kind`.
    pub fn new(kind: NodeKind) -> Self {
        let canonical = kind.to_string().into_boxed_str();
        let mut hasher = FxHasher::default();
        canonical.hash(&mut hasher);
        Self(Arc::new(NodeInner {
            kind,
            canonical,
            hash: hasher.finish(),
        }))
    }

    /// Creates a URI node after validating `iri`.
    pub fn uri(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(NamedNode::new(iri)?.into())
    }

    /// Creates a URI node without validating `iri`.
    pub fn uri_unchecked(iri: impl Into<String>) -> Self {
        NamedNode::new_unchecked(iri).into()
    }

    /// Creates a blank node with the given identifier.
    pub fn blank(id: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        Ok(BlankNode::new(id)?.into())
    }

    /// Creates a blank node with the given identifier without validating it.
    pub fn blank_unchecked(id: impl Into<String>) -> Self {
        BlankNode::new_unchecked(id).into()
    }

    /// Creates a blank node with a fresh, random identifier.
    pub fn new_blank() -> Self {
        BlankNode::default().into()
    }

    /// Creates a simple literal (`xsd:string`).
    pub fn simple_literal(value: impl Into<String>) -> Self {
        Literal::new_simple_literal(value).into()
    }

    /// Creates a literal with the given datatype.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Literal::new_typed_literal(value, datatype).into()
    }

    /// Creates a language-tagged string after validating the language tag.
    pub fn language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, LanguageTagParseError> {
        Ok(Literal::new_language_tagged_literal(value, language)?.into())
    }

    /// Creates a variable after validating its name.
    pub fn variable(name: impl Into<String>) -> Result<Self, VariableNameParseError> {
        Ok(Variable::new(name)?.into())
    }

    /// Creates a variable without validating its name.
    pub fn variable_unchecked(name: impl Into<String>) -> Self {
        Variable::new_unchecked(name).into()
    }

    /// Returns the kind of the node.
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    /// Returns the canonical N-Triples form of the node.
    pub fn as_str(&self) -> &str {
        &self.0.canonical
    }

    /// Returns the hash that was computed when the node was created.
    pub fn precomputed_hash(&self) -> u64 {
        self.0.hash
    }

    pub fn is_uri(&self) -> bool {
        matches!(self.kind(), NodeKind::Uri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind(), NodeKind::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind(), NodeKind::Literal(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind(), NodeKind::Variable(_))
    }

    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self.kind() {
            NodeKind::Uri(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self.kind() {
            NodeKind::Blank(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self.kind() {
            NodeKind::Literal(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self.kind() {
            NodeKind::Variable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Converts the node into an RDF term. Returns [None] for variables.
    pub fn to_term(&self) -> Option<Term> {
        match self.kind() {
            NodeKind::Uri(inner) => Some(inner.clone().into()),
            NodeKind::Blank(inner) => Some(inner.clone().into()),
            NodeKind::Literal(inner) => Some(inner.clone().into()),
            NodeKind::Variable(_) => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash && self.0.kind == other.0.kind)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .rank()
            .cmp(&other.kind().rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Self::new(kind)
    }
}

impl From<NamedNode> for Node {
    fn from(value: NamedNode) -> Self {
        Self::new(NodeKind::Uri(value))
    }
}

impl From<BlankNode> for Node {
    fn from(value: BlankNode) -> Self {
        Self::new(NodeKind::Blank(value))
    }
}

impl From<Literal> for Node {
    fn from(value: Literal) -> Self {
        Self::new(NodeKind::Literal(value))
    }
}

impl From<Variable> for Node {
    fn from(value: Variable) -> Self {
        Self::new(NodeKind::Variable(value))
    }
}

impl From<Term> for Node {
    fn from(value: Term) -> Self {
        match value {
            Term::NamedNode(inner) => inner.into(),
            Term::BlankNode(inner) => inner.into(),
            Term::Literal(inner) => inner.into(),
        }
    }
}

impl From<Subject> for Node {
    fn from(value: Subject) -> Self {
        Term::from(value).into()
    }
}
