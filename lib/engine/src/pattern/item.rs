use rdf_loom_model::{Node, NodeKind};
use std::fmt::{Display, Formatter};

/// A single position of a [TriplePattern](crate::TriplePattern).
///
/// Variables and blank-node placeholders both bind the value they match under their
/// *binding name*. The binding name of a variable is its plain name (`x` for `?x`), the binding
/// name of a blank-node placeholder is its label in N-Triples syntax (`_:b` for `_:b`), so the
/// two never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternItem {
    /// Matches exactly one node.
    NodeMatch(Node),
    /// A named variable.
    Variable {
        name: String,
        /// Whether the variable already occurred in an earlier position of the pattern.
        repeated: bool,
    },
    /// A placeholder that is scoped to the enclosing pattern group. Never legal as a predicate.
    BlankNode {
        /// The binding name (e.g., `_:b`).
        name: String,
        /// Whether the placeholder already occurred in an earlier position of the pattern.
        repeated: bool,
    },
}

impl PatternItem {
    /// Creates an item that only matches `node`. Unlike [From<Node>], blank nodes are matched
    /// exactly instead of acting as placeholders.
    pub fn fixed(node: impl Into<Node>) -> Self {
        Self::NodeMatch(node.into())
    }

    /// Creates a variable item. A leading `?` or `$` is stripped from `name`.
    pub fn variable(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        let name = name
            .strip_prefix('?')
            .or_else(|| name.strip_prefix('$'))
            .unwrap_or(name);
        Self::Variable {
            name: name.to_owned(),
            repeated: false,
        }
    }

    /// Creates a blank-node placeholder with the given `label`. A leading `_:` is stripped from
    /// `label`.
    pub fn blank_node(label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        let label = label.strip_prefix("_:").unwrap_or(label);
        Self::BlankNode {
            name: format!("_:{label}"),
            repeated: false,
        }
    }

    /// Returns the node matched by a [PatternItem::NodeMatch].
    pub fn fixed_node(&self) -> Option<&Node> {
        match self {
            PatternItem::NodeMatch(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the name under which the item binds its value. [None] for fixed items.
    pub fn binding_name(&self) -> Option<&str> {
        match self {
            PatternItem::NodeMatch(_) => None,
            PatternItem::Variable { name, .. } | PatternItem::BlankNode { name, .. } => Some(name),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, PatternItem::NodeMatch(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, PatternItem::Variable { .. })
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, PatternItem::BlankNode { .. })
    }

    /// Returns whether the binding name of this item already occurred in an earlier position.
    pub fn is_repeated(&self) -> bool {
        match self {
            PatternItem::NodeMatch(_) => false,
            PatternItem::Variable { repeated, .. } | PatternItem::BlankNode { repeated, .. } => {
                *repeated
            }
        }
    }

    pub(crate) fn set_repeated(&mut self, value: bool) {
        match self {
            PatternItem::NodeMatch(_) => {}
            PatternItem::Variable { repeated, .. } | PatternItem::BlankNode { repeated, .. } => {
                *repeated = value;
            }
        }
    }
}

impl From<Node> for PatternItem {
    fn from(node: Node) -> Self {
        match node.kind() {
            NodeKind::Variable(variable) => Self::variable(variable.as_str()),
            NodeKind::Blank(blank) => Self::blank_node(blank.as_str()),
            NodeKind::Uri(_) | NodeKind::Literal(_) => Self::NodeMatch(node),
        }
    }
}

impl Display for PatternItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternItem::NodeMatch(node) => Display::fmt(node, f),
            PatternItem::Variable { name, .. } => write!(f, "?{name}"),
            PatternItem::BlankNode { name, .. } => f.write_str(name),
        }
    }
}
