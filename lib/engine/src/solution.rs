//! Solutions and multisets of solutions.

use itertools::Itertools;
use rdf_loom_model::Node;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// A single solution that maps binding names to nodes.
///
/// Bindings are iterated in the order of their names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    bindings: BTreeMap<String, Node>,
}

impl Solution {
    pub const fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Returns the value bound to `variable`.
    pub fn get(&self, variable: &str) -> Option<&Node> {
        self.bindings.get(variable)
    }

    pub fn contains_variable(&self, variable: &str) -> bool {
        self.bindings.contains_key(variable)
    }

    /// Binds `variable` to `value`. Returns the previously bound value.
    pub fn insert(&mut self, variable: impl Into<String>, value: Node) -> Option<Node> {
        self.bindings.insert(variable.into(), value)
    }

    /// Returns the bound variables in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Solution {
    fn from_iter<T: IntoIterator<Item = (K, Node)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if name.starts_with("_:") {
                write!(f, "{name} = {value}")?;
            } else {
                write!(f, "?{name} = {value}")?;
            }
        }
        f.write_str("}")
    }
}

static IDENTITY: [Solution; 1] = [Solution::new()];

/// A multiset of solutions.
///
/// Evaluating a pattern consumes a multiset of incoming solutions and produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Multiset {
    /// Contains no solutions. Joining with it yields no solutions.
    Null,
    /// Contains a single, empty solution. Joining with it yields the other side.
    Identity,
    /// An explicit list of solutions over the declared `variables`.
    Solutions {
        variables: BTreeSet<String>,
        solutions: Vec<Solution>,
    },
}

impl Multiset {
    /// Creates an empty multiset that declares `variables`.
    pub fn with_variables<V: Into<String>>(variables: impl IntoIterator<Item = V>) -> Self {
        Self::Solutions {
            variables: variables.into_iter().map(Into::into).collect(),
            solutions: Vec::new(),
        }
    }

    /// Creates a multiset from `solutions`. The declared variables are the union of all bound
    /// variables.
    pub fn from_solutions(solutions: impl IntoIterator<Item = Solution>) -> Self {
        let mut result = Self::with_variables(Vec::<String>::new());
        for solution in solutions {
            result.push(solution);
        }
        result
    }

    /// Adds `solution` and declares its variables.
    pub fn push(&mut self, solution: Solution) {
        match self {
            Multiset::Null => *self = Self::from_solutions([solution]),
            Multiset::Identity => *self = Self::from_solutions([Solution::new(), solution]),
            Multiset::Solutions {
                variables,
                solutions,
            } => {
                for variable in solution.variables() {
                    if !variables.contains(variable) {
                        variables.insert(variable.to_owned());
                    }
                }
                solutions.push(solution);
            }
        }
    }

    /// Returns whether the multiset declares `variable`.
    pub fn contains_variable(&self, variable: &str) -> bool {
        match self {
            Multiset::Null | Multiset::Identity => false,
            Multiset::Solutions { variables, .. } => variables.contains(variable),
        }
    }

    /// Returns whether the multiset declares `variable` and every solution binds it.
    pub fn binds_everywhere(&self, variable: &str) -> bool {
        self.contains_variable(variable)
            && self
                .solutions()
                .iter()
                .all(|s| s.contains_variable(variable))
    }

    /// Returns the declared variables in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        let variables = match self {
            Multiset::Null | Multiset::Identity => None,
            Multiset::Solutions { variables, .. } => Some(variables),
        };
        variables.into_iter().flatten().map(String::as_str)
    }

    pub fn solutions(&self) -> &[Solution] {
        match self {
            Multiset::Null => &[],
            Multiset::Identity => &IDENTITY,
            Multiset::Solutions { solutions, .. } => solutions,
        }
    }

    pub fn len(&self) -> usize {
        self.solutions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }

    /// Returns whether the multiset contains no solutions.
    pub fn is_null(&self) -> bool {
        self.is_empty()
    }

    /// Returns whether the multiset contains exactly one empty solution.
    pub fn is_identity(&self) -> bool {
        matches!(self.solutions(), [solution] if solution.is_empty())
    }

    /// Returns whether some solution binds `variable` to `value`.
    pub fn contains_value(&self, variable: &str, value: &Node) -> bool {
        self.solutions()
            .iter()
            .any(|s| s.get(variable) == Some(value))
    }

    /// Returns the distinct values of `variable` in the order of their first occurrence.
    pub fn distinct_values(&self, variable: &str) -> Vec<Node> {
        self.solutions()
            .iter()
            .filter_map(|s| s.get(variable))
            .unique()
            .cloned()
            .collect()
    }

    /// Returns the distinct value pairs of the solutions that bind both `first` and `second`.
    pub fn distinct_value_pairs(&self, first: &str, second: &str) -> Vec<(Node, Node)> {
        self.solutions()
            .iter()
            .filter_map(|s| Some((s.get(first)?.clone(), s.get(second)?.clone())))
            .unique()
            .collect()
    }

    /// Returns the distinct value rows of the solutions that bind every variable in `variables`.
    /// The values of each row are in the order of `variables`.
    pub fn distinct_rows(&self, variables: &[&str]) -> Vec<Vec<Node>> {
        self.solutions()
            .iter()
            .filter_map(|s| {
                variables
                    .iter()
                    .map(|v| s.get(v).cloned())
                    .collect::<Option<Vec<_>>>()
            })
            .unique()
            .collect()
    }
}

impl Default for Multiset {
    fn default() -> Self {
        Self::Identity
    }
}

impl Display for Multiset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Multiset::Null => f.write_str("Null"),
            Multiset::Identity => f.write_str("Identity"),
            Multiset::Solutions { solutions, .. } => {
                for (i, solution) in solutions.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    Display::fmt(solution, f)?;
                }
                Ok(())
            }
        }
    }
}
