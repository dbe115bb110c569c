use crate::error::PrefixError;
use oxiri::Iri;
use std::fmt::{Display, Formatter};

/// Controls how compact the written output is.
///
/// Higher levels enable more compression:
/// - [CompressionLevel::NONE]: one triple per statement.
/// - [CompressionLevel::MINIMAL] and above: triples are grouped by subject and predicate.
/// - [CompressionLevel::DEFAULT] and above: IRIs are abbreviated with prefixes and `rdf:type` is
///   written as `a`.
/// - Above [CompressionLevel::DEFAULT]: collections are written with `( ... )` and `[ ... ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(i8);

impl CompressionLevel {
    pub const NONE: Self = Self(-1);
    pub const MINIMAL: Self = Self(0);
    pub const DEFAULT: Self = Self(1);
    pub const MEDIUM: Self = Self(3);
    pub const MORE: Self = Self(5);
    pub const HIGH: Self = Self(10);

    pub const fn new(level: i8) -> Self {
        Self(level)
    }

    pub const fn value(self) -> i8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for CompressionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for the [TurtleWriter](super::TurtleWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurtleWriterOptions {
    compression_level: CompressionLevel,
    /// Prefix name and namespace IRI in registration order.
    prefixes: Vec<(String, String)>,
}

impl TurtleWriterOptions {
    #[must_use]
    pub fn with_compression_level(mut self, compression_level: CompressionLevel) -> Self {
        self.compression_level = compression_level;
        self
    }

    /// Registers the prefix `name` for the namespace `iri`. Registering a name again replaces its
    /// namespace.
    pub fn with_prefix(
        mut self,
        name: impl Into<String>,
        iri: impl Into<String>,
    ) -> Result<Self, PrefixError> {
        let name = name.into();
        if !is_valid_prefix_name(&name) {
            return Err(PrefixError::InvalidName(name));
        }
        let iri = Iri::parse(iri.into())?.into_inner();

        match self.prefixes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = iri,
            None => self.prefixes.push((name, iri)),
        }
        Ok(self)
    }

    pub fn compression_level(&self) -> CompressionLevel {
        self.compression_level
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(n, i)| (n.as_str(), i.as_str()))
    }
}

impl Default for TurtleWriterOptions {
    fn default() -> Self {
        Self {
            compression_level: CompressionLevel::MORE,
            prefixes: Vec::new(),
        }
    }
}

/// Checks the name against a conservative subset of the Turtle `PN_PREFIX` production.
fn is_valid_prefix_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(CompressionLevel::NONE < CompressionLevel::MINIMAL);
        assert!(CompressionLevel::MORE > CompressionLevel::DEFAULT);
        assert_eq!(TurtleWriterOptions::default().compression_level(), CompressionLevel::MORE);
    }

    #[test]
    fn prefixes_are_validated() {
        assert!(TurtleWriterOptions::default()
            .with_prefix("ex", "http://example.com/")
            .is_ok());
        assert!(TurtleWriterOptions::default()
            .with_prefix("", "http://example.com/")
            .is_ok());
        assert!(matches!(
            TurtleWriterOptions::default().with_prefix("1ex", "http://example.com/"),
            Err(PrefixError::InvalidName(_))
        ));
        assert!(matches!(
            TurtleWriterOptions::default().with_prefix("ex", "not an iri"),
            Err(PrefixError::InvalidIri(_))
        ));
    }

    #[test]
    fn registering_a_prefix_again_replaces_it() -> Result<(), PrefixError> {
        let options = TurtleWriterOptions::default()
            .with_prefix("ex", "http://example.com/")?
            .with_prefix("ex", "http://example.org/")?;
        assert_eq!(
            options.prefixes().collect::<Vec<_>>(),
            [("ex", "http://example.org/")]
        );
        Ok(())
    }
}
