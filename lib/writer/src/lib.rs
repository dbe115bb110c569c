//! Serialization support for RDF Loom.
//!
//! The [collections] module finds the parts of a graph that can be written with the compact
//! collection syntax of Turtle (`( a b c )` and `[ p o ]`). The [turtle] module uses this analysis
//! for writing graphs.

pub mod collections;
mod error;
pub mod turtle;

pub use error::*;
