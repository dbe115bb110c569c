//! An in-memory graph that keeps per-position and (optionally) pair indexes over its triples.

mod graph;
mod index;

pub use graph::MemoryGraph;
