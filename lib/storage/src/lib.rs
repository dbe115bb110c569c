#![doc(test(attr(deny(warnings))))]

//! Contains storage layer implementations for RDF Loom.

pub mod memory;
