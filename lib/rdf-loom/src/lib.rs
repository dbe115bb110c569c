#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod store;

pub mod model {
    pub use rdf_loom_model::*;
}

pub mod index {
    pub use rdf_loom_common::*;
}

pub mod storage {
    pub use rdf_loom_storage::*;
}

pub mod engine {
    pub use rdf_loom_engine::*;
}

pub mod writer {
    pub use rdf_loom_writer::*;
}
