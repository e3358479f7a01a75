//! Core runtime for FacetDB: the identifier-keyed store, the index
//! protocol, leaf and aggregate indexes, combinators, and the collection
//! façade that keeps all of them synchronized.
pub mod db;
pub mod error;
pub mod obs;
pub mod types;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No faults, stores, or metrics internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Collection, Entry, Template},
        types::Id,
    };
}
