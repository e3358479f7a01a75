//! FacetDB — embedded in-memory collections with composable indexes.
//!
//! This is the public meta-crate. Downstream users depend on **facetdb**
//! only. It re-exports the stable public API from `facetdb-core`: the
//! collection façade, the index-template vocabulary, and the metrics
//! surface.
//!
//! A collection owns its items and issues an [`Id`] per insertion; a tree
//! of indexes, declared once as a template, observes every mutation and
//! answers queries without scanning the store:
//!
//! ```
//! use facetdb::{index, prelude::*};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut people = Collection::new(index::premap(|p: &Person| p.age, index::btree()));
//! people.insert(Person { name: "ada".into(), age: 36 });
//! people.insert(Person { name: "bob".into(), age: 29 });
//!
//! let youngest = people.query(|by_age| by_age.min().map(|e| e.value.name.clone()));
//! assert_eq!(youngest.as_deref(), Some("bob"));
//! ```

pub use facetdb_core as core;

pub use facetdb_core::{
    db::{Collection, Entry, Index, StoreView, Template},
    types::Id,
    zip,
};

///
/// Index vocabulary
///

pub mod index {
    pub use facetdb_core::db::index::{
        btree, filtered, grouped, hashtable_multi, hashtable_unique, keys, premap, trivial,
    };
}

pub mod aggregate {
    pub use facetdb_core::db::aggregate::{count, fold, max, mean, min, stddev, sum};
}

pub mod obs {
    pub use facetdb_core::obs::{metrics_report, metrics_reset, MetricsReport};
}

///
/// Prelude
///

pub mod prelude {
    pub use facetdb_core::prelude::*;
}
