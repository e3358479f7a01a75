//! The index protocol and the primary lookup indexes.
//!
//! An index observes every mutation of the collection through
//! [`Index::apply`] and answers queries through a reader, a read-only
//! view over its state. Interior nodes of an index tree are combinators
//! (`premap`, `filtered`, `grouped`, tuples); leaves are the lookup
//! structures in this module and the aggregates in
//! [`aggregate`](crate::db::aggregate).

mod btree;
mod filtered;
mod grouped;
mod hashtable;
mod keys;
mod premap;
mod trivial;
mod zip;

pub use btree::{btree, BTreeIndex, BTreeReader, BTreeTemplate};
pub use filtered::{filtered, FilteredIndex, FilteredTemplate};
pub use grouped::{grouped, GroupedIndex, GroupedReader, GroupedTemplate};
pub use hashtable::{
    hashtable_multi, hashtable_unique, HashMultiIndex, HashMultiReader, HashMultiTemplate,
    HashUniqueIndex, HashUniqueReader, HashUniqueTemplate,
};
pub use keys::{keys, KeysIndex, KeysReader, KeysTemplate};
pub use premap::{premap, PremapIndex, PremapTemplate};
pub use trivial::{trivial, TrivialIndex, TrivialReader, TrivialTemplate};

use crate::db::{
    event::{Event, Token},
    view::StoreView,
};

///
/// Index
///
/// The uniform observe/query contract.
///
/// `apply` must accept every event shape and runs synchronously before the
/// originating mutation returns. If it panics, the collection is poisoned;
/// no partial recovery is attempted.
///
/// Readers are parameterized over the resolved item type `V` because an
/// index's own key type and the collection's item type diverge under
/// `premap`: the reader still resolves identifiers against the outer
/// collection's store.
///

pub trait Index<T> {
    type Reader<'t, V>
    where
        Self: 't,
        V: 't;

    /// Apply one update event to local state.
    fn apply(&mut self, token: Token, event: Event<'_, T>);

    /// Construct the read-only query handle over current state.
    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V>;
}
