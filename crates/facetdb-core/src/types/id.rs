use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// Id
///
/// Opaque identifier for an item in a collection.
///
/// - Issued from a strictly monotonic counter starting at 0.
/// - Stable for the lifetime of the item; never reissued after removal.
/// - Serializes identically to the underlying `u64`.
///

#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub struct Id(u64);

impl Id {
    /// Construct an identifier from its raw counter value.
    #[must_use]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

///
/// IdSet
///
/// Canonical set of identifiers.
///
/// - Ordering is ascending by id and does NOT reflect insertion history.
/// - Mutation goes through `insert`/`remove` only; reads go through the
///   borrowed set.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct IdSet(BTreeSet<Id>);

impl IdSet {
    /// Create an empty id set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert an id, returning `true` if it was newly inserted.
    pub fn insert(&mut self, id: Id) -> bool {
        self.0.insert(id)
    }

    /// Remove an id, returning `true` if it was present.
    pub fn remove(&mut self, id: Id) -> bool {
        self.0.remove(&id)
    }

    /// Smallest id in the set, if any.
    #[must_use]
    pub fn first_id(&self) -> Option<Id> {
        self.0.iter().next().copied()
    }
}

impl FromIterator<Id> for IdSet {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// TESTS
///
