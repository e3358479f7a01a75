use crate::{error::Fault, types::Id};
use std::collections::HashMap;

///
/// StoreView
///
/// Shared borrow of the store's item table, handed to every reader so it
/// can resolve identifiers back into item envelopes. Indexes hold ids
/// only; this is the one place an id turns back into a value.
///

pub struct StoreView<'t, V> {
    items: &'t HashMap<Id, V>,
}

impl<'t, V> StoreView<'t, V> {
    #[must_use]
    pub(crate) const fn new(items: &'t HashMap<Id, V>) -> Self {
        Self { items }
    }

    /// Resolve an indexed id. An id reachable from an index but absent
    /// from the store means the tree is desynchronized, which is a fault.
    #[must_use]
    pub fn get(&self, id: Id) -> &'t V {
        match self.items.get(&id) {
            Some(value) => value,
            None => Fault::Desync {
                id,
                detail: "indexed id missing from store",
            }
            .raise(),
        }
    }

    #[must_use]
    pub fn get_opt(&self, id: Id) -> Option<&'t V> {
        self.items.get(&id)
    }

    /// Resolve an indexed id into an item envelope.
    #[must_use]
    pub fn entry(&self, id: Id) -> Entry<'t, V> {
        Entry {
            id,
            value: self.get(id),
        }
    }
}

impl<V> Clone for StoreView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for StoreView<'_, V> {}

///
/// Entry
///
/// Item envelope: an identifier together with a borrow of its current
/// value. The unit returned from reader lookups, so callers always see
/// both the id and the value it resolves to.
///

#[derive(Debug)]
pub struct Entry<'t, V> {
    pub id: Id,
    pub value: &'t V,
}

impl<V> Clone for Entry<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Entry<'_, V> {}

///
/// TESTS
///
