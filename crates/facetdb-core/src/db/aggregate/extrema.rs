use crate::{
    db::{
        event::{Event, Token},
        index::Index,
        template::Template,
        view::{Entry, StoreView},
    },
    error::Fault,
    types::Id,
};
use std::{collections::BTreeSet, marker::PhantomData};

/// Template for the minimum tracker.
///
/// Backed by an ordered multiset of `(value, id)` pairs, so a removal
/// restores the next extremum in O(log n) instead of rescanning. The
/// reader yields `None` while nothing is in scope.
pub fn min<T: Ord + Clone>() -> MinTemplate<T> {
    MinTemplate {
        _marker: PhantomData,
    }
}

/// Template for the maximum tracker. See [`min`] for the mechanics.
pub fn max<T: Ord + Clone>() -> MaxTemplate<T> {
    MaxTemplate {
        _marker: PhantomData,
    }
}

///
/// ValueBag
/// Ordered multiset of (value, id) pairs. Ids disambiguate equal values,
/// so every in-scope item occupies exactly one slot.
///

struct ValueBag<T> {
    entries: BTreeSet<(T, Id)>,
}

impl<T: Ord + Clone> ValueBag<T> {
    const fn new() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }

    fn admit(&mut self, value: &T, id: Id) {
        if !self.entries.insert((value.clone(), id)) {
            Fault::Desync {
                id,
                detail: "duplicate (value, id) slot in extremum bag",
            }
            .raise();
        }
    }

    fn expel(&mut self, value: &T, id: Id) {
        if !self.entries.remove(&(value.clone(), id)) {
            Fault::Desync {
                id,
                detail: "missing (value, id) slot in extremum bag",
            }
            .raise();
        }
    }

    fn apply(&mut self, event: Event<'_, T>) {
        match event {
            Event::Add { id, new } => self.admit(new, id),
            Event::Update { id, old, new } => {
                if old != new {
                    self.expel(old, id);
                    self.admit(new, id);
                }
            }
            Event::Remove { id, old } => self.expel(old, id),
        }
    }
}

///
/// MinTemplate / MinIndex
///

pub struct MinTemplate<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Ord + Clone> Template<T> for MinTemplate<T> {
    type Index = MinIndex<T>;

    fn build(&self) -> Self::Index {
        MinIndex {
            bag: ValueBag::new(),
        }
    }
}

pub struct MinIndex<T> {
    bag: ValueBag<T>,
}

impl<T: Ord + Clone> Index<T> for MinIndex<T> {
    type Reader<'t, V>
        = ExtremumReader<'t, T, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        self.bag.apply(event);
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        ExtremumReader {
            slot: self.bag.entries.iter().next(),
            view,
        }
    }
}

///
/// MaxTemplate / MaxIndex
///

pub struct MaxTemplate<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Ord + Clone> Template<T> for MaxTemplate<T> {
    type Index = MaxIndex<T>;

    fn build(&self) -> Self::Index {
        MaxIndex {
            bag: ValueBag::new(),
        }
    }
}

pub struct MaxIndex<T> {
    bag: ValueBag<T>,
}

impl<T: Ord + Clone> Index<T> for MaxIndex<T> {
    type Reader<'t, V>
        = ExtremumReader<'t, T, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        self.bag.apply(event);
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        ExtremumReader {
            slot: self.bag.entries.iter().next_back(),
            view,
        }
    }
}

///
/// ExtremumReader
///

pub struct ExtremumReader<'t, T, V> {
    slot: Option<&'t (T, Id)>,
    view: StoreView<'t, V>,
}

impl<'t, T, V> ExtremumReader<'t, T, V> {
    /// The extremum value, or `None` while nothing is in scope.
    #[must_use]
    pub fn get(&self) -> Option<&'t T> {
        self.slot.map(|(value, _)| value)
    }

    /// Item envelope of the item holding the extremum.
    #[must_use]
    pub fn entry(&self) -> Option<Entry<'t, V>> {
        self.slot.map(|(_, id)| self.view.entry(*id))
    }
}

///
/// TESTS
///
