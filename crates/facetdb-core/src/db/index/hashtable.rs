use crate::{
    db::{
        event::{Event, Token},
        index::Index,
        template::Template,
        view::{Entry, StoreView},
    },
    error::Fault,
    types::{Id, IdSet},
};
use std::{
    collections::{hash_map, HashMap},
    hash::Hash,
    marker::PhantomData,
};

/// Template for a unique hash index: a bijection key ↔ id.
pub fn hashtable_unique<K: Hash + Eq + Clone>() -> HashUniqueTemplate<K> {
    HashUniqueTemplate {
        _marker: PhantomData,
    }
}

/// Template for a multi hash index: each key maps to a set of ids.
pub fn hashtable_multi<K: Hash + Eq + Clone>() -> HashMultiTemplate<K> {
    HashMultiTemplate {
        _marker: PhantomData,
    }
}

///
/// HashUniqueTemplate
///

pub struct HashUniqueTemplate<K> {
    _marker: PhantomData<fn() -> K>,
}

impl<K: Hash + Eq + Clone> Template<K> for HashUniqueTemplate<K> {
    type Index = HashUniqueIndex<K>;

    fn build(&self) -> Self::Index {
        HashUniqueIndex {
            entries: HashMap::new(),
        }
    }
}

///
/// HashUniqueIndex
///
/// Binding a key that is already bound to a different id is a uniqueness
/// fault; the caller is expected to have checked or to treat the panic as
/// a bug.
///

pub struct HashUniqueIndex<K> {
    entries: HashMap<K, Id>,
}

impl<K: Hash + Eq + Clone> HashUniqueIndex<K> {
    fn bind(&mut self, key: &K, id: Id) {
        match self.entries.entry(key.clone()) {
            hash_map::Entry::Occupied(slot) => Fault::UniqueViolation {
                bound: *slot.get(),
                incoming: id,
            }
            .raise(),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
    }

    fn unbind(&mut self, key: &K, id: Id) {
        match self.entries.remove(key) {
            Some(bound) if bound == id => {}
            _ => Fault::Desync {
                id,
                detail: "id not bound to its unique-index key",
            }
            .raise(),
        }
    }
}

impl<K: Hash + Eq + Clone> Index<K> for HashUniqueIndex<K> {
    type Reader<'t, V>
        = HashUniqueReader<'t, K, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, K>) {
        match event {
            Event::Add { id, new } => self.bind(new, id),
            Event::Update { id, old, new } => {
                if old != new {
                    self.unbind(old, id);
                    self.bind(new, id);
                }
            }
            Event::Remove { id, old } => self.unbind(old, id),
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        HashUniqueReader {
            entries: &self.entries,
            view,
        }
    }
}

///
/// HashUniqueReader
///

pub struct HashUniqueReader<'t, K, V> {
    entries: &'t HashMap<K, Id>,
    view: StoreView<'t, V>,
}

impl<'t, K: Hash + Eq, V> HashUniqueReader<'t, K, V> {
    /// The item bound to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Entry<'t, V>> {
        self.entries.get(key).map(|id| self.view.entry(*id))
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

///
/// HashMultiTemplate
///

pub struct HashMultiTemplate<K> {
    _marker: PhantomData<fn() -> K>,
}

impl<K: Hash + Eq + Clone> Template<K> for HashMultiTemplate<K> {
    type Index = HashMultiIndex<K>;

    fn build(&self) -> Self::Index {
        HashMultiIndex {
            entries: HashMap::new(),
            len: 0,
        }
    }
}

///
/// HashMultiIndex
///

pub struct HashMultiIndex<K> {
    entries: HashMap<K, IdSet>,
    len: usize,
}

impl<K: Hash + Eq + Clone> HashMultiIndex<K> {
    fn bind(&mut self, key: &K, id: Id) {
        self.entries.entry(key.clone()).or_default().insert(id);
        self.len += 1;
    }

    fn unbind(&mut self, key: &K, id: Id) {
        let Some(ids) = self.entries.get_mut(key) else {
            Fault::Desync {
                id,
                detail: "key missing from multi hash index",
            }
            .raise()
        };

        if !ids.remove(id) {
            Fault::Desync {
                id,
                detail: "id not bound to its multi-hash key",
            }
            .raise();
        }
        if ids.is_empty() {
            self.entries.remove(key);
        }
        self.len -= 1;
    }
}

impl<K: Hash + Eq + Clone> Index<K> for HashMultiIndex<K> {
    type Reader<'t, V>
        = HashMultiReader<'t, K, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, K>) {
        match event {
            Event::Add { id, new } => self.bind(new, id),
            Event::Update { id, old, new } => {
                if old != new {
                    self.unbind(old, id);
                    self.bind(new, id);
                }
            }
            Event::Remove { id, old } => self.unbind(old, id),
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        HashMultiReader {
            entries: &self.entries,
            len: self.len,
            view,
        }
    }
}

///
/// HashMultiReader
///

pub struct HashMultiReader<'t, K, V> {
    entries: &'t HashMap<K, IdSet>,
    len: usize,
    view: StoreView<'t, V>,
}

impl<'t, K: Hash + Eq, V> HashMultiReader<'t, K, V> {
    /// All items bound to `key`, ascending by id.
    #[must_use]
    pub fn get_all(&self, key: &K) -> Vec<Entry<'t, V>> {
        self.entries
            .get(key)
            .map(|ids| ids.iter().map(|id| self.view.entry(*id)).collect())
            .unwrap_or_default()
    }

    /// First item bound to `key` (smallest id), if any.
    #[must_use]
    pub fn get_one(&self, key: &K) -> Option<Entry<'t, V>> {
        self.entries
            .get(key)
            .and_then(IdSet::first_id)
            .map(|id| self.view.entry(id))
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Total number of items materialized in the index.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.len
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn count_distinct(&self) -> usize {
        self.entries.len()
    }
}

///
/// TESTS
///
