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
use std::{collections::BTreeMap, marker::PhantomData, ops::RangeBounds};

/// Template for an ordered map index over keys of type `K`.
pub fn btree<K: Ord + Clone>() -> BTreeTemplate<K> {
    BTreeTemplate {
        _marker: PhantomData,
    }
}

///
/// BTreeTemplate
///

pub struct BTreeTemplate<K> {
    _marker: PhantomData<fn() -> K>,
}

impl<K: Ord + Clone> Template<K> for BTreeTemplate<K> {
    type Index = BTreeIndex<K>;

    fn build(&self) -> Self::Index {
        BTreeIndex {
            entries: BTreeMap::new(),
            len: 0,
        }
    }
}

///
/// BTreeIndex
///
/// Total-order map from key to the ascending set of ids currently bound
/// to that key. Ties break by id, so enumeration within one key follows
/// insertion order.
///

pub struct BTreeIndex<K> {
    entries: BTreeMap<K, IdSet>,
    len: usize,
}

impl<K: Ord + Clone> BTreeIndex<K> {
    fn bind(&mut self, key: &K, id: Id) {
        self.entries.entry(key.clone()).or_default().insert(id);
        self.len += 1;
    }

    fn unbind(&mut self, key: &K, id: Id) {
        let Some(ids) = self.entries.get_mut(key) else {
            Fault::Desync {
                id,
                detail: "key missing from ordered index",
            }
            .raise()
        };

        if !ids.remove(id) {
            Fault::Desync {
                id,
                detail: "id not bound to its ordered-index key",
            }
            .raise();
        }
        if ids.is_empty() {
            self.entries.remove(key);
        }
        self.len -= 1;
    }
}

impl<K: Ord + Clone> Index<K> for BTreeIndex<K> {
    type Reader<'t, V>
        = BTreeReader<'t, K, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, K>) {
        match event {
            Event::Add { id, new } => self.bind(new, id),
            Event::Update { id, old, new } => {
                // Keys equal means the binding is already correct.
                if old != new {
                    self.unbind(old, id);
                    self.bind(new, id);
                }
            }
            Event::Remove { id, old } => self.unbind(old, id),
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        BTreeReader {
            entries: &self.entries,
            len: self.len,
            view,
        }
    }
}

///
/// BTreeReader
///

pub struct BTreeReader<'t, K, V> {
    entries: &'t BTreeMap<K, IdSet>,
    len: usize,
    view: StoreView<'t, V>,
}

impl<'t, K: Ord, V> BTreeReader<'t, K, V> {
    /// First item bound to `key` (smallest id), if any.
    #[must_use]
    pub fn get_one(&self, key: &K) -> Option<Entry<'t, V>> {
        self.entries
            .get(key)
            .and_then(IdSet::first_id)
            .map(|id| self.view.entry(id))
    }

    /// All items bound to `key`, ascending by id.
    #[must_use]
    pub fn get_all(&self, key: &K) -> Vec<Entry<'t, V>> {
        self.entries
            .get(key)
            .map(|ids| ids.iter().map(|id| self.view.entry(*id)).collect())
            .unwrap_or_default()
    }

    /// Items whose key falls within `range`, ascending by key then id.
    #[must_use]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Vec<Entry<'t, V>> {
        self.entries
            .range(range)
            .flat_map(|(_, ids)| ids.iter())
            .map(|id| self.view.entry(*id))
            .collect()
    }

    /// Item with the smallest key (smallest id among ties).
    #[must_use]
    pub fn min(&self) -> Option<Entry<'t, V>> {
        self.entries
            .iter()
            .next()
            .and_then(|(_, ids)| ids.first_id())
            .map(|id| self.view.entry(id))
    }

    /// Item with the largest key (smallest id among ties).
    #[must_use]
    pub fn max(&self) -> Option<Entry<'t, V>> {
        self.entries
            .iter()
            .next_back()
            .and_then(|(_, ids)| ids.first_id())
            .map(|id| self.view.entry(id))
    }

    /// Total number of items materialized in the index.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Collection;

    #[test]
    fn orders_and_counts() {
        let mut coll = Collection::new(btree::<i32>());
        coll.insert(5);
        let id_two = coll.insert(2);
        let id_nine = coll.insert(9);
        coll.insert(2);

        assert_eq!(coll.query(|ix| ix.count()), 4);
        assert_eq!(coll.query(|ix| ix.count_distinct()), 3);

        let min = coll.query(|ix| ix.min().map(|e| (e.id, *e.value)));
        assert_eq!(min, Some((id_two, 2)), "min must be the first 2 inserted");

        let max = coll.query(|ix| ix.max().map(|e| (e.id, *e.value)));
        assert_eq!(max, Some((id_nine, 9)));
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut coll = Collection::new(btree::<i32>());
        let a = coll.insert(7);
        let b = coll.insert(7);

        let ids: Vec<Id> = coll.query(|ix| ix.get_all(&7).iter().map(|e| e.id).collect());
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn range_respects_bounds() {
        let mut coll = Collection::new(btree::<i32>());
        for n in [10, 20, 30, 40] {
            coll.insert(n);
        }

        let inclusive: Vec<i32> = coll.query(|ix| ix.range(20..=30).iter().map(|e| *e.value).collect());
        assert_eq!(inclusive, vec![20, 30]);

        let exclusive: Vec<i32> = coll.query(|ix| ix.range(20..30).iter().map(|e| *e.value).collect());
        assert_eq!(exclusive, vec![20]);
    }

    #[test]
    fn update_rebinds_key() {
        let mut coll = Collection::new(btree::<i32>());
        let id = coll.insert(1);
        coll.insert(5);

        coll.update(id, 9);

        assert_eq!(coll.query(|ix| ix.get_all(&1).len()), 0);
        assert_eq!(coll.query(|ix| ix.max().map(|e| *e.value)), Some(9));
        assert_eq!(coll.query(|ix| ix.count()), 2);
    }

    #[test]
    fn remove_clears_emptied_keys() {
        let mut coll = Collection::new(btree::<i32>());
        let id = coll.insert(3);

        coll.remove(id);

        assert_eq!(coll.query(|ix| ix.count()), 0);
        assert_eq!(coll.query(|ix| ix.count_distinct()), 0);
        assert!(coll.query(|ix| ix.min().is_none()));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        #[derive(Clone, Debug)]
        enum Op {
            Insert(i16),
            Update(usize, i16),
            Remove(usize),
        }

        fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
            prop::collection::vec(
                prop_oneof![
                    any::<i16>().prop_map(Op::Insert),
                    (any::<usize>(), any::<i16>())
                        .prop_map(|(slot, value)| Op::Update(slot, value)),
                    any::<usize>().prop_map(Op::Remove),
                ],
                0..120,
            )
        }

        proptest! {
            #[test]
            fn agrees_with_a_reference_map(ops in arb_ops()) {
                let mut coll = Collection::new(btree::<i16>());
                let mut reference: HashMap<Id, i16> = HashMap::new();
                let mut live: Vec<Id> = Vec::new();

                for op in ops {
                    match op {
                        Op::Insert(value) => {
                            let id = coll.insert(value);
                            reference.insert(id, value);
                            live.push(id);
                        }
                        Op::Update(slot, value) if !live.is_empty() => {
                            let id = live[slot % live.len()];
                            coll.update(id, value);
                            reference.insert(id, value);
                        }
                        Op::Remove(slot) if !live.is_empty() => {
                            let id = live.remove(slot % live.len());
                            coll.remove(id);
                            reference.remove(&id);
                        }
                        Op::Update(..) | Op::Remove(..) => {}
                    }
                }

                let (count, distinct, min, max) = coll.query(|ix| {
                    (
                        ix.count(),
                        ix.count_distinct(),
                        ix.min().map(|e| (e.id, *e.value)),
                        ix.max().map(|e| (e.id, *e.value)),
                    )
                });

                prop_assert_eq!(count, reference.len());
                let values: std::collections::HashSet<i16> =
                    reference.values().copied().collect();
                prop_assert_eq!(distinct, values.len());

                let expected_min = reference
                    .iter()
                    .map(|(id, value)| (*value, *id))
                    .min()
                    .map(|(value, id)| (id, value));
                prop_assert_eq!(min, expected_min);

                let expected_max = reference
                    .iter()
                    .map(|(id, value)| (*value, std::cmp::Reverse(*id)))
                    .max()
                    .map(|(value, std::cmp::Reverse(id))| (id, value));
                prop_assert_eq!(max, expected_max);
            }
        }
    }
}
