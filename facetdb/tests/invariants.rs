//! Universal invariants, driven by scripted mutation sequences: whatever
//! the sequence, the indexes and the store must agree.

use facetdb::{aggregate, index, prelude::*, zip};
use std::collections::BTreeSet;

/// A mixed workload touching every mutation shape.
fn churn(coll: &mut Collection<i32, impl facetdb::Index<i32>>) -> Vec<Id> {
    let mut live = Vec::new();

    for n in 0..20 {
        live.push(coll.insert(n));
    }
    for chunk in live.chunks(3) {
        coll.adjust(chunk[0], |n| n * 7);
    }
    let mut removed = Vec::new();
    for (slot, id) in live.iter().enumerate() {
        if slot % 4 == 0 {
            coll.remove(*id);
            removed.push(*id);
        }
    }
    live.retain(|id| !removed.contains(id));

    live
}

#[test]
fn keys_index_matches_store_membership() {
    let mut coll = Collection::new(index::keys());
    churn(&mut coll);

    let indexed: BTreeSet<Id> = coll.query(|ix| ix.ids().collect());
    let stored: BTreeSet<Id> = coll.iter().map(|(id, _)| id).collect();

    assert_eq!(
        indexed, stored,
        "ids reachable from the keys index must equal ids in the store"
    );
}

#[test]
fn aggregates_match_recomputation_from_the_store() {
    let mut coll = Collection::new(zip!(
        aggregate::count(),
        index::premap(|n: &i32| i64::from(*n), aggregate::sum()),
        index::premap(|n: &i32| *n, aggregate::min()),
        index::premap(|n: &i32| *n, aggregate::max()),
    ));
    churn(&mut coll);

    let values: Vec<i32> = coll.iter().map(|(_, n)| *n).collect();

    let (count, sum, min, max) = coll.query(|(count, sum, min, max)| {
        (count, sum, min.get().copied(), max.get().copied())
    });

    assert_eq!(count, values.len() as u64);
    assert_eq!(sum, values.iter().map(|n| i64::from(*n)).sum::<i64>());
    assert_eq!(min, values.iter().copied().min());
    assert_eq!(max, values.iter().copied().max());
}

#[test]
fn grouped_partition_covers_exactly_the_store() {
    let mut coll = Collection::new(index::grouped(|n: &i32| n.rem_euclid(3), || index::keys()));
    churn(&mut coll);

    let mut seen = BTreeSet::new();
    let per_group: Vec<(i32, Vec<Id>)> =
        coll.query(|ix| ix.iter().map(|(g, r)| (*g, r.ids().collect())).collect());

    for (group, ids) in per_group {
        assert!(!ids.is_empty(), "group {group} must have been pruned when emptied");
        for id in ids {
            assert!(
                seen.insert(id),
                "id {id} appears in more than one group"
            );
            let value = *coll.get(id).expect("grouped id must resolve");
            assert_eq!(value.rem_euclid(3), group, "id {id} is filed under the wrong group");
        }
    }

    let stored: BTreeSet<Id> = coll.iter().map(|(id, _)| id).collect();
    assert_eq!(seen, stored, "groups must cover the store exactly");
}

#[test]
fn update_is_equivalent_to_remove_then_reinsert() {
    // Drive two collections through the same workload; one updates in
    // place, the other removes and reinserts. Every id-insensitive query
    // must agree.
    let template = || {
        zip!(
            aggregate::count(),
            index::premap(|n: &i32| i64::from(*n), aggregate::sum()),
            index::btree::<i32>(),
            index::grouped(|n: &i32| n % 2, || aggregate::count()),
        )
    };
    let mut updated = Collection::new(template());
    let mut rebuilt = Collection::new(template());

    let mut updated_ids = Vec::new();
    let mut rebuilt_ids = Vec::new();
    for n in 0..12 {
        updated_ids.push(updated.insert(n));
        rebuilt_ids.push(rebuilt.insert(n));
    }

    for slot in [1, 4, 7] {
        updated.update(updated_ids[slot], 100);

        rebuilt.remove(rebuilt_ids[slot]);
        rebuilt_ids[slot] = rebuilt.insert(100);
    }

    let observed_updated = updated.query(|(count, sum, by_value, by_parity)| {
        (
            count,
            sum,
            by_value.count_distinct(),
            by_value.get_all(&100).len(),
            by_parity.get(&0),
            by_parity.get(&1),
        )
    });
    let observed_rebuilt = rebuilt.query(|(count, sum, by_value, by_parity)| {
        (
            count,
            sum,
            by_value.count_distinct(),
            by_value.get_all(&100).len(),
            by_parity.get(&0),
            by_parity.get(&1),
        )
    });

    assert_eq!(observed_updated, observed_rebuilt);
}

#[test]
fn ids_are_monotonic_and_never_reissued() {
    let mut coll = Collection::new(index::keys());

    let mut issued = Vec::new();
    for n in 0..10 {
        issued.push(coll.insert(n));
    }
    for id in &issued[3..7] {
        coll.remove(*id);
    }
    for n in 0..5 {
        issued.push(coll.insert(n));
    }

    let mut sorted = issued.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(
        sorted, issued,
        "ids must be strictly increasing across the whole history"
    );
}
