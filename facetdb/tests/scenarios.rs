//! End-to-end scenarios exercising each index shape through the public
//! API, with literal expectations.

use facetdb::{aggregate, index, prelude::*};

#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.into(),
        age,
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Play {
    team: String,
    score: u32,
}

fn play(team: &str, score: u32) -> Play {
    Play {
        team: team.into(),
        score,
    }
}

#[test]
fn empty_collection_answers_queries() {
    let coll: Collection<i32, _> = Collection::new(index::btree());

    assert_eq!(coll.query(|ix| ix.count()), 0);
    assert!(coll.query(|ix| ix.min().is_none()));
    assert!(coll.query(|ix| ix.max().is_none()));
    assert!(coll.is_empty());
}

#[test]
fn ordering_with_duplicate_keys() {
    let mut coll = Collection::new(index::btree::<i32>());
    coll.insert(5);
    let first_two = coll.insert(2);
    let nine = coll.insert(9);
    coll.insert(2);

    let min = coll.query(|ix| ix.min().map(|e| (e.id, *e.value)));
    assert_eq!(min, Some((first_two, 2)), "min must surface the earliest 2");

    let max = coll.query(|ix| ix.max().map(|e| (e.id, *e.value)));
    assert_eq!(max, Some((nine, 9)));

    assert_eq!(coll.query(|ix| ix.count()), 4);
}

#[test]
fn premapped_range_scans_in_key_then_id_order() {
    let mut coll = Collection::new(index::premap(|p: &Person| p.age, index::btree()));
    let thirty = coll.insert(person("amy", 30));
    let first_25 = coll.insert(person("ben", 25));
    coll.insert(person("cal", 40));
    let second_25 = coll.insert(person("dee", 25));

    let hits: Vec<Id> = coll.query(|ix| ix.range(25..=30).iter().map(|e| e.id).collect());
    assert_eq!(
        hits,
        vec![first_25, second_25, thirty],
        "range must list the two 25s in insertion order, then the 30"
    );
}

#[test]
fn grouped_counts_per_team() {
    let mut coll = Collection::new(index::grouped(
        |p: &Play| p.team.clone(),
        || aggregate::count(),
    ));
    for p in [
        play("a", 1),
        play("b", 2),
        play("a", 3),
        play("b", 4),
        play("a", 5),
    ] {
        coll.insert(p);
    }

    assert_eq!(coll.query(|ix| ix.get(&"a".to_string())), Some(3));
    assert_eq!(coll.query(|ix| ix.get(&"b".to_string())), Some(2));
    assert_eq!(coll.query(|ix| ix.get(&"c".to_string())), None);
}

#[test]
fn adjusting_across_groups_moves_the_count() {
    let mut coll = Collection::new(index::grouped(
        |p: &Play| p.team.clone(),
        || aggregate::count(),
    ));
    let first = coll.insert(play("a", 1));
    for p in [play("b", 2), play("a", 3), play("b", 4), play("a", 5)] {
        coll.insert(p);
    }

    coll.adjust(first, |p| Play {
        team: "b".into(),
        ..p.clone()
    });

    assert_eq!(coll.query(|ix| ix.get(&"a".to_string())), Some(2));
    assert_eq!(coll.query(|ix| ix.get(&"b".to_string())), Some(3));
    assert_eq!(coll.len(), 5, "moving between groups must not lose items");
}

#[test]
fn filtered_mean_over_even_values() {
    let mut coll = Collection::new(index::filtered(
        |n: &i32| n % 2 == 0,
        index::premap(|n: &i32| f64::from(*n), aggregate::mean()),
    ));

    let mut ids = Vec::new();
    for n in 1..=6 {
        ids.push(coll.insert(n));
    }

    assert_eq!(coll.query(|m| m), Some(4.0));

    coll.remove(ids[5]);
    assert_eq!(coll.query(|m| m), Some(3.0));

    coll.remove(ids[1]);
    coll.remove(ids[3]);
    assert_eq!(coll.query(|m| m), None, "no evens left means undefined");
}
