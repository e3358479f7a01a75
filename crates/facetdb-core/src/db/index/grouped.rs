use crate::{
    db::{
        event::{Event, Token},
        index::Index,
        template::Template,
        view::StoreView,
    },
    error::Fault,
};
use std::{collections::HashMap, hash::Hash, marker::PhantomData};

/// Template for the grouping combinator: items are partitioned by
/// `key_fn`, and each group gets its own inner index built lazily from
/// `make_inner` on first touch.
///
/// A group whose membership returns to zero is pruned, so enumeration and
/// lookups never observe empty groups.
pub fn grouped<T, G, F, M, Tpl>(key_fn: F, make_inner: M) -> GroupedTemplate<F, M>
where
    G: Hash + Eq + Clone,
    F: Fn(&T) -> G + Clone,
    M: Fn() -> Tpl,
    Tpl: Template<T>,
{
    GroupedTemplate { key_fn, make_inner }
}

///
/// GroupedTemplate
///

pub struct GroupedTemplate<F, M> {
    key_fn: F,
    make_inner: M,
}

impl<T, G, F, M, Tpl> Template<T> for GroupedTemplate<F, M>
where
    G: Hash + Eq + Clone,
    F: Fn(&T) -> G + Clone,
    M: Fn() -> Tpl,
    Tpl: Template<T>,
{
    type Index = GroupedIndex<G, F, Tpl, Tpl::Index>;

    fn build(&self) -> Self::Index {
        GroupedIndex {
            key_fn: self.key_fn.clone(),
            proto: (self.make_inner)(),
            groups: HashMap::new(),
        }
    }
}

///
/// Group
/// One inner index plus the number of ids currently inside it. The count
/// is what makes pruning possible without asking the inner index anything.
///

struct Group<Inner> {
    index: Inner,
    members: usize,
}

///
/// GroupedIndex
///

pub struct GroupedIndex<G, F, Tpl, Inner> {
    key_fn: F,
    proto: Tpl,
    groups: HashMap<G, Group<Inner>>,
}

impl<G, F, Tpl, Inner> GroupedIndex<G, F, Tpl, Inner>
where
    G: Hash + Eq + Clone,
{
    fn admit<T>(&mut self, group: G, token: Token, event: Event<'_, T>)
    where
        F: Fn(&T) -> G,
        Tpl: Template<T, Index = Inner>,
        Inner: Index<T>,
    {
        let Self { proto, groups, .. } = self;
        let slot = groups.entry(group).or_insert_with(|| Group {
            index: proto.build(),
            members: 0,
        });

        slot.index.apply(token, event);
        slot.members += 1;
    }

    fn expel<T>(&mut self, group: &G, token: Token, event: Event<'_, T>)
    where
        F: Fn(&T) -> G,
        Tpl: Template<T, Index = Inner>,
        Inner: Index<T>,
    {
        let Some(slot) = self.groups.get_mut(group) else {
            Fault::Desync {
                id: event.id(),
                detail: "group missing from grouped index",
            }
            .raise()
        };

        slot.index.apply(token, event);
        slot.members -= 1;
        if slot.members == 0 {
            self.groups.remove(group);
        }
    }
}

impl<T, G, F, Tpl, Inner> Index<T> for GroupedIndex<G, F, Tpl, Inner>
where
    G: Hash + Eq + Clone,
    F: Fn(&T) -> G,
    Tpl: Template<T, Index = Inner>,
    Inner: Index<T>,
{
    type Reader<'t, V>
        = GroupedReader<'t, T, G, Inner, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { new, .. } => {
                let group = (self.key_fn)(new);
                self.admit(group, token, event);
            }
            Event::Update { id, old, new } => {
                let old_group = (self.key_fn)(old);
                let new_group = (self.key_fn)(new);

                if old_group == new_group {
                    let Some(slot) = self.groups.get_mut(&old_group) else {
                        Fault::Desync {
                            id,
                            detail: "group missing from grouped index",
                        }
                        .raise()
                    };
                    slot.index.apply(token, event);
                } else {
                    // Old group sheds the item before the new group gains
                    // it, so inner aggregates never double-count.
                    self.expel(&old_group, token, Event::Remove { id, old });
                    self.admit(new_group, token, Event::Add { id, new });
                }
            }
            Event::Remove { old, .. } => {
                let group = (self.key_fn)(old);
                self.expel(&group, token, event);
            }
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        GroupedReader {
            groups: &self.groups,
            view,
            _marker: PhantomData,
        }
    }
}

///
/// GroupedReader
///

pub struct GroupedReader<'t, T, G, Inner, V> {
    groups: &'t HashMap<G, Group<Inner>>,
    view: StoreView<'t, V>,
    _marker: PhantomData<fn(&T)>,
}

impl<'t, T, G, Inner, V> GroupedReader<'t, T, G, Inner, V>
where
    G: Hash + Eq,
    Inner: Index<T>,
{
    /// Reader over the group keyed `key`, or absent if the group has no
    /// members.
    #[must_use]
    pub fn get(&self, key: &G) -> Option<Inner::Reader<'t, V>> {
        self.groups
            .get(key)
            .map(|group| group.index.reader(self.view))
    }

    /// Iterate non-empty groups as (key, reader) pairs. Order is
    /// unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&'t G, Inner::Reader<'t, V>)> + '_ {
        self.groups
            .iter()
            .map(|(key, group)| (key, group.index.reader(self.view)))
    }

    /// Group keys currently populated. Order is unspecified.
    pub fn group_keys(&self) -> impl Iterator<Item = &'t G> + '_ {
        self.groups.keys()
    }

    /// Number of non-empty groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

///
/// TESTS
///
