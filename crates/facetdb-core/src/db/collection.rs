use crate::{
    db::{
        event::{Event, TOKEN},
        index::Index,
        store::Store,
        template::Template,
        view::StoreView,
    },
    obs::sink::{self, MetricsEvent, MutationKind},
    types::Id,
};

///
/// Collection
///
/// Store plus one live index tree, kept synchronized: every mutation
/// (1) updates the store, (2) synthesizes the event from the captured
/// old/new pair, and (3) applies it to the root index, all within the
/// same call. Queries borrow the tree read-only, so the borrow checker
/// rules out observing the window between store update and index update.
///
/// Single-writer by construction: all methods take `&self`/`&mut self`
/// and run to completion, and no internal synchronization exists.
///

pub struct Collection<T, Ix> {
    store: Store<T>,
    index: Ix,
}

impl<T, Ix> Collection<T, Ix>
where
    Ix: Index<T>,
{
    /// Instantiate `template` and wire the live index to an empty store.
    pub fn new<Tpl>(template: Tpl) -> Self
    where
        Tpl: Template<T, Index = Ix>,
    {
        Self {
            store: Store::new(),
            index: template.build(),
        }
    }

    /// Append a value, returning its freshly allocated id.
    pub fn insert(&mut self, value: T) -> Id {
        let id = self.store.insert(value);
        let new = self.store.read(id);
        self.index.apply(TOKEN, Event::Add { id, new });

        sink::record(MetricsEvent::MutationApplied {
            kind: MutationKind::Insert,
        });

        id
    }

    /// Append every value from an iterator.
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value);
        }
    }

    #[must_use]
    pub fn get(&self, id: Id) -> Option<&T> {
        self.store.get(id)
    }

    /// Replace the value under `id`. Faults if the id is unknown.
    pub fn update(&mut self, id: Id, value: T) {
        let old = self.store.replace(id, value);
        let new = self.store.read(id);
        self.index.apply(
            TOKEN,
            Event::Update {
                id,
                old: &old,
                new,
            },
        );

        sink::record(MetricsEvent::MutationApplied {
            kind: MutationKind::Update,
        });
    }

    /// Replace the value under `id` with `f` applied to the current
    /// value. The old value is captured before the replace so the event
    /// carries both sides. Faults if the id is unknown.
    pub fn adjust<F>(&mut self, id: Id, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let value = f(self.store.read(id));
        self.update(id, value);
    }

    /// Delete the value under `id`, returning it if present.
    pub fn remove(&mut self, id: Id) -> Option<T> {
        if !self.store.contains(id) {
            return None;
        }

        let old = self.store.remove(id);
        self.index.apply(TOKEN, Event::Remove { id, old: &old });

        sink::record(MetricsEvent::MutationApplied {
            kind: MutationKind::Remove,
        });

        Some(old)
    }

    /// Run `f` against the root index's reader. The reader (and anything
    /// derived from it) borrows the collection, so no mutation can occur
    /// while query results are alive.
    pub fn query<'c, R>(&'c self, f: impl FnOnce(Ix::Reader<'c, T>) -> R) -> R {
        sink::record(MetricsEvent::QueryServed);

        f(self.index.reader(StoreView::new(self.store.items())))
    }

    /// Unordered enumeration of (id, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
        self.store.iter()
    }

    /// Number of items in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

///
/// TESTS
///
