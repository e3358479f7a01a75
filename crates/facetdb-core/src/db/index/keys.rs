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

/// Template for the keys index: tracks only which ids are present.
///
/// Most useful as the terminal inside `grouped` when the question is
/// "which ids belong to group G".
pub fn keys() -> KeysTemplate {
    KeysTemplate
}

///
/// KeysTemplate
///

pub struct KeysTemplate;

impl<T> Template<T> for KeysTemplate {
    type Index = KeysIndex;

    fn build(&self) -> Self::Index {
        KeysIndex { ids: IdSet::new() }
    }
}

///
/// KeysIndex
///

pub struct KeysIndex {
    ids: IdSet,
}

impl<T> Index<T> for KeysIndex {
    type Reader<'t, V>
        = KeysReader<'t, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { id, .. } => {
                self.ids.insert(id);
            }
            Event::Update { .. } => {}
            Event::Remove { id, .. } => {
                if !self.ids.remove(id) {
                    Fault::Desync {
                        id,
                        detail: "id missing from keys index",
                    }
                    .raise();
                }
            }
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        KeysReader {
            ids: &self.ids,
            view,
        }
    }
}

///
/// KeysReader
///

pub struct KeysReader<'t, V> {
    ids: &'t IdSet,
    view: StoreView<'t, V>,
}

impl<'t, V> KeysReader<'t, V> {
    /// Ids present, ascending.
    pub fn ids(&self) -> impl Iterator<Item = Id> + 't {
        self.ids.iter().copied()
    }

    /// Item envelopes for every id present, ascending by id.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'t, V>> {
        self.ids.iter().map(|id| self.view.entry(*id)).collect()
    }

    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Cardinality of the set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

///
/// TESTS
///
