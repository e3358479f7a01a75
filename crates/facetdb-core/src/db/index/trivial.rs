use crate::{
    db::{
        event::{Event, Token},
        index::Index,
        template::Template,
        view::{Entry, StoreView},
    },
    types::Id,
};

/// Template for the no-op index: maintains nothing, answers point lookups
/// straight from the store. Useful as a placeholder position in a tuple.
pub fn trivial() -> TrivialTemplate {
    TrivialTemplate
}

///
/// TrivialTemplate
///

pub struct TrivialTemplate;

impl<T> Template<T> for TrivialTemplate {
    type Index = TrivialIndex;

    fn build(&self) -> Self::Index {
        TrivialIndex
    }
}

///
/// TrivialIndex
///

pub struct TrivialIndex;

impl<T> Index<T> for TrivialIndex {
    type Reader<'t, V>
        = TrivialReader<'t, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, _event: Event<'_, T>) {}

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        TrivialReader { view }
    }
}

///
/// TrivialReader
///

pub struct TrivialReader<'t, V> {
    view: StoreView<'t, V>,
}

impl<'t, V> TrivialReader<'t, V> {
    #[must_use]
    pub fn get(&self, id: Id) -> Option<Entry<'t, V>> {
        self.view.get_opt(id).map(|value| Entry { id, value })
    }
}

///
/// TESTS
///
