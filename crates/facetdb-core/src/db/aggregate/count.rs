use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};

/// Template for the item counter. Updates leave the count unchanged.
pub fn count() -> CountTemplate {
    CountTemplate
}

///
/// CountTemplate
///

pub struct CountTemplate;

impl<T> Template<T> for CountTemplate {
    type Index = CountIndex;

    fn build(&self) -> Self::Index {
        CountIndex { count: 0 }
    }
}

///
/// CountIndex
///

pub struct CountIndex {
    count: u64,
}

impl<T> Index<T> for CountIndex {
    type Reader<'t, V>
        = u64
    where
        Self: 't,
        V: 't;

    #[inline]
    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { .. } => self.count += 1,
            Event::Update { .. } => {}
            Event::Remove { .. } => self.count -= 1,
        }
    }

    fn reader<'t, V: 't>(&'t self, _view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        self.count
    }
}

///
/// TESTS
///
