use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};
use std::marker::PhantomData;

/// Template for a user-defined fold over a constant-size state.
///
/// `add` and `remove` must be inverses: removing a value must undo what
/// adding it did, or the state drifts from the fold of the in-scope
/// values. An update is applied as `remove(old)` then `add(new)`.
pub fn fold<T, S>(init: S, add: fn(&mut S, &T), remove: fn(&mut S, &T)) -> FoldTemplate<T, S>
where
    S: Clone,
{
    FoldTemplate {
        init,
        add,
        remove,
        _marker: PhantomData,
    }
}

///
/// FoldTemplate
///

pub struct FoldTemplate<T, S> {
    init: S,
    add: fn(&mut S, &T),
    remove: fn(&mut S, &T),
    _marker: PhantomData<fn(&T)>,
}

impl<T, S: Clone> Template<T> for FoldTemplate<T, S> {
    type Index = FoldIndex<T, S>;

    fn build(&self) -> Self::Index {
        FoldIndex {
            state: self.init.clone(),
            add: self.add,
            remove: self.remove,
            _marker: PhantomData,
        }
    }
}

///
/// FoldIndex
///

pub struct FoldIndex<T, S> {
    state: S,
    add: fn(&mut S, &T),
    remove: fn(&mut S, &T),
    _marker: PhantomData<fn(&T)>,
}

impl<T, S: Clone> Index<T> for FoldIndex<T, S> {
    type Reader<'t, V>
        = &'t S
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { new, .. } => (self.add)(&mut self.state, new),
            Event::Update { old, new, .. } => {
                (self.remove)(&mut self.state, old);
                (self.add)(&mut self.state, new);
            }
            Event::Remove { old, .. } => (self.remove)(&mut self.state, old),
        }
    }

    fn reader<'t, V: 't>(&'t self, _view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        &self.state
    }
}

///
/// TESTS
///
