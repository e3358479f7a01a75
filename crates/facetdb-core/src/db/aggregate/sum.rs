use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};
use num_traits::Num;
use std::marker::PhantomData;

/// Template for the running sum over a numeric type.
///
/// An update contributes `new - old`, so the state never drifts from the
/// fold of the in-scope values.
pub fn sum<T: Num + Copy>() -> SumTemplate<T> {
    SumTemplate {
        _marker: PhantomData,
    }
}

///
/// SumTemplate
///

pub struct SumTemplate<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Num + Copy> Template<T> for SumTemplate<T> {
    type Index = SumIndex<T>;

    fn build(&self) -> Self::Index {
        SumIndex { sum: T::zero() }
    }
}

///
/// SumIndex
///

pub struct SumIndex<T> {
    sum: T,
}

impl<T: Num + Copy> Index<T> for SumIndex<T> {
    type Reader<'t, V>
        = T
    where
        Self: 't,
        V: 't;

    #[inline]
    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { new, .. } => self.sum = self.sum + *new,
            Event::Update { old, new, .. } => self.sum = self.sum - *old + *new,
            Event::Remove { old, .. } => self.sum = self.sum - *old,
        }
    }

    fn reader<'t, V: 't>(&'t self, _view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        self.sum
    }
}

///
/// TESTS
///
