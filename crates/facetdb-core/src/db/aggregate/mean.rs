use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};
use num_traits::ToPrimitive;
use std::marker::PhantomData;

/// Template for the running mean: a (sum, count) pair over `f64`.
///
/// The reader yields `None` while no value is in scope. Values that do
/// not convert to `f64` are treated as out of scope on both sides of an
/// event. Accumulation is plain f64 addition; expect the usual floating
/// point error on long-lived collections.
pub fn mean<T: ToPrimitive>() -> MeanTemplate<T> {
    MeanTemplate {
        _marker: PhantomData,
    }
}

///
/// MeanTemplate
///

pub struct MeanTemplate<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: ToPrimitive> Template<T> for MeanTemplate<T> {
    type Index = MeanIndex<T>;

    fn build(&self) -> Self::Index {
        MeanIndex {
            sum: 0.0,
            count: 0,
            _marker: PhantomData,
        }
    }
}

///
/// MeanIndex
///

pub struct MeanIndex<T> {
    sum: f64,
    count: u64,
    _marker: PhantomData<fn(&T)>,
}

impl<T> MeanIndex<T> {
    fn admit(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn expel(&mut self, value: f64) {
        self.sum -= value;
        self.count -= 1;
    }
}

impl<T: ToPrimitive> Index<T> for MeanIndex<T> {
    type Reader<'t, V>
        = Option<f64>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { new, .. } => {
                if let Some(value) = new.to_f64() {
                    self.admit(value);
                }
            }
            Event::Update { old, new, .. } => match (old.to_f64(), new.to_f64()) {
                (Some(old), Some(new)) => self.sum = self.sum - old + new,
                (Some(old), None) => self.expel(old),
                (None, Some(new)) => self.admit(new),
                (None, None) => {}
            },
            Event::Remove { old, .. } => {
                if let Some(value) = old.to_f64() {
                    self.expel(value);
                }
            }
        }
    }

    fn reader<'t, V: 't>(&'t self, _view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        if self.count == 0 {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(self.sum / self.count as f64)
        }
    }
}

///
/// TESTS
///
