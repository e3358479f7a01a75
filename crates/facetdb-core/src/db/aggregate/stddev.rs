use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};
use num_traits::ToPrimitive;
use std::marker::PhantomData;

/// Template for the sample standard deviation, maintained incrementally
/// with Welford's recurrence over (mean, sum of squared differences,
/// count). O(1) state, no samples retained.
///
/// The reader yields `None` with fewer than two samples. Plain f64
/// arithmetic; large magnitudes or high variance accumulate the usual
/// floating point error.
pub fn stddev<T: ToPrimitive>() -> StdDevTemplate<T> {
    StdDevTemplate {
        _marker: PhantomData,
    }
}

///
/// StdDevTemplate
///

pub struct StdDevTemplate<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: ToPrimitive> Template<T> for StdDevTemplate<T> {
    type Index = StdDevIndex<T>;

    fn build(&self) -> Self::Index {
        StdDevIndex {
            mean: 0.0,
            sq_diff: 0.0,
            count: 0,
            _marker: PhantomData,
        }
    }
}

///
/// StdDevIndex
///

pub struct StdDevIndex<T> {
    mean: f64,
    sq_diff: f64,
    count: u64,
    _marker: PhantomData<fn(&T)>,
}

#[allow(clippy::cast_precision_loss)]
impl<T> StdDevIndex<T> {
    fn admit(&mut self, x: f64) {
        self.count += 1;

        // M_k = M_{k-1} + (x - M_{k-1}) / k
        // S_k = S_{k-1} + (x - M_{k-1}) * (x - M_k)
        let prior_mean = self.mean;
        self.mean = prior_mean + (x - prior_mean) / self.count as f64;
        self.sq_diff += (x - prior_mean) * (x - self.mean);
    }

    fn expel(&mut self, x: f64) {
        let n = self.count;
        if n <= 1 {
            self.mean = 0.0;
            self.sq_diff = 0.0;
            self.count = 0;
            return;
        }

        // Inverse of the admit recurrence.
        let prior_mean = self.mean;
        self.mean = (n as f64 * prior_mean - x) / (n - 1) as f64;
        self.sq_diff = (self.sq_diff - (x - prior_mean) * (x - self.mean)).max(0.0);
        self.count = n - 1;
    }
}

impl<T: ToPrimitive> Index<T> for StdDevIndex<T> {
    type Reader<'t, V>
        = Option<f64>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, _token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { new, .. } => {
                if let Some(x) = new.to_f64() {
                    self.admit(x);
                }
            }
            Event::Update { old, new, .. } => match (old.to_f64(), new.to_f64()) {
                (Some(old), Some(new)) => {
                    self.expel(old);
                    self.admit(new);
                }
                (Some(old), None) => self.expel(old),
                (None, Some(new)) => self.admit(new),
                (None, None) => {}
            },
            Event::Remove { old, .. } => {
                if let Some(x) = old.to_f64() {
                    self.expel(x);
                }
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn reader<'t, V: 't>(&'t self, _view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        if self.count < 2 {
            None
        } else {
            Some((self.sq_diff / (self.count - 1) as f64).sqrt())
        }
    }
}

///
/// TESTS
///
