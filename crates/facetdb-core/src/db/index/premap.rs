use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};

/// Template for the key-extraction combinator: every event's value runs
/// through `f` before reaching `inner`.
///
/// `f` is invoked exactly once per side per event and must be
/// deterministic and side-effect-free. Results are not memoized, so keep
/// it cheap; a field projection is the typical shape.
pub fn premap<T, U, F, Tpl>(f: F, inner: Tpl) -> PremapTemplate<F, Tpl>
where
    F: Fn(&T) -> U + Clone,
    Tpl: Template<U>,
{
    PremapTemplate { f, inner }
}

///
/// PremapTemplate
///

pub struct PremapTemplate<F, Tpl> {
    f: F,
    inner: Tpl,
}

impl<T, U, F, Tpl> Template<T> for PremapTemplate<F, Tpl>
where
    F: Fn(&T) -> U + Clone,
    Tpl: Template<U>,
{
    type Index = PremapIndex<F, Tpl::Index>;

    fn build(&self) -> Self::Index {
        PremapIndex {
            f: self.f.clone(),
            inner: self.inner.build(),
        }
    }
}

///
/// PremapIndex
///

pub struct PremapIndex<F, Inner> {
    f: F,
    inner: Inner,
}

impl<T, U, F, Inner> Index<T> for PremapIndex<F, Inner>
where
    F: Fn(&T) -> U,
    Inner: Index<U>,
{
    type Reader<'t, V>
        = Inner::Reader<'t, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { id, new } => {
                let new = (self.f)(new);
                self.inner.apply(token, Event::Add { id, new: &new });
            }
            Event::Update { id, old, new } => {
                let old = (self.f)(old);
                let new = (self.f)(new);
                self.inner.apply(
                    token,
                    Event::Update {
                        id,
                        old: &old,
                        new: &new,
                    },
                );
            }
            Event::Remove { id, old } => {
                let old = (self.f)(old);
                self.inner.apply(token, Event::Remove { id, old: &old });
            }
        }
    }

    fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
        self.inner.reader(view)
    }
}

///
/// TESTS
///
