use crate::db::index::Index;

///
/// Template
///
/// A not-yet-instantiated description of an index tree. Constructors in
/// [`index`](crate::db::index) and [`aggregate`](crate::db::aggregate)
/// return templates; [`Collection::new`](crate::db::Collection::new)
/// builds the live tree once, and `grouped` keeps its inner template to
/// build one index per group lazily.
///
/// `build` takes `&self` because a template may be instantiated any
/// number of times; captured state must therefore be reusable.
///

pub trait Template<T> {
    type Index: Index<T>;

    fn build(&self) -> Self::Index;
}
