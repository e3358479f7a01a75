use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};

/// Template for the predicate gate: `inner` only ever observes items for
/// which `pred` holds.
///
/// Updates are forwarded by scope transition, so the inner index sees a
/// consistent in-scope population at every instant: an item entering
/// scope arrives as an add, an item leaving scope departs as a remove.
pub fn filtered<T, P, Tpl>(pred: P, inner: Tpl) -> FilteredTemplate<P, Tpl>
where
    P: Fn(&T) -> bool + Clone,
    Tpl: Template<T>,
{
    FilteredTemplate { pred, inner }
}

///
/// FilteredTemplate
///

pub struct FilteredTemplate<P, Tpl> {
    pred: P,
    inner: Tpl,
}

impl<T, P, Tpl> Template<T> for FilteredTemplate<P, Tpl>
where
    P: Fn(&T) -> bool + Clone,
    Tpl: Template<T>,
{
    type Index = FilteredIndex<P, Tpl::Index>;

    fn build(&self) -> Self::Index {
        FilteredIndex {
            pred: self.pred.clone(),
            inner: self.inner.build(),
        }
    }
}

///
/// FilteredIndex
///

pub struct FilteredIndex<P, Inner> {
    pred: P,
    inner: Inner,
}

impl<T, P, Inner> Index<T> for FilteredIndex<P, Inner>
where
    P: Fn(&T) -> bool,
    Inner: Index<T>,
{
    type Reader<'t, V>
        = Inner::Reader<'t, V>
    where
        Self: 't,
        V: 't;

    fn apply(&mut self, token: Token, event: Event<'_, T>) {
        match event {
            Event::Add { id, new } => {
                if (self.pred)(new) {
                    self.inner.apply(token, Event::Add { id, new });
                }
            }
            Event::Update { id, old, new } => {
                match ((self.pred)(old), (self.pred)(new)) {
                    (true, true) => self.inner.apply(token, Event::Update { id, old, new }),
                    (true, false) => self.inner.apply(token, Event::Remove { id, old }),
                    (false, true) => self.inner.apply(token, Event::Add { id, new }),
                    (false, false) => {}
                }
            }
            Event::Remove { id, old } => {
                if (self.pred)(old) {
                    self.inner.apply(token, Event::Remove { id, old });
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{aggregate::count, index::keys, Collection};

    #[test]
    fn gates_adds_and_removes() {
        let mut coll = Collection::new(filtered(|n: &i32| n % 2 == 0, count()));
        let two = coll.insert(2);
        coll.insert(3);
        coll.insert(4);

        assert_eq!(coll.query(|c| c), 2);

        coll.remove(two);
        assert_eq!(coll.query(|c| c), 1);
    }

    #[test]
    fn update_transitions_scope() {
        let mut coll = Collection::new(filtered(|n: &i32| n % 2 == 0, keys()));
        let id = coll.insert(1);
        assert_eq!(coll.query(|ix| ix.count()), 0);

        // out -> in arrives as an add
        coll.update(id, 2);
        assert!(coll.query(|ix| ix.contains(id)));

        // in -> in stays put
        coll.update(id, 4);
        assert_eq!(coll.query(|ix| ix.count()), 1);

        // in -> out departs as a remove
        coll.update(id, 5);
        assert!(!coll.query(|ix| ix.contains(id)));

        // out -> out never reaches the inner index
        coll.update(id, 7);
        assert_eq!(coll.query(|ix| ix.count()), 0);
    }

    #[test]
    fn remove_of_out_of_scope_item_is_a_no_op() {
        let mut coll = Collection::new(filtered(|n: &i32| *n > 0, count()));
        let id = coll.insert(-1);

        coll.remove(id);
        assert_eq!(coll.query(|c| c), 0);
    }
}
