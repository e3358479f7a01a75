use crate::types::Id;

///
/// Event
///
/// Update envelope delivered to the root index after each store mutation.
/// Every variant carries enough state for an index to adjust its
/// bookkeeping without consulting the store: the store has already been
/// mutated by the time an index observes the event, so `old` is the only
/// remaining witness of the outgoing value.
///

pub enum Event<'t, T> {
    Add { id: Id, new: &'t T },
    Update { id: Id, old: &'t T, new: &'t T },
    Remove { id: Id, old: &'t T },
}

impl<T> Event<'_, T> {
    /// Identifier of the item the event concerns.
    #[must_use]
    pub const fn id(&self) -> Id {
        match self {
            Self::Add { id, .. } | Self::Update { id, .. } | Self::Remove { id, .. } => *id,
        }
    }
}

impl<T> Clone for Event<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Event<'_, T> {}

///
/// Token
///
/// Capability required by [`Index::apply`](crate::db::Index::apply).
/// Only the collection façade can mint one, so nothing outside this crate
/// can feed events into a live index tree and desynchronize it.
///

#[derive(Clone, Copy)]
pub struct Token {
    _priv: (),
}

pub(crate) const TOKEN: Token = Token { _priv: () };
