//! Product composition: tuples of indexes (and of templates) are
//! themselves indexes (and templates). Every event is broadcast to each
//! position in declaration order; the reader is the tuple of position
//! readers. Positions are independent: no position's state ever depends
//! on another's.

use crate::db::{
    event::{Event, Token},
    index::Index,
    template::Template,
    view::StoreView,
};

/// Spell a tuple of index templates as `zip!(a, b, …)`.
///
/// Purely notational: `zip!(a, b)` is `(a, b)`, which already implements
/// [`Template`] for arities 2 through 8.
#[macro_export]
macro_rules! zip {
    ($( $tpl:expr ),+ $(,)?) => {
        ( $( $tpl, )+ )
    };
}

macro_rules! impl_zip {
    ($( $ix:ident . $pos:tt ),+) => {
        impl<T, $( $ix, )+> Index<T> for ( $( $ix, )+ )
        where
            $( $ix: Index<T>, )+
        {
            type Reader<'t, V>
                = ( $( <$ix as Index<T>>::Reader<'t, V>, )+ )
            where
                Self: 't,
                V: 't;

            #[inline]
            fn apply(&mut self, token: Token, event: Event<'_, T>) {
                $( self.$pos.apply(token, event); )+
            }

            fn reader<'t, V: 't>(&'t self, view: StoreView<'t, V>) -> Self::Reader<'t, V> {
                ( $( self.$pos.reader(view), )+ )
            }
        }

        impl<T, $( $ix, )+> Template<T> for ( $( $ix, )+ )
        where
            $( $ix: Template<T>, )+
        {
            type Index = ( $( <$ix as Template<T>>::Index, )+ );

            fn build(&self) -> Self::Index {
                ( $( self.$pos.build(), )+ )
            }
        }
    };
}

impl_zip!(I0.0, I1.1);
impl_zip!(I0.0, I1.1, I2.2);
impl_zip!(I0.0, I1.1, I2.2, I3.3);
impl_zip!(I0.0, I1.1, I2.2, I3.3, I4.4);
impl_zip!(I0.0, I1.1, I2.2, I3.3, I4.4, I5.5);
impl_zip!(I0.0, I1.1, I2.2, I3.3, I4.4, I5.5, I6.6);
impl_zip!(I0.0, I1.1, I2.2, I3.3, I4.4, I5.5, I6.6, I7.7);

///
/// TESTS
///
