//! The runtime engine: store, update events, index protocol, and the
//! collection façade that wires them together.

pub mod aggregate;
pub mod collection;
pub mod event;
pub mod index;
pub mod store;
pub mod template;
pub mod view;

pub use collection::Collection;
pub use event::{Event, Token};
pub use index::Index;
pub use store::Store;
pub use template::Template;
pub use view::{Entry, StoreView};
