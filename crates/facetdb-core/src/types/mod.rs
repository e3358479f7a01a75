//! Scalar and collection types shared across the runtime.

mod id;

pub use id::{Id, IdSet};
