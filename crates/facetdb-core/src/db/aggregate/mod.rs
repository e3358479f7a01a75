//! Aggregate indexes: constant-size derived scalars maintained in O(1)
//! per event, with no per-item bookkeeping (except the ordered multiset
//! behind `min`/`max`, which needs it to restore the next extremum on
//! removal).

mod count;
mod extrema;
mod fold;
mod mean;
mod stddev;
mod sum;

pub use count::{count, CountIndex, CountTemplate};
pub use extrema::{max, min, ExtremumReader, MaxIndex, MaxTemplate, MinIndex, MinTemplate};
pub use fold::{fold, FoldIndex, FoldTemplate};
pub use mean::{mean, MeanIndex, MeanTemplate};
pub use stddev::{stddev, StdDevIndex, StdDevTemplate};
pub use sum::{sum, SumIndex, SumTemplate};
