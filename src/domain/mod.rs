// Domain types and value objects
mod granularity;
mod rows;
mod series;
mod window;

pub use granularity::{Granularity, WeekNumbering};
pub use rows::{AlignedCell, AlignedRow, NormalizedRow, TrackedRow};
pub use series::{CorrelationPoint, Series, SeriesError, TimePoint};
pub use window::{Window, WindowError, ZoomDirection};
