pub mod histogram;
pub mod raw;
pub mod series;
pub mod station;

pub use histogram::{HistogramSummary, StationHistogram};
pub use raw::{DayReading, MonthBlock, RawStationRecord};
pub use series::{RejectionDescriptor, StationSeries};
pub use station::{StationCatalog, StationMetadata, YearRange};
