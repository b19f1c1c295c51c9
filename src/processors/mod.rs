pub mod batch_processor;
pub mod imputer;
pub mod selector;
pub mod series_builder;

pub use batch_processor::{BatchContext, BatchOutcome, BatchProcessor, BatchSummary, StationResult};
pub use imputer::MeanImputer;
pub use selector::{SelectionCriteria, StationSelector};
pub use series_builder::{to_fahrenheit, SeriesBuilder};
