pub mod constants;
pub mod geo;
pub mod progress;

pub use constants::*;
pub use geo::{bucket_id, latlng_index, LatLngIndex, StationLocations};
pub use progress::ProgressReporter;
