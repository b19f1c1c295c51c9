pub mod daily_reader;
pub mod fixed_width;
pub mod inventory_reader;
pub mod station_reader;

pub use daily_reader::{DailyReader, ParseOutcome};
pub use fixed_width::{col, ColumnSpec};
pub use inventory_reader::InventoryReader;
pub use station_reader::{LinePolicy, StationReader};
