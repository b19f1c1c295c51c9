/// Catalog file names as distributed in the archive's docs folder
pub const STATIONS_FILE: &str = "ghcnd-stations.txt";
pub const INVENTORY_FILE: &str = "ghcnd-inventory.txt";

/// Extension of per-station data files in the ghcnd_all folder
pub const DAILY_FILE_EXT: &str = "dly";

/// Archive convention for a missing or invalid daily value
pub const MISSING_SENTINEL: i32 = -9999;

/// Slots per year row. February is held at 29 days for every year so that
/// a given day-of-year ordinal lands on the same calendar day in every row.
pub const DAYS_PER_YEAR: usize = 366;

/// Days recorded per month line in a daily file
pub const DAYS_PER_MONTH_LINE: usize = 31;

/// Month lengths for the fixed 366-slot layout, January first
pub const MONTH_DAYS: [usize; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Earliest observation year in the archive; default lower histogram bound
pub const FIRST_ARCHIVE_YEAR: i32 = 1763;

/// Element codes commonly requested from the archive
pub const ELEMENT_TMAX: &str = "TMAX";
pub const ELEMENT_TMIN: &str = "TMIN";
pub const ELEMENT_PRCP: &str = "PRCP";
pub const ELEMENT_SNOW: &str = "SNOW";
pub const ELEMENT_SNWD: &str = "SNWD";

/// Processing defaults
pub const DEFAULT_MIN_YEARS: i32 = 50;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Progress reporting cadence (line counts)
pub const STATION_PROGRESS_INTERVAL: usize = 1000;
pub const INVENTORY_PROGRESS_INTERVAL: usize = 10000;
