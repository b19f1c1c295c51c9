use crate::error::Result;
use crate::models::{StationCatalog, StationHistogram, YearRange};
use crate::readers::fixed_width::{col, ColumnSpec};
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, FIRST_ARCHIVE_YEAR, INVENTORY_PROGRESS_INTERVAL,
};
use chrono::Datelike;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const ID_COL: ColumnSpec = col(1, 11);
const ELEMENT_COL: ColumnSpec = col(32, 4);
const YEAR_BGN_COL: ColumnSpec = col(37, 4);
const YEAR_END_COL: ColumnSpec = col(42, 4);

/// Streams `ghcnd-inventory.txt`, recording per-element coverage into the
/// catalog for every line and accumulating the stations-per-year histogram
/// over the requested element set.
pub struct InventoryReader {
    requested: HashSet<String>,
    year_first: i32,
    year_last: i32,
}

impl InventoryReader {
    pub fn new<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requested: requested.into_iter().map(Into::into).collect(),
            year_first: FIRST_ARCHIVE_YEAR,
            year_last: chrono::Utc::now().year(),
        }
    }

    /// Override the initial histogram bounds. Bounds still grow outward when
    /// the inventory contains wider ranges.
    pub fn with_bounds(mut self, year_first: i32, year_last: i32) -> Self {
        self.year_first = year_first;
        self.year_last = year_last;
        self
    }

    /// Single pass over the inventory file. Every line, requested or not,
    /// contributes its `YearRange` to `catalog[id].elements[element]`; lines
    /// whose element is requested also count into the histogram, one count
    /// per line (a station carrying two requested elements over the same
    /// year contributes twice to it).
    pub fn read_inventory(
        &self,
        path: &Path,
        catalog: &mut StationCatalog,
    ) -> Result<StationHistogram> {
        debug!("reading inventory from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut histogram = StationHistogram::new(self.year_first, self.year_last);
        let mut n_lines = 0usize;
        let mut ghost_stations = 0usize;

        for line_result in reader.lines() {
            let line = line_result?;
            n_lines += 1;

            if line.trim().is_empty() {
                continue;
            }

            let id = ID_COL.field_str(&line, n_lines)?;
            let element = ELEMENT_COL.field_str(&line, n_lines)?;
            let year_bgn = YEAR_BGN_COL.field_i32(&line, n_lines)?;
            let year_end = YEAR_END_COL.field_i32(&line, n_lines)?;

            if self.requested.contains(element) {
                histogram.add_range(year_bgn, year_end);
            }

            // Each element gets its own active range on the station record.
            match catalog.get_mut(id) {
                Some(station) => {
                    station
                        .elements
                        .insert(element.to_string(), YearRange::new(year_bgn, year_end));
                }
                None => ghost_stations += 1,
            }

            if n_lines % INVENTORY_PROGRESS_INTERVAL == 0 {
                debug!("read {n_lines} inventory lines");
            }
        }

        if ghost_stations > 0 {
            warn!("{ghost_stations} inventory lines referenced stations absent from the catalog");
        }
        debug!(
            "inventory complete: {} lines, histogram spans {}-{}",
            n_lines,
            histogram.year_first(),
            histogram.year_last()
        );

        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationMetadata;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog_with(ids: &[&str]) -> StationCatalog {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    StationMetadata::new(id.to_string(), 0.0, 0.0, 0.0),
                )
            })
            .collect()
    }

    fn write_inventory(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{line}").unwrap();
        }
        temp_file
    }

    // Layout: id 1-11, lat/lng (unused here), element 32-35, years 37-40 and 42-45
    const TMAX_LINE: &str = "USW00094728  40.7789  -73.9692 TMAX 1869 2020";
    const PRCP_LINE: &str = "USW00094728  40.7789  -73.9692 PRCP 1876 2020";

    #[test]
    fn test_bounds_unchanged_for_interior_range() -> Result<()> {
        let temp_file = write_inventory(&[TMAX_LINE]);
        let mut catalog = catalog_with(&["USW00094728"]);

        let reader = InventoryReader::new(["TMAX"]).with_bounds(1763, 2025);
        let histogram = reader.read_inventory(temp_file.path(), &mut catalog)?;

        assert_eq!(histogram.year_first(), 1763);
        assert_eq!(histogram.year_last(), 2025);
        assert_eq!(histogram.count(1868), Some(0));
        assert_eq!(histogram.count(1869), Some(1));
        assert_eq!(histogram.count(2020), Some(1));
        assert_eq!(histogram.count(2021), Some(0));

        Ok(())
    }

    #[test]
    fn test_coverage_recorded_for_unrequested_elements() -> Result<()> {
        let temp_file = write_inventory(&[TMAX_LINE, PRCP_LINE]);
        let mut catalog = catalog_with(&["USW00094728"]);

        let reader = InventoryReader::new(["TMAX"]).with_bounds(1763, 2025);
        let histogram = reader.read_inventory(temp_file.path(), &mut catalog)?;

        // PRCP is not requested, so it never reaches the histogram ...
        assert_eq!(histogram.count(1870), Some(1));

        // ... but its coverage still lands on the station record.
        let station = &catalog["USW00094728"];
        assert_eq!(station.coverage("TMAX"), Some(YearRange::new(1869, 2020)));
        assert_eq!(station.coverage("PRCP"), Some(YearRange::new(1876, 2020)));

        Ok(())
    }

    #[test]
    fn test_histogram_grows_outward() -> Result<()> {
        let temp_file = write_inventory(&[TMAX_LINE]);
        let mut catalog = catalog_with(&["USW00094728"]);

        let reader = InventoryReader::new(["TMAX"]).with_bounds(1900, 1950);
        let histogram = reader.read_inventory(temp_file.path(), &mut catalog)?;

        assert_eq!(histogram.year_first(), 1869);
        assert_eq!(histogram.year_last(), 2020);
        assert_eq!(histogram.len(), (2020 - 1869 + 1) as usize);

        Ok(())
    }

    #[test]
    fn test_two_requested_elements_count_independently() -> Result<()> {
        let temp_file = write_inventory(&[TMAX_LINE, PRCP_LINE]);
        let mut catalog = catalog_with(&["USW00094728"]);

        let reader = InventoryReader::new(["TMAX", "PRCP"]).with_bounds(1763, 2025);
        let histogram = reader.read_inventory(temp_file.path(), &mut catalog)?;

        // One station, two qualifying lines: overlapping years count twice.
        assert_eq!(histogram.count(1900), Some(2));
        assert_eq!(histogram.count(1870), Some(1));

        Ok(())
    }

    #[test]
    fn test_unknown_station_is_skipped() -> Result<()> {
        let temp_file = write_inventory(&[TMAX_LINE]);
        let mut catalog = catalog_with(&["ASN00008255"]);

        let reader = InventoryReader::new(["TMAX"]).with_bounds(1763, 2025);
        let histogram = reader.read_inventory(temp_file.path(), &mut catalog)?;

        // The line still counts toward the histogram.
        assert_eq!(histogram.count(1900), Some(1));
        assert!(catalog["ASN00008255"].elements.is_empty());

        Ok(())
    }
}
