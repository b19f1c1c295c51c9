use crate::error::Result;
use crate::models::{StationCatalog, StationMetadata};
use crate::readers::fixed_width::{col, ColumnSpec};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, STATION_PROGRESS_INTERVAL};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const ID_COL: ColumnSpec = col(1, 11);
const LAT_COL: ColumnSpec = col(13, 8);
const LNG_COL: ColumnSpec = col(22, 9);
const ELEV_COL: ColumnSpec = col(32, 6);

/// What to do with a line that fails fixed-width decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePolicy {
    /// Surface the error to the caller. Catalog loading defaults to this:
    /// a broken catalog invalidates everything downstream.
    #[default]
    Propagate,
    /// Log the line and continue.
    Skip,
}

pub struct StationReader {
    line_policy: LinePolicy,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            line_policy: LinePolicy::Propagate,
        }
    }

    pub fn with_line_policy(line_policy: LinePolicy) -> Self {
        Self { line_policy }
    }

    /// Read the station catalog from `ghcnd-stations.txt`, one fixed-width
    /// line per station. Element coverage starts empty and is filled in by
    /// the inventory pass.
    pub fn read_catalog(&self, path: &Path) -> Result<StationCatalog> {
        debug!("reading station catalog from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut catalog = StationCatalog::new();
        let mut n_lines = 0usize;

        for line_result in reader.lines() {
            let line = line_result?;
            n_lines += 1;

            if line.trim().is_empty() {
                continue;
            }

            match self.parse_station_line(&line, n_lines) {
                Ok(station) => {
                    catalog.insert(station.id.clone(), station);
                }
                Err(err) => match self.line_policy {
                    LinePolicy::Propagate => return Err(err),
                    LinePolicy::Skip => warn!("skipping station line {n_lines}: {err}"),
                },
            }

            if n_lines % STATION_PROGRESS_INTERVAL == 0 {
                debug!("read {n_lines} station lines");
            }
        }

        debug!("station catalog complete: {} stations", catalog.len());
        Ok(catalog)
    }

    fn parse_station_line(&self, line: &str, line_no: usize) -> Result<StationMetadata> {
        let id = ID_COL.field_str(line, line_no)?.to_string();
        let lat = LAT_COL.field_f64(line, line_no)?;
        let lng = LNG_COL.field_f64(line, line_no)?;
        let elevation = ELEV_COL.field_f64(line, line_no)?;

        Ok(StationMetadata::new(id, lat, lng, elevation))
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
