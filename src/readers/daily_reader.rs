use crate::error::Result;
use crate::models::{DayReading, MonthBlock, RawStationRecord, RejectionDescriptor, StationCatalog};
use crate::readers::fixed_width::{col, ColumnSpec};
use crate::utils::constants::{DAYS_PER_MONTH_LINE, DEFAULT_BUFFER_SIZE, DEFAULT_MIN_YEARS};
use memmap2::Mmap;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

const ID_COL: ColumnSpec = col(1, 11);
const YEAR_COL: ColumnSpec = col(12, 4);
const MONTH_COL: ColumnSpec = col(16, 2);
const ELEMENT_COL: ColumnSpec = col(18, 4);

/// Offset of the first day group and width of each group. A line carries 31
/// groups of value (5) + mflag (1) + qflag (1) + sflag (1).
const FIRST_GROUP_COL: usize = 22;
const GROUP_WIDTH: usize = 8;

/// Result of reading one station's daily file: either the decoded record or
/// an early rejection. Rejection is an ordinary outcome, not an error.
#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(RawStationRecord),
    Rejected(RejectionDescriptor),
}

/// Streaming parser for one station's `.dly` file.
pub struct DailyReader {
    requested: HashSet<String>,
    min_years: i32,
    early_rejection: bool,
    use_mmap: bool,
}

impl DailyReader {
    pub fn new<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requested: requested.into_iter().map(Into::into).collect(),
            min_years: DEFAULT_MIN_YEARS,
            early_rejection: true,
            use_mmap: false,
        }
    }

    pub fn with_min_years(mut self, min_years: i32) -> Self {
        self.min_years = min_years;
        self
    }

    /// The rejection check trusts the first line's element to represent the
    /// station's coverage. Stations recording several elements with unequal
    /// spans can be misclassified; disable to parse such files fully.
    pub fn with_early_rejection(mut self, early_rejection: bool) -> Self {
        self.early_rejection = early_rejection;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Single sequential pass over the file. The catalog is consulted only
    /// for the first-line coverage check and must already carry inventory
    /// coverage when early rejection is enabled.
    pub fn parse_file(&self, path: &Path, catalog: &StationCatalog) -> Result<ParseOutcome> {
        trace!("parsing {}", path.display());
        if self.use_mmap {
            self.parse_mmap(path, catalog)
        } else {
            self.parse_buffered(path, catalog)
        }
    }

    fn parse_buffered(&self, path: &Path, catalog: &StationCatalog) -> Result<ParseOutcome> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut state = ParseState::new();

        for line_result in reader.lines() {
            let line = line_result?;
            if let Some(rejection) = self.process_line(&line, &mut state, catalog)? {
                return Ok(ParseOutcome::Rejected(rejection));
            }
        }

        Ok(ParseOutcome::Parsed(state.into_record()))
    }

    fn parse_mmap(&self, path: &Path, catalog: &StationCatalog) -> Result<ParseOutcome> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap).map_err(|e| {
            crate::error::GhcndError::InvalidFormat(format!("invalid UTF-8: {e}"))
        })?;

        let mut state = ParseState::new();
        for line in content.lines() {
            if let Some(rejection) = self.process_line(line, &mut state, catalog)? {
                return Ok(ParseOutcome::Rejected(rejection));
            }
        }

        Ok(ParseOutcome::Parsed(state.into_record()))
    }

    /// Handle one line. Returns a descriptor when the station is rejected on
    /// its first line.
    fn process_line(
        &self,
        line: &str,
        state: &mut ParseState,
        catalog: &StationCatalog,
    ) -> Result<Option<RejectionDescriptor>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        state.line_no += 1;
        let element = ELEMENT_COL.field_str(line, state.line_no)?;

        if state.line_no == 1 {
            state.id = ID_COL.field_str(line, state.line_no)?.to_string();

            if self.early_rejection {
                let coverage = catalog
                    .get(&state.id)
                    .and_then(|station| station.coverage(element));
                // Unknown coverage never rejects.
                if let Some(range) = coverage {
                    if range.span() < self.min_years {
                        return Ok(Some(RejectionDescriptor {
                            id: state.id.clone(),
                            year_bgn: range.year_bgn,
                            year_end: range.year_end,
                        }));
                    }
                }
            }
        }

        if !self.requested.contains(element) {
            return Ok(None);
        }
        state.lines_read += 1;

        let year = YEAR_COL.field_i32(line, state.line_no)?;
        let month = MONTH_COL.field_i32(line, state.line_no)? as u8;
        let block = self.decode_day_groups(line, state.line_no)?;
        state.record.insert(element, year, month, block);

        Ok(None)
    }

    fn decode_day_groups(&self, line: &str, line_no: usize) -> Result<MonthBlock> {
        let mut block: MonthBlock = [DayReading::default(); DAYS_PER_MONTH_LINE];
        for (day, reading) in block.iter_mut().enumerate() {
            let base = FIRST_GROUP_COL + day * GROUP_WIDTH;
            reading.value = col(base, 5).field_i32(line, line_no)?;
            reading.mflag = col(base + 5, 1).field_char(line, line_no)?;
            reading.qflag = col(base + 6, 1).field_char(line, line_no)?;
            reading.sflag = col(base + 7, 1).field_char(line, line_no)?;
        }
        Ok(block)
    }
}

struct ParseState {
    id: String,
    line_no: usize,
    lines_read: usize,
    record: RawStationRecord,
}

impl ParseState {
    fn new() -> Self {
        Self {
            id: String::new(),
            line_no: 0,
            lines_read: 0,
            record: RawStationRecord::default(),
        }
    }

    fn into_record(self) -> RawStationRecord {
        let mut record = self.record;
        record.id = self.id;
        record.lines_read = self.lines_read;
        record
    }
}
