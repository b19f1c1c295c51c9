use serde::Serialize;

/// Per-year count of stations actively recording the requested elements.
///
/// Bounds grow outward as inventory entries with wider ranges are observed;
/// they never shrink, and `counts` always spans
/// `[year_first, year_last]` inclusive.
#[derive(Debug, Clone)]
pub struct StationHistogram {
    year_first: i32,
    year_last: i32,
    counts: Vec<u64>,
    year_added: Vec<bool>,
}

/// Snapshot handed to downstream consumers (plotting, reporting).
#[derive(Debug, Clone, Serialize)]
pub struct HistogramSummary {
    pub first_year: i32,
    pub last_year: i32,
    pub counts: Vec<u64>,
}

impl StationHistogram {
    pub fn new(year_first: i32, year_last: i32) -> Self {
        let len = (year_last - year_first + 1) as usize;
        Self {
            year_first,
            year_last,
            counts: vec![0; len],
            year_added: vec![false; len],
        }
    }

    pub fn year_first(&self) -> i32 {
        self.year_first
    }

    pub fn year_last(&self) -> i32 {
        self.year_last
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, year: i32) -> Option<u64> {
        if year < self.year_first || year > self.year_last {
            return None;
        }
        Some(self.counts[(year - self.year_first) as usize])
    }

    /// Widen the tracked bounds to include `[year_bgn, year_end]`, inserting
    /// zero-filled entries at the extended end. Existing counts keep their
    /// year offsets.
    pub fn grow_to(&mut self, year_bgn: i32, year_end: i32) {
        if year_bgn < self.year_first {
            let extra = (self.year_first - year_bgn) as usize;
            let mut counts = vec![0; extra];
            counts.append(&mut self.counts);
            self.counts = counts;

            let mut added = vec![false; extra];
            added.append(&mut self.year_added);
            self.year_added = added;

            self.year_first = year_bgn;
        }
        if year_end > self.year_last {
            let extra = (year_end - self.year_last) as usize;
            self.counts.extend(std::iter::repeat(0).take(extra));
            self.year_added.extend(std::iter::repeat(false).take(extra));
            self.year_last = year_end;
        }
    }

    /// Add one station-count for every year in `[year_bgn, year_end]`,
    /// widening the bounds first if needed. Each call counts independently:
    /// a station reported under two elements contributes twice.
    pub fn add_range(&mut self, year_bgn: i32, year_end: i32) {
        self.grow_to(year_bgn, year_end);
        let lo = (year_bgn - self.year_first) as usize;
        let hi = (year_end - self.year_first) as usize;
        for count in &mut self.counts[lo..=hi] {
            *count += 1;
        }
    }

    /// Zero all counts, keeping the bounds.
    pub fn reset_counts(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    /// Start an incremental single-station pass. Clears the per-year guard
    /// so the next `record_year` calls count each year at most once.
    pub fn begin_station(&mut self) {
        self.year_added.iter_mut().for_each(|a| *a = false);
    }

    /// Count `year` for the station opened by `begin_station`. Repeat calls
    /// for the same year within one pass are ignored, as are years outside
    /// the current bounds.
    pub fn record_year(&mut self, year: i32) {
        if year < self.year_first || year > self.year_last {
            return;
        }
        let i = (year - self.year_first) as usize;
        if !self.year_added[i] {
            self.counts[i] += 1;
            self.year_added[i] = true;
        }
    }

    pub fn summary(&self) -> HistogramSummary {
        HistogramSummary {
            first_year: self.year_first,
            last_year: self.year_last,
            counts: self.counts.clone(),
        }
    }
}
