use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Inclusive range of years during which a station recorded an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub year_bgn: i32,
    pub year_end: i32,
}

impl YearRange {
    pub fn new(year_bgn: i32, year_end: i32) -> Self {
        Self { year_bgn, year_end }
    }

    /// Raw span, end minus begin. The coverage checks in file parsing use
    /// this form; selection uses the inclusive count from `n_years()`.
    pub fn span(&self) -> i32 {
        self.year_end - self.year_bgn
    }

    /// Inclusive number of active years.
    pub fn n_years(&self) -> i32 {
        self.year_end - self.year_bgn + 1
    }

    pub fn covers(&self, year: i32) -> bool {
        self.year_bgn <= year && year <= self.year_end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationMetadata {
    /// 11-character station code, e.g. "USW00094728"
    pub id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    pub elevation: f64,

    /// Per-element active-year ranges, populated from the inventory file
    pub elements: HashMap<String, YearRange>,
}

impl StationMetadata {
    pub fn new(id: String, lat: f64, lng: f64, elevation: f64) -> Self {
        Self {
            id,
            lat,
            lng,
            elevation,
            elements: HashMap::new(),
        }
    }

    pub fn coverage(&self, element: &str) -> Option<YearRange> {
        self.elements.get(element).copied()
    }
}

/// Catalog of all stations keyed by id. Built once by the station reader,
/// element coverage filled in by the inventory pass, read-only afterwards.
pub type StationCatalog = HashMap<String, StationMetadata>;
