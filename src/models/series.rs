use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Outcome of rejecting a station before its file is fully read: the
/// station's first-seen element coverage, with no data attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionDescriptor {
    pub id: String,
    pub year_bgn: i32,
    pub year_end: i32,
}

/// Normalized per-station output: for each element, a map from year to a
/// 366-slot row of Fahrenheit values. `NAN` marks unknown days until the
/// imputation pass fills them.
#[derive(Debug, Clone, Default)]
pub struct StationSeries {
    pub id: String,
    elements: HashMap<String, BTreeMap<i32, Vec<f64>>>,
}

impl StationSeries {
    pub fn new(id: String) -> Self {
        Self {
            id,
            elements: HashMap::new(),
        }
    }

    pub fn insert_row(&mut self, element: &str, year: i32, row: Vec<f64>) {
        self.elements
            .entry(element.to_string())
            .or_default()
            .insert(year, row);
    }

    /// Per-year row table for one element, ordered by year. This is the
    /// shape the curve-fitting collaborator consumes.
    pub fn rows(&self, element: &str) -> Option<&BTreeMap<i32, Vec<f64>>> {
        self.elements.get(element)
    }

    pub fn rows_mut(&mut self, element: &str) -> Option<&mut BTreeMap<i32, Vec<f64>>> {
        self.elements.get_mut(element)
    }

    pub fn years(&self, element: &str) -> Vec<i32> {
        self.elements
            .get(element)
            .map(|rows| rows.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn elements(&self) -> impl Iterator<Item = &String> {
        self.elements.keys()
    }

    pub fn elements_mut(
        &mut self,
    ) -> impl Iterator<Item = (&String, &mut BTreeMap<i32, Vec<f64>>)> {
        self.elements.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.values().all(|rows| rows.is_empty())
    }
}
