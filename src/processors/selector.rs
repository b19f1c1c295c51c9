use crate::models::{StationCatalog, StationMetadata};
use tracing::trace;

/// Coverage requirements for batch selection. A plain value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub element: String,
    pub min_years: i32,
    pub must_include: Option<i32>,
}

impl SelectionCriteria {
    pub fn new(element: impl Into<String>, min_years: i32) -> Self {
        Self {
            element: element.into(),
            min_years,
            must_include: None,
        }
    }

    pub fn with_must_include(mut self, year: i32) -> Self {
        self.must_include = Some(year);
        self
    }
}

/// Filters catalog entries by element coverage, preserving the caller's
/// listing order (normally the data-directory file listing).
pub struct StationSelector;

impl StationSelector {
    /// A station qualifies when its inclusive active-year count reaches
    /// `min_years` and, if set, the range covers `must_include`. Stations
    /// lacking the element are excluded, not an error.
    pub fn select<'a, I, S>(
        catalog: &'a StationCatalog,
        station_ids: I,
        criteria: &SelectionCriteria,
    ) -> Vec<&'a StationMetadata>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = Vec::new();

        for id in station_ids {
            let id = id.as_ref();
            let Some(station) = catalog.get(id) else {
                trace!("station {id} not in catalog, skipping");
                continue;
            };
            let Some(range) = station.coverage(&criteria.element) else {
                continue;
            };

            let qualifies = range.n_years() >= criteria.min_years
                && criteria.must_include.map_or(true, |year| range.covers(year));
            if qualifies {
                selected.push(station);
            }
        }

        selected
    }

    /// Sort so the longest-covering stations come first.
    pub fn sort_longest_first(stations: &mut [&StationMetadata], element: &str) {
        stations.sort_by_key(|station| {
            station
                .coverage(element)
                .map(|range| -range.n_years())
                .unwrap_or(0)
        });
    }

    /// Sort so the shortest-covering stations come first.
    pub fn sort_shortest_first(stations: &mut [&StationMetadata], element: &str) {
        stations.sort_by_key(|station| {
            station
                .coverage(element)
                .map(|range| range.n_years())
                .unwrap_or(i32::MAX)
        });
    }
}
