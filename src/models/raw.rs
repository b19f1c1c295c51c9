use std::collections::{BTreeMap, HashMap};

use crate::utils::constants::DAYS_PER_MONTH_LINE;

/// One decoded day slot from a daily-file line: value in the element's
/// archive units (tenths of a degree Celsius for temperatures) plus the
/// measurement, quality, and source flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayReading {
    pub value: i32,
    pub mflag: char,
    pub qflag: char,
    pub sflag: char,
}

impl Default for DayReading {
    fn default() -> Self {
        Self {
            value: crate::utils::constants::MISSING_SENTINEL,
            mflag: ' ',
            qflag: ' ',
            sflag: ' ',
        }
    }
}

/// The 31 day slots of one month line. Months shorter than 31 days carry
/// the sentinel in their trailing slots.
pub type MonthBlock = [DayReading; DAYS_PER_MONTH_LINE];

/// Decode result for one station's daily file: element -> year -> month
/// (1-12) -> day readings. Transient; consumed by the series builder.
#[derive(Debug, Clone, Default)]
pub struct RawStationRecord {
    pub id: String,
    /// Count of qualifying (requested-element) lines decoded into this record
    pub lines_read: usize,
    elements: HashMap<String, BTreeMap<i32, HashMap<u8, MonthBlock>>>,
}

impl RawStationRecord {
    pub fn new(id: String) -> Self {
        Self {
            id,
            lines_read: 0,
            elements: HashMap::new(),
        }
    }

    pub fn insert(&mut self, element: &str, year: i32, month: u8, block: MonthBlock) {
        self.elements
            .entry(element.to_string())
            .or_default()
            .entry(year)
            .or_default()
            .insert(month, block);
    }

    pub fn element(&self, element: &str) -> Option<&BTreeMap<i32, HashMap<u8, MonthBlock>>> {
        self.elements.get(element)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&String, &BTreeMap<i32, HashMap<u8, MonthBlock>>)> {
        self.elements.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.values().all(|years| years.is_empty())
    }
}
