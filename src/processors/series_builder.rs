use crate::models::{RawStationRecord, StationSeries};
use crate::utils::constants::{DAYS_PER_YEAR, MISSING_SENTINEL, MONTH_DAYS};

/// Convert a raw archive value in tenths of a degree Celsius to Fahrenheit,
/// rounded to two decimals.
pub fn to_fahrenheit(value: i32) -> f64 {
    round2(value as f64 * 0.18 + 32.0)
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Turns a decoded daily record into normalized 366-slot year rows.
///
/// Every year row follows the fixed layout of `MONTH_DAYS` (February held at
/// 29) so a day-of-year ordinal means the same calendar day in every row.
pub struct SeriesBuilder {
    pad_with_nan: bool,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self { pad_with_nan: false }
    }

    /// Pad any shortfall below 366 slots with `NAN` instead of the archive
    /// sentinel. Default off: the sentinel tail matches the established
    /// output contract.
    pub fn pad_with_nan(mut self, pad_with_nan: bool) -> Self {
        self.pad_with_nan = pad_with_nan;
        self
    }

    pub fn build(&self, record: &RawStationRecord) -> StationSeries {
        let mut series = StationSeries::new(record.id.clone());

        for (element, years) in record.elements() {
            for (&year, months) in years {
                let mut row = Vec::with_capacity(DAYS_PER_YEAR);

                for (month_index, &n_days) in MONTH_DAYS.iter().enumerate() {
                    let month = (month_index + 1) as u8;
                    match months.get(&month) {
                        Some(block) => {
                            for reading in block.iter().take(n_days) {
                                if reading.value == MISSING_SENTINEL {
                                    row.push(f64::NAN);
                                } else {
                                    row.push(to_fahrenheit(reading.value));
                                }
                            }
                        }
                        None => row.extend(std::iter::repeat(f64::NAN).take(n_days)),
                    }
                }

                self.pad_tail(&mut row);
                series.insert_row(element, year, row);
            }
        }

        series
    }

    /// Guard the 366-slot length. MONTH_DAYS sums to 366, so this only
    /// fires if the month table ever shrinks; the fill is the raw archive
    /// sentinel, not NaN, unless `pad_with_nan` is set.
    fn pad_tail(&self, row: &mut Vec<f64>) {
        while row.len() < DAYS_PER_YEAR {
            row.push(if self.pad_with_nan {
                f64::NAN
            } else {
                MISSING_SENTINEL as f64
            });
        }
    }
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayReading, MonthBlock, RawStationRecord};
    use crate::utils::constants::DAYS_PER_MONTH_LINE;

    fn month_block(values: &[i32]) -> MonthBlock {
        let mut block: MonthBlock = [DayReading::default(); DAYS_PER_MONTH_LINE];
        for (day, &value) in values.iter().enumerate() {
            block[day].value = value;
        }
        block
    }

    fn record_with_january(values: &[i32]) -> RawStationRecord {
        let mut record = RawStationRecord::new("USW00094728".to_string());
        record.insert("TMAX", 1950, 1, month_block(values));
        record
    }

    #[test]
    fn test_sentinel_becomes_nan_and_values_convert() {
        let record = record_with_january(&[-9999, 150]);
        let series = SeriesBuilder::new().build(&record);

        let row = &series.rows("TMAX").unwrap()[&1950];
        assert_eq!(row.len(), DAYS_PER_YEAR);
        assert!(row[0].is_nan());
        assert_eq!(row[1], 59.0);
    }

    #[test]
    fn test_conversion_rounds_to_two_decimals() {
        // 123 tenths-C: 123 * 0.18 + 32 = 54.14
        let record = record_with_january(&[123]);
        let series = SeriesBuilder::new().build(&record);

        let row = &series.rows("TMAX").unwrap()[&1950];
        assert_eq!(row[0], 54.14);
    }

    #[test]
    fn test_missing_month_fills_nan() {
        // Only January present: March (days 60..91 in the fixed layout)
        // must be all NaN.
        let record = record_with_january(&[150; 31]);
        let series = SeriesBuilder::new().build(&record);

        let row = &series.rows("TMAX").unwrap()[&1950];
        let march_start = 31 + 29;
        for day in march_start..march_start + 31 {
            assert!(row[day].is_nan(), "day {day} should be NaN");
        }
    }

    #[test]
    fn test_row_is_always_366() {
        let mut record = RawStationRecord::new("USW00094728".to_string());
        for month in 1..=12u8 {
            record.insert("TMAX", 1950, month, month_block(&[100; 31]));
        }
        record.insert("TMAX", 1951, 6, month_block(&[200]));
        let series = SeriesBuilder::new().build(&record);

        for year in [1950, 1951] {
            assert_eq!(series.rows("TMAX").unwrap()[&year].len(), DAYS_PER_YEAR);
        }
    }

    #[test]
    fn test_tail_pad_uses_sentinel_by_default() {
        let mut row = vec![59.0; 360];
        SeriesBuilder::new().pad_tail(&mut row);

        assert_eq!(row.len(), DAYS_PER_YEAR);
        assert!(row[360..].iter().all(|&v| v == MISSING_SENTINEL as f64));
    }

    #[test]
    fn test_tail_pad_nan_variant() {
        let mut row = vec![59.0; 360];
        SeriesBuilder::new().pad_with_nan(true).pad_tail(&mut row);

        assert_eq!(row.len(), DAYS_PER_YEAR);
        assert!(row[360..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_full_build_never_pads() {
        // Every month decoded: the fixed layout fills all 366 slots and no
        // sentinel survives into the row.
        let mut record = RawStationRecord::new("USW00094728".to_string());
        for month in 1..=12u8 {
            record.insert("TMAX", 1950, month, month_block(&[100; 31]));
        }
        let series = SeriesBuilder::new().build(&record);

        let row = &series.rows("TMAX").unwrap()[&1950];
        assert!(row.iter().all(|&v| v != MISSING_SENTINEL as f64));
    }

    #[test]
    fn test_february_day_29_is_kept_every_year() {
        // Non-leap 1950: the fixed layout still reserves a Feb 29 slot.
        let mut record = RawStationRecord::new("USW00094728".to_string());
        record.insert("TMAX", 1950, 2, month_block(&[100; 29]));
        let series = SeriesBuilder::new().build(&record);

        let row = &series.rows("TMAX").unwrap()[&1950];
        let feb_29 = 31 + 28;
        assert_eq!(row[feb_29], to_fahrenheit(100));
    }
}
