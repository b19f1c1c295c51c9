use crate::models::StationSeries;
use crate::processors::series_builder::round2;

/// Fills residual gaps in a finished year row with the row's own mean.
///
/// The mean is taken over the non-NaN entries and rounded to two decimals;
/// a row with no valid entries fills with 0.0. Idempotent: an imputed row
/// has no NaN left, so a second pass changes nothing.
pub struct MeanImputer;

impl MeanImputer {
    pub fn impute(row: &mut [f64]) {
        let mut sum = 0.0;
        let mut n = 0usize;
        for &value in row.iter() {
            if !value.is_nan() {
                sum += value;
                n += 1;
            }
        }

        let mean = if n == 0 { 0.0 } else { round2(sum / n as f64) };

        for value in row.iter_mut() {
            if value.is_nan() {
                *value = mean;
            }
        }
    }

    /// Impute every year row of every element in place.
    pub fn impute_series(series: &mut StationSeries) {
        for (_, rows) in series.elements_mut() {
            for row in rows.values_mut() {
                Self::impute(row);
            }
        }
    }
}
