use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ghcnd_processor::models::{DayReading, MonthBlock, RawStationRecord};
use ghcnd_processor::processors::{to_fahrenheit, MeanImputer, SeriesBuilder};

// Create a synthetic decoded record for benchmarking
fn create_test_record(years: usize) -> RawStationRecord {
    let mut record = RawStationRecord::new("USW00094728".to_string());

    for year in 0..years {
        for month in 1..=12u8 {
            let mut block: MonthBlock = [DayReading::default(); 31];
            for (day, reading) in block.iter_mut().enumerate() {
                // Every fifth day missing, the rest plausible tenths-C
                reading.value = if day % 5 == 0 {
                    -9999
                } else {
                    100 + (day as i32) * 3 + (month as i32) * 10
                };
            }
            record.insert("TMAX", 1900 + year as i32, month, block);
        }
    }

    record
}

fn benchmark_series_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_builder_by_years");

    for &years in &[1, 10, 50, 150] {
        let record = create_test_record(years);
        group.bench_with_input(BenchmarkId::new("years", years), &record, |b, record| {
            b.iter(|| {
                let builder = SeriesBuilder::new();
                let series = builder.build(black_box(record));
                black_box(series.years("TMAX").len())
            })
        });
    }
    group.finish();
}

fn benchmark_unit_conversion(c: &mut Criterion) {
    let values: Vec<i32> = (-400..400).collect();

    c.bench_function("tenths_c_to_fahrenheit", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for &value in &values {
                sum += to_fahrenheit(black_box(value));
            }
            black_box(sum)
        })
    });
}

fn benchmark_imputation(c: &mut Criterion) {
    let template: Vec<f64> = (0..366)
        .map(|day| if day % 4 == 0 { f64::NAN } else { day as f64 })
        .collect();

    c.bench_function("mean_imputation_366", |b| {
        b.iter(|| {
            let mut row = template.clone();
            MeanImputer::impute(&mut row);
            black_box(row[0])
        })
    });
}

criterion_group!(
    benches,
    benchmark_series_builder,
    benchmark_unit_conversion,
    benchmark_imputation
);
criterion_main!(benches);
