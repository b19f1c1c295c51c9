use crate::error::{GhcndError, Result};
use crate::models::{RejectionDescriptor, StationCatalog, StationHistogram, StationSeries};
use crate::processors::imputer::MeanImputer;
use crate::processors::selector::{SelectionCriteria, StationSelector};
use crate::processors::series_builder::SeriesBuilder;
use crate::readers::{DailyReader, InventoryReader, ParseOutcome, StationReader};
use crate::utils::constants::{DAILY_FILE_EXT, INVENTORY_FILE, STATIONS_FILE};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Catalog and histogram from the serial startup phase. Read-only once
/// built, so workers share it without locking.
pub struct BatchContext {
    pub catalog: StationCatalog,
    pub histogram: StationHistogram,
}

/// Finished output for one station.
#[derive(Debug)]
pub struct StationResult {
    pub id: String,
    pub series: StationSeries,
    pub lines_read: usize,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub n_selected: usize,
    pub processed: usize,
    pub rejected: usize,
    pub failed: usize,
    pub lines_read: usize,
    pub elapsed: Duration,
}

pub struct BatchOutcome {
    pub results: Vec<StationResult>,
    pub rejections: Vec<RejectionDescriptor>,
    pub summary: BatchSummary,
}

enum StationOutcome {
    Done(StationResult),
    Rejected(RejectionDescriptor),
    Failed,
}

/// Drives the full pipeline: serial catalog + inventory phase, then a
/// rayon worker pool running parse -> build -> impute per selected station.
/// Per-station failures are isolated; the batch always runs to completion.
pub struct BatchProcessor {
    elements: Vec<String>,
    min_years: i32,
    must_include: Option<i32>,
    max_workers: usize,
    early_rejection: bool,
    use_mmap: bool,
    pad_with_nan: bool,
}

impl BatchProcessor {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            min_years: crate::utils::constants::DEFAULT_MIN_YEARS,
            must_include: None,
            max_workers: num_cpus::get(),
            early_rejection: true,
            use_mmap: false,
            pad_with_nan: false,
        }
    }

    pub fn with_min_years(mut self, min_years: i32) -> Self {
        self.min_years = min_years;
        self
    }

    pub fn with_must_include(mut self, must_include: Option<i32>) -> Self {
        self.must_include = must_include;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_early_rejection(mut self, early_rejection: bool) -> Self {
        self.early_rejection = early_rejection;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn with_pad_with_nan(mut self, pad_with_nan: bool) -> Self {
        self.pad_with_nan = pad_with_nan;
        self
    }

    /// Serial phase: load the station catalog, then stream the inventory to
    /// fill coverage and build the histogram. Must complete before any
    /// daily file is parsed; failures here are fatal.
    pub fn load_context(&self, docs_dir: &Path) -> Result<BatchContext> {
        let stations_path = docs_dir.join(STATIONS_FILE);
        let inventory_path = docs_dir.join(INVENTORY_FILE);

        let reader = StationReader::new();
        let mut catalog = reader.read_catalog(&stations_path)?;

        let inventory = InventoryReader::new(self.elements.iter().cloned());
        let histogram = inventory.read_inventory(&inventory_path, &mut catalog)?;

        info!(
            "loaded {} stations, histogram {}-{}",
            catalog.len(),
            histogram.year_first(),
            histogram.year_last()
        );

        Ok(BatchContext { catalog, histogram })
    }

    /// List the per-station daily files, sorted for a stable listing order.
    pub fn list_station_files(&self, data_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(data_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map_or(false, |ext| ext == DAILY_FILE_EXT)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Parallel phase over the selected stations. The catalog is shared
    /// read-only; each worker owns its outputs and a single reducer folds
    /// them into the outcome.
    pub fn process(
        &self,
        data_dir: &Path,
        context: &BatchContext,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchOutcome> {
        let started = Instant::now();

        let files = self.list_station_files(data_dir)?;
        let ids: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
            .map(str::to_string)
            .collect();

        let element = self.elements.first().ok_or_else(|| {
            GhcndError::Config("at least one element must be requested".to_string())
        })?;
        let mut criteria = SelectionCriteria::new(element.clone(), self.min_years);
        criteria.must_include = self.must_include;

        let selected = StationSelector::select(&context.catalog, ids.iter(), &criteria);
        let n_selected = selected.len();
        info!("{n_selected} of {} stations selected", ids.len());

        if let Some(p) = progress {
            p.set_message(&format!("Processing {n_selected} stations..."));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| GhcndError::Config(e.to_string()))?;

        let processed_count = Arc::new(AtomicUsize::new(0));
        let outcomes: Vec<StationOutcome> = pool.install(|| {
            selected
                .par_iter()
                .map(|station| {
                    let path = data_dir.join(format!("{}.{}", station.id, DAILY_FILE_EXT));
                    let outcome = self.process_single_station(&path, &context.catalog);

                    let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    outcome
                })
                .collect()
        });

        let mut results = Vec::new();
        let mut rejections = Vec::new();
        let mut summary = BatchSummary {
            n_selected,
            ..BatchSummary::default()
        };
        for outcome in outcomes {
            match outcome {
                StationOutcome::Done(result) => {
                    summary.processed += 1;
                    summary.lines_read += result.lines_read;
                    results.push(result);
                }
                StationOutcome::Rejected(descriptor) => {
                    summary.rejected += 1;
                    rejections.push(descriptor);
                }
                StationOutcome::Failed => summary.failed += 1,
            }
        }
        summary.elapsed = started.elapsed();

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Processed {} stations ({} rejected, {} failed)",
                summary.processed, summary.rejected, summary.failed
            ));
        }

        Ok(BatchOutcome {
            results,
            rejections,
            summary,
        })
    }

    /// One station's pipeline: parse, build, impute. Failures are logged
    /// and reported as an outcome so the batch continues.
    fn process_single_station(&self, path: &Path, catalog: &StationCatalog) -> StationOutcome {
        let reader = DailyReader::new(self.elements.iter().cloned())
            .with_min_years(self.min_years)
            .with_early_rejection(self.early_rejection)
            .with_mmap(self.use_mmap);

        let record = match reader.parse_file(path, catalog) {
            Ok(ParseOutcome::Parsed(record)) => record,
            Ok(ParseOutcome::Rejected(descriptor)) => {
                return StationOutcome::Rejected(descriptor)
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                return StationOutcome::Failed;
            }
        };

        let builder = SeriesBuilder::new().pad_with_nan(self.pad_with_nan);
        let mut series = builder.build(&record);
        MeanImputer::impute_series(&mut series);

        StationOutcome::Done(StationResult {
            id: record.id.clone(),
            series,
            lines_read: record.lines_read,
        })
    }
}
