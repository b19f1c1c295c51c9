use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{BatchProcessor, SelectionCriteria, StationSelector};
use crate::utils::geo::StationLocations;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Histogram {
            docs_dir,
            elements,
            json,
        } => {
            let progress = ProgressReporter::new_spinner("Reading catalogs...", json);
            let processor = BatchProcessor::new(elements.clone());
            let context = processor.load_context(&docs_dir)?;
            progress.finish_with_message("Catalogs read");

            let summary = context.histogram.summary();
            if json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!(
                    "Active stations per year for {}, {}-{}:",
                    elements.join(", "),
                    summary.first_year,
                    summary.last_year
                );
                for (offset, count) in summary.counts.iter().enumerate() {
                    let year = summary.first_year + offset as i32;
                    if year % 10 == 0 {
                        println!("{year}: {count}");
                    }
                }
            }
        }

        Commands::Stations {
            docs_dir,
            data_dir,
            element,
            min_years,
            must_include,
            longest_first,
            json,
        } => {
            let processor = BatchProcessor::new([element.clone()]);
            let context = processor.load_context(&docs_dir)?;

            let files = processor.list_station_files(&data_dir)?;
            let ids: Vec<String> = files
                .iter()
                .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
                .map(str::to_string)
                .collect();

            let mut criteria = SelectionCriteria::new(element.clone(), min_years);
            criteria.must_include = must_include;
            let mut selected = StationSelector::select(&context.catalog, ids.iter(), &criteria);
            if longest_first {
                StationSelector::sort_longest_first(&mut selected, &element);
            }

            if json {
                println!("{}", serde_json::to_string(&selected)?);
            } else {
                let mut locations = StationLocations::new();
                for station in &selected {
                    locations.add_location(station);
                }

                for station in &selected {
                    if let Some(range) = station.coverage(&element) {
                        println!(
                            "{} {}-{} ({} years) at {:.4}, {:.4}",
                            station.id,
                            range.year_bgn,
                            range.year_end,
                            range.n_years(),
                            station.lat,
                            station.lng
                        );
                    }
                }
                println!(
                    "{} stations across {} occupied map cells",
                    selected.len(),
                    locations.bucket_centers().len()
                );
            }
        }

        Commands::Process {
            docs_dir,
            data_dir,
            elements,
            min_years,
            must_include,
            max_workers,
            no_early_rejection,
            mmap,
        } => {
            println!("Processing GHCN-Daily data...");
            println!("Docs directory: {}", docs_dir.display());
            println!("Data directory: {}", data_dir.display());
            println!("Elements: {}, workers: {}", elements.join(", "), max_workers);

            let startup = ProgressReporter::new_spinner("Reading catalogs...", false);
            let processor = BatchProcessor::new(elements)
                .with_min_years(min_years)
                .with_must_include(must_include)
                .with_max_workers(max_workers)
                .with_early_rejection(!no_early_rejection)
                .with_mmap(mmap);
            let context = processor.load_context(&docs_dir)?;
            startup.finish_with_message("Catalogs read");

            let outcome = tokio::task::spawn_blocking(move || {
                let progress = ProgressReporter::new_spinner("Processing stations...", false);
                processor.process(&data_dir, &context, Some(&progress))
            })
            .await??;

            let summary = &outcome.summary;
            println!(
                "\n{} of {} selected stations processed in {:.2}s",
                summary.processed,
                summary.n_selected,
                summary.elapsed.as_secs_f64()
            );
            println!(
                "{} rejected for coverage, {} failed, {} data lines read",
                summary.rejected, summary.failed, summary.lines_read
            );
        }
    }

    Ok(())
}
