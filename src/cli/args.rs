use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghcnd-processor")]
#[command(about = "High-performance GHCN-Daily climate data processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the stations-per-year histogram from the archive catalogs
    Histogram {
        #[arg(
            short,
            long,
            help = "Directory containing ghcnd-stations.txt and ghcnd-inventory.txt"
        )]
        docs_dir: PathBuf,

        #[arg(
            short,
            long,
            default_value = "TMAX",
            value_delimiter = ',',
            help = "Element codes to count, e.g. TMAX,PRCP"
        )]
        elements: Vec<String>,

        #[arg(long, default_value = "false", help = "Emit the histogram as JSON")]
        json: bool,
    },

    /// List stations whose coverage satisfies the selection criteria
    Stations {
        #[arg(short, long, help = "Directory containing the catalog files")]
        docs_dir: PathBuf,

        #[arg(long, help = "Directory containing the per-station .dly files")]
        data_dir: PathBuf,

        #[arg(short, long, default_value = "TMAX")]
        element: String,

        #[arg(short, long, default_value = "50")]
        min_years: i32,

        #[arg(long, help = "Only stations whose coverage includes this year")]
        must_include: Option<i32>,

        #[arg(long, default_value = "false", help = "Sort longest coverage first")]
        longest_first: bool,

        #[arg(long, default_value = "false", help = "Emit the station list as JSON")]
        json: bool,
    },

    /// Run the full pipeline over all qualifying stations
    Process {
        #[arg(short, long, help = "Directory containing the catalog files")]
        docs_dir: PathBuf,

        #[arg(long, help = "Directory containing the per-station .dly files")]
        data_dir: PathBuf,

        #[arg(
            short,
            long,
            default_value = "TMAX",
            value_delimiter = ',',
            help = "Element codes to decode, e.g. TMAX,TMIN"
        )]
        elements: Vec<String>,

        #[arg(short, long, default_value = "50")]
        min_years: i32,

        #[arg(long, help = "Only stations whose coverage includes this year")]
        must_include: Option<i32>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(
            long,
            default_value = "false",
            help = "Parse every file fully instead of rejecting on first-line coverage"
        )]
        no_early_rejection: bool,

        #[arg(long, default_value = "false", help = "Memory-map daily files")]
        mmap: bool,
    },
}
