use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "njucf-reports",
    version,
    about = "Extract and browse municipal urban forestry accreditation reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Facets(FacetsArgs),
    Reports(ReportsArgs),
    Municipality(MunicipalityArgs),
    Serve(ServeArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = "context")]
    pub context_dir: PathBuf,

    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FacetsArgs {
    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportsArgs {
    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,

    #[arg(long)]
    pub county: Option<String>,

    #[arg(long)]
    pub municipality: Option<String>,

    /// Report year; values that are not integers are ignored.
    #[arg(long)]
    pub year: Option<String>,

    /// One of true/yes/false/no; anything else leaves the filter off.
    #[arg(long)]
    pub accredited: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MunicipalityArgs {
    pub slug: String,

    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,

    #[arg(long, default_value = "context")]
    pub context_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "data/reports.json")]
    pub data_path: PathBuf,
}
