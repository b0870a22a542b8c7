use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use regex::Regex;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::commands::inventory::{self, SourcePdf};
use crate::model::{
    ExtractCounts, ExtractPaths, ExtractRunManifest, ReportRecord, SourceEntry, ToolVersions,
};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

mod pages;
mod parser;
mod run;

pub use run::run;

use pages::*;
use parser::*;

/// Directory that holds extract run manifests for a dataset.
pub fn manifest_dir_for(data_path: &Path) -> PathBuf {
    data_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("manifests")
}
