use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::extract::manifest_dir_for;
use crate::commands::query::Dataset;
use crate::model::ExtractRunManifest;
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    info!(data_path = %args.data_path.display(), "status requested");

    let manifest_dir = manifest_dir_for(&args.data_path);
    match latest_manifest_path(&manifest_dir)? {
        Some(path) => {
            let manifest: ExtractRunManifest = read_json(&path)?;
            info!(
                path = %path.display(),
                run_id = %manifest.run_id,
                status = %manifest.status,
                started_at = %manifest.started_at,
                updated_at = %manifest.updated_at,
                pdftotext = %manifest.tool_versions.pdftotext,
                pdf_count = manifest.counts.pdf_count,
                page_count = manifest.counts.page_count,
                empty_page_count = manifest.counts.empty_page_count,
                dropped_page_count = manifest.counts.dropped_page_count,
                record_count = manifest.counts.record_count,
                "loaded latest extract run manifest"
            );
            for source in &manifest.sources {
                info!(
                    filename = %source.filename,
                    report_year = ?source.report_year,
                    pages = source.page_count,
                    records = source.record_count,
                    "extracted source"
                );
            }
        }
        None => warn!(path = %manifest_dir.display(), "no extract run manifest found"),
    }

    if args.data_path.exists() {
        let dataset = Dataset::load(&args.data_path)?;
        let facets = dataset.list_facets();
        let accredited = dataset
            .records()
            .iter()
            .filter(|record| record.accredited == Some(true))
            .count();

        info!(
            records = dataset.records().len(),
            accredited,
            municipalities = facets.municipalities.len(),
            counties = facets.counties.len(),
            years = ?facets.years,
            "dataset status"
        );
    } else {
        warn!(path = %args.data_path.display(), "dataset file missing");
    }

    Ok(())
}

/// Run manifests carry a compact UTC timestamp in their name, so the
/// lexicographically last one is the newest.
fn latest_manifest_path(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("extract_run_") && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest && latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}
