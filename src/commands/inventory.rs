use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

/// A PDF discovered in the context directory, in the order it will be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePdf {
    pub path: PathBuf,
    pub filename: String,
    pub report_year: Option<i32>,
}

pub fn discover_sources(context_dir: &Path) -> Result<Vec<SourcePdf>> {
    let year_pattern =
        Regex::new(r"(20\d{2})").context("failed to compile report year regex")?;

    let mut pdf_paths = discover_pdfs(context_dir)?;
    pdf_paths.sort();

    let mut sources = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let report_year = parse_report_year(stem, &year_pattern);

        sources.push(SourcePdf {
            path,
            filename,
            report_year,
        });
    }

    Ok(sources)
}

fn discover_pdfs(context_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    let entries = fs::read_dir(context_dir)
        .with_context(|| format!("failed to read {}", context_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", context_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            pdfs.push(path);
        }
    }

    Ok(pdfs)
}

/// First `20xx` token in the file stem; shared by every record from that file.
fn parse_report_year(stem: &str, pattern: &Regex) -> Option<i32> {
    pattern
        .captures(stem)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse::<i32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "njucf-reports-inventory-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("scratch dir should be creatable");
        dir
    }

    #[test]
    fn parse_report_year_takes_first_twenty_first_century_token() {
        let pattern = Regex::new(r"(20\d{2})").expect("regex");
        assert_eq!(parse_report_year("NJUCF_2021_report_2022", &pattern), Some(2021));
        assert_eq!(parse_report_year("accreditation-1999", &pattern), None);
        assert_eq!(parse_report_year("report", &pattern), None);
    }

    #[test]
    fn discover_sources_sorts_pdfs_and_skips_other_files() {
        let dir = scratch_dir("discover");
        for name in ["b_2021.pdf", "a_2019.PDF", "notes.txt", "c.pdf"] {
            fs::write(dir.join(name), b"%PDF-1.4").expect("fixture write");
        }
        fs::create_dir_all(dir.join("nested.pdf")).expect("fixture dir");

        let sources = discover_sources(&dir).expect("discovery should succeed");
        let names = sources
            .iter()
            .map(|source| source.filename.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["a_2019.PDF", "b_2021.pdf", "c.pdf"]);
        assert_eq!(sources[0].report_year, Some(2019));
        assert_eq!(sources[1].report_year, Some(2021));
        assert_eq!(sources[2].report_year, None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn discover_sources_fails_for_missing_directory() {
        let dir = std::env::temp_dir().join("njucf-reports-inventory-does-not-exist");
        let _ = fs::remove_dir_all(&dir);
        assert!(discover_sources(&dir).is_err());
    }
}
