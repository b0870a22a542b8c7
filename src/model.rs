use std::path::Path;

use serde::{Deserialize, Serialize};

/// One municipality page found in a source report PDF.
///
/// Field names match the persisted dataset. `slug` is written for consumers
/// that expect it but is never trusted on load; [`ReportRecord::refresh_slug`]
/// recomputes it from `municipality`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub municipality: String,
    pub county: Option<String>,
    pub accredited: Option<bool>,
    pub updated: Option<String>,
    pub plan_year: Option<i32>,
    pub report_year: Option<i32>,
    pub pdf: String,
    pub page: u32,
    #[serde(default, skip_deserializing)]
    pub slug: String,
}

impl ReportRecord {
    pub fn refresh_slug(&mut self) {
        self.slug = slugify(&self.municipality);
    }

    /// Base name of the source PDF, used when deep-linking into the document.
    pub fn pdf_file_name(&self) -> &str {
        Path::new(&self.pdf)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.pdf)
    }
}

/// Lowercases, collapses every run of characters outside `[a-z0-9]` into one
/// hyphen, and strips hyphens from both ends.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for character in value.chars().flat_map(char::to_lowercase) {
        if character.is_ascii_lowercase() || character.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(character);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub filename: String,
    pub report_year: Option<i32>,
    pub sha256: String,
    pub page_count: usize,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolVersions {
    pub pdftotext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPaths {
    pub context_dir: String,
    pub data_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub pdf_count: usize,
    pub page_count: usize,
    pub empty_page_count: usize,
    pub record_count: usize,
    pub dropped_page_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub sources: Vec<SourceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("West Orange"), "west-orange");
        assert_eq!(slugify("  Egg Harbor Twp.! "), "egg-harbor-twp");
        assert_eq!(slugify("Hi-Nella / Borough"), "hi-nella-borough");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in ["West Orange", "  Egg Harbor Twp.! ", "Saddle--River", "Peñasco 2"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slugify_treats_non_ascii_letters_as_separators() {
        assert_eq!(slugify("Peñasco"), "pe-asco");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_is_ignored_when_loading_records() {
        let raw = r#"{
          "municipality": "West Orange",
          "county": "Essex",
          "accredited": true,
          "updated": "3/1/2022",
          "plan_year": 2026,
          "report_year": 2022,
          "pdf": "context/report_2022.pdf",
          "page": 4,
          "slug": "something-stale"
        }"#;

        let mut record: ReportRecord = serde_json::from_str(raw).expect("record should parse");
        assert_eq!(record.slug, "");
        record.refresh_slug();
        assert_eq!(record.slug, "west-orange");
        assert_eq!(record.pdf_file_name(), "report_2022.pdf");
    }

    #[test]
    fn missing_optional_fields_load_as_absent() {
        let raw = r#"{"municipality": "Trenton", "pdf": "a.pdf", "page": 1}"#;
        let record: ReportRecord = serde_json::from_str(raw).expect("record should parse");
        assert_eq!(record.county, None);
        assert_eq!(record.accredited, None);
        assert_eq!(record.report_year, None);
    }
}
