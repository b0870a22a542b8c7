use super::*;

/// County names recognised as the suffix of a report page header.
const COUNTIES: [&str; 21] = [
    "Atlantic",
    "Bergen",
    "Burlington",
    "Camden",
    "Cape May",
    "Cumberland",
    "Essex",
    "Gloucester",
    "Hudson",
    "Hunterdon",
    "Mercer",
    "Middlesex",
    "Monmouth",
    "Morris",
    "Ocean",
    "Passaic",
    "Salem",
    "Somerset",
    "Sussex",
    "Union",
    "Warren",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct PageFields {
    pub(super) municipality: Option<String>,
    pub(super) county: Option<String>,
    pub(super) accredited: Option<bool>,
    pub(super) updated: Option<String>,
    pub(super) plan_year: Option<i32>,
}

#[derive(Debug, Default)]
pub(super) struct ParsedSource {
    pub(super) records: Vec<ReportRecord>,
    pub(super) empty_page_count: usize,
    pub(super) dropped_page_count: usize,
}

pub(super) struct ReportPageParser {
    header: Regex,
    updated: Regex,
    plan_year: Regex,
    accredited: Regex,
}

impl ReportPageParser {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            header: Regex::new(r"Municipality:\s*County:\s*(.+?)A C C R E D I T A T I O N")
                .context("failed to compile header regex")?,
            updated: Regex::new(r"Updated:\s*([0-9/]+)")
                .context("failed to compile updated-date regex")?,
            plan_year: Regex::new(r"(20\d{2})\s+Most Recent Plan Expires")
                .context("failed to compile plan year regex")?,
            accredited: Regex::new(r"(?is)NJUCF\s+Accredited:.*?(Yes|No)")
                .context("failed to compile accreditation regex")?,
        })
    }

    /// Turns the pages of one source PDF into records, skipping every page
    /// without a recognisable municipality header.
    pub(super) fn parse_source(&self, source: &SourcePdf, pages: &[String]) -> ParsedSource {
        let mut parsed = ParsedSource::default();
        let pdf = source.path.display().to_string();

        for (index, text) in pages.iter().enumerate() {
            if text.trim().is_empty() {
                parsed.empty_page_count += 1;
            }

            let fields = self.parse_page(text);
            let Some(municipality) = fields.municipality else {
                parsed.dropped_page_count += 1;
                continue;
            };

            let mut record = ReportRecord {
                municipality,
                county: fields.county,
                accredited: fields.accredited,
                updated: fields.updated,
                plan_year: fields.plan_year,
                report_year: source.report_year,
                pdf: pdf.clone(),
                page: (index + 1) as u32,
                slug: String::new(),
            };
            record.refresh_slug();
            parsed.records.push(record);
        }

        parsed
    }

    pub(super) fn parse_page(&self, text: &str) -> PageFields {
        let (municipality, county) = match self.extract_header(text) {
            Some((municipality, county)) => (Some(municipality), Some(county.to_string())),
            None => (None, None),
        };

        PageFields {
            municipality,
            county,
            accredited: self.extract_accredited(text),
            updated: self.extract_updated(text),
            plan_year: self.extract_plan_year(text),
        }
    }

    pub(super) fn extract_header(&self, text: &str) -> Option<(String, &'static str)> {
        let captures = self.header.captures(text)?;
        let segment = captures
            .get(1)?
            .as_str()
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ");

        split_county_suffix(&segment)
    }

    pub(super) fn extract_updated(&self, text: &str) -> Option<String> {
        self.updated
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().to_string())
    }

    pub(super) fn extract_plan_year(&self, text: &str) -> Option<i32> {
        self.plan_year
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<i32>().ok())
    }

    pub(super) fn extract_accredited(&self, text: &str) -> Option<bool> {
        self.accredited
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().eq_ignore_ascii_case("yes"))
    }
}

/// Splits `"<municipality> <county>"` on the first county (in list order) that
/// the segment ends with, compared case-insensitively.
pub(super) fn split_county_suffix(segment: &str) -> Option<(String, &'static str)> {
    for candidate in COUNTIES {
        let Some(split_at) = segment.len().checked_sub(candidate.len()) else {
            continue;
        };
        if !segment.is_char_boundary(split_at) {
            continue;
        }

        let (prefix, suffix) = segment.split_at(split_at);
        if !suffix.eq_ignore_ascii_case(candidate) {
            continue;
        }

        let municipality = prefix.trim();
        if municipality.is_empty() {
            return None;
        }
        return Some((municipality.to_string(), candidate));
    }

    None
}
