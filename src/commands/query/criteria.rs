use super::*;

/// Raw filter input as it arrives from a query string or the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub county: Option<String>,
    pub municipality: Option<String>,
    pub year: Option<String>,
    pub accredited: Option<String>,
}

impl FilterParams {
    /// Builds params from decoded query pairs. The first value of a repeated
    /// key wins and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "county" => &mut params.county,
                "municipality" => &mut params.municipality,
                "year" => &mut params.year,
                "accredited" => &mut params.accredited,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Filter criteria with every inactive option resolved to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub county: Option<String>,
    pub municipality: Option<String>,
    pub year: Option<i32>,
    pub accredited: Option<bool>,
}

impl FilterCriteria {
    /// Empty values disable their filter, a year that is not an integer is
    /// ignored, and an accreditation value outside the known aliases is ignored.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            county: non_empty(params.county.as_deref()).map(ToOwned::to_owned),
            municipality: non_empty(params.municipality.as_deref()).map(ToOwned::to_owned),
            year: non_empty(params.year.as_deref()).and_then(|value| value.trim().parse().ok()),
            accredited: non_empty(params.accredited.as_deref()).and_then(parse_accredited),
        }
    }

    pub fn matches(&self, record: &ReportRecord) -> bool {
        if let Some(county) = &self.county {
            if !matches_ignoring_case(record.county.as_deref(), county) {
                return false;
            }
        }
        if let Some(municipality) = &self.municipality {
            if !matches_ignoring_case(Some(record.municipality.as_str()), municipality) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.report_year != Some(year) {
                return false;
            }
        }
        if let Some(accredited) = self.accredited {
            if record.accredited != Some(accredited) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_accredited(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

fn matches_ignoring_case(value: Option<&str>, expected: &str) -> bool {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.to_lowercase() == expected.to_lowercase())
        .unwrap_or(false)
}
