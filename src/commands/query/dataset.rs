use super::*;

/// Distinct values offered for filtering, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub counties: Vec<String>,
    pub years: Vec<i32>,
    pub municipalities: Vec<String>,
}

/// The full record set, loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ReportRecord>,
    facets: Facets,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let records: Vec<ReportRecord> = read_json(path)
            .with_context(|| format!("failed to load report dataset {}", path.display()))?;
        let dataset = Self::from_records(records);

        info!(
            path = %path.display(),
            records = dataset.records.len(),
            counties = dataset.facets.counties.len(),
            years = dataset.facets.years.len(),
            "loaded report dataset"
        );

        Ok(dataset)
    }

    /// Slugs are always recomputed here, whatever the records carried.
    pub fn from_records(mut records: Vec<ReportRecord>) -> Self {
        for record in &mut records {
            record.refresh_slug();
        }
        let facets = collect_facets(&records);
        Self { records, facets }
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn list_facets(&self) -> &Facets {
        &self.facets
    }

    /// Records satisfying every active criterion, in load order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&ReportRecord> {
        self.records
            .iter()
            .filter(|record| criteria.matches(record))
            .collect()
    }

    /// All report years for one municipality, oldest first; records without a
    /// report year sort as year 0. `None` when the slug is unknown.
    pub fn lookup(&self, slug: &str) -> Option<Vec<&ReportRecord>> {
        let mut entries = self
            .records
            .iter()
            .filter(|record| record.slug == slug)
            .collect::<Vec<&ReportRecord>>();

        if entries.is_empty() {
            return None;
        }

        entries.sort_by_key(|record| record.report_year.unwrap_or(0));
        Some(entries)
    }
}

fn collect_facets(records: &[ReportRecord]) -> Facets {
    let counties = records
        .iter()
        .filter_map(|record| record.county.as_deref())
        .filter(|county| !county.is_empty())
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<String>>();
    let years = records
        .iter()
        .filter_map(|record| record.report_year)
        .filter(|year| *year != 0)
        .collect::<BTreeSet<i32>>();
    let municipalities = records
        .iter()
        .map(|record| record.municipality.as_str())
        .filter(|municipality| !municipality.is_empty())
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<String>>();

    Facets {
        counties: counties.into_iter().collect(),
        years: years.into_iter().collect(),
        municipalities: municipalities.into_iter().collect(),
    }
}
