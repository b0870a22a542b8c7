use super::*;

pub fn run_facets(args: FacetsArgs) -> Result<()> {
    let dataset = Dataset::load(&args.data_path)?;
    let facets = dataset.list_facets();

    if args.json {
        write_json(facets)
    } else {
        write_facets_text(facets)
    }
}

pub fn run_reports(args: ReportsArgs) -> Result<()> {
    let dataset = Dataset::load(&args.data_path)?;
    let criteria = FilterCriteria::from_params(&FilterParams {
        county: args.county,
        municipality: args.municipality,
        year: args.year,
        accredited: args.accredited,
    });

    let results = dataset
        .filter(&criteria)
        .into_iter()
        .map(link_record)
        .collect::<Vec<LinkedRecord<'_>>>();
    info!(returned = results.len(), "report filter complete");

    if args.json {
        write_json(&results)
    } else {
        write_records_text(&describe_criteria(&criteria), &results)
    }
}

pub fn run_municipality(args: MunicipalityArgs) -> Result<()> {
    let dataset = Dataset::load(&args.data_path)?;
    let Some(entries) = dataset.lookup(&args.slug) else {
        bail!("municipality not found: {}", args.slug);
    };

    let results = entries
        .into_iter()
        .map(link_record)
        .collect::<Vec<LinkedRecord<'_>>>();

    if args.json {
        write_json(&results)
    } else {
        let heading = format!("Municipality: {}", results[0].record.municipality);
        write_records_text(&heading, &results)
    }
}

fn describe_criteria(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();
    if let Some(county) = &criteria.county {
        parts.push(format!("county={county}"));
    }
    if let Some(municipality) = &criteria.municipality {
        parts.push(format!("municipality={municipality}"));
    }
    if let Some(year) = criteria.year {
        parts.push(format!("year={year}"));
    }
    if let Some(accredited) = criteria.accredited {
        parts.push(format!("accredited={accredited}"));
    }

    if parts.is_empty() {
        "Filter: (none)".to_string()
    } else {
        format!("Filter: {}", parts.join(" "))
    }
}
