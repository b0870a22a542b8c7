use std::fs;
use std::path::PathBuf;

use super::*;
use crate::util::write_json_pretty;

fn record(
    municipality: &str,
    county: Option<&str>,
    report_year: Option<i32>,
    accredited: Option<bool>,
    page: u32,
) -> ReportRecord {
    ReportRecord {
        municipality: municipality.to_string(),
        county: county.map(ToOwned::to_owned),
        accredited,
        updated: None,
        plan_year: None,
        report_year,
        pdf: format!(
            "context/NJUCF_{}.pdf",
            report_year.map(|year| year.to_string()).unwrap_or_default()
        ),
        page,
        slug: String::new(),
    }
}

fn sample_dataset() -> Dataset {
    Dataset::from_records(vec![
        record("Newark", Some("Essex"), Some(2022), Some(true), 1),
        record("West Orange", Some("Essex"), Some(2021), Some(false), 2),
        record("Trenton", Some("Mercer"), Some(2022), None, 3),
        record("West Orange", Some("Essex"), Some(2019), Some(true), 4),
        record("Hoboken", None, None, Some(false), 5),
        record("Montclair", Some("Essex"), Some(2022), Some(false), 6),
    ])
}

fn pages(records: &[&ReportRecord]) -> Vec<u32> {
    records.iter().map(|record| record.page).collect()
}

fn params(
    county: Option<&str>,
    municipality: Option<&str>,
    year: Option<&str>,
    accredited: Option<&str>,
) -> FilterParams {
    FilterParams {
        county: county.map(ToOwned::to_owned),
        municipality: municipality.map(ToOwned::to_owned),
        year: year.map(ToOwned::to_owned),
        accredited: accredited.map(ToOwned::to_owned),
    }
}

#[test]
fn facets_are_distinct_and_sorted() {
    let dataset = sample_dataset();
    let facets = dataset.list_facets();
    assert_eq!(facets.counties, vec!["Essex", "Mercer"]);
    assert_eq!(facets.years, vec![2019, 2021, 2022]);
    assert_eq!(
        facets.municipalities,
        vec!["Hoboken", "Montclair", "Newark", "Trenton", "West Orange"]
    );
}

#[test]
fn empty_criteria_return_everything_in_load_order() {
    let dataset = sample_dataset();
    let criteria = FilterCriteria::from_params(&FilterParams::default());
    assert_eq!(criteria, FilterCriteria::default());
    assert_eq!(pages(&dataset.filter(&criteria)), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn filters_compose_with_and() {
    let dataset = sample_dataset();
    let criteria = FilterCriteria::from_params(&params(Some("essex"), None, Some("2022"), None));
    assert_eq!(pages(&dataset.filter(&criteria)), vec![1, 6]);

    let criteria = FilterCriteria::from_params(&params(
        Some("ESSEX"),
        Some("west orange"),
        None,
        Some("Yes"),
    ));
    assert_eq!(pages(&dataset.filter(&criteria)), vec![4]);
}

#[test]
fn non_integer_year_is_ignored() {
    let dataset = sample_dataset();
    let ignored = FilterCriteria::from_params(&params(Some("Essex"), None, Some("not-a-number"), None));
    let unfiltered = FilterCriteria::from_params(&params(Some("Essex"), None, None, None));
    assert_eq!(ignored.year, None);
    assert_eq!(
        pages(&dataset.filter(&ignored)),
        pages(&dataset.filter(&unfiltered))
    );
}

#[test]
fn accredited_aliases_are_tri_state() {
    let dataset = sample_dataset();

    let yes = FilterCriteria::from_params(&params(None, None, None, Some("TRUE")));
    assert_eq!(pages(&dataset.filter(&yes)), vec![1, 4]);

    let no = FilterCriteria::from_params(&params(None, None, None, Some("no")));
    assert_eq!(pages(&dataset.filter(&no)), vec![2, 5, 6]);

    let unknown = FilterCriteria::from_params(&params(None, None, None, Some("maybe")));
    assert_eq!(unknown.accredited, None);
    assert_eq!(dataset.filter(&unknown).len(), 6);
}

#[test]
fn county_filter_never_matches_records_without_county() {
    let dataset = sample_dataset();
    let criteria = FilterCriteria::from_params(&params(Some("Hudson"), None, None, None));
    assert!(dataset.filter(&criteria).is_empty());
}

#[test]
fn empty_parameters_are_inactive() {
    let criteria = FilterCriteria::from_params(&params(Some(""), Some(""), Some(""), Some("")));
    assert_eq!(criteria, FilterCriteria::default());
}

#[test]
fn lookup_orders_by_report_year() {
    let dataset = sample_dataset();
    let entries = dataset.lookup("west-orange").expect("west orange should exist");
    let years = entries
        .iter()
        .map(|record| record.report_year)
        .collect::<Vec<Option<i32>>>();
    assert_eq!(years, vec![Some(2019), Some(2021)]);
}

#[test]
fn lookup_sorts_missing_year_first() {
    let dataset = Dataset::from_records(vec![
        record("Hoboken", Some("Hudson"), Some(2020), None, 1),
        record("Hoboken", Some("Hudson"), None, None, 2),
    ]);
    let entries = dataset.lookup("hoboken").expect("hoboken should exist");
    assert_eq!(pages(&entries), vec![2, 1]);
}

#[test]
fn lookup_of_unknown_slug_is_not_found() {
    assert!(sample_dataset().lookup("atlantis").is_none());
}

#[test]
fn linked_record_flattens_fields_and_adds_links() {
    let dataset = sample_dataset();
    let entries = dataset.lookup("west-orange").expect("west orange should exist");
    let linked = link_record(entries[0]);
    assert_eq!(linked.pdf_url, "/pdf/NJUCF_2019.pdf#page=4");
    assert_eq!(linked.municipality_url, "/municipality/west-orange");

    let value = serde_json::to_value(&linked).expect("linked record should serialize");
    assert_eq!(value["municipality"], "West Orange");
    assert_eq!(value["slug"], "west-orange");
    assert_eq!(value["page"], 4);
    assert_eq!(value["pdf_url"], "/pdf/NJUCF_2019.pdf#page=4");
}

#[test]
fn dataset_round_trip_preserves_fields_and_recomputes_slug() {
    let path = std::env::temp_dir()
        .join(format!("njucf-reports-query-{}", std::process::id()))
        .join("reports.json");

    let mut written = vec![
        ReportRecord {
            updated: Some("3/1/2022".to_string()),
            plan_year: Some(2026),
            ..record("  Egg Harbor Twp.! ", Some("Atlantic"), Some(2022), Some(true), 7)
        },
        record("Trenton", Some("Mercer"), None, None, 1),
    ];
    for entry in &mut written {
        entry.refresh_slug();
    }
    write_json_pretty(&path, &written).expect("dataset should be written");

    let mut raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("dataset should be readable"))
            .expect("dataset should be json");
    raw[0]["slug"] = serde_json::Value::from("stale-slug");
    assert!(raw[1]["county"].is_string());
    assert!(raw[1]["report_year"].is_null());
    fs::write(&path, raw.to_string()).expect("dataset should be rewritten");

    let loaded = Dataset::load(&path).expect("dataset should load");
    assert_eq!(loaded.records(), written.as_slice());
    assert_eq!(loaded.records()[0].slug, "egg-harbor-twp");

    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir_all(parent);
    }
}

#[test]
fn load_fails_for_missing_dataset() {
    let path = PathBuf::from("/nonexistent/njucf-reports/reports.json");
    assert!(Dataset::load(&path).is_err());
}

#[test]
fn filter_params_from_pairs_keep_first_value_and_skip_unknown_keys() {
    let pairs = vec![
        ("county".to_string(), "Essex".to_string()),
        ("page".to_string(), "2".to_string()),
        ("county".to_string(), "Mercer".to_string()),
        ("year".to_string(), "2022".to_string()),
    ];
    let params = FilterParams::from_pairs(pairs);
    assert_eq!(params.county.as_deref(), Some("Essex"));
    assert_eq!(params.year.as_deref(), Some("2022"));
    assert_eq!(params.municipality, None);
    assert_eq!(params.accredited, None);

    let dataset = sample_dataset();
    let criteria = FilterCriteria::from_params(&params);
    assert_eq!(pages(&dataset.filter(&criteria)), vec![1, 6]);
}

#[test]
fn zero_report_year_is_not_offered_as_facet() {
    let dataset = Dataset::from_records(vec![
        record("Newark", Some("Essex"), Some(0), None, 1),
        record("Trenton", Some("Mercer"), Some(2021), None, 2),
    ]);
    assert_eq!(dataset.list_facets().years, vec![2021]);
}
