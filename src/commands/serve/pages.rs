use super::*;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Detail view for one municipality: one row per report year, each linking
/// to its page in the source PDF.
pub(super) fn render_municipality_page(entries: &[&ReportRecord]) -> String {
    let name = entries
        .first()
        .map(|record| record.municipality.as_str())
        .unwrap_or_default();

    let mut rows = String::new();
    for record in entries {
        let linked = link_record(record);
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{}\">page {}</a></td></tr>\n",
            optional_cell(record.report_year.map(|year| year.to_string())),
            encode_text(record.county.as_deref().unwrap_or("")),
            accredited_cell(record.accredited),
            encode_text(record.updated.as_deref().unwrap_or("")),
            optional_cell(record.plan_year.map(|year| year.to_string())),
            encode_double_quoted_attribute(&linked.pdf_url),
            record.page,
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{name}</title></head>\n<body>\n<h1>{name}</h1>\n<table>\n<tr><th>Report year</th><th>County</th><th>Accredited</th><th>Updated</th><th>Plan expires</th><th>Source</th></tr>\n{rows}</table>\n</body>\n</html>\n",
        name = encode_text(name),
        rows = rows,
    )
}

fn optional_cell(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn accredited_cell(accredited: Option<bool>) -> &'static str {
    match accredited {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    }
}
