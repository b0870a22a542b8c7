use super::*;

pub(super) fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value)
        .context("failed to serialize query json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub(super) fn write_facets_text(facets: &Facets) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Counties: {}", facets.counties.join(", "))?;
    writeln!(
        output,
        "Years: {}",
        facets
            .years
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    )?;
    writeln!(output, "Municipalities: {}", facets.municipalities.len())?;
    for municipality in &facets.municipalities {
        writeln!(output, "\t{municipality}")?;
    }

    output.flush()?;
    Ok(())
}

pub(super) fn write_records_text(heading: &str, records: &[LinkedRecord<'_>]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "{heading}")?;
    writeln!(output, "Results: {}", records.len())?;
    for (rank, linked) in records.iter().enumerate() {
        let record = linked.record;
        writeln!(
            output,
            "{}.\t{}\t{}\t{}\taccredited={}",
            rank + 1,
            record.municipality,
            record.county.as_deref().unwrap_or("-"),
            format_year(record.report_year),
            format_accredited(record.accredited),
        )?;
        if let Some(updated) = &record.updated {
            writeln!(output, "\tupdated: {updated}")?;
        }
        if let Some(plan_year) = record.plan_year {
            writeln!(output, "\tplan_expires: {plan_year}")?;
        }
        writeln!(output, "\tpdf: {}", linked.pdf_url)?;
        writeln!(output, "\tdetail: {}", linked.municipality_url)?;
    }

    output.flush()?;
    Ok(())
}

pub(super) fn format_year(year: Option<i32>) -> String {
    year.map(|year| year.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(super) fn format_accredited(accredited: Option<bool>) -> &'static str {
    match accredited {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}
