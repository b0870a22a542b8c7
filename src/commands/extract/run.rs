use super::*;

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir_for(&args.data_path).join(format!(
            "extract_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(context_dir = %args.context_dir.display(), run_id = %run_id, "starting extract");

    let sources = inventory::discover_sources(&args.context_dir)?;
    if sources.is_empty() {
        warn!(context_dir = %args.context_dir.display(), "no PDFs found");
    }

    let parser = ReportPageParser::new()?;
    let max_pages = args.max_pages_per_doc;
    let extraction = extract_sources(&sources, &parser, |source| {
        extract_pages_with_pdftotext(&source.path, max_pages)
    })?;

    if args.dry_run {
        info!(
            pdf_count = extraction.counts.pdf_count,
            pages = extraction.counts.page_count,
            records = extraction.counts.record_count,
            "extract dry-run complete"
        );
        return Ok(());
    }

    write_json_pretty(&args.data_path, &extraction.records)?;
    info!(
        path = %args.data_path.display(),
        records = extraction.records.len(),
        "saved report records"
    );

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        tool_versions: ToolVersions {
            pdftotext: pdftotext_version(),
        },
        paths: ExtractPaths {
            context_dir: args.context_dir.display().to_string(),
            data_path: args.data_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: extraction.counts,
        sources: extraction.sources,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extract run manifest");

    Ok(())
}

#[derive(Debug, Default)]
pub(super) struct Extraction {
    pub(super) records: Vec<ReportRecord>,
    pub(super) counts: ExtractCounts,
    pub(super) sources: Vec<SourceEntry>,
}

/// Runs every source through the page parser in discovery order. The first
/// source whose pages cannot be read aborts the whole run.
pub(super) fn extract_sources<F>(
    sources: &[SourcePdf],
    parser: &ReportPageParser,
    mut read_pages: F,
) -> Result<Extraction>
where
    F: FnMut(&SourcePdf) -> Result<Vec<String>>,
{
    let mut extraction = Extraction::default();

    for source in sources {
        info!(path = %source.path.display(), "processing report");

        let pages = read_pages(source)
            .with_context(|| format!("failed to read pages of {}", source.path.display()))?;
        let sha256 = sha256_file(&source.path)?;
        let parsed = parser.parse_source(source, &pages);

        extraction.counts.pdf_count += 1;
        extraction.counts.page_count += pages.len();
        extraction.counts.empty_page_count += parsed.empty_page_count;
        extraction.counts.dropped_page_count += parsed.dropped_page_count;
        extraction.counts.record_count += parsed.records.len();

        extraction.sources.push(SourceEntry {
            filename: source.filename.clone(),
            report_year: source.report_year,
            sha256,
            page_count: pages.len(),
            record_count: parsed.records.len(),
        });
        extraction.records.extend(parsed.records);
    }

    Ok(extraction)
}
