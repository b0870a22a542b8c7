use super::*;

/// A record plus the presentation links a browser needs to reach it.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedRecord<'a> {
    #[serde(flatten)]
    pub record: &'a ReportRecord,
    pub pdf_url: String,
    pub municipality_url: String,
}

pub fn link_record(record: &ReportRecord) -> LinkedRecord<'_> {
    LinkedRecord {
        record,
        pdf_url: format!("/pdf/{}#page={}", record.pdf_file_name(), record.page),
        municipality_url: format!("/municipality/{}", record.slug),
    }
}
