use crate::domain::model::{MarkKind, MarkRecord};
use crate::utils::error::{MarkError, Result};
use serde::Serialize;

const HEADER: [&str; 11] = [
    "seq", "type", "mark", "layer", "center_x", "center_y", "size_x", "size_y", "nearest",
    "dist", "angle",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    seq: usize,
    #[serde(rename = "type")]
    kind: MarkKind,
    mark: &'a str,
    layer: &'a str,
    center_x: String,
    center_y: String,
    size_x: String,
    size_y: String,
    nearest: &'a str,
    dist: String,
    angle: String,
}

impl<'a> From<&'a MarkRecord> for CsvRow<'a> {
    fn from(record: &'a MarkRecord) -> Self {
        let nearest = record.nearest.as_ref();
        Self {
            seq: record.seq,
            kind: record.kind,
            mark: &record.mark,
            layer: &record.layer,
            center_x: format!("{:.3}", record.center_x),
            center_y: format!("{:.3}", record.center_y),
            size_x: format!("{:.3}", record.size_x),
            size_y: format!("{:.3}", record.size_y),
            nearest: nearest.map(|n| n.name.as_str()).unwrap_or_default(),
            dist: nearest.map(|n| format!("{:.3}", n.distance)).unwrap_or_default(),
            angle: nearest.map(|n| format!("{:.3}", n.angle_deg)).unwrap_or_default(),
        }
    }
}

/// One CSV table with both kinds, TVP rows first. The header is written
/// even when there are no records.
pub fn render_csv(tvp: &[MarkRecord], aga: &[MarkRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in tvp.iter().chain(aga) {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.into_inner().map_err(|e| MarkError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })
}
