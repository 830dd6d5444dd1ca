pub mod csv_export;
pub mod html;

use crate::domain::model::{MarkRecord, OutputFormat, RenderedOutput};
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

pub use csv_export::render_csv;
pub use html::render_html;

/// Report footer information.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub source: String,
    pub generated_at: DateTime<Local>,
}

impl ReportMeta {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            generated_at: Local::now(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    generated_at: DateTime<Local>,
    tvp: &'a [MarkRecord],
    aga: &'a [MarkRecord],
}

pub fn render_json(tvp: &[MarkRecord], aga: &[MarkRecord], meta: &ReportMeta) -> Result<Vec<u8>> {
    let report = JsonReport {
        source: &meta.source,
        generated_at: meta.generated_at,
        tvp,
        aga,
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}

fn report_stem(output_path: &str) -> &str {
    Path::new(output_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mark_analysis_report")
}

/// `reports/out.html` + Csv -> `out.csv`
pub fn output_file_name(output_path: &str, format: OutputFormat) -> String {
    format!("{}.{}", report_stem(output_path), format.extension())
}

pub fn bundle_file_name(output_path: &str) -> String {
    format!("{}.zip", report_stem(output_path))
}

/// Renders each requested format in the order given.
pub fn render_outputs(
    formats: &[OutputFormat],
    output_path: &str,
    tvp: &[MarkRecord],
    aga: &[MarkRecord],
    meta: &ReportMeta,
) -> Result<Vec<RenderedOutput>> {
    formats
        .iter()
        .map(|&format| {
            let contents = match format {
                OutputFormat::Html => render_html(tvp, aga, meta).into_bytes(),
                OutputFormat::Csv => render_csv(tvp, aga)?,
                OutputFormat::Json => render_json(tvp, aga, meta)?,
            };
            Ok(RenderedOutput {
                format,
                file_name: output_file_name(output_path, format),
                contents,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MarkKind;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("reports/run1.html", OutputFormat::Csv),
            "run1.csv"
        );
        assert_eq!(
            output_file_name("mark_analysis_report.html", OutputFormat::Html),
            "mark_analysis_report.html"
        );
        assert_eq!(output_file_name("", OutputFormat::Json), "mark_analysis_report.json");
        assert_eq!(bundle_file_name("out/run2.html"), "run2.zip");
    }

    #[test]
    fn test_render_json_shape() {
        let tvp = vec![MarkRecord {
            seq: 1,
            kind: MarkKind::Tvp,
            mark: "T".to_string(),
            layer: "1".to_string(),
            center_x: 1.0,
            center_y: 1.0,
            size_x: 1.0,
            size_y: 1.0,
            nearest: None,
        }];
        let bytes = render_json(&tvp, &[], &ReportMeta::new("in.txt")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["source"], "in.txt");
        assert_eq!(value["tvp"][0]["type"], "TVP");
        assert_eq!(value["tvp"][0]["mark"], "T");
        assert!(value["tvp"][0]["nearest"].is_null());
        assert_eq!(value["aga"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_render_outputs_in_requested_order() {
        let outputs = render_outputs(
            &[OutputFormat::Json, OutputFormat::Html],
            "out/report.html",
            &[],
            &[],
            &ReportMeta::new("in.txt"),
        )
        .unwrap();
        let names: Vec<&str> = outputs.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["report.json", "report.html"]);
    }
}
