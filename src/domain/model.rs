use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkKind {
    Tvp,
    Aga,
}

impl MarkKind {
    pub const ALL: [MarkKind; 2] = [MarkKind::Tvp, MarkKind::Aga];

    /// Substring that identifies a content line as this kind of mark.
    pub fn line_marker(self) -> &'static str {
        match self {
            MarkKind::Tvp => "_MC_TVP",
            MarkKind::Aga => "_MC_AGA",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkKind::Tvp => "TVP",
            MarkKind::Aga => "AGA",
        }
    }

    pub fn anchor(self) -> &'static str {
        match self {
            MarkKind::Tvp => "tvp",
            MarkKind::Aga => "aga",
        }
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub name: String,
    pub distance: f64,
    pub angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub seq: usize,
    #[serde(rename = "type")]
    pub kind: MarkKind,
    pub mark: String,
    pub layer: String,
    pub center_x: f64,
    pub center_y: f64,
    pub size_x: f64,
    pub size_y: f64,
    pub nearest: Option<Neighbor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Html,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub format: OutputFormat,
    pub file_name: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub tvp: Vec<MarkRecord>,
    pub aga: Vec<MarkRecord>,
    pub outputs: Vec<RenderedOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub tvp_count: usize,
    pub aga_count: usize,
    pub written: Vec<String>,
}
