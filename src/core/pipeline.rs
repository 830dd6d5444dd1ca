use crate::core::{AnalysisResult, ConfigProvider, MarkRecord, Pipeline, ReportSummary, Storage};
use crate::domain::model::MarkKind;
use crate::domain::neighbor::add_nearest_same_layer;
use crate::domain::parser::{decode_content, parse_marks, split_lines};
use crate::report::{bundle_file_name, render_outputs, ReportMeta};
use crate::utils::error::{MarkError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub struct MarkPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MarkPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn input_path(&self) -> Result<&str> {
        self.config
            .input_path()
            .ok_or_else(|| MarkError::MissingConfigError {
                field: "input.path".to_string(),
            })
    }

    fn enabled_kinds(&self) -> Vec<MarkKind> {
        MarkKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                MarkKind::Tvp => self.config.analyze_tvp(),
                MarkKind::Aga => self.config.analyze_aga(),
            })
            .collect()
    }

    fn bundle_outputs(&self, result: &AnalysisResult) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for output in &result.outputs {
            zip.start_file::<_, ()>(output.file_name.as_str(), FileOptions::default())?;
            zip.write_all(&output.contents)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Places `file_name` in the directory of `output_path`.
pub fn sibling_path(output_path: &str, file_name: &str) -> String {
    match Path::new(output_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            dir.join(file_name).to_string_lossy().into_owned()
        }
        _ => file_name.to_string(),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MarkPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<MarkRecord>> {
        let input = self.input_path()?;
        tracing::info!("📄 Reading content file: {}", input);

        let bytes = self.storage.read_file(input).await?;
        let content = decode_content(&bytes);
        let lines = split_lines(&content);
        tracing::debug!("Read {} bytes, {} lines", bytes.len(), lines.len());

        let mut records = Vec::new();
        for kind in self.enabled_kinds() {
            let parsed = parse_marks(&lines, kind);
            tracing::info!("🔎 Found {} {} marks", parsed.len(), kind);
            records.extend(parsed);
        }

        Ok(records)
    }

    async fn transform(&self, records: Vec<MarkRecord>) -> Result<AnalysisResult> {
        tracing::info!("🔧 Analyzing {} marks", records.len());

        let (tvp, aga): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| record.kind == MarkKind::Tvp);
        let tvp = add_nearest_same_layer(tvp);
        let aga = add_nearest_same_layer(aga);

        let meta = ReportMeta::new(self.input_path()?);
        let outputs = render_outputs(
            self.config.output_formats(),
            self.config.output_path(),
            &tvp,
            &aga,
            &meta,
        )?;
        tracing::debug!("Rendered {} output(s)", outputs.len());

        Ok(AnalysisResult { tvp, aga, outputs })
    }

    async fn load(&self, result: AnalysisResult) -> Result<ReportSummary> {
        let output_path = self.config.output_path();
        let mut written = Vec::new();

        if self.config.bundle() {
            let zip_data = self.bundle_outputs(&result)?;
            let path = sibling_path(output_path, &bundle_file_name(output_path));

            tracing::debug!("Writing ZIP bundle ({} bytes) to {}", zip_data.len(), path);
            self.storage.write_file(&path, &zip_data).await?;
            written.push(path);
        } else {
            for output in &result.outputs {
                let path = sibling_path(output_path, &output.file_name);
                self.storage.write_file(&path, &output.contents).await?;
                tracing::debug!("Wrote {} ({} bytes)", path, output.contents.len());
                written.push(path);
            }
        }

        for path in &written {
            tracing::info!("💾 Saved: {}", path);
        }

        Ok(ReportSummary {
            tvp_count: result.tvp.len(),
            aga_count: result.aga.len(),
            written,
        })
    }
}
