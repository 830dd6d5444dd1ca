use crate::core::{Pipeline, ReportSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<ReportSummary> {
        tracing::info!("🚀 Starting mark analysis");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} mark records", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(records).await?;
        tracing::info!(
            "Analyzed {} TVP and {} AGA marks",
            result.tvp.len(),
            result.aga.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let summary = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(summary)
    }

    /// Runs extract and transform only; nothing is written.
    pub async fn dry_run(&self) -> Result<ReportSummary> {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");

        let records = self.pipeline.extract().await?;
        let result = self.pipeline.transform(records).await?;
        for output in &result.outputs {
            tracing::info!(
                "Would write {} ({:?}, {} bytes)",
                output.file_name,
                output.format,
                output.contents.len()
            );
        }
        self.monitor.log_final_stats();

        Ok(ReportSummary {
            tvp_count: result.tvp.len(),
            aga_count: result.aga.len(),
            written: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnalysisResult, MarkRecord};
    use crate::domain::model::MarkKind;
    use crate::utils::error::MarkError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        fail_load: bool,
        loaded: AtomicBool,
    }

    fn record(kind: MarkKind) -> MarkRecord {
        MarkRecord {
            seq: 0,
            kind,
            mark: "m".to_string(),
            layer: "1".to_string(),
            center_x: 0.0,
            center_y: 0.0,
            size_x: 0.0,
            size_y: 0.0,
            nearest: None,
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<MarkRecord>> {
            Ok(vec![record(MarkKind::Tvp), record(MarkKind::Aga), record(MarkKind::Aga)])
        }

        async fn transform(&self, records: Vec<MarkRecord>) -> Result<AnalysisResult> {
            let (tvp, aga) = records.into_iter().partition(|r| r.kind == MarkKind::Tvp);
            Ok(AnalysisResult {
                tvp,
                aga,
                outputs: Vec::new(),
            })
        }

        async fn load(&self, result: AnalysisResult) -> Result<ReportSummary> {
            self.loaded.store(true, Ordering::SeqCst);
            if self.fail_load {
                return Err(MarkError::ProcessingError {
                    message: "disk full".to_string(),
                });
            }
            Ok(ReportSummary {
                tvp_count: result.tvp.len(),
                aga_count: result.aga.len(),
                written: vec!["report.html".to_string()],
            })
        }
    }

    #[tokio::test]
    async fn test_run_returns_summary() {
        let engine = ReportEngine::new(StubPipeline {
            fail_load: false,
            loaded: AtomicBool::new(false),
        });
        let summary = engine.run().await.unwrap();
        assert_eq!(summary.tvp_count, 1);
        assert_eq!(summary.aga_count, 2);
        assert_eq!(summary.written, vec!["report.html".to_string()]);
    }

    #[tokio::test]
    async fn test_run_propagates_load_error() {
        let engine = ReportEngine::new(StubPipeline {
            fail_load: true,
            loaded: AtomicBool::new(false),
        });
        assert!(matches!(
            engine.run().await,
            Err(MarkError::ProcessingError { .. })
        ));
    }

    #[tokio::test]
    async fn test_dry_run_skips_load() {
        let engine = ReportEngine::new(StubPipeline {
            fail_load: true,
            loaded: AtomicBool::new(false),
        });
        let summary = engine.dry_run().await.unwrap();
        assert_eq!(summary.aga_count, 2);
        assert!(summary.written.is_empty());
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
