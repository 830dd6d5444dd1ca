use crate::domain::model::{AnalysisResult, MarkRecord, OutputFormat, ReportSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn analyze_tvp(&self) -> bool;
    fn analyze_aga(&self) -> bool;
    fn output_formats(&self) -> &[OutputFormat];
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MarkRecord>>;
    async fn transform(&self, records: Vec<MarkRecord>) -> Result<AnalysisResult>;
    async fn load(&self, result: AnalysisResult) -> Result<ReportSummary>;
}
