use crate::config::DEFAULT_OUTPUT;
use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, Validate};
use clap::Parser;

const DEFAULT_FORMATS: &[OutputFormat] = &[OutputFormat::Html];

#[derive(Debug, Clone, Parser)]
#[command(name = "mark-analyzer")]
#[command(about = "Analyze TVP & AGA marks in a content TXT file and write an HTML report")]
pub struct CliConfig {
    /// Content TXT file to analyze
    pub input: Option<String>,

    /// Report path; other formats are written next to it with their own extension
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip TVP marks
    #[arg(long)]
    pub no_tvp: bool,

    /// Skip AGA marks
    #[arg(long)]
    pub no_aga: bool,

    /// Output formats
    #[arg(long = "format", value_enum, value_delimiter = ',')]
    pub formats: Vec<OutputFormat>,

    /// Pack every output into a single ZIP archive
    #[arg(long)]
    pub bundle: bool,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Log CPU / memory after each phase
    #[arg(long)]
    pub monitor: bool,

    /// Parse and count marks without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn output_path(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    fn analyze_tvp(&self) -> bool {
        !self.no_tvp
    }

    fn analyze_aga(&self) -> bool {
        !self.no_aga
    }

    fn output_formats(&self) -> &[OutputFormat] {
        if self.formats.is_empty() {
            DEFAULT_FORMATS
        } else {
            &self.formats
        }
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
