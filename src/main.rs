use clap::Parser;
use mark_analyzer::core::ConfigProvider;
use mark_analyzer::utils::error::ErrorSeverity;
use mark_analyzer::utils::{logger, validation::Validate};
use mark_analyzer::{
    CliConfig, LocalStorage, MarkError, MarkPipeline, ReportEngine, ReportSummary, TomlConfig,
};

async fn run<C: ConfigProvider + Validate>(
    config: C,
    monitor_enabled: bool,
    dry_run: bool,
) -> mark_analyzer::Result<ReportSummary> {
    config.validate()?;
    tracing::info!("✅ Configuration validated");

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = MarkPipeline::new(storage, config);
    let engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    if dry_run {
        engine.dry_run().await
    } else {
        engine.run().await
    }
}

fn exit_with(e: &MarkError) -> ! {
    tracing::error!(
        "❌ Mark analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let dry_run = cli.dry_run;
    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => exit_with(&e),
            };
            config.apply_cli_overrides(&cli);
            let monitor_enabled = config.monitoring_enabled();
            run(config, monitor_enabled, dry_run).await
        }
        None => {
            let monitor_enabled = cli.monitor;
            run(cli, monitor_enabled, dry_run).await
        }
    };

    match outcome {
        Ok(summary) if dry_run => {
            println!(
                "Dry run. TVP: {}, AGA: {}. Nothing written.",
                summary.tvp_count, summary.aga_count
            );
        }
        Ok(summary) => {
            tracing::info!("✅ Report generated");
            println!(
                "Done. TVP: {}, AGA: {}. Saved to: {}",
                summary.tvp_count,
                summary.aga_count,
                summary.written.join(", ")
            );
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
