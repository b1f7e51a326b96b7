//! Export command implementation
//!
//! Runs one export from the facility table to the configured bucket.

use crate::config::FeedConfig;
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::core::publish::UploadOutcome;
use crate::domain::Result;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Dry run mode - write files locally without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of records per feed file
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Override the local output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Exit codes: 0 success, 1 upload or reconciliation failures,
    /// 2 configuration error, 4 connection error, 5 fatal export error.
    pub async fn execute(&self, loaded: Result<FeedConfig>) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("DRY RUN MODE - feed files are written locally and not uploaded");
            println!();
        }

        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::new(config).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        let exit_code = if summary.is_successful() {
            println!("Export completed successfully");
            0
        } else {
            println!("Export completed with failures");
            1
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut FeedConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(page_size) = self.page_size {
            tracing::info!(page_size, "Overriding page size from CLI");
            config.database.page_size = page_size;
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }
    }
}

fn outcome_label(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Uploaded { attempts: 1 } => "uploaded".to_string(),
        UploadOutcome::Uploaded { attempts } => format!("uploaded after {attempts} attempts"),
        UploadOutcome::Skipped => "skipped (dry run)".to_string(),
        UploadOutcome::Failed { error, .. } => format!("FAILED: {error}"),
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("Export Summary:");
    println!("  Batches: {}", summary.batches);
    println!("  Records: {}", summary.total_records);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.feed_files.is_empty() {
        println!("Feed files:");
        for published in &summary.feed_files {
            println!(
                "  {} ({} records, {} bytes) - {}",
                published.file.name,
                published.file.records,
                published.file.size_bytes,
                outcome_label(&published.outcome)
            );
        }
        println!();
    }

    if let Some(manifest) = &summary.manifest {
        println!(
            "Manifest: {} ({} entries) - {}",
            manifest.file.name,
            manifest.file.records,
            outcome_label(&manifest.outcome)
        );
        println!();
    }

    if let Some(report) = &summary.reconciliation {
        print!("{}", report.format_summary());
        println!();
    }

    if !summary.errors.is_empty() {
        println!("Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Key: {context}");
            }
        }
        println!();
    }
}
