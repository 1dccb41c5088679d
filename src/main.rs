use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use gpoaudit::run_pipeline;

#[derive(Parser)]
#[command(
    name = "gpoaudit",
    version,
    about = "Normalize an XML GPO report into indented and compact forms"
)]
struct Args {
    /// Path to the XML GPO report
    report: PathBuf,

    /// Destination for the indented form
    #[arg(long, default_value = "Formatted Report.xml")]
    formatted: PathBuf,

    /// Destination for the compact single-line form
    #[arg(long, default_value = "Compressed Report.xml")]
    compact: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    match run_pipeline(&args.report, &args.formatted, &args.compact) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_missing_section() => {
            error!("{e}");
            error!("please provide a valid GPO report containing both Computer and User sections");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
