use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gentle_birth::adapters::{FileGateway, TerminalWizard, WizardOutcome};
use gentle_birth::application::{AssessmentController, AssessmentReader};
use gentle_birth::config::AppConfig;
use gentle_birth::domain::foundation::Timestamp;
use gentle_birth::domain::guidance::{
    AssistantContext, HealthReport, ReportFormat, REPORT_LOCKED_MESSAGE,
};
use gentle_birth::ports::PersistenceGateway;

#[derive(Parser)]
#[command(name = "gentle-birth", about = "Health and pregnancy assessment")]
#[command(version)]
struct Cli {
    /// Runs the assessment wizard when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the report for the stored assessment
    Report {
        /// markdown, json or yaml
        #[arg(default_value = "markdown")]
        format: ReportFormat,
    },
    /// Print the assistant greeting and personalization preamble
    Context,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    config.logging.init_tracing()?;

    let gateway: Arc<dyn PersistenceGateway> = Arc::new(FileGateway::new(&config.storage.data_dir));
    let reader = AssessmentReader::with_storage_key(gateway.clone(), &config.storage.assessment_key);

    match cli.command {
        None => run_wizard(gateway, &config, &reader),
        Some(Commands::Report { format }) => print_report(&reader, format),
        Some(Commands::Context) => {
            let context = AssistantContext::from_record(reader.load().as_ref());
            println!("{}", context.greeting);
            if let Some(notice) = &context.notice {
                println!("{}", notice);
            }
            println!();
            println!("{}", context.system_preamble());
            Ok(())
        }
    }
}

fn run_wizard(
    gateway: Arc<dyn PersistenceGateway>,
    config: &AppConfig,
    reader: &AssessmentReader,
) -> Result<()> {
    let mut controller =
        AssessmentController::with_storage_key(gateway, &config.storage.assessment_key);
    let id = controller.id();
    controller.on_complete(move || info!(assessment_id = %id, "report generation unlocked"));

    let stdin = io::stdin();
    let mut wizard = TerminalWizard::new(stdin.lock(), io::stdout());
    match wizard.run(&mut controller)? {
        WizardOutcome::Completed => {
            println!();
            print_report(reader, ReportFormat::Markdown)
        }
        WizardOutcome::Abandoned => {
            println!("Assessment not finished; nothing was saved.");
            Ok(())
        }
    }
}

fn print_report(reader: &AssessmentReader, format: ReportFormat) -> Result<()> {
    let Some(record) = reader.load() else {
        println!("{}", REPORT_LOCKED_MESSAGE);
        return Ok(());
    };
    let report = HealthReport::from_record(&record, Timestamp::now());
    println!("{}", report.export(format)?);
    Ok(())
}
