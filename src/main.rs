use chrono::NaiveDate;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use referencing::application::config::FormConfig;
use referencing::application::orchestrator::{FormOrchestrator, SubmitOutcome};
use referencing::domain::ports::{ClockBox, SubmissionGatewayRef};
use referencing::domain::result::FormResult;
use referencing::infrastructure::clock::{FixedClock, SystemClock};
use referencing::infrastructure::in_memory::InMemoryGateway;
use referencing::infrastructure::simulated::SimulatedGateway;
use referencing::interfaces::csv::script_reader::{ScriptReader, ScriptStep};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form session script (CSV with columns event,slot,field,value)
    input: PathBuf,

    /// Days a single employer must cover for the form to be accepted
    #[arg(long, default_value_t = FormConfig::default().minimum_span_days)]
    min_span_days: i64,

    /// Round-trip time of the simulated endpoint, in milliseconds
    #[arg(long, default_value_t = default_latency_ms())]
    latency_ms: u64,

    /// Make the simulated endpoint reject every submission
    #[arg(long)]
    fail: bool,

    /// Evaluate open-ended employments as of this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Record submissions in memory and answer immediately
    #[arg(long)]
    dry_run: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = FormConfig {
        minimum_span_days: cli.min_span_days,
        submission_latency: Duration::from_millis(cli.latency_ms),
    };

    let gateway: SubmissionGatewayRef = match (cli.dry_run, cli.fail) {
        (true, false) => Arc::new(InMemoryGateway::new()),
        (true, true) => Arc::new(InMemoryGateway::failing()),
        (false, fail) => Arc::new(SimulatedGateway::new(config.submission_latency, fail)),
    };
    let clock: ClockBox = match cli.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    info!(input = %cli.input.display(), dry_run = cli.dry_run, "replaying form session");
    let mut form = FormOrchestrator::new(&config, gateway, clock);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = ScriptReader::new(file);
    for step in reader.steps() {
        match step {
            Ok(ScriptStep::Edit(event)) => {
                let offered = form.should_offer_another_employer();
                form.handle(event);
                if !offered && form.should_offer_another_employer() {
                    println!("Add another employer");
                }
            }
            Ok(ScriptStep::Submit) => {
                let outcome = form.submit().into_diagnostic()?;
                if let SubmitOutcome::Dispatched(payload) = &outcome {
                    println!("{}", serde_json::to_string(payload).into_diagnostic()?);
                }
                render(form.result());
                if matches!(outcome, SubmitOutcome::Dispatched(_)) {
                    form.settle().await.into_diagnostic()?;
                    render(form.result());
                }
            }
            Err(e) => {
                eprintln!("Error reading script step: {}", e);
            }
        }
    }

    Ok(())
}

fn default_latency_ms() -> u64 {
    u64::try_from(FormConfig::default().submission_latency.as_millis()).unwrap_or(u64::MAX)
}

fn render(result: FormResult) {
    if let Some(message) = result.message() {
        println!("{}", message);
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
