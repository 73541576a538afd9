use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{audit_roster, run_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::RateEntry;
use payroll_engine::tables::{self, DEFAULT_OUTPUT_TAG, DEFAULT_PAY_RATE_FILE, OutputPaths};

#[derive(Parser)]
#[command(name = "payroll")]
#[command(about = "Compute hours and pay tables from shift punches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run payroll over a timesheet CSV and write the hours and pay tables
    Run {
        #[arg(long)]
        timesheet: PathBuf,
        /// Defaults to "Pay Rate.csv" next to the timesheet
        #[arg(long)]
        pay_rates: Option<PathBuf>,
        #[arg(long, default_value = "config/payroll.yaml")]
        config: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT_TAG)]
        output_tag: String,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the resolved rate table and stop
        #[arg(long)]
        verify_pay_rates: bool,
        /// Print the output tables instead of writing them
        #[arg(long)]
        verify_output: bool,
        #[arg(short, long)]
        verbose: bool,
    },
    /// Serve the payroll HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3000)]
        port: u16,
        #[arg(long, default_value = "config/payroll.yaml")]
        config: PathBuf,
        #[arg(short, long)]
        verbose: bool,
    },
}

struct RunOptions {
    timesheet: PathBuf,
    pay_rates: Option<PathBuf>,
    config: PathBuf,
    output_tag: String,
    output_dir: Option<PathBuf>,
    verify_pay_rates: bool,
    verify_output: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_pay_rates(timesheet: &Path) -> PathBuf {
    timesheet
        .parent()
        .map(|dir| dir.join(DEFAULT_PAY_RATE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PAY_RATE_FILE))
}

fn run(options: RunOptions) -> anyhow::Result<()> {
    let loader = ConfigLoader::load(&options.config)
        .with_context(|| format!("failed to load config {}", options.config.display()))?;

    let pay_rates = options
        .pay_rates
        .unwrap_or_else(|| default_pay_rates(&options.timesheet));
    let rates = tables::read_rates(&pay_rates)
        .with_context(|| format!("failed to read pay rates {}", pay_rates.display()))?;

    if options.verify_pay_rates {
        let entries: Vec<&RateEntry> = rates.entries().collect();
        tables::write_rows(std::io::stdout(), &entries, "stdout")?;
        return Ok(());
    }

    let punches = tables::read_timesheet(&options.timesheet)
        .with_context(|| format!("failed to read timesheet {}", options.timesheet.display()))?;
    let roster_warnings = audit_roster(&punches, &rates);
    info!(
        timesheet = %options.timesheet.display(),
        punches = punches.len(),
        employees = rates.len(),
        roster_warnings = roster_warnings.len(),
        "Loaded inputs"
    );

    let report = run_payroll(&punches, &rates, loader.config()).context("payroll run failed")?;
    let hours = report.hours_table();
    let pay = report.pay_table();

    if options.verify_output {
        println!("Hours");
        tables::write_rows(std::io::stdout(), &hours, "stdout")?;
        println!();
        println!("Pay");
        tables::write_rows(std::io::stdout(), &pay, "stdout")?;
        return Ok(());
    }

    let paths = OutputPaths::for_timesheet(
        &options.timesheet,
        &options.output_tag,
        options.output_dir.as_deref(),
    );
    tables::write_payroll_tables(&paths, &hours, &pay)?;

    println!(
        "Wrote {} and {} ({} employees, total pay {}).",
        paths.hours.display(),
        paths.pay.display(),
        report.employees.len(),
        report.total_pay()
    );
    Ok(())
}

async fn serve(host: String, port: u16, config: PathBuf) -> anyhow::Result<()> {
    let loader = ConfigLoader::load(&config)
        .with_context(|| format!("failed to load config {}", config.display()))?;
    let app = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;
    info!(address = %listener.local_addr()?, "Payroll API listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            timesheet,
            pay_rates,
            config,
            output_tag,
            output_dir,
            verify_pay_rates,
            verify_output,
            verbose,
        } => {
            init_tracing(verbose);
            run(RunOptions {
                timesheet,
                pay_rates,
                config,
                output_tag,
                output_dir,
                verify_pay_rates,
                verify_output,
            })
        }
        Commands::Serve {
            host,
            port,
            config,
            verbose,
        } => {
            init_tracing(verbose);
            serve(host, port, config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR : {:#}", err);
            ExitCode::FAILURE
        }
    }
}
