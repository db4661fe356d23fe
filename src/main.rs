use anyhow::Context;
use clap::Parser;
use include_examer::{Analyzer, Config, Reporter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "include-examer")]
#[command(about = "Audit #include directives in a source tree against a trusted header list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Root directory to audit
    #[arg(required_unless_present = "print_config")]
    path: Option<PathBuf>,

    /// Configuration file path (defaults to ~/.include-examer.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional trusted header name (repeatable)
    #[arg(short, long = "trust", value_name = "NAME")]
    trust: Vec<String>,

    /// File extension to audit, replacing the configured list (repeatable)
    #[arg(short, long = "ext", value_name = "EXT")]
    ext: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Print a documented configuration file and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // clap exits with 2 on usage errors; every failure here is 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.print_config {
        print!("{}", Config::create_documented_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if let Some(path) = cli.path {
        config.target_directory = path;
    }
    config.extra_trusted.extend(cli.trust);
    if !cli.ext.is_empty() {
        config.file_extensions = cli
            .ext
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
    }

    log::info!("Auditing {}", config.target_directory.display());

    let root = config.target_directory.clone();
    let reporter = Reporter::new(config.report.clone());
    let analyzer = Analyzer::new(config);
    let outcome = analyzer.audit_project()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        ReportFormat::Text => reporter
            .write_table(&outcome.rows, &mut out)
            .context("writing report")?,
        ReportFormat::Json => {
            let report = reporter.generate_report(&outcome, &root);
            reporter.write_json(&report, &mut out)?;
        }
    }
    out.flush()?;

    Ok(())
}
