use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use polyscan_core::{HolePolicy, OutputFormat, ProcessHandle, ScanConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "polyscan",
    version,
    about = "Read live Polytopia game state from process memory"
)]
struct Cli {
    /// Target process id (looked up by name when omitted)
    #[arg(long, global = true, conflicts_with = "process")]
    pid: Option<i32>,

    /// Process name to look up
    #[arg(long, global = true)]
    process: Option<String>,

    /// Module whose base anchors the section chains
    #[arg(long, global = true)]
    module: Option<String>,

    /// TOML scan configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    scan: ScanArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Output format
    #[arg(long, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Keep iterating past null collection elements
    #[arg(long)]
    skip_holes: bool,

    /// Production output (same as --format text)
    #[arg(short = 'y')]
    production: bool,
}

impl ScanArgs {
    fn output_format(&self) -> OutputFormat {
        if self.production {
            OutputFormat::Text
        } else {
            self.format
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract one snapshot (default)
    Scan,
    /// Trace the four section pointer chains
    Sections {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polyscan=info,polyscan_core=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let process = open_process(cli.pid, &config)?;

    match cli.command.unwrap_or(Commands::Scan) {
        Commands::Scan => commands::scan::run(&process, &config, cli.scan.output_format()),
        Commands::Sections { json } => commands::sections::run(&process, &config, json),
    }
}

/// Config file first, then command line overrides
fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };

    if let Some(module) = &cli.module {
        config.module_name = module.clone();
    }
    if let Some(process) = &cli.process {
        config.process_name = process.clone();
    }
    if cli.scan.skip_holes {
        config.hole_policy = HolePolicy::Skip;
    }

    Ok(config)
}

fn open_process(pid: Option<i32>, config: &ScanConfig) -> Result<ProcessHandle> {
    let process = match pid {
        Some(pid) => ProcessHandle::open(pid, &config.module_name)?,
        None => ProcessHandle::find_and_open(&config.process_name, &config.module_name)?,
    };
    info!(
        "Attached to pid {} ({} at {:#x})",
        process.pid, process.module_name, process.base_address
    );
    Ok(process)
}

/// Process exit status; a negative core status wraps to 255
fn exit_status(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<polyscan_core::Error>()
        .map(|e| e.status_code())
        .unwrap_or(1) as u8
}
