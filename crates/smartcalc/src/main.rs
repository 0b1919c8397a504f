use clap::Parser;
use smartcalc::{Command, init_logging, run};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smartcalc")]
#[command(about = "Expression, equation, credit and deposit calculator")]
struct Args {
    /// Path to the data directory (default: ~/.smartcalc/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".smartcalc")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let output = run(&args.command, args.json).inspect_err(|err| {
        tracing::error!(error = %err, "Command failed");
    })?;
    println!("{}", output.trim_end());

    Ok(())
}
