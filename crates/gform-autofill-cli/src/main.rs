//! gform-autofill: fill and submit Google Forms from the command line.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod cli;

use cli::{FillArgs, Output};

#[derive(Parser)]
#[command(
    name = "gform-autofill",
    about = "Fill and submit Google Forms with synthesized answers",
    version,
    after_help = "Run 'gform-autofill <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill and submit a form one or more times
    Submit {
        /// Form viewing URL or bare form id
        url: String,
        /// Number of submissions
        #[arg(long, short = 'n', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        #[command(flatten)]
        fill: FillArgs,
        /// Pause between submissions in milliseconds (default 1000, env GFORM_DELAY_MS)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print one generated submission payload without sending it
    Payload {
        /// Form viewing URL or bare form id
        url: String,
        #[command(flatten)]
        fill: FillArgs,
    },
    /// List the form's entries as a commented key template
    Inspect {
        /// Form viewing URL
        url: String,
        /// Only include required fields
        #[arg(long, short)]
        required: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let out = Output { json: cli.json };

    let result = match cli.command {
        Commands::Submit {
            url,
            count,
            fill,
            delay_ms,
        } => cli::submit_cmd::run(&url, count, &fill, delay_ms, out).await,
        Commands::Payload { url, fill } => cli::payload_cmd::run(&url, &fill, out).await,
        Commands::Inspect { url, required } => cli::inspect_cmd::run(&url, required, out).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "gform-autofill", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if out.json {
            out.print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
