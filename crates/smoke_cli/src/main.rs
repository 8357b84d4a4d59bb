//! Smoke CLI - end-to-end smoke tests for a packaged command-line tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "smoke")]
#[command(about = "Smoke-test a packaged CLI inside an isolated environment", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the harness config file
    #[arg(long, global = true, default_value = smoke_core::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision an environment and run the standard scenarios
    Run {
        /// Pre-built client tree to stage (overrides config)
        #[arg(long)]
        client: Option<PathBuf>,
        /// Command interpreter (overrides the shell variable)
        #[arg(long)]
        shell: Option<String>,
        /// Only run scenarios with these names
        #[arg(long)]
        filter: Vec<String>,
        /// Run the selected scenarios this many times against the same environment
        #[arg(long, default_value = "1")]
        repeat: u32,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Build an isolated environment at a persistent path
    Provision {
        /// Destination directory (empty or non-existent)
        dest: PathBuf,
    },
    /// Run the tool once inside an existing environment
    Invoke {
        /// Environment root
        #[arg(long)]
        env: PathBuf,
        /// Working directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Command interpreter (overrides the shell variable)
        #[arg(long)]
        shell: Option<String>,
        /// Arguments passed to the tool
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Write the standard tool config and sample source into a directory
    Fixtures {
        /// Target directory
        dir: PathBuf,
    },
    /// Write a default config file
    InitConfig {
        /// Output path (defaults to --config)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            client,
            shell,
            filter,
            repeat,
            format,
        } => commands::run::run(commands::run::RunOptions {
            config_path: cli.config,
            client,
            shell,
            filter,
            repeat,
            format,
        }),
        Commands::Provision { dest } => commands::provision::run(&cli.config, &dest),
        Commands::Invoke {
            env,
            dir,
            shell,
            args,
        } => commands::invoke::run(&cli.config, &env, dir.as_deref(), shell.as_deref(), &args),
        Commands::Fixtures { dir } => commands::fixtures::run(&cli.config, &dir),
        Commands::InitConfig { path } => {
            commands::init_config::run(path.as_deref().unwrap_or(&cli.config))
        }
    }
}
