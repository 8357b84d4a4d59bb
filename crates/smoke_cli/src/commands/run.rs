//! Provision an environment and run the standard scenarios.

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use smoke_core::{
    standard, stager_from_config, ScenarioResult, ShellInvoker, SmokeSuite, SuiteReport,
    VirtualenvProvisioner,
};
use std::path::PathBuf;
use std::time::Duration;

/// Options for `smoke run`.
pub struct RunOptions {
    pub config_path: PathBuf,
    pub client: Option<PathBuf>,
    pub shell: Option<String>,
    pub filter: Vec<String>,
    pub repeat: u32,
    pub format: String,
}

pub fn run(opts: RunOptions) -> Result<()> {
    if opts.format != "text" && opts.format != "json" {
        bail!("Unknown format '{}'. Use 'text' or 'json'.", opts.format);
    }

    let mut config = super::load_config(&opts.config_path)?;
    if let Some(client) = opts.client {
        config.client.source = Some(client);
        config.client.package_command = None;
    }

    let scenarios = standard::select(&config.product, &opts.filter);
    if scenarios.is_empty() {
        bail!(
            "No scenarios match {:?}. Known scenarios: {}",
            opts.filter,
            standard::NAMES.join(", ")
        );
    }

    let stager = stager_from_config(&config.client).context("Invalid client configuration")?;
    let invoker = match &opts.shell {
        Some(shell) => ShellInvoker::with_shell(shell, &config.invocation.tool_command),
        None => ShellInvoker::from_config(&config.invocation),
    };
    let provisioner = VirtualenvProvisioner::from_config(&config.environment);

    let spinner = spinner(opts.format == "text");
    spinner.set_message(format!(
        "Provisioning {} environment...",
        config.environment.interpreter
    ));
    let suite = SmokeSuite::setup(&provisioner, stager, invoker)
        .context("Failed to provision isolated environment")?
        .with_config_name(&config.fixtures.config_name);

    spinner.set_message(format!("Running {} scenarios...", scenarios.len()));
    let repeat = opts.repeat.max(1);
    let report = suite.run_repeated(&scenarios, repeat, |round, result| {
        if opts.format == "text" {
            spinner.suspend(|| print_result(round, repeat, result));
        }
    });
    spinner.finish_and_clear();

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    suite
        .teardown()
        .context("Failed to remove isolated environment")?;

    if !report.success() {
        bail!("{} of {} scenarios failed", report.failed(), report.results.len());
    }
    Ok(())
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_result(round: u32, repeat: u32, result: &ScenarioResult) {
    let label = if repeat > 1 {
        format!("{} (round {})", result.name, round)
    } else {
        result.name.clone()
    };

    if result.success {
        println!(
            "{} {} {}",
            style("PASS").green().bold(),
            label,
            style(format!("({} ms)", result.duration_ms)).dim()
        );
    } else {
        println!("{} {}", style("FAIL").red().bold(), label);
        if let Some(error) = &result.error {
            for line in error.lines() {
                println!("    {}", line);
            }
        }
    }
}

fn print_summary(report: &SuiteReport) {
    println!();
    if let Some(reason) = &report.aborted {
        println!("{} {}", style("Suite aborted:").red().bold(), reason);
    }
    println!(
        "{} passed, {} failed",
        style(report.passed()).green(),
        style(report.failed()).red()
    );
}
