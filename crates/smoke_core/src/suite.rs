//! Suite controller: one environment, many isolated scenarios.
//!
//! The environment is provisioned by [`SmokeSuite::setup`] and released by
//! [`SmokeSuite::teardown`]. Every scenario borrows it read-only and gets its
//! own [`WorkingDirectory`], which is closed whatever the scenario's outcome.

use crate::assertions;
use crate::config::HarnessConfig;
use crate::environment::{IsolatedEnvironment, Provisioner, VirtualenvProvisioner};
use crate::error::{Result, SmokeError};
use crate::fixtures::FixtureFile;
use crate::invocation::{InvocationResult, ShellInvoker};
use crate::scenario::{Scenario, ScenarioResult};
use crate::stager::{stager_from_config, ClientStager};
use crate::workspace::WorkingDirectory;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

/// A provisioned environment plus everything needed to run scenarios in it.
pub struct SmokeSuite {
    environment: IsolatedEnvironment,
    stager: Box<dyn ClientStager>,
    invoker: ShellInvoker,
    config_name: String,
}

impl SmokeSuite {
    /// Provision the shared environment. Fails fast: nothing can run without it.
    pub fn setup(
        provisioner: &dyn Provisioner,
        stager: Box<dyn ClientStager>,
        invoker: ShellInvoker,
    ) -> Result<Self> {
        let environment = IsolatedEnvironment::create_temporary(provisioner)?;
        info!(
            root = %environment.root_path().display(),
            shell = %invoker.shell(),
            "suite environment ready"
        );

        Ok(Self {
            environment,
            stager,
            invoker,
            config_name: HarnessConfig::default().fixtures.config_name,
        })
    }

    /// Build every component from configuration, then provision.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        let stager = stager_from_config(&config.client)?;
        let provisioner = VirtualenvProvisioner::from_config(&config.environment);
        let invoker = ShellInvoker::from_config(&config.invocation);

        Ok(Self::setup(&provisioner, stager, invoker)?.with_config_name(&config.fixtures.config_name))
    }

    /// File name tool config descriptors are written under.
    pub fn with_config_name(mut self, name: &str) -> Self {
        self.config_name = name.to_string();
        self
    }

    pub fn environment(&self) -> &IsolatedEnvironment {
        &self.environment
    }

    /// Run one scenario in a fresh working directory.
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let started = Instant::now();

        let work = match WorkingDirectory::open() {
            Ok(work) => work,
            Err(e) => return finish(scenario, started, None, Err(e)),
        };
        let working_dir = work.path().to_path_buf();

        let mut outcome = self.execute(scenario, &work);

        if let Err(e) = work.close() {
            warn!(
                scenario = scenario.name(),
                path = %working_dir.display(),
                "failed to remove working directory: {}",
                e
            );
            if outcome.is_ok() {
                outcome = Err(e);
            }
        }

        finish(scenario, started, Some(working_dir), outcome)
    }

    /// Run scenarios in order, stopping at the first fatal error.
    pub fn run_all(&self, scenarios: &[Scenario]) -> SuiteReport {
        self.run_repeated(scenarios, 1, |_, _| {})
    }

    /// Run `scenarios` for `rounds` rounds against the same environment.
    ///
    /// The first captured output of each scenario is its baseline. A later
    /// round whose output differs from the baseline fails, even if its own
    /// expectations were met. `observe` sees every result as it is recorded.
    pub fn run_repeated<F>(&self, scenarios: &[Scenario], rounds: u32, mut observe: F) -> SuiteReport
    where
        F: FnMut(u32, &ScenarioResult),
    {
        let mut report = SuiteReport::default();
        let mut baselines: HashMap<String, (u32, InvocationResult)> = HashMap::new();

        for round in 1..=rounds.max(1) {
            for scenario in scenarios {
                let mut result = self.run_scenario(scenario);
                if let Some(output) = &result.output {
                    match baselines.get(&result.name) {
                        None => {
                            baselines.insert(result.name.clone(), (round, output.clone()));
                        }
                        Some((first, baseline)) if baseline != output => {
                            warn!(scenario = %result.name, round, "output differs from round {}", first);
                            result.success = false;
                            result.error = Some(divergence(*first, baseline, output));
                        }
                        Some(_) => {}
                    }
                }

                observe(round, &result);
                if !report.record(result) {
                    return report;
                }
            }
        }
        report
    }

    /// Remove the environment.
    pub fn teardown(self) -> Result<()> {
        self.environment.teardown()
    }

    fn execute(&self, scenario: &Scenario, work: &WorkingDirectory) -> Result<InvocationResult> {
        if let Some(e) = scenario.invalid_pattern() {
            return Err(SmokeError::InvalidPattern(e.clone()));
        }

        self.stager.stage(work.path())?;

        if let Some(descriptor) = scenario.tool_config() {
            work.write_fixture(&FixtureFile::tool_config(&self.config_name, descriptor)?)?;
        }
        for fixture in scenario.fixtures() {
            work.write_fixture(fixture)?;
        }
        if let Some(descriptor) = scenario.tool_config() {
            work.verify_sources(descriptor)?;
        }

        let result = self
            .invoker
            .invoke(&self.environment, work.path(), scenario.args())?;
        assertions::check(scenario.name(), &result, scenario.expectations())?;

        Ok(result)
    }
}

fn divergence(first: u32, baseline: &InvocationResult, output: &InvocationResult) -> String {
    format!(
        "output differs from round {}\n--- round {} stdout ---\n{}\n--- round {} stderr ---\n{}\n--- actual stdout ---\n{}\n--- actual stderr ---\n{}",
        first, first, baseline.stdout, first, baseline.stderr, output.stdout, output.stderr
    )
}

fn finish(
    scenario: &Scenario,
    started: Instant,
    working_dir: Option<std::path::PathBuf>,
    outcome: Result<InvocationResult>,
) -> ScenarioResult {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(output) => {
            info!(scenario = scenario.name(), duration_ms, "scenario passed");
            ScenarioResult {
                name: scenario.name().to_string(),
                success: true,
                fatal: false,
                output: Some(output),
                error: None,
                working_dir,
                duration_ms,
            }
        }
        Err(e) => {
            info!(scenario = scenario.name(), duration_ms, fatal = e.is_fatal(), "scenario failed: {}", e);
            let output = match &e {
                SmokeError::Assertion(failure) => Some(failure.output.clone()),
                _ => None,
            };
            let error = match e.recovery_suggestion() {
                Some(hint) => format!("{}\nhint: {}", e, hint),
                None => e.to_string(),
            };
            ScenarioResult {
                name: scenario.name().to_string(),
                success: false,
                fatal: e.is_fatal(),
                output,
                error: Some(error),
                working_dir,
                duration_ms,
            }
        }
    }
}

/// Outcome of a whole suite run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub results: Vec<ScenarioResult>,
    /// Set when a fatal error stopped the suite early.
    pub aborted: Option<String>,
}

impl SuiteReport {
    /// Add a result; returns `false` once the suite must stop.
    pub fn record(&mut self, result: ScenarioResult) -> bool {
        let fatal = result.fatal;
        if fatal {
            self.aborted = Some(format!("fatal error in scenario '{}'", result.name));
        }
        self.results.push(result);
        !fatal
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn success(&self) -> bool {
        self.aborted.is_none() && self.results.iter().all(|r| r.success)
    }
}
