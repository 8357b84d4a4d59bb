use crate::harness::{client_fixture, sh_invoker, stub_suite, stub_suite_with, StubToolProvisioner};
use smoke_core::{
    standard, CopyStager, Scenario, ShellInvoker, SmokeError, SmokeSuite, ToolConfigDescriptor,
};
use std::path::Path;

#[test]
fn test_mismatch_reports_expected_and_actual() {
    let suite = stub_suite().unwrap();
    let result = Scenario::new("wrong_product")
        .invoke(&["--version"])
        .expect_stderr_eq("")
        .expect_stdout_matches("^otherpy==")
        .run(&suite);

    assert!(!result.success);
    assert!(!result.fatal);
    let error = result.error.unwrap();
    assert!(error.contains("scenario 'wrong_product'"), "{error}");
    assert!(error.contains("stdout expected to match /^otherpy==/"), "{error}");
    assert!(error.contains("--- actual stdout ---\nokpy=="), "{error}");
    assert!(!error.contains("stderr expected"), "{error}");

    let output = result.output.expect("output kept on assertion failure");
    assert!(output.stdout.starts_with("okpy=="));
    suite.teardown().unwrap();
}

#[test]
#[should_panic(expected = "Scenario 'wrong_product' failed")]
fn test_unwrap_panics_with_report() {
    let suite = stub_suite().unwrap();
    Scenario::new("wrong_product")
        .invoke(&["--version"])
        .expect_stdout_eq("")
        .run(&suite)
        .unwrap();
}

#[test]
fn test_missing_declared_source() {
    let suite = stub_suite().unwrap();
    let result = Scenario::new("no_source")
        .with_tool_config(ToolConfigDescriptor::standard())
        .invoke(&["--local"])
        .run(&suite);

    assert!(!result.success);
    assert!(!result.fatal);
    assert!(result.output.is_none());
    assert!(result
        .error
        .unwrap()
        .contains("declared source 'test.py' is missing"));
    suite.teardown().unwrap();
}

#[test]
fn test_invalid_pattern_fails_scenario() {
    let suite = stub_suite().unwrap();
    let result = Scenario::new("bad_pattern")
        .invoke(&["--version"])
        .expect_stdout_matches("(okpy")
        .run(&suite);

    assert!(!result.success);
    assert!(!result.fatal);
    assert!(result.error.unwrap().starts_with("invalid pattern"));
    suite.teardown().unwrap();
}

#[test]
fn test_sibling_scenarios_still_run() {
    let suite = stub_suite().unwrap();
    let scenarios = vec![
        Scenario::new("broken")
            .invoke(&["--version"])
            .expect_stdout_eq("wrong"),
        standard::version("okpy"),
        standard::update(),
    ];

    let report = suite.run_all(&scenarios);
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.passed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.aborted.is_none());
    assert!(!report.success());
    suite.teardown().unwrap();
}

#[test]
fn test_unspawnable_shell_aborts_suite() {
    let invoker = ShellInvoker::with_shell("/nonexistent/smoke-shell", &["python".to_string()]);
    let suite = stub_suite_with(invoker).unwrap();

    let report = suite.run_all(&standard::scenarios("okpy"));
    assert_eq!(report.results.len(), 1);
    assert!(report.results[0].fatal);
    assert!(report.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("failed to spawn shell '/nonexistent/smoke-shell'"));
    assert_eq!(
        report.aborted.as_deref(),
        Some("fatal error in scenario 'version'")
    );
    suite.teardown().unwrap();
}

#[test]
fn test_provisioning_failure_is_fatal() {
    let failing = |dest: &Path| -> smoke_core::Result<()> {
        Err(SmokeError::ProvisionFailed {
            dest: dest.to_path_buf(),
            reason: "builder exited with 1".to_string(),
        })
    };
    let stager = Box::new(CopyStager::new(client_fixture()));

    let err = SmokeSuite::setup(&failing, stager, sh_invoker()).err().unwrap();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("builder exited with 1"));
}

#[test]
fn test_missing_client_is_scenario_local() {
    let stager = Box::new(CopyStager::new("/nonexistent/smoke/client"));
    let suite = SmokeSuite::setup(&StubToolProvisioner, stager, sh_invoker()).unwrap();

    let report = suite.run_all(&[standard::version("okpy"), standard::update()]);
    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|r| !r.success && !r.fatal));
    assert!(report.aborted.is_none());
    suite.teardown().unwrap();
}

#[test]
fn test_unstaged_client_is_reported_through_output() {
    let empty_client = tempfile::TempDir::new().unwrap();
    let stager = Box::new(CopyStager::new(empty_client.path()));
    let suite = SmokeSuite::setup(&StubToolProvisioner, stager, sh_invoker()).unwrap();

    let result = standard::version("okpy").run(&suite);
    assert!(!result.success);
    let output = result.output.expect("assertion failure keeps output");
    assert!(output.stderr.contains("can't open file 'ok'"));
    assert_eq!(output.exit_code, Some(2));

    suite.teardown().unwrap();
}
