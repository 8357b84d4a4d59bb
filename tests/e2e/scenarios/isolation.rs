use crate::harness::{snapshot_tree, stub_suite};
use smoke_core::{standard, Scenario, ToolConfigDescriptor, SAMPLE_SOURCE};

#[test]
fn test_working_directory_removed_after_pass() {
    let suite = stub_suite().unwrap();
    let result = standard::version("okpy").run(&suite);

    assert!(result.success);
    let working_dir = result.working_dir.expect("working dir recorded");
    assert!(!working_dir.exists());
    suite.teardown().unwrap();
}

#[test]
fn test_working_directory_removed_after_failure() {
    let suite = stub_suite().unwrap();
    let result = Scenario::new("wrong_version")
        .invoke(&["--version"])
        .expect_stdout_eq("nope")
        .run(&suite);

    assert!(!result.success);
    let working_dir = result.working_dir.expect("working dir recorded");
    assert!(!working_dir.exists());
    suite.teardown().unwrap();
}

#[test]
fn test_rerun_is_identical() {
    let suite = stub_suite().unwrap();
    let scenario = standard::passing_test();

    let first = scenario.run(&suite);
    let second = scenario.run(&suite);

    assert!(first.success && second.success);
    assert_eq!(first.output, second.output);
    assert_ne!(first.working_dir, second.working_dir);
    suite.teardown().unwrap();
}

#[test]
fn test_environment_not_mutated_by_scenarios() {
    let suite = stub_suite().unwrap();
    let root = suite.environment().root_path().to_path_buf();
    let before = snapshot_tree(&root).unwrap();

    let report = suite.run_all(&standard::scenarios("okpy"));
    assert!(report.success(), "{:#?}", report);

    assert_eq!(snapshot_tree(&root).unwrap(), before);
    suite.teardown().unwrap();
}

#[test]
fn test_teardown_removes_environment() {
    let suite = stub_suite().unwrap();
    let root = suite.environment().root_path().to_path_buf();
    assert!(root.join("bin").join("activate").is_file());

    suite.teardown().unwrap();
    assert!(!root.exists());
}

#[test]
fn test_files_do_not_leak_between_scenarios() {
    let suite = stub_suite().unwrap();

    Scenario::new("leaves_file")
        .with_file("leftover.txt", "from an earlier scenario")
        .invoke(&["--list-files"])
        .expect_stdout_eq("leftover.txt\nok\n")
        .run(&suite)
        .unwrap();

    Scenario::new("sees_clean_directory")
        .invoke(&["--list-files"])
        .expect_stdout_eq("ok\n")
        .run(&suite)
        .unwrap();

    suite.teardown().unwrap();
}

#[test]
fn test_duplicate_fixture_last_write_wins() {
    let suite = stub_suite().unwrap();

    let output = Scenario::new("last_write_wins")
        .with_tool_config(ToolConfigDescriptor::standard())
        .with_file("test.py", "")
        .with_file("test.py", SAMPLE_SOURCE)
        .invoke(&["-q", "f", "--local"])
        .expect_stdout_contains("1 test cases passed! No cases failed")
        .run(&suite)
        .unwrap()
        .unwrap();

    assert_eq!(output.stderr, "");
    suite.teardown().unwrap();
}
