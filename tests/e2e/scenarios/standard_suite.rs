use crate::harness::{stub_suite, STUB_VERSION};
use smoke_core::standard;

#[test]
fn test_version() {
    let suite = stub_suite().unwrap();
    let output = standard::version("okpy")
        .run(&suite)
        .expect("version scenario should pass")
        .unwrap();

    assert_eq!(output.stdout, format!("okpy=={}\n", STUB_VERSION));
    assert_eq!(output.stderr, "");
    suite.teardown().unwrap();
}

#[test]
fn test_update() {
    let suite = stub_suite().unwrap();
    standard::update()
        .run(&suite)
        .expect("update scenario should pass");
    suite.teardown().unwrap();
}

#[test]
fn test_run_no_argument() {
    let suite = stub_suite().unwrap();
    let output = standard::run_no_argument().run(&suite).unwrap().unwrap();

    assert!(output
        .stdout
        .contains("0 test cases passed! No cases failed"));
    suite.teardown().unwrap();
}

#[test]
fn test_passing_test() {
    let suite = stub_suite().unwrap();
    let output = standard::passing_test().run(&suite).unwrap().unwrap();

    assert!(output
        .stdout
        .contains("1 test cases passed! No cases failed"));
    suite.teardown().unwrap();
}

#[test]
fn test_failing_test() {
    let suite = stub_suite().unwrap();
    let output = standard::failing_test().run(&suite).unwrap().unwrap();

    // Same summary as an empty source file; the tool does not tell them apart.
    assert!(output
        .stdout
        .contains("0 test cases passed! No cases failed"));
    suite.teardown().unwrap();
}

#[test]
fn test_full_standard_suite() {
    let suite = stub_suite().unwrap();
    let report = suite.run_all(&standard::scenarios("okpy"));

    assert!(report.success(), "{:#?}", report);
    assert_eq!(report.passed(), standard::NAMES.len());
    assert!(report.aborted.is_none());
    suite.teardown().unwrap();
}

#[test]
fn test_version_for_other_product_fails() {
    let suite = stub_suite().unwrap();
    let result = standard::version("otherpy").run(&suite);

    assert!(!result.success);
    assert!(!result.fatal);
    suite.teardown().unwrap();
}
