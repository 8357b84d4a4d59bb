use smoke_core::{standard, HarnessConfig, SmokeSuite};
use std::path::PathBuf;

/// Runs the standard scenarios against a real virtualenv and packaged client.
///
/// Set `SMOKE_CLIENT_DIR` to a directory containing the packaged client and
/// run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn test_live_standard_suite() {
    let Some(client) = std::env::var_os("SMOKE_CLIENT_DIR").map(PathBuf::from) else {
        eprintln!("SMOKE_CLIENT_DIR not set; skipping");
        return;
    };

    let mut config = HarnessConfig::default();
    config.client.source = Some(client);

    let suite = SmokeSuite::from_config(&config).expect("provisioning should succeed");
    let report = suite.run_all(&standard::scenarios(&config.product));
    suite.teardown().unwrap();

    for result in &report.results {
        if let Some(error) = &result.error {
            eprintln!("{}: {}", result.name, error);
        }
    }
    assert!(report.success());
}
