//! End-to-end checks of the `posadmin` binary that need no live backend.

use assert_cmd::Command;
use posadmin_testing::TestWorld;
use predicates::prelude::*;

const DEAD_BACKEND: &str = "http://127.0.0.1:9";

#[test]
fn test_help_lists_screens() {
    let world = TestWorld::new();
    let result = world.run(&["--help"]).unwrap();

    assert!(result.success());
    for screen in ["login", "whoami", "client", "product", "inventory", "order", "report"] {
        assert!(result.stdout.contains(screen), "missing {screen} in help");
    }
}

#[test]
fn test_unreachable_backend_is_reported() {
    let world = TestWorld::new()
        .with_base_url(DEAD_BACKEND)
        .with_cached_credentials("admin@pos.test", "secret");

    let result = world.run(&["client", "list"]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr.contains("Backend unreachable"),
        "stderr: {}",
        result.stderr
    );
    // A network failure is not an auth failure; the cache survives
    assert!(world.credentials_path().exists());
}

#[test]
fn test_whoami_without_cached_credentials() {
    let world = TestWorld::new().with_base_url(DEAD_BACKEND);

    let plain = world.run(&["whoami"]).unwrap();
    assert!(plain.success());
    assert!(plain.stdout.starts_with("Not logged in"));

    let json = world.run(&["--format", "json", "whoami"]).unwrap();
    assert!(json.success());
    assert_eq!(json.json().unwrap()["authenticated"], false);
}

#[test]
fn test_logout_removes_cached_credentials() {
    let world = TestWorld::new()
        .with_base_url(DEAD_BACKEND)
        .with_cached_credentials("admin@pos.test", "secret");
    assert!(world.credentials_path().exists());

    let result = world.run(&["logout"]).unwrap();

    assert!(result.success());
    assert_eq!(result.stdout, "Logged out.\n");
    assert!(!world.credentials_path().exists());
}

#[test]
fn test_malformed_order_item_rejected_by_parser() {
    let world = TestWorld::new().with_base_url(DEAD_BACKEND);

    let result = world
        .run(&["order", "create", "--client-id", "1", "--item", "7:two:9.5"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("invalid quantity in '7:two:9.5'"));
    assert!(!result.stderr.contains("Backend unreachable"));
}

#[test]
fn test_inverted_report_range_rejected_before_network() {
    let world = TestWorld::new().with_base_url(DEAD_BACKEND);

    for args in [
        &["report", "sales", "--from", "2024-05-01", "--to", "2024-04-01"][..],
        &["order", "list", "--from", "2024-05-01", "--to", "2024-04-01"][..],
    ] {
        let result = world.run(args).unwrap();
        assert!(!result.success());
        assert!(
            result
                .stderr
                .contains("start date 2024-05-01 is after end date 2024-04-01"),
            "stderr: {}",
            result.stderr
        );
    }
}

#[test]
fn test_page_numbers_start_at_one() {
    let world = TestWorld::new().with_base_url(DEAD_BACKEND);

    let result = world.run(&["client", "list", "--page", "0"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("--page"));
}

#[test]
#[allow(deprecated)]
fn test_invalid_config_is_reported() {
    let world = TestWorld::new();
    std::fs::write(world.data_dir().join("config.toml"), "page_size = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("posadmin").unwrap();
    world.configure_command(&mut cmd);
    cmd.args(["client", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be at least 1"));
}

#[test]
#[allow(deprecated)]
fn test_base_url_flag_overrides_config() {
    let world = TestWorld::new().with_base_url("http://localhost:1/unused");

    let mut cmd = Command::cargo_bin("posadmin").unwrap();
    world.configure_command(&mut cmd);
    cmd.args(["--base-url", DEAD_BACKEND, "product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Backend unreachable at {}",
            DEAD_BACKEND
        )));
}
