//! End-to-end tests for `--check-config`.

mod common;
use common::prelude::*;

#[test]
fn test_check_config_lists_libraries() {
    let fixture = TestFixture::new().with_config(
        "wolfpack.json",
        r#"{
  "libs": {
    "acme/widgets": {"tag": "v1.2.0"},
    "acme/gadgets": {"url": "https://example.com/gadgets.git"}
  }
}"#,
    );

    fixture
        .command()
        .arg("--check-config")
        .arg("wolfpack.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 libraries)"))
        .stdout(predicate::str::contains(
            "acme/widgets  tag=v1.2.0  url=https://github.com/acme/widgets",
        ))
        .stdout(predicate::str::contains(
            "acme/gadgets  tag=master  url=https://example.com/gadgets.git",
        ));

    // A dry run never touches the cache.
    assert!(!fixture.path().join(".wolfpack").exists());
}

#[test]
fn test_check_config_yaml() {
    let fixture = TestFixture::new().with_config("deps.yml", configs::SINGLE_LIB_YAML);

    fixture
        .command()
        .arg("--check-config")
        .arg("deps.yml")
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/widgets  tag=v1.2.0"));
}

#[test]
fn test_check_config_toml() {
    let fixture = TestFixture::new().with_config(
        "wolfpack.toml",
        "version = 1\n\n[libs.\"acme/widgets\"]\ntag = \"v1.2.0\"\n",
    );

    fixture
        .command()
        .arg("--check-config")
        .arg("wolfpack.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/widgets  tag=v1.2.0"));
}

#[test]
fn test_check_config_unsupported_format() {
    let fixture = TestFixture::new().with_config("wolfpack.ini", "[libs]\n");

    fixture
        .command()
        .arg("--check-config")
        .arg("wolfpack.ini")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create reader for file type"));
}

#[test]
fn test_check_config_malformed_name() {
    let fixture = TestFixture::new().with_config("wolfpack.json", configs::MALFORMED_NAME);

    fixture
        .command()
        .arg("--check-config")
        .arg("wolfpack.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'widgets'"));
}

#[test]
fn test_check_config_unsupported_version() {
    let fixture =
        TestFixture::new().with_config("wolfpack.json", r#"{"version": 3, "libs": {}}"#);

    fixture
        .command()
        .arg("--check-config")
        .arg("wolfpack.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported config version 3"));
}
