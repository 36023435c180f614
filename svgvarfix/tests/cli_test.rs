//! End-to-end tests of the `svgvarfix-bin` binary: exit codes, stdout and
//! stderr diagnostics.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn svgvarfix() -> Result<Command> {
    let mut cmd = Command::cargo_bin("svgvarfix-bin")?;
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn test_full_fix_exits_zero() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("trophy.svg");
    fs::write(&svg, r#"<svg><path fill="var(--fill-0, #FBC343)"/></svg>"#)?;

    svgvarfix()?
        .arg(&svg)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Fixed SVG"))
        .stdout(predicate::str::contains("CSS variables replaced: 1"))
        .stdout(predicate::str::contains("Hot Restart"));

    assert_eq!(
        fs::read_to_string(&svg)?,
        r##"<svg><path fill="#FBC343"/></svg>"##
    );
    Ok(())
}

#[test]
fn test_clean_file_exits_zero() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("clean.svg");
    fs::write(&svg, "<svg/>")?;

    svgvarfix()?
        .arg(&svg)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No CSS variables found"));
    Ok(())
}

#[test]
fn test_partial_fix_exits_four_and_warns() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("partial.svg");
    fs::write(
        &svg,
        r#"<rect fill="var(--fill-a, #ff0000)" /><circle fill="var(--fill-b, var(--nested, #00ff00))" />"#,
    )?;

    svgvarfix()?
        .arg(&svg)
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Partial fix"))
        .stdout(predicate::str::contains("Remaining CSS variables: 1"))
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("skipped CSS variable"))
        .stderr(predicate::str::contains("var(--fill-b, var(--nested, #00ff00))"))
        .stderr(predicate::str::contains("partial.svg"));
    Ok(())
}

#[test]
fn test_missing_file_exits_one() -> Result<()> {
    let temp = TempDir::new()?;

    svgvarfix()?
        .arg(temp.path().join("nope.svg"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("Tip:"));
    Ok(())
}

#[test]
fn test_wrong_extension_exits_two() -> Result<()> {
    let temp = TempDir::new()?;
    let png = temp.path().join("icon.png");
    fs::write(&png, "var(--fill-0, red)")?;

    svgvarfix()?
        .arg(&png)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File does not have the .svg extension"))
        .stderr(predicate::str::contains("Expected file extension: .svg"));

    assert_eq!(fs::read_to_string(&png)?, "var(--fill-0, red)");
    Ok(())
}

#[test]
fn test_extension_message_follows_config() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".svgvarfix.toml"),
        "[svgvarfix]\nextension = \"svgx\"\n",
    )?;
    let png = temp.path().join("icon.png");
    fs::write(&png, "")?;

    svgvarfix()?
        .arg(&png)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File does not have the .svgx extension"))
        .stderr(predicate::str::contains("Expected file extension: .svgx"));
    Ok(())
}

#[test]
fn test_write_failure_warns_and_keeps_original() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("blocked.svg");
    let original = r#"<rect fill="var(--fill-0, red)"/>"#;
    fs::write(&svg, original)?;
    // A non-empty directory squats on the temporary sibling's name.
    let squatter = temp.path().join("blocked.svg.tmp");
    fs::create_dir(&squatter)?;
    fs::write(squatter.join("keep.txt"), "x")?;

    svgvarfix()?
        .arg(&svg)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("failed to create the temporary file"));

    assert_eq!(fs::read_to_string(&svg)?, original);
    assert!(squatter.join("keep.txt").exists());
    Ok(())
}

#[test]
fn test_usage_errors_exit_one() -> Result<()> {
    svgvarfix()?.assert().code(1);
    svgvarfix()?.args(["a.svg", "b.svg"]).assert().code(1);
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("report.svg");
    fs::write(&svg, r#"<rect fill="var(--fill-1, )"/><rect fill="var(--fill-2, blue)"/>"#)?;

    let output = svgvarfix()?.arg("--json").arg(&svg).output()?;
    assert_eq!(output.status.code(), Some(4));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["found"], 2);
    assert_eq!(report["replaced"], 1);
    assert_eq!(report["remaining"], 1);
    assert_eq!(report["written"], true);
    assert_eq!(report["skipped"][0]["reason"], "empty_fallback");
    assert_eq!(report["skipped"][0]["offset"], 12);
    Ok(())
}

#[test]
fn test_dry_run_does_not_write() -> Result<()> {
    let temp = TempDir::new()?;
    let svg = temp.path().join("dry.svg");
    let original = r#"<rect fill="var(--fill-0, red)"/>"#;
    fs::write(&svg, original)?;

    svgvarfix()?
        .arg("--dry-run")
        .arg(&svg)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("[DRY-RUN] Would fix SVG"));

    assert_eq!(fs::read_to_string(&svg)?, original);
    Ok(())
}

#[test]
fn test_config_file_controls_extension_and_hint() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join(".svgvarfix.toml"),
        "[svgvarfix]\nextension = \"svgx\"\nhint = \"Rebuild the asset bundle\"\n",
    )?;
    let nested = temp.path().join("assets");
    fs::create_dir(&nested)?;
    let file = nested.join("icon.svgx");
    fs::write(&file, r#"<rect fill="var(--fill-0, red)"/>"#)?;

    svgvarfix()?
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Rebuild the asset bundle"));

    assert_eq!(fs::read_to_string(&file)?, r#"<rect fill="red"/>"#);
    Ok(())
}

#[test]
fn test_version_and_help_exit_zero() -> Result<()> {
    svgvarfix()?
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    svgvarfix()?
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(".svgvarfix.toml"));
    Ok(())
}
