//! Integration tests for the `tvctl` binary.
//!
//! These validate argument parsing, help output, completions, the config
//! subcommands, and the no-op paths — all without a live TV or cloud.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with env isolation: every `TVCTL_*` override cleared
/// and the settings file pointed into a scratch directory.
fn tvctl_cmd(config: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tvctl");
    cmd.env("TVCTL_CONFIG", config)
        .env_remove("TVCTL_ADDRESS")
        .env_remove("TVCTL_PORT")
        .env_remove("TVCTL_MAC")
        .env_remove("TVCTL_CLOUD_TOKEN")
        .env_remove("TVCTL_CLOUD_DEVICE_ID")
        .env_remove("TVCTL_PAIRING_TOKEN")
        .env_remove("TVCTL_CLIENT_ID")
        .env_remove("TVCTL_CLOUD_API_URL");
    cmd
}

fn scratch() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

/// A complete settings file aimed at a dead local port, so probes fail
/// fast and every gated action is a no-op.
fn write_offline_settings(path: &std::path::Path) {
    std::fs::write(
        path,
        r#"
address = "127.0.0.1"
port = 1
mac = "aa:bb:cc:dd:ee:ff"
cloud_token = "test-token"
cloud_device_id = "tv-1"
client_id = "uuid-cli-test"
"#,
    )
    .unwrap();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let (_dir, config) = scratch();
    let output = tvctl_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr).to_string()
        + &String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_the_command_surface() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("Samsung TV")
            .and(predicate::str::contains("on"))
            .and(predicate::str::contains("off"))
            .and(predicate::str::contains("vol"))
            .and(predicate::str::contains("mute"))
            .and(predicate::str::contains("token")),
    );
}

#[test]
fn version_flag() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tvctl"));
}

#[test]
fn invalid_subcommand_fails() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config).arg("blink").assert().failure();
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn vol_requires_a_direction() {
    let (_dir, config) = scratch();
    let output = tvctl_cmd(&config).arg("vol").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn vol_rejects_unknown_directions() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["vol", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("up").and(predicate::str::contains("down")));
}

#[test]
fn vol_rejects_non_numeric_steps() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["vol", "up", "many"])
        .assert()
        .failure();
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completions_zsh() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config subcommands ──────────────────────────────────────────────

#[test]
fn config_path_prints_the_override() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn config_show_without_a_file() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config init"));
}

#[test]
fn config_set_then_show_redacts_secrets() {
    let (_dir, config) = scratch();

    tvctl_cmd(&config)
        .args(["config", "set", "address", "192.168.1.20"])
        .assert()
        .success();
    tvctl_cmd(&config)
        .args(["config", "set", "cloud_token", "super-secret"])
        .assert()
        .success();

    tvctl_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("192.168.1.20")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("super-secret").not()),
        );
}

#[test]
fn config_set_rejects_unknown_keys() {
    let (_dir, config) = scratch();
    let output = tvctl_cmd(&config)
        .args(["config", "set", "favorite_channel", "9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Settings validation at dispatch ─────────────────────────────────

#[test]
fn device_commands_require_settings() {
    let (_dir, config) = scratch();
    tvctl_cmd(&config)
        .arg("off")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config init").or(predicate::str::contains("address")));
}

#[test]
fn mac_is_validated_before_any_network_io() {
    let (_dir, config) = scratch();
    std::fs::write(
        &config,
        r#"
address = "127.0.0.1"
mac = "not-a-mac"
cloud_token = "t"
cloud_device_id = "d"
"#,
    )
    .unwrap();

    let output = tvctl_cmd(&config).arg("off").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Offline no-ops through the binary ───────────────────────────────

#[test]
fn off_is_a_noop_when_the_tv_is_unreachable() {
    let (_dir, config) = scratch();
    write_offline_settings(&config);

    tvctl_cmd(&config).arg("off").assert().success();
}

#[test]
fn vol_and_mute_are_noops_when_the_tv_is_unreachable() {
    let (_dir, config) = scratch();
    write_offline_settings(&config);

    tvctl_cmd(&config).args(["vol", "up", "2"]).assert().success();
    tvctl_cmd(&config).arg("mute").assert().success();
}
