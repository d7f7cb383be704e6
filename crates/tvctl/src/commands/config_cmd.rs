//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::Input;

use tvctl_config::Settings;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::{self, CliError};

// ── Helpers ─────────────────────────────────────────────────────────

/// The settings path this invocation uses (--config wins).
pub fn settings_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(tvctl_config::config_path)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Format settings for display, masking sensitive fields.
fn format_settings_redacted(settings: &Settings) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    let field = |out: &mut String, key: &str, value: &Option<String>| {
        if let Some(v) = value {
            let _ = writeln!(out, "{key} = \"{v}\"");
        }
    };
    let secret = |out: &mut String, key: &str, value: &Option<String>| {
        if value.is_some() {
            let _ = writeln!(out, "{key} = \"****\"");
        }
    };

    field(&mut out, "address", &settings.address);
    if let Some(port) = settings.port {
        let _ = writeln!(out, "port = {port}");
    }
    field(&mut out, "mac", &settings.mac);
    secret(&mut out, "cloud_token", &settings.cloud_token);
    field(&mut out, "cloud_device_id", &settings.cloud_device_id);
    secret(&mut out, "pairing_token", &settings.pairing_token);
    field(&mut out, "client_id", &settings.client_id);
    field(&mut out, "cloud_api_url", &settings.cloud_api_url);

    if out.is_empty() {
        out.push_str("(no settings -- run `tvctl config init`)\n");
    }
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = settings_path(global);

    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            eprintln!("tvctl — settings wizard");
            eprintln!("  Settings file: {}\n", path.display());

            let address: String = Input::new()
                .with_prompt("TV address")
                .interact_text()
                .map_err(prompt_err)?;

            let mac: String = Input::new()
                .with_prompt("TV MAC address")
                .interact_text()
                .map_err(prompt_err)?;

            let cloud_device_id: String = Input::new()
                .with_prompt("SmartThings device id")
                .interact_text()
                .map_err(prompt_err)?;

            eprintln!("\n  The token needs scopes r:devices:* and x:devices:*.");
            let cloud_token =
                rpassword::prompt_password("SmartThings token: ").map_err(prompt_err)?;
            if cloud_token.is_empty() {
                return Err(CliError::Validation {
                    field: "cloud_token".into(),
                    reason: "token cannot be empty".into(),
                });
            }

            // Keep anything already established (pairing token, client id).
            let mut settings =
                tvctl_config::load_document(&path).map_err(|e| error::from_config(e, &path))?;
            settings.address = Some(address);
            settings.mac = Some(mac);
            settings.cloud_device_id = Some(cloud_device_id);
            settings.cloud_token = Some(cloud_token);

            tvctl_config::save_settings_to(&path, &settings)
                .map_err(|e| error::from_config(e, &path))?;

            eprintln!("\n✓ Settings written to {}", path.display());
            eprintln!("  Test it: tvctl token check");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let settings =
                tvctl_config::load_document(&path).map_err(|e| error::from_config(e, &path))?;
            print!("{}", format_settings_redacted(&settings));
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut settings =
                tvctl_config::load_document(&path).map_err(|e| error::from_config(e, &path))?;

            // An empty value clears optional keys.
            let optional = |v: String| if v.is_empty() { None } else { Some(v) };

            match key.as_str() {
                "address" => settings.address = Some(value),
                "port" => {
                    settings.port = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "port".into(),
                        reason: "must be a port number".into(),
                    })?);
                }
                "mac" => settings.mac = Some(value),
                "cloud_token" => settings.cloud_token = Some(value),
                "cloud_device_id" => settings.cloud_device_id = Some(value),
                "pairing_token" => settings.pairing_token = optional(value),
                "client_id" => settings.client_id = optional(value),
                "cloud_api_url" => settings.cloud_api_url = optional(value),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown settings key '{other}'. Valid keys: address, port, mac, \
                             cloud_token, cloud_device_id, pairing_token, client_id, cloud_api_url"
                        ),
                    });
                }
            }

            tvctl_config::save_settings_to(&path, &settings)
                .map_err(|e| error::from_config(e, &path))?;
            eprintln!("✓ Set {key} in {}", path.display());
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
