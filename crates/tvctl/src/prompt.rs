//! Terminal-backed credential prompt for the ensure/renew cycle.

use tvctl_core::CoreError;
use tvctl_core::config::TokenPrompt;

pub struct TerminalPrompt;

impl TokenPrompt for TerminalPrompt {
    fn prompt(&self, reason: &str) -> Result<String, CoreError> {
        eprintln!("\nThe SmartThings token was rejected ({reason}).");
        eprintln!("Paste a new personal access token with scopes r:devices:* and x:devices:*.");
        rpassword::prompt_password("New SmartThings token: ").map_err(|e| CoreError::Credential {
            message: format!("prompt failed: {e}"),
        })
    }
}
