//! Interactive prompts
//!
//! Small stdin/stdout helpers for the interactive run, plus the credential
//! retry loop: keep asking for a token until the identity endpoint accepts
//! it. The loop is a plain `loop` rather than recursion so a stubborn
//! operator cannot grow the call stack.

use crate::client::ApiClient;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Print `message` without a newline and read one trimmed line of input.
pub fn prompt_line(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        anyhow::bail!("Input stream closed");
    }

    Ok(line.trim().to_string())
}

/// Obtain a working API client, prompting for the token as needed.
///
/// A pre-configured token (flag or environment) is probed first; on
/// rejection the operator is re-prompted until a credential validates.
pub fn acquire_client(base_url: &str, preset_token: Option<String>) -> Result<ApiClient> {
    let mut token = preset_token.filter(|t| !t.trim().is_empty());

    loop {
        let candidate = match token.take() {
            Some(t) => t,
            None => prompt_line("\nEnter your Webex API access token: ")?,
        };

        let client = ApiClient::new(base_url, candidate);
        if client.check_credential() {
            println!("{}", "\nToken access correct".green());
            return Ok(client);
        }

        println!(
            "{}",
            "\nToken access failed. Please check your access token.".red()
        );
    }
}
