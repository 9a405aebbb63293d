//! Handing rendered diagram text to the Mermaid live editor

use std::process::Command;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::DiagramError;

/// Base URL of the live editor; the encoded state is appended to it
pub const LIVE_EDITOR_URL: &str = "https://mermaidjs.github.io/mermaid-live-editor/#/edit/";

#[derive(Serialize)]
struct EditorState<'a> {
    code: &'a str,
    mermaid: EditorConfig,
}

#[derive(Serialize)]
struct EditorConfig {
    theme: &'static str,
}

/// Build a live editor URL that opens with `code` loaded
///
/// # Example
/// ```
/// use mermaidgen::export::{live_url, LIVE_EDITOR_URL};
///
/// let url = live_url("graph TB\n").unwrap();
/// assert!(url.starts_with(LIVE_EDITOR_URL));
/// ```
pub fn live_url(code: &str) -> Result<String, DiagramError> {
    let state = EditorState {
        code,
        mermaid: EditorConfig { theme: "default" },
    };
    let json = serde_json::to_vec(&state).map_err(|e| DiagramError::encoding_error(e.to_string()))?;
    let url = format!("{LIVE_EDITOR_URL}{}", URL_SAFE.encode(json));
    debug!(code_len = code.len(), url_len = url.len(), "Built live editor URL");
    Ok(url)
}

/// The command that opens a URL in the default browser on `os`
fn browser_command(os: &str, url: &str) -> Result<Command, DiagramError> {
    let mut command = match os {
        "linux" | "openbsd" | "freebsd" | "netbsd" => Command::new("xdg-open"),
        "macos" => Command::new("open"),
        "windows" => {
            let mut command = Command::new("rundll32");
            command.arg("url.dll,FileProtocolHandler");
            command
        }
        other => return Err(DiagramError::unsupported_platform(other)),
    };
    command.arg(url);
    Ok(command)
}

/// Open `url` in the host's default browser without waiting for it
pub fn open_in_browser(url: &str) -> Result<(), DiagramError> {
    let mut command = browser_command(std::env::consts::OS, url)?;
    command.spawn()?;
    info!(os = std::env::consts::OS, "Opened browser");
    Ok(())
}
