//! Command-line interface for the mermaidgen utility
//!
//! Reads JSON chart documents and turns them into Mermaid text or live
//! editor links.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use crate::document::ChartDocument;
use mermaidgen::core::logging::init_logging;
use mermaidgen::export::{live_url, open_in_browser};

/// Mermaidgen - Build Mermaid.js diagram text from chart documents
#[derive(Parser)]
#[command(name = "mermaidgen")]
#[command(about = "A Rust utility to build Mermaid.js flowchart and gantt text from JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a chart document to Mermaid text
    Render {
        /// Input chart document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for Mermaid text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the live editor URL for a chart document
    Url {
        /// Input chart document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Open a chart document in the live editor
    View {
        /// Input chart document (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show supported chart kinds
    Kinds {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// One-line description of a chart kind
fn describe(kind: &str) -> &'static str {
    match kind {
        "flowchart" => "Flowcharts with nested subgraphs, edges and styles",
        "gantt" => "Gantt charts with sections and task dependencies",
        _ => "",
    }
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct MermaidgenApp;

impl MermaidgenApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("MERMAIDGEN_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("MERMAIDGEN_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Mermaidgen v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render { input, output } => self.render_command(input, output, cli.verbose),
            Commands::Url { input } => self.url_command(input, cli.verbose),
            Commands::View { input } => self.view_command(input, cli.verbose),
            Commands::Kinds { json } => self.kinds_command(json, cli.verbose),
        }
    }

    /// Read and parse a chart document
    pub fn load_document(&self, input: Option<PathBuf>, verbose: bool) -> Result<ChartDocument> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        let document = ChartDocument::from_json(&content)?;
        info!(kind = document.kind(), "Loaded chart document");
        Ok(document)
    }

    /// Handle the render command
    fn render_command(&self, input: Option<PathBuf>, output: Option<PathBuf>, verbose: bool) -> Result<()> {
        let document = self.load_document(input, verbose)?;
        let text = document.render()?;
        if verbose {
            eprintln!("Rendered {} chart", document.kind());
        }
        self.write_output(output, &text)
    }

    /// Handle the url command
    fn url_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let document = self.load_document(input, verbose)?;
        let url = live_url(&document.render()?)?;
        self.write_output(None, &url)
    }

    /// Handle the view command
    fn view_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let document = self.load_document(input, verbose)?;
        let url = live_url(&document.render()?)?;
        if verbose {
            eprintln!("Opening {}", url);
        }
        open_in_browser(&url)?;
        Ok(())
    }

    /// Handle the kinds command
    fn kinds_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported chart kinds");
        }
        println!("{}", self.kinds_text(json)?);
        Ok(())
    }

    fn kinds_text(&self, json: bool) -> Result<String> {
        let kinds = mermaidgen::plugins::kinds();
        if json {
            let entries: Vec<_> = kinds
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "name": kind,
                        "description": describe(kind),
                        "status": "supported"
                    })
                })
                .collect();
            let value = serde_json::json!({
                "supported_kinds": entries,
                "total": kinds.len()
            });
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            let mut text = String::from("Supported chart kinds:\n");
            for kind in kinds {
                text.push_str(&format!("  {:<10} - {}\n", kind, describe(kind)));
            }
            text.push_str(&format!("\nTotal: {} chart kinds supported", kinds.len()));
            Ok(text)
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content)
                    .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e))?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const GANTT_DOC: &str =
        r#"{ "kind": "gantt", "tasks": [ { "id": "t", "start": "2024-01-01T00:00:00Z", "duration": "2d" } ] }"#;

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec!["mermaidgen", "render", "--input", "chart.json", "--output", "chart.mmd"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render { input, output } => {
                assert_eq!(input.unwrap().to_string_lossy(), "chart.json");
                assert_eq!(output.unwrap().to_string_lossy(), "chart.mmd");
            }
            _ => panic!("Expected Render command"),
        }
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_cli_parsing_url_and_view() {
        let cli = Cli::try_parse_from(["mermaidgen", "url", "-i", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Url { input: Some(_) }));

        let cli = Cli::try_parse_from(["mermaidgen", "view"]).unwrap();
        assert!(matches!(cli.command, Commands::View { input: None }));
    }

    #[test]
    fn test_cli_parsing_kinds_and_global_flags() {
        let args = vec!["mermaidgen", "--verbose", "--log-format", "json", "kinds", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Kinds { json: true }));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["mermaidgen", "convert"]).is_err());
    }

    #[test]
    fn test_load_document_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(&path, GANTT_DOC).unwrap();

        let app = MermaidgenApp::new();
        let document = app.load_document(Some(path), false).unwrap();
        assert_eq!(document.kind(), "gantt");
        assert!(document
            .render()
            .unwrap()
            .ends_with("t :t, 2024-01-01T00:00:00Z, 2d\n"));
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempdir().unwrap();
        let app = MermaidgenApp::new();
        let err = app.read_input(Some(dir.path().join("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_render_command_writes_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("chart.json");
        let output = dir.path().join("chart.mmd");
        fs::write(&input, r#"{ "kind": "flowchart", "items": [ { "type": "node", "id": "a" } ] }"#)
            .unwrap();

        let app = MermaidgenApp::new();
        app.render_command(Some(input), Some(output.clone()), false).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "graph TB\na[a]\n");
    }

    #[test]
    fn test_write_output_to_file() {
        let app = MermaidgenApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("output.txt");

        app.write_output(Some(file_path.clone()), "gantt\n").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "gantt\n");
    }

    #[test]
    fn test_kinds_text() {
        let app = MermaidgenApp::new();
        let text = app.kinds_text(false).unwrap();
        assert!(text.contains("flowchart"));
        assert!(text.contains("gantt"));
        assert!(text.ends_with("Total: 2 chart kinds supported"));

        let json: serde_json::Value = serde_json::from_str(&app.kinds_text(true).unwrap()).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["supported_kinds"][1]["name"], "gantt");
    }
}
