//! Mermaidgen CLI - Build Mermaid.js diagram text from JSON chart documents

mod cli;
mod document;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is configured inside run() once flags and env are known
    let mut app = cli::MermaidgenApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
