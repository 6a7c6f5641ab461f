//! Binary entry point for branchctx.
//!
//! `branchctx serve` runs the MCP server on stdio; the remaining subcommands
//! run one branch operation and print its text.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use branchctx::config::BranchCtxConfig;
use branchctx::mcp::McpServer;
use branchctx::observability::{self, InitOptions};
use branchctx::services::BranchService;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// branchctx - per-branch notes and context for AI coding assistants.
#[derive(Parser)]
#[command(name = "branchctx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdio.
    Serve,

    /// Save a note to the current branch.
    Note {
        /// The note text.
        text: String,

        /// Note category (general, todo, decision, issue, ...).
        #[arg(short = 'C', long, default_value = "general")]
        category: String,
    },

    /// List notes for the current branch or a named one.
    Notes {
        /// Branch to list instead of the current one.
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Clear all notes on the current branch.
    Clear,

    /// Replace the current branch's context.
    Context {
        /// The context text.
        text: String,
    },

    /// Show `git diff --stat` between two branches.
    Compare {
        /// Base branch.
        branch1: String,
        /// Branch compared against the base.
        branch2: String,
    },

    /// List branches that have saved notes or context.
    Branches,

    /// Print the current branch.
    Current,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match BranchCtxConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &BranchCtxConfig) -> branchctx::Result<()> {
    let service = BranchService::from_config(config);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        repo_path = %config.repo_path.display(),
        "branchctx starting"
    );

    let output = match command {
        Commands::Serve => return McpServer::new(service).run_stdio(),
        Commands::Note { text, category } => service.save_note(&text, &category)?,
        Commands::Notes { branch } => service.list_notes(branch.as_deref())?,
        Commands::Clear => service.clear_notes()?,
        Commands::Context { text } => service.save_context(&text)?,
        Commands::Compare { branch1, branch2 } => service.compare_branches(&branch1, &branch2),
        Commands::Branches => service.list_branches_with_data()?,
        Commands::Current => service.current_branch(),
    };

    println!("{output}");
    Ok(())
}
