//! # Pentama CLI
//!
//! Entry point: argument parsing, logging setup, dispatch.

use clap::{Parser, Subcommand};
use pentama::cli::{
    self, CliError, cmd_classify, cmd_evaluate, cmd_guard, cmd_token_decode, cmd_token_encode,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pentama", version, about = "Thesis progress and access gating")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute progress for a user snapshot.
    Evaluate {
        /// Snapshot JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// student, lecturer, admin or auto.
        #[arg(short, long, default_value = "auto")]
        role: String,
        /// Print flags only.
        #[arg(long)]
        simple: bool,
        #[arg(long)]
        json: bool,
    },
    /// Classify a username as NIM or NIP.
    Classify {
        identity: String,
        /// Treat a NIP holder as administrator.
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        json: bool,
    },
    /// Check whether a user may enter a route.
    Guard {
        #[arg(short, long)]
        input: PathBuf,
        /// Route, e.g. /result.
        #[arg(short, long)]
        path: String,
        #[arg(short, long, default_value = "auto")]
        role: String,
        #[arg(long)]
        json: bool,
    },
    /// Encode or decode session tokens.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Compute progress and print it as a token.
    Encode {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "auto")]
        role: String,
    },
    /// Print the progress carried by a token.
    Decode {
        token: String,
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Evaluate {
            input,
            role,
            simple,
            json,
        } => cmd_evaluate(&input, cli::parse_role(&role)?, simple, json),
        Command::Classify {
            identity,
            admin,
            json,
        } => cmd_classify(&identity, admin, json),
        Command::Guard {
            input,
            path,
            role,
            json,
        } => cmd_guard(&input, cli::parse_role(&role)?, &path, json).map(|_| ()),
        Command::Token { action } => match action {
            TokenAction::Encode { input, role } => cmd_token_encode(&input, cli::parse_role(&role)?),
            TokenAction::Decode { token, json } => cmd_token_decode(&token, json),
        },
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
