//! protohash CLI - canonical digests of schema-described messages.

use clap::{Parser, Subcommand};
use protohash::DigestAlg;

mod commands;
mod config;
mod input;
mod logging;
mod output;

use commands::{canonical, hash, inspect, Target};

#[derive(Parser)]
#[command(name = "protohash")]
#[command(about = "Deterministic digests of schema-described messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the digest of a message
    Hash {
        #[command(flatten)]
        target: Target,
        /// Digest algorithm: xxh64, sha-256 or blake3 (default: xxh64)
        #[arg(long)]
        alg: Option<DigestAlg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the canonical byte stream of a message as hex
    Canonical {
        #[command(flatten)]
        target: Target,
    },
    /// List message types and their fields
    Inspect {
        /// Schema file (JSON)
        #[arg(long)]
        schema: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash { target, alg, json } => hash::run(target, alg, json),
        Commands::Canonical { target } => canonical::run(target),
        Commands::Inspect { schema, json } => inspect::run(schema, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
