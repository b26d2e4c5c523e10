//! Command line host for the SharedId submodule
//!
//! # Usage
//!
//! ## Acquire Mode (default)
//! ```bash
//! sharedid --cookie-name _pubcid --verbose
//! ```
//!
//! ## Decode Mode
//! ```bash
//! sharedid decode '{"id":"01HZX3Q7","ns":true}'
//! ```
//!
//! ## Generate Mode
//! ```bash
//! sharedid generate --count 3
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sharedid_provider::cli::{
    acquire::{AcquireArgs, run_acquire_mode},
    decode::{DecodeArgs, run_decode_mode},
    generate::{GenerateArgs, run_generate_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "sharedid")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Acquire mode options (when no subcommand is provided)
    /// Identity service endpoint
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Cookie file the identity record is persisted in
    #[arg(short, long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Publisher cookie name handed to the submodule
    #[arg(long, value_name = "NAME")]
    cookie_name: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a stored value into the bid-request mapping
    Decode {
        /// Stored value as JSON
        value: String,
    },

    /// Print fresh local fallback ids
    Generate {
        /// Number of ids to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Decode { value }) => run_decode_mode(DecodeArgs { value }),
        Some(Commands::Generate { count }) => run_generate_mode(GenerateArgs { count }),
        None => {
            let args = AcquireArgs {
                endpoint: cli.endpoint,
                store: cli.store,
                cookie_name: cli.cookie_name,
                config: cli.config,
                verbose: cli.verbose,
            };
            run_acquire_mode(args).await
        }
    }
}
