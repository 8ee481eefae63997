//! cryptkv CLI
//!
//! Command-line access to an encrypted cryptkv store.
//!
//! # Commands
//!
//! - `tables` - List tables
//! - `keys` - List the keys of a table
//! - `create-table` - Create a table
//! - `get` / `set` / `remove` - Read, write and delete values
//!
//! The passphrase comes from `--passphrase` or `CRYPTKV_PASSPHRASE`.

mod commands;

use clap::{Parser, Subcommand};
use commands::Format;
use cryptkv_core::{Config, EncryptedStore};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Encrypted, compressed key-value store.
#[derive(Parser)]
#[command(name = "cryptkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database file (".db" is appended when missing)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Passphrase used to encrypt and decrypt values
    #[arg(global = true, long, env = "CRYPTKV_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Seconds to wait for another process to release the store
    #[arg(global = true, long, default_value = "60")]
    lock_timeout: u64,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables
    Tables {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: Format,
    },

    /// List the keys of a table
    Keys {
        /// Table name
        table: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: Format,
    },

    /// Create a table (no-op if it exists)
    CreateTable {
        /// Table name
        name: String,
    },

    /// Print a decrypted value
    Get {
        /// Table name
        table: String,
        /// Key
        key: String,
    },

    /// Encrypt and store a value
    Set {
        /// Table name
        table: String,
        /// Key
        key: String,
        /// Value
        value: String,
    },

    /// Delete a key
    Remove {
        /// Table name
        table: String,
        /// Key
        key: String,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Version = cli.command {
        println!("cryptkv CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("cryptkv core v{}", cryptkv_core::VERSION);
        return Ok(());
    }

    let path = cli.path.ok_or("database path required (--path)")?;
    let config = Config::default().lock_timeout(Duration::from_secs(cli.lock_timeout));
    let mut store = EncryptedStore::open_with_config(&path, config)?;
    let passphrase = cli.passphrase.as_deref();
    let mut out = io::stdout().lock();

    let result = match &cli.command {
        Commands::Tables { format } => commands::tables::list(&store, *format, &mut out),
        Commands::Keys { table, format } => {
            commands::tables::keys(&store, table, *format, &mut out)
        }
        Commands::CreateTable { name } => commands::tables::create(&store, name),
        Commands::Get { table, key } => {
            let passphrase = passphrase.ok_or("passphrase required for get")?;
            commands::values::get(&store, table, key, passphrase, &mut out)
        }
        Commands::Set { table, key, value } => {
            let passphrase = passphrase.ok_or("passphrase required for set")?;
            commands::values::set(&store, table, key, value, passphrase)
        }
        Commands::Remove { table, key } => commands::values::remove(&store, table, key),
        Commands::Version => Ok(()),
    };

    store.close()?;
    result
}
