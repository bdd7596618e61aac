//! Binary entrypoint for the Zingle CLI.
//!
//! Commands:
//! - `start` - run the interactive console against a fresh in-memory store
//! - `init` - write a starter `config.toml`
//! - `limits` - print the effective capacity limits as JSON
//!
//! See the library crate docs for module‑level details: `zingle::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use zingle::config::Config;
use zingle::console::terminal;
use zingle::social::SocialStoreBuilder;

#[derive(Parser)]
#[command(name = "zingle")]
#[command(about = "An in-memory social graph with friends, mailboxes and groups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console
    Start {
        /// Override console pause after each result (ms)
        #[arg(long)]
        pause_ms: Option<u64>,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective limits as JSON
    Limits,
}

/// Load the config file if present; a missing file means defaults.
async fn load_config(path: &str) -> Result<Config> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Config::load(path).await
    } else {
        Ok(Config::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { pause_ms } => {
            let mut config = load_config(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            if let Some(ms) = pause_ms {
                config.console.pause_ms = ms;
            }
            info!("Starting Zingle v{}", env!("CARGO_PKG_VERSION"));
            if config.security.hash_passwords {
                info!("Passwords will be stored as Argon2id hashes");
            }
            let mut store = SocialStoreBuilder::from_config(&config)?.build();
            terminal::run(&mut store, &config).await?;
            info!(
                "Console closed: {} accounts, {} groups discarded",
                store.account_count(),
                store.group_count()
            );
        }
        Commands::Init { force } => {
            init_logging(&None, cli.verbose);
            if !force && tokio::fs::try_exists(&cli.config).await.unwrap_or(false) {
                warn!("{} already exists; use --force to overwrite", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Limits => {
            let config = load_config(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            let payload = serde_json::json!({
                "max_accounts": config.limits.max_accounts,
                "max_groups": config.limits.max_groups,
                "max_message_bytes": config.limits.max_message_bytes,
                "max_identifier_bytes": config.limits.max_identifier_bytes,
                "require_registered_members": config.groups.require_registered_members,
                "hash_passwords": config.security.hash_passwords,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Only echo to the console when stderr is a terminal; the menus own stdout.
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
