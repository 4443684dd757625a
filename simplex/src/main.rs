//! Demo binary: connects to a cluster, loads one song and one playlist
//! entry, prints the playlist and closes the session.
//!
//! Set `RUST_LOG` to see driver logs, e.g. `RUST_LOG=scylla=debug simplex`.

use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use scylla::client::Compression;
use scylla::statement::Consistency;
use simplex::client::{parse_compression, parse_consistency, SessionConfig, SessionManager};
use simplex::demo::{self, KeyspaceName, SchemaSettings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Connects to a Cassandra or ScyllaDB cluster and runs the music catalog demo.
#[derive(Parser, Debug)]
#[command(name = "simplex", version, about, long_about = None)]
struct Cli {
    /// Address of the node to contact
    #[arg(env = "SIMPLEX_HOST", default_value = "localhost")]
    host: String,

    /// Native protocol port of the node
    #[arg(env = "SIMPLEX_PORT", default_value_t = 9042)]
    port: u16,

    /// Keyspace holding the demo tables
    #[arg(long, default_value = demo::DEFAULT_KEYSPACE)]
    keyspace: KeyspaceName,

    /// Replication factor used when creating the keyspace
    #[arg(long, default_value_t = demo::DEFAULT_REPLICATION_FACTOR)]
    replication_factor: u32,

    /// Consistency level of every statement (one, quorum, local_quorum, ...)
    #[arg(long, default_value = "one", value_parser = consistency_arg)]
    consistency: Consistency,

    /// Compression algorithm to use (lz4 or snappy); none if not given
    #[arg(long, value_parser = compression_arg)]
    compression: Option<Compression>,

    /// Assume the schema already exists instead of creating it
    #[arg(long)]
    skip_schema: bool,

    /// Drop the keyspace once the demo is done
    #[arg(long)]
    drop_schema: bool,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn consistency_arg(s: &str) -> Result<Consistency, String> {
    parse_consistency(s).ok_or_else(|| format!("unknown consistency level: {s}"))
}

fn compression_arg(s: &str) -> Result<Compression, String> {
    parse_compression(s).ok_or_else(|| format!("bad compression: {s}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "simplex=info,scylla=warn",
            1 => "simplex=debug,scylla=info",
            _ => "simplex=trace,scylla=debug",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    debug!(?cli, "Starting");

    let config = SessionConfig::new()
        .consistency(cli.consistency)
        .compression(cli.compression);
    let settings = SchemaSettings {
        keyspace: cli.keyspace,
        replication_factor: cli.replication_factor,
    };

    println!("Connecting to IP Address {}:{}...", cli.host, cli.port);
    let mut manager = SessionManager::with_config(config);
    let cluster = manager.connect(&cli.host, cli.port).await?;
    println!("{cluster}");

    if !cli.skip_schema {
        demo::create_schema(&manager, &settings)
            .await
            .context("Creating schema")?;
    }

    let song = demo::sample_song();
    let entry = demo::sample_playlist_entry();
    demo::load_data(
        &manager,
        &settings.keyspace,
        std::slice::from_ref(&song),
        std::slice::from_ref(&entry),
    )
    .await
    .context("Loading data")?;

    let playlist = demo::fetch_playlist(&manager, &settings.keyspace, entry.id, &entry.title)
        .await
        .context("Reading playlist")?;
    print!("{}", demo::render_playlist(&playlist));

    if cli.drop_schema {
        demo::drop_schema(&manager, &settings)
            .await
            .context("Dropping schema")?;
    }

    manager.close();
    Ok(())
}
