use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};
use loader_core::builder::{DEFAULT_BATCHES, DEFAULT_CONCURRENCY, DEFAULT_SIZE};
use loader_core::config::{self, Config};
use loader_core::utils::comma;
use loader_core::{BatchWriterBuilder, CassandraSink};
use log::info;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

mod prompt;

/// Inserts dummy data to a Cassandra database.
#[derive(Parser, Debug)]
#[command(name = "cassandra-loader", version)]
struct Args {
    /// config file to use instead of ~/.cassandra-loader/config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize cassandra connection configurations.
    Init,
    /// Insert dummy data to Cassandra.
    Run {
        /// Maximum number of concurrent requests.
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY,
              value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
        concurrency: usize,

        /// Number of batches.
        #[arg(short, long, default_value_t = DEFAULT_BATCHES)]
        batch: u64,

        /// Number of writes per batch.
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: u64,
    },
}

fn init(path: PathBuf) -> Result<()> {
    let stdin = io::stdin();
    let cfg = prompt::read_config(&mut stdin.lock(), &mut io::stdout())?;
    cfg.save(&path)?;
    info!("config saved to {}", path.display());
    println!("\nInitialized cassandra connection configurations.");
    Ok(())
}

async fn run(path: PathBuf, concurrency: usize, batches: u64, size: u64) -> Result<()> {
    let cfg = Config::load(&path).context("run `cassandra-loader init` to create one")?;

    let sink = Arc::new(CassandraSink::connect(&cfg).await?);
    let writer = BatchWriterBuilder::new()
        .with_concurrency(concurrency)
        .with_batches(batches)
        .with_size(size)
        .build(sink)?;

    println!("Inserting dummy data...");
    let total = writer
        .run(|b| println!("Batch no.{} completed.", b.index + 1))
        .await?;

    println!("Successfully written {} rows to Cassandra table.", comma(total));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let path = match args.config {
        Some(path) => path,
        None => config::default_path()?,
    };

    match args.command {
        None => {
            println!(
                "Run cassandra-loader init to initialize cassandra connection configurations."
            );
            Ok(())
        }
        Some(Command::Init) => init(path),
        Some(Command::Run {
            concurrency,
            batch,
            size,
        }) => run(path, concurrency, batch, size).await,
    }
}
