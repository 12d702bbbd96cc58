//! feed-runner: headless feed simulator.
//!
//! Usage:
//!   feed-runner --domain retail --config feed.json
//!   RUST_LOG=info feed-runner --domain education --config feed.json
//!
//! Runs one record cluster per tick until SIGINT/SIGTERM, then flushes
//! every pending buffer and exits.

use anyhow::{Context, Result};
use clap::Parser;
use feedsim_core::{
    config::{RemoteConfig, SimConfig},
    domain::{EducationModel, ManufacturingModel, RetailModel},
    driver::SimDriver,
    generator::DomainModel,
    remote::{JsonlSink, MemorySink, RemoteSink},
    store::SimStore,
    types::Domain,
};
use std::{
    path::PathBuf,
    sync::{atomic::AtomicBool, Arc},
};

#[derive(Parser, Debug)]
#[command(name = "feed-runner")]
#[command(about = "Synthesize linked retail, manufacturing or education records")]
struct Args {
    /// Business domain to simulate: retail, manufacturing or education
    #[arg(short, long)]
    domain: Domain,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH", default_value = "feed.json")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SimConfig::load(&args.config)?;

    println!("feed-runner");
    println!("  domain:    {}", args.domain);
    println!("  config:    {}", args.config.display());
    println!("  db:        {}", config.sqlite.db_path);
    println!("  remote:    {:?}", config.remote);
    println!();

    let store = SimStore::open(&config.sqlite.db_path)
        .with_context(|| format!("Cannot open {}", config.sqlite.db_path))?;
    store.migrate()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown))?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))?;

    match config.remote.clone() {
        RemoteConfig::Jsonl { dir } => {
            let sink = JsonlSink::open(&dir).with_context(|| format!("Cannot open sink dir {dir}"))?;
            run_domain(args.domain, &config, store, sink, &shutdown)
        }
        RemoteConfig::Memory => run_domain(args.domain, &config, store, MemorySink::new(), &shutdown),
    }
}

fn run_domain<K: RemoteSink>(
    domain: Domain,
    config: &SimConfig,
    store: SimStore,
    sink: K,
    shutdown: &AtomicBool,
) -> Result<()> {
    match domain {
        Domain::Retail => run(config, RetailModel::new(config.retail.clone()), store, sink, shutdown),
        Domain::Manufacturing => run(
            config,
            ManufacturingModel::new(config.manufacturing.clone()),
            store,
            sink,
            shutdown,
        ),
        Domain::Education => run(
            config,
            EducationModel::new(config.education.clone()),
            store,
            sink,
            shutdown,
        ),
    }
}

fn run<D: DomainModel, K: RemoteSink>(
    config: &SimConfig,
    model: D,
    store: SimStore,
    sink: K,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut driver = SimDriver::initialize(config, model, store, sink)?;
    let seeding = driver.seeding();
    if !seeding.streams.is_empty() {
        println!(
            "Seeded {} ({} link pairs)",
            seeding.streams.join(", "),
            seeding.links
        );
    }
    println!("Running with seed {}. Press Ctrl-C to stop.", driver.seed());

    let ticks = driver.run(shutdown)?;
    log::info!("{ticks} ticks generated");
    println!("Stopped and flushed all buffers.");
    Ok(())
}
