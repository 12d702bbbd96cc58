//! The simulation driver: one fixed-cadence loop per run.
//!
//! STATES: Initializing → Running → Draining → Stopped.
//!
//! RULES:
//!   - One tick at a time; a tick always completes, including its
//!     write-through persistence, before cancellation is honoured.
//!   - Local write happens before the remote enqueue.
//!   - Every writer is flushed exactly once on the way out, in the fixed
//!     order master A, master B, dependent A, dependent B, on every exit
//!     path of `run` (cancellation or fatal error).

use crate::{
    config::SimConfig,
    error::{SimError, SimResult},
    generator::{Cluster, DomainModel, Generator},
    record::{sheet_row, Record},
    remote::RemoteSink,
    seed::{seed_domain, SeedReport},
    store::SimStore,
    types::Tick,
    writer::BufferedSinkWriter,
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

/// Longest uninterrupted sleep between cancellation checks.
const PAUSE_SLICE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Running,
    Draining,
    Stopped,
}

// Writer slots, in flush order.
const MASTER_A: usize = 0;
const MASTER_B: usize = 1;
const DEPENDENT_A: usize = 2;
const DEPENDENT_B: usize = 3;

pub struct SimDriver<D: DomainModel, K: RemoteSink> {
    state:      DriverState,
    store:      SimStore,
    sink:       K,
    generator:  Generator<D>,
    writers:    Vec<BufferedSinkWriter>,
    tick:       Tick,
    tick_delay: Duration,
    seed:       u64,
    seeding:    SeedReport,
}

impl<D: DomainModel, K: RemoteSink> SimDriver<D, K> {
    /// Seed empty worksheets, hydrate pools and registry, build one writer
    /// per stream. The driver is `Initializing` until all of that has
    /// succeeded; the returned driver is `Running`.
    pub fn initialize(config: &SimConfig, model: D, store: SimStore, mut sink: K) -> SimResult<Self> {
        log::info!("driver {}: initializing", D::DOMAIN);

        let seeding = seed_domain::<D>(config, &store, &mut sink)?;
        let seed = config.resolve_seed();
        let generator = Generator::load(model, &store, config.novelty_probability, seed)?;

        let writer = |stream: &'static str| -> SimResult<BufferedSinkWriter> {
            Ok(BufferedSinkWriter::new(
                stream,
                config.worksheet(stream)?,
                config.buffer_size,
            ))
        };
        let writers = vec![
            writer(D::MasterA::STREAM)?,
            writer(D::MasterB::STREAM)?,
            writer(D::DependentA::STREAM)?,
            writer(D::DependentB::STREAM)?,
        ];

        let mut driver = Self {
            state: DriverState::Initializing,
            store,
            sink,
            generator,
            writers,
            tick: 0,
            tick_delay: config.tick_delay(),
            seed,
            seeding,
        };
        driver.transition(DriverState::Running);
        log::info!("driver {}: seed {seed}", D::DOMAIN);
        Ok(driver)
    }

    fn transition(&mut self, to: DriverState) {
        log::info!("driver {}: {:?} -> {:?}", D::DOMAIN, self.state, to);
        self.state = to;
    }

    /// Generate one cluster, persist its dependent records, and enqueue
    /// first-sight masters plus both dependents for the remote sink.
    pub fn tick(&mut self) -> SimResult<Cluster<D>> {
        if self.state != DriverState::Running {
            return Err(SimError::DriverStopped);
        }
        let tick = self.tick + 1;
        let cluster = self.generator.generate(&self.store, tick)?;
        self.tick = tick;

        self.store.upsert_record(&cluster.dependent_a)?;
        self.store.upsert_record(&cluster.dependent_b)?;

        let sink: &mut dyn RemoteSink = &mut self.sink;
        if cluster.new_a {
            self.writers[MASTER_A].add(sheet_row(&cluster.master_a)?, sink)?;
        }
        if cluster.new_b {
            self.writers[MASTER_B].add(sheet_row(&cluster.master_b)?, sink)?;
        }
        self.writers[DEPENDENT_A].add(sheet_row(&cluster.dependent_a)?, sink)?;
        self.writers[DEPENDENT_B].add(sheet_row(&cluster.dependent_b)?, sink)?;

        Ok(cluster)
    }

    /// Tick until `shutdown` is set, printing one progress line per tick,
    /// then drain. Returns the number of ticks run.
    pub fn run(&mut self, shutdown: &AtomicBool) -> SimResult<u64> {
        let outcome = self.run_loop(shutdown);
        let drained = self.drain();
        match (outcome, drained) {
            (Ok(ticks), Ok(())) => Ok(ticks),
            (Err(e), drained) => {
                if let Err(flush_err) = drained {
                    log::error!("driver {}: drain after failure also failed: {flush_err}", D::DOMAIN);
                }
                Err(e)
            }
            (Ok(_), Err(e)) => Err(e),
        }
    }

    fn run_loop(&mut self, shutdown: &AtomicBool) -> SimResult<u64> {
        let mut ticks = 0;
        while !shutdown.load(Ordering::SeqCst) {
            let cluster = self.tick()?;
            println!("{}", D::progress_line(&cluster));
            ticks += 1;
            self.pause(shutdown);
        }
        log::info!("driver {}: cancellation received after {ticks} ticks", D::DOMAIN);
        Ok(ticks)
    }

    /// Sleep for the inter-tick delay, waking early on cancellation.
    fn pause(&self, shutdown: &AtomicBool) {
        let deadline = Instant::now() + self.tick_delay;
        loop {
            if shutdown.load(Ordering::SeqCst) {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep(PAUSE_SLICE.min(deadline - now));
        }
    }

    /// Flush every writer once, in fixed order, and stop. A failing flush
    /// does not prevent the remaining writers from flushing; the first
    /// error is returned. Calling this on a stopped driver does nothing.
    pub fn drain(&mut self) -> SimResult<()> {
        if self.state == DriverState::Stopped {
            return Ok(());
        }
        self.transition(DriverState::Draining);
        let mut first_err = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.flush(&mut self.sink) {
                log::error!("driver {}: flush of {} failed: {e}", D::DOMAIN, writer.stream());
                first_err.get_or_insert(e);
            }
        }
        self.transition(DriverState::Stopped);
        log::info!("driver {}: stopped after {} ticks", D::DOMAIN, self.tick);
        first_err.map_or(Ok(()), Err)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn seeding(&self) -> &SeedReport {
        &self.seeding
    }

    pub fn generator(&self) -> &Generator<D> {
        &self.generator
    }

    pub fn store(&self) -> &SimStore {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Writers in flush order: master A, master B, dependent A, dependent B.
    pub fn writers(&self) -> &[BufferedSinkWriter] {
        &self.writers
    }

    pub fn writer(&self, stream: &str) -> Option<&BufferedSinkWriter> {
        self.writers.iter().find(|w| w.stream() == stream)
    }
}
