//! One-time seeding from flat files.
//!
//! For each stream whose worksheet is empty (at most a header row), the
//! configured CSV file is parsed, written to the worksheet as header plus
//! raw rows, and mirrored into the durable store. A missing or malformed
//! file is not fatal: that stream is skipped and its pool starts empty.

use crate::{
    config::SimConfig,
    error::SimResult,
    generator::DomainModel,
    links::LinkPair,
    record::Record,
    remote::RemoteSink,
    store::SimStore,
    types::SheetRow,
};

/// Which streams were seeded during startup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub streams: Vec<&'static str>,
    pub links:   usize,
}

/// Parsed seed file: the raw rows for the sink and the typed records.
struct SeedFile<R> {
    sheet:   Vec<SheetRow>,
    records: Vec<R>,
}

/// Seed all four streams of domain `D`, then pair the two dependent
/// streams positionally into the link registry.
pub fn seed_domain<D: DomainModel>(
    config: &SimConfig,
    store: &SimStore,
    sink: &mut dyn RemoteSink,
) -> SimResult<SeedReport> {
    let mut report = SeedReport::default();

    if seed_stream::<D::MasterA>(config, store, sink)?.is_some() {
        report.streams.push(D::MasterA::STREAM);
    }
    if seed_stream::<D::MasterB>(config, store, sink)?.is_some() {
        report.streams.push(D::MasterB::STREAM);
    }

    let dependents_a = seed_stream::<D::DependentA>(config, store, sink)?;
    if dependents_a.is_some() {
        report.streams.push(D::DependentA::STREAM);
    }
    let dependents_b = seed_stream::<D::DependentB>(config, store, sink)?;
    if dependents_b.is_some() {
        report.streams.push(D::DependentB::STREAM);
    }

    if let (Some(a), Some(b)) = (dependents_a, dependents_b) {
        let pairs: Vec<LinkPair> = a
            .iter()
            .zip(b.iter())
            .map(|(a, b)| LinkPair {
                a: a.id().to_string(),
                b: b.id().to_string(),
            })
            .collect();
        store.append_links(&D::LINK, &pairs)?;
        report.links = pairs.len();
    }

    log::info!(
        "seed {}: streams {:?}, {} link pairs",
        D::DOMAIN,
        report.streams,
        report.links
    );
    Ok(report)
}

/// Seed one stream. `Ok(None)` means it was skipped.
pub fn seed_stream<R: Record>(
    config: &SimConfig,
    store: &SimStore,
    sink: &mut dyn RemoteSink,
) -> SimResult<Option<Vec<R>>> {
    let range = config.worksheet(R::STREAM)?;
    if !sink.is_empty(range)? {
        log::info!("seed {}: worksheet {range} already populated", R::STREAM);
        return Ok(None);
    }
    let Some(path) = config.csv_path(R::STREAM) else {
        log::warn!("seed {}: no seed file configured, skipping", R::STREAM);
        return Ok(None);
    };
    let file = match read_seed_file::<R>(path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("seed {}: cannot use {path}: {e}; skipping", R::STREAM);
            return Ok(None);
        }
    };

    sink.write_all(range, &file.sheet)?;
    store.upsert_records(&file.records)?;
    log::info!("seed {}: {} rows from {path}", R::STREAM, file.records.len());
    Ok(Some(file.records))
}

fn read_seed_file<R: Record>(path: &str) -> SimResult<SeedFile<R>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut sheet = vec![headers.iter().map(str::to_string).collect::<SheetRow>()];
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: R = row.deserialize(Some(&headers))?;
        // A seed id that the allocator cannot parse would poison the pool.
        R::ID_FORMAT.parse(record.id())?;
        sheet.push(row.iter().map(str::to_string).collect());
        records.push(record);
    }
    Ok(SeedFile { sheet, records })
}
