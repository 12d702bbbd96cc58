//! Link registry: the sequence trail pairing two dependent-record streams.
//!
//! One pair is appended per generated cluster. The registry is not a
//! referential-integrity mechanism; it exists so each stream's next
//! identifier can be derived from the largest suffix recorded for it.
//! The two columns are tracked independently, so if they ever drift
//! apart each stream still continues from its own maximum.

use crate::{
    error::SimResult,
    ids::{IdAllocator, IdFormat},
    store::SimStore,
};

/// Where a domain's registry lives and how its two columns are formatted.
#[derive(Debug, Clone, Copy)]
pub struct LinkSpec {
    pub table:    &'static str,
    pub column_a: &'static str,
    pub column_b: &'static str,
    pub format_a: IdFormat,
    pub format_b: IdFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    pub a: String,
    pub b: String,
}

pub struct LinkRegistry {
    spec:   LinkSpec,
    pairs:  Vec<LinkPair>,
    next_a: IdAllocator,
    next_b: IdAllocator,
}

impl LinkRegistry {
    /// Hydrate from the durable store. Fails on any malformed identifier.
    pub fn load(store: &SimStore, spec: LinkSpec) -> SimResult<Self> {
        let pairs = store.load_links(&spec)?;
        let next_a = IdAllocator::from_ids(spec.format_a, pairs.iter().map(|p| p.a.as_str()))?;
        let next_b = IdAllocator::from_ids(spec.format_b, pairs.iter().map(|p| p.b.as_str()))?;
        log::info!("link registry {}: loaded {} pairs", spec.table, pairs.len());
        Ok(Self {
            spec,
            pairs,
            next_a,
            next_b,
        })
    }

    /// Persist and record one pair. No dedup, no existence checks.
    pub fn append(&mut self, store: &SimStore, pair: LinkPair) -> SimResult<()> {
        self.next_a.observe(&pair.a)?;
        self.next_b.observe(&pair.b)?;
        store.append_link(&self.spec, &pair)?;
        self.pairs.push(pair);
        Ok(())
    }

    /// Advance both streams past identifiers that exist outside the
    /// registry, such as seeded dependent rows that were never paired.
    pub fn observe_existing<'a, A, B>(&mut self, ids_a: A, ids_b: B) -> SimResult<()>
    where
        A: IntoIterator<Item = &'a str>,
        B: IntoIterator<Item = &'a str>,
    {
        for id in ids_a {
            self.next_a.observe(id)?;
        }
        for id in ids_b {
            self.next_b.observe(id)?;
        }
        Ok(())
    }

    /// Allocate the next identifier of each stream and register the pair.
    pub fn next_pair(&mut self, store: &SimStore) -> SimResult<LinkPair> {
        let pair = LinkPair {
            a: self.next_a.allocate()?.1,
            b: self.next_b.allocate()?.1,
        };
        self.append(store, pair.clone())?;
        Ok(pair)
    }

    pub fn pairs(&self) -> &[LinkPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
