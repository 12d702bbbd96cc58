//! Domain-parameterized record generator.
//!
//! ORDER (fixed, one cluster per tick):
//!   1. Resolve master A, then master B, via get-or-create.
//!   2. Allocate the two dependent identifiers from the link registry
//!      and register the pair immediately. Each stream continues past
//!      both its registered ids and any stored dependent rows.
//!   3. Build both dependent records, embedding the masters' identifiers.
//!   4. Hand the cluster back with the masters' `is_new` flags.
//!
//! Identifier errors are not caught here: a malformed stored identifier
//! means the persisted state cannot be safely extended.

use crate::{
    error::SimResult,
    links::{LinkPair, LinkRegistry, LinkSpec},
    pool::EntityPool,
    record::Record,
    rng::{RngBank, RngSlot, SimRng},
    store::SimStore,
    types::{Domain, Tick},
};

/// What a business domain contributes to the generic generator.
pub trait DomainModel {
    type MasterA: Record;
    type MasterB: Record;
    type DependentA: Record;
    type DependentB: Record;

    const DOMAIN: Domain;
    const LINK: LinkSpec;

    /// Reject configurations the generators cannot draw from.
    fn validate(&self) -> SimResult<()>;

    fn mint_master_a(&self, id: String, seq: u64, rng: &mut SimRng) -> Self::MasterA;

    fn mint_master_b(&self, id: String, seq: u64, rng: &mut SimRng) -> Self::MasterB;

    fn build_dependents(
        &self,
        a: &Self::MasterA,
        b: &Self::MasterB,
        ids: &LinkPair,
        rng: &mut SimRng,
    ) -> (Self::DependentA, Self::DependentB);

    /// Human-readable line printed after each tick.
    fn progress_line(cluster: &Cluster<Self>) -> String
    where
        Self: Sized;
}

/// One tick's worth of linked output.
pub struct Cluster<D: DomainModel> {
    pub tick:        Tick,
    pub master_a:    D::MasterA,
    pub new_a:       bool,
    pub master_b:    D::MasterB,
    pub new_b:       bool,
    pub dependent_a: D::DependentA,
    pub dependent_b: D::DependentB,
}

pub struct Generator<D: DomainModel> {
    model:     D,
    masters_a: EntityPool<D::MasterA>,
    masters_b: EntityPool<D::MasterB>,
    links:     LinkRegistry,
    novelty:   f64,
    rng_bank:  RngBank,
}

impl<D: DomainModel> Generator<D> {
    /// Validate the model and hydrate pools and registry from the store.
    pub fn load(model: D, store: &SimStore, novelty: f64, seed: u64) -> SimResult<Self> {
        model.validate()?;

        // Seeded dependent rows may outnumber the registered pairs.
        let mut links = LinkRegistry::load(store, D::LINK)?;
        let ids_a = store.load_ids::<D::DependentA>()?;
        let ids_b = store.load_ids::<D::DependentB>()?;
        links.observe_existing(ids_a.iter().map(String::as_str), ids_b.iter().map(String::as_str))?;

        Ok(Self {
            masters_a: EntityPool::load(store)?,
            masters_b: EntityPool::load(store)?,
            links,
            model,
            novelty,
            rng_bank: RngBank::new(seed),
        })
    }

    pub fn generate(&mut self, store: &SimStore, tick: Tick) -> SimResult<Cluster<D>> {
        let model = &self.model;

        let mut rng_a = self.rng_bank.for_slot_at_tick(RngSlot::MasterA, tick);
        let (master_a, new_a) = self.masters_a.get_or_create(
            store,
            &mut rng_a,
            self.novelty,
            |id, seq, rng| model.mint_master_a(id, seq, rng),
        )?;

        let mut rng_b = self.rng_bank.for_slot_at_tick(RngSlot::MasterB, tick);
        let (master_b, new_b) = self.masters_b.get_or_create(
            store,
            &mut rng_b,
            self.novelty,
            |id, seq, rng| model.mint_master_b(id, seq, rng),
        )?;

        let ids = self.links.next_pair(store)?;

        let mut rng_d = self.rng_bank.for_slot_at_tick(RngSlot::Dependents, tick);
        let (dependent_a, dependent_b) = model.build_dependents(&master_a, &master_b, &ids, &mut rng_d);

        Ok(Cluster {
            tick,
            master_a,
            new_a,
            master_b,
            new_b,
            dependent_a,
            dependent_b,
        })
    }

    pub fn masters_a(&self) -> &EntityPool<D::MasterA> {
        &self.masters_a
    }

    pub fn masters_b(&self) -> &EntityPool<D::MasterB> {
        &self.masters_b
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    pub fn model(&self) -> &D {
        &self.model
    }

    pub fn novelty(&self) -> f64 {
        self.novelty
    }
}
