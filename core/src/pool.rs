//! In-memory pool of master entities for one category.
//!
//! RULE: `get_or_create` is the only mutator. Every minted entity is
//! written through to the durable store before it joins the pool.

use crate::{
    error::SimResult,
    ids::IdAllocator,
    record::Record,
    rng::SimRng,
    store::SimStore,
};

/// Default chance that a tick mints a new master instead of reusing one.
pub const DEFAULT_NOVELTY_PROBABILITY: f64 = 0.30;

pub struct EntityPool<E: Record> {
    entities:  Vec<E>,
    allocator: IdAllocator,
}

impl<E: Record> EntityPool<E> {
    /// Hydrate from the durable store. Fails if any stored identifier
    /// does not match `E::ID_FORMAT`.
    pub fn load(store: &SimStore) -> SimResult<Self> {
        let entities: Vec<E> = store.load_records()?;
        let allocator = IdAllocator::from_ids(E::ID_FORMAT, entities.iter().map(|e| e.id()))?
            .resume_from(store.load_counter(E::TABLE)?);
        log::info!(
            "pool {}: loaded {} entities, next id {}",
            E::TABLE,
            entities.len(),
            E::ID_FORMAT.render(allocator.peek_next())
        );
        Ok(Self { entities, allocator })
    }

    /// Reuse a random existing entity, or mint one with probability
    /// `novelty` (always when the pool is empty).
    ///
    /// `mint` receives the new identifier and its numeric sequence and
    /// fills in the category-specific fields. Returns `(entity, is_new)`.
    pub fn get_or_create<F>(
        &mut self,
        store: &SimStore,
        rng: &mut SimRng,
        novelty: f64,
        mint: F,
    ) -> SimResult<(E, bool)>
    where
        F: FnOnce(String, u64, &mut SimRng) -> E,
    {
        let wants_new = rng.chance(novelty);
        if wants_new || self.entities.is_empty() {
            let (seq, id) = self.allocator.allocate()?;
            let entity = mint(id, seq, rng);
            store.upsert_record(&entity)?;
            store.save_counter(E::TABLE, self.allocator.peek_next())?;
            self.entities.push(entity.clone());
            return Ok((entity, true));
        }
        let existing = rng.pick(&self.entities).clone();
        Ok((existing, false))
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.iter().any(|e| e.id() == id)
    }
}
