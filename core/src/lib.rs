//! feedsim-core: linked-record feed simulator.
//!
//! One cluster per tick: two master references resolved through the
//! entity pools, two dependent records paired through the link registry,
//! written through to SQLite and buffered out to the remote sink.

pub mod config;
pub mod dist;
pub mod domain;
pub mod driver;
pub mod error;
pub mod generator;
pub mod ids;
pub mod links;
pub mod name_generator;
pub mod pool;
pub mod record;
pub mod remote;
pub mod rng;
pub mod seed;
pub mod store;
pub mod types;
pub mod writer;
