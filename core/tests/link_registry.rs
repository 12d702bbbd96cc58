//! Link registry: sequence pairing of the two dependent streams.

use feedsim_core::{
    domain::{EducationModel, ManufacturingModel, RetailModel},
    error::SimError,
    generator::DomainModel,
    links::{LinkPair, LinkRegistry},
    store::SimStore,
};

fn store() -> SimStore {
    let store = SimStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn pair(a: &str, b: &str) -> LinkPair {
    LinkPair {
        a: a.into(),
        b: b.into(),
    }
}

#[test]
fn empty_registry_starts_both_streams_at_one() {
    let store = store();
    let mut links = LinkRegistry::load(&store, RetailModel::LINK).unwrap();
    assert!(links.is_empty());
    assert_eq!(links.next_pair(&store).unwrap(), pair("S0001", "I0001"));

    let mut links = LinkRegistry::load(&store, ManufacturingModel::LINK).unwrap();
    assert_eq!(links.next_pair(&store).unwrap(), pair("DT001", "MT001"));

    let mut links = LinkRegistry::load(&store, EducationModel::LINK).unwrap();
    assert_eq!(links.next_pair(&store).unwrap(), pair("R0001", "RU0001"));
}

#[test]
fn n_allocations_leave_exactly_n_rows() {
    let store = store();
    let mut links = LinkRegistry::load(&store, RetailModel::LINK).unwrap();
    for n in 1..=12u64 {
        let p = links.next_pair(&store).unwrap();
        assert_eq!(p, pair(&format!("S{n:04}"), &format!("I{n:04}")));
    }
    assert_eq!(links.len(), 12);
    assert_eq!(store.row_count("retail_mem").unwrap(), 12);

    let reloaded = LinkRegistry::load(&store, RetailModel::LINK).unwrap();
    assert_eq!(reloaded.pairs(), links.pairs());
}

#[test]
fn misaligned_streams_each_continue_from_own_max() {
    let store = store();
    let mut links = LinkRegistry::load(&store, RetailModel::LINK).unwrap();
    links.append(&store, pair("S0009", "I0002")).unwrap();
    links.append(&store, pair("S0003", "I0004")).unwrap();

    let mut reloaded = LinkRegistry::load(&store, RetailModel::LINK).unwrap();
    assert_eq!(reloaded.next_pair(&store).unwrap(), pair("S0010", "I0005"));
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn append_does_not_deduplicate() {
    let store = store();
    let mut links = LinkRegistry::load(&store, ManufacturingModel::LINK).unwrap();
    links.append(&store, pair("DT001", "MT001")).unwrap();
    links.append(&store, pair("DT001", "MT001")).unwrap();
    assert_eq!(store.row_count("mfg_mem").unwrap(), 2);
}

#[test]
fn malformed_stored_link_is_fatal() {
    let store = store();
    store
        .append_link(&RetailModel::LINK, &pair("SALE-1", "I0001"))
        .unwrap();
    assert!(matches!(
        LinkRegistry::load(&store, RetailModel::LINK),
        Err(SimError::MalformedId { prefix: "S", .. })
    ));
}
