#![cfg(feature = "lru-cache")]

mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use std::sync::atomic::{AtomicUsize, Ordering};

const INTERPRETATION_VS: &str = "http://hl7.org/fhir/ValueSet/observation-interpretation";
const INTERPRETATION_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/v3-ObservationInterpretation";

/// Counts how often membership is actually resolved.
struct CountingTerminology {
    inner: InMemoryTerminology,
    lookups: AtomicUsize,
}

impl CountingTerminology {
    fn new() -> Self {
        Self {
            inner: InMemoryTerminology::new().with_value_set(
                INTERPRETATION_VS,
                INTERPRETATION_SYSTEM,
                ["H", "L", "N"],
            ),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl TerminologyService for CountingTerminology {
    fn has_value_set(&self, url: &str) -> bool {
        self.inner.has_value_set(url)
    }

    fn is_member(&self, system: Option<&str>, code: &str, value_set: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.is_member(system, code, value_set)
    }
}

#[test]
fn zero_capacity_is_a_configuration_error() {
    let err = CachingTerminology::new(InMemoryTerminology::new(), 0).unwrap_err();
    assert!(matches!(err, FhirModelError::Configuration { .. }));
}

#[test]
fn repeated_lookups_are_served_from_the_cache() {
    let cache = CachingTerminology::new(CountingTerminology::new(), 16).unwrap();

    for _ in 0..3 {
        assert!(cache.is_member(Some(INTERPRETATION_SYSTEM), "H", INTERPRETATION_VS));
        assert!(!cache.is_member(Some(INTERPRETATION_SYSTEM), "HH", INTERPRETATION_VS));
    }

    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 2);
    assert_eq!(cache.cached_len(), 2);

    cache.clear();
    assert_eq!(cache.cached_len(), 0);
    assert!(cache.is_member(Some(INTERPRETATION_SYSTEM), "H", INTERPRETATION_VS));
    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 3);
}

#[test]
fn versioned_and_unversioned_urls_share_a_cache_entry() {
    let cache = CachingTerminology::new(CountingTerminology::new(), 4).unwrap();
    let versioned = format!("{INTERPRETATION_VS}|4.0.1");

    assert!(cache.is_member(Some(INTERPRETATION_SYSTEM), "L", INTERPRETATION_VS));
    assert!(cache.is_member(Some(INTERPRETATION_SYSTEM), "L", &versioned));
    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn least_recently_used_entries_are_evicted() {
    let cache = CachingTerminology::new(CountingTerminology::new(), 2).unwrap();
    for code in ["H", "L", "N"] {
        cache.is_member(Some(INTERPRETATION_SYSTEM), code, INTERPRETATION_VS);
    }
    assert_eq!(cache.cached_len(), 2);

    // "H" was evicted, so it is resolved again
    cache.is_member(Some(INTERPRETATION_SYSTEM), "H", INTERPRETATION_VS);
    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 4);
}

#[test]
fn cached_service_plugs_into_build_options() {
    let cache = CachingTerminology::new(CountingTerminology::new(), 16).unwrap();
    let options = BuildOptions::default().with_terminology(&cache);

    for _ in 0..5 {
        let built = heart_rate_builder()
            .add_interpretation(concept(INTERPRETATION_SYSTEM, "N"))
            .build_with(&options)
            .unwrap();
        assert!(!built.has_warnings());
    }
    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn in_memory_terminology_accepts_incremental_concepts() {
    let mut terminology = InMemoryTerminology::new();
    terminology.add_concept(INTERPRETATION_VS, INTERPRETATION_SYSTEM, "A");
    terminology.add_concept(INTERPRETATION_VS, INTERPRETATION_SYSTEM, "AA");

    assert_eq!(terminology.value_set_count(), 1);
    assert!(terminology.is_member(None, "AA", INTERPRETATION_VS));
    assert!(!terminology.is_member(Some("http://other.org"), "AA", INTERPRETATION_VS));
}
