mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use pretty_assertions::assert_eq;

#[test]
fn rebuilding_from_a_node_gives_an_equal_node() {
    let observation = heart_rate_builder()
        .id("hr-1")
        .add_category(concept(
            "http://terminology.hl7.org/CodeSystem/observation-category",
            "vital-signs",
        ))
        .effective(DateTime::of(PartialDate::Year(2024)))
        .value(Integer::of(72))
        .add_component(
            ObservationComponent::builder()
                .code(concept(LOINC, "8480-6"))
                .value(Integer::of(120))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let rebuilt = ObservationBuilder::from(&observation).build().unwrap();
    assert_eq!(rebuilt, observation);
    assert_eq!(observation.to_builder().build().unwrap(), observation);
}

#[test]
fn updating_through_a_builder_leaves_the_source_untouched() {
    let original = patient_with_identifiers(&["1"]);
    let updated = original
        .to_builder()
        .gender(Code::of("other"))
        .add_identifier(identifier("http://hospital.example.org/mrn", "2"))
        .build()
        .unwrap();

    assert!(original.gender().is_none());
    assert_eq!(original.identifier().len(), 1);
    assert_eq!(updated.identifier().len(), 2);
    assert_eq!(updated.id(), original.id());
}

#[test]
fn failed_build_keeps_the_staged_state_for_a_retry() {
    let staged = Condition::builder().code(concept(SNOMED, "39065001"));
    assert!(staged.build().is_err());

    let fixed = staged.subject(reference("Patient/example"));
    let condition = fixed.build().unwrap();
    assert_eq!(condition.code().map(|code| code.coding().len()), Some(1));

    // the same builder builds again
    assert_eq!(fixed.build().unwrap(), condition);
}

#[test]
fn list_setter_replaces_while_add_appends() {
    let builder = Patient::builder()
        .add_identifier(identifier("urn:sys", "a"))
        .add_identifier(identifier("urn:sys", "b"));
    assert_eq!(builder.build().unwrap().identifier().len(), 2);

    let replaced = builder.identifier([identifier("urn:sys", "c")]).build().unwrap();
    assert_eq!(replaced.identifier().len(), 1);
    assert_eq!(
        replaced.identifier()[0].value().and_then(|value| value.as_str()),
        Some("c")
    );
}

#[test]
fn trusted_mode_skips_schema_checks() {
    let built = Patient::builder()
        .gender(Code::of("D"))
        .add_general_practitioner(reference("Device/1"))
        .build_with(&BuildOptions::trusted())
        .unwrap();

    assert!(!built.has_warnings());
    assert_eq!(built.node().general_practitioner().len(), 1);
}

#[test]
fn trusted_mode_still_enforces_type_level_invariants() {
    let err = Condition::builder()
        .build_with(&BuildOptions::trusted())
        .unwrap_err();
    assert_eq!(err.field(), Some("subject"));

    let err = Patient::builder()
        .add_link(None::<PatientLink>)
        .build_with(&BuildOptions::trusted())
        .unwrap_err();
    assert!(matches!(err, StructuralError::NullListElement { .. }));
}

#[test]
fn disabled_config_behaves_like_trusted_options() {
    let options = BuildOptions::new(ValidationConfig::default().with_validation(false));
    assert!(options.is_trusted());
    assert!(Patient::builder().gender(Code::of("D")).build_with(&options).is_ok());
}

#[test]
fn built_separates_node_and_advisories() {
    let built = condition_builder()
        .add_category(text_concept("problem"))
        .build_with(&BuildOptions::default())
        .unwrap();
    assert!(built.has_warnings());

    let warning = built.warnings()[0].to_string();
    assert!(warning.starts_with("Condition.category: "));

    let node = built.clone().into_node();
    assert_eq!(built.logged(), node);
}

#[test]
fn contained_resources_wrap_their_node() {
    let patient = Patient::builder().id("p1").build().unwrap();
    let contained = ContainedResource::from(patient.clone());

    assert_eq!(contained.resource_type(), "Patient");
    assert_eq!(contained.id(), Some("p1"));
    let as_node: &dyn Visitable = &contained;
    assert_eq!(as_node.downcast_ref::<Patient>(), Some(&patient));
}

#[test]
fn nodes_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Patient>();
    assert_send_sync::<Observation>();
    assert_send_sync::<ContainedResource>();

    let patient = std::sync::Arc::new(patient_with_identifiers(&["1", "2"]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let patient = patient.clone();
            std::thread::spawn(move || fingerprint(&*patient))
        })
        .collect();

    let expected = fingerprint(&*patient);
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
