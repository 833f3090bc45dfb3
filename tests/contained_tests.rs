mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;

fn contained_patient(id: &str) -> Patient {
    Patient::builder().id(id).build().unwrap()
}

#[test]
fn local_reference_to_an_allowed_contained_resource_passes() {
    let observation = heart_rate_builder()
        .add_contained(contained_patient("p1"))
        .subject(reference("#p1"))
        .build()
        .unwrap();
    assert_eq!(observation.contained().len(), 1);
    assert_eq!(observation.contained()[0].resource_type(), "Patient");
}

#[test]
fn local_reference_to_a_disallowed_contained_resource_fails() {
    let inner = condition_builder().id("c1").build().unwrap();
    let err = heart_rate_builder()
        .add_contained(inner)
        .subject(reference("#c1"))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        StructuralError::ReferenceTypeMismatch {
            owner: "Observation",
            field: "subject",
            actual: "Condition".to_string(),
            allowed: "Patient, Group, Device, Location".to_string(),
        }
    );
}

#[test]
fn unresolved_local_reference_is_skipped() {
    assert!(heart_rate_builder().subject(reference("#nobody")).build().is_ok());
}

#[test]
fn bare_hash_refers_to_the_container() {
    let grouped = heart_rate_builder()
        .id("panel")
        .add_has_member(reference("#"))
        .build()
        .unwrap();
    assert_eq!(grouped.has_member().len(), 1);

    let err = condition_builder()
        .add_contained(grouped)
        .build()
        .unwrap_err();
    match err {
        StructuralError::ReferenceTypeMismatch {
            owner,
            field,
            actual,
            ..
        } => {
            assert_eq!(owner, "Observation");
            assert_eq!(field, "hasMember");
            assert_eq!(actual, "Condition");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bare_hash_is_unresolved_outside_a_container() {
    let observation = heart_rate_builder()
        .id("obs1")
        .subject(reference("#"))
        .build()
        .unwrap();
    assert_eq!(
        observation.subject().and_then(Reference::literal),
        Some("#")
    );

    let patient = Patient::builder()
        .id("example")
        .add_contained(observation)
        .build()
        .unwrap();
    assert_eq!(patient.contained()[0].resource_type(), "Observation");
}

#[test]
fn local_references_inside_backbone_elements_are_checked() {
    let evidence = heart_rate_builder().id("obs1").build().unwrap();
    let staged = ConditionStage::builder()
        .add_assessment(reference("#obs1"))
        .build()
        .unwrap();
    assert!(
        condition_builder()
            .add_contained(evidence)
            .add_stage(staged.clone())
            .build()
            .is_ok()
    );

    let err = condition_builder()
        .add_contained(contained_patient("obs1"))
        .add_stage(staged)
        .build()
        .unwrap_err();
    assert_eq!(err.owner(), "Condition.Stage");
    assert_eq!(err.field(), Some("assessment"));
}

#[test]
fn contained_resource_with_its_own_contained_fails() {
    let inner = condition_builder()
        .id("c1")
        .add_contained(contained_patient("p1"))
        .subject(reference("#p1"))
        .build()
        .unwrap();

    let err = heart_rate_builder()
        .add_contained(inner)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        StructuralError::NestedContained {
            owner: "Observation",
            resource: "Patient"
        }
    );
    assert_eq!(err.field(), Some("contained"));
}

#[test]
fn local_checks_follow_the_reference_switch() {
    let inner = condition_builder().id("c1").build().unwrap();
    let options = BuildOptions::new(ValidationConfig::default().with_reference_type_checks(false));
    let built = heart_rate_builder()
        .add_contained(inner)
        .subject(reference("#c1"))
        .build_with(&options)
        .unwrap();
    assert!(built.node().subject().is_some_and(Reference::is_local));
}

#[test]
fn nesting_is_rejected_even_when_reference_checks_are_off() {
    let inner = condition_builder()
        .add_contained(contained_patient("p1"))
        .build()
        .unwrap();
    let options = BuildOptions::new(ValidationConfig::default().with_reference_type_checks(false));
    let err = SupplyDelivery::builder()
        .add_contained(inner)
        .build_with(&options)
        .unwrap_err();
    assert!(matches!(err, StructuralError::NestedContained { .. }));
}
