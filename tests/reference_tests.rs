mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;

#[test]
fn literal_outside_the_allowed_set_is_rejected() {
    let err = condition_builder()
        .subject(reference("Device/pump-7"))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        StructuralError::ReferenceTypeMismatch {
            owner: "Condition",
            field: "subject",
            actual: "Device".to_string(),
            allowed: "Patient, Group".to_string(),
        }
    );
}

#[test]
fn versioned_literal_is_checked_by_its_type() {
    let condition = condition_builder()
        .subject(reference("Patient/example/_history/3"))
        .build()
        .unwrap();
    assert!(condition.subject().literal().is_some());

    let err = condition_builder()
        .subject(reference("Practitioner/example/_history/3"))
        .build()
        .unwrap_err();
    assert!(matches!(err, StructuralError::ReferenceTypeMismatch { .. }));
}

#[test]
fn conditional_reference_uses_its_type_prefix() {
    assert!(
        condition_builder()
            .subject(reference("Patient?identifier=http://acme.org/mrn|12345"))
            .build()
            .is_ok()
    );
    let err = condition_builder()
        .subject(reference("Encounter?identifier=42"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("subject"));
}

#[test]
fn undeterminable_targets_skip_the_check() {
    for literal in [
        "http://example.org/fhir/Device/1",
        "urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7",
        "opaque-identifier",
    ] {
        assert!(
            condition_builder().subject(reference(literal)).build().is_ok(),
            "{literal}"
        );
    }

    let display_only = Reference::builder()
        .display(FhirString::of("Somebody"))
        .build()
        .unwrap();
    assert!(condition_builder().subject(display_only).build().is_ok());
}

#[test]
fn declared_type_is_checked_without_a_literal() {
    let declared = Reference::builder()
        .r#type(Uri::of("Device"))
        .identifier(identifier("http://acme.org/devices", "7"))
        .build()
        .unwrap();
    let err = condition_builder().subject(declared).build().unwrap_err();
    assert!(matches!(err, StructuralError::ReferenceTypeMismatch { .. }));
}

#[test]
fn declared_type_must_agree_with_the_literal() {
    let err = condition_builder()
        .subject(typed_reference("Patient/example", "Group"))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        StructuralError::ReferenceTypeConflict {
            owner: "Condition",
            field: "subject",
            literal: "Patient/example".to_string(),
            declared: "Group".to_string(),
        }
    );

    assert!(
        condition_builder()
            .subject(typed_reference("Patient/example", "Patient"))
            .build()
            .is_ok()
    );
}

#[test]
fn unknown_resource_types_are_rejected() {
    let err = condition_builder()
        .subject(reference("Patiente/example"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        StructuralError::UnknownResourceType {
            owner: "Condition",
            field: "subject",
            actual: "Patiente/example".to_string(),
        }
    );

    let err = condition_builder()
        .subject(
            Reference::builder()
                .r#type(Uri::of("http://hl7.org/fhir/StructureDefinition/Patient"))
                .display(FhirString::of("x"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap_err();
    assert!(matches!(err, StructuralError::UnknownResourceType { .. }));
}

#[test]
fn every_list_element_is_checked() {
    let err = heart_rate_builder()
        .add_performer(reference("Practitioner/1"))
        .add_performer(reference("Medication/2"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("performer"));
}

#[test]
fn reference_alternative_of_a_choice_field_is_checked() {
    let item = SuppliedItem::builder()
        .item(reference("Device/infusion-pump"))
        .build()
        .unwrap();
    assert!(matches!(item.item(), Some(SuppliedItemItem::Reference(_))));

    let err = SuppliedItem::builder()
        .item(reference("Patient/example"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("item"));
}

#[test]
fn reference_checks_can_be_switched_off() {
    let options = BuildOptions::new(ValidationConfig::default().with_reference_type_checks(false));
    let built = condition_builder()
        .subject(reference("Device/pump-7"))
        .build_with(&options)
        .unwrap();
    assert_eq!(built.node().subject().literal(), Some("Device/pump-7"));
}
