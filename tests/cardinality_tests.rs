mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use std::any::Any;

#[test]
fn condition_without_subject_fails() {
    let err = Condition::builder()
        .code(concept(SNOMED, "39065001"))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        StructuralError::MissingRequired {
            owner: "Condition",
            field: "subject"
        }
    );
    assert!(err.to_string().contains("'subject'"));
}

#[test]
fn condition_with_allowed_subject_succeeds() {
    let condition = condition_builder().build().unwrap();
    assert_eq!(condition.subject().literal(), Some("Patient/example"));

    let group = condition_builder()
        .subject(reference("Group/cohort-1"))
        .build()
        .unwrap();
    assert_eq!(group.subject().literal(), Some("Group/cohort-1"));
}

#[test]
fn observation_requires_status_and_code() {
    let err = Observation::builder()
        .code(concept(LOINC, "8867-4"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("status"));

    let err = Observation::builder()
        .status(Code::of("final"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("code"));
    assert_eq!(err.owner(), "Observation");
}

#[test]
fn patient_link_requires_other_and_type() {
    let err = PatientLink::builder()
        .r#type(Code::of("seealso"))
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Some("other"));

    let link = PatientLink::builder()
        .other(reference("Patient/duplicate"))
        .r#type(Code::of("seealso"))
        .build()
        .unwrap();
    assert_eq!(link.r#type().as_str(), Some("seealso"));
}

#[test]
fn null_list_entry_is_rejected() {
    let err = Patient::builder()
        .add_identifier(identifier("http://hospital.example.org/mrn", "1"))
        .add_identifier(None::<Identifier>)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        StructuralError::NullListElement {
            owner: "Patient",
            field: "identifier",
            index: 1
        }
    );
}

#[test]
fn null_entry_in_common_extension_list_is_rejected() {
    let err = Coding::builder()
        .code(Code::of("x"))
        .add_extension(None::<Extension>)
        .build()
        .unwrap_err();
    assert_eq!(err.owner(), "Coding");
    assert_eq!(err.field(), Some("extension"));
}

#[test]
fn replacing_a_list_drops_staged_nulls() {
    let patient = Patient::builder()
        .add_identifier(None::<Identifier>)
        .identifier([identifier("http://hospital.example.org/mrn", "2")])
        .build()
        .unwrap();
    assert_eq!(patient.identifier().len(), 1);
}

static PARTICIPANTS_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::attribute("id"),
    FieldDescriptor::required_list("participant").references(&["Practitioner", "Patient"]),
];

static PARTICIPANTS: TypeDescriptor =
    TypeDescriptor::new("Participants", TypeKind::Backbone, &PARTICIPANTS_FIELDS);

/// A hand-written node with a 1..* field, validated through the generic engine.
#[derive(Debug)]
struct Participants {
    participant: Vec<Reference>,
}

impl Visitable for Participants {
    fn descriptor(&self) -> &'static TypeDescriptor {
        &PARTICIPANTS
    }

    fn fields(&self) -> Vec<Field<'_>> {
        Field::zip(
            &PARTICIPANTS_FIELDS,
            [FieldValue::Absent, FieldValue::list(&self.participant)],
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn required_list_must_not_be_empty() {
    let node = Participants {
        participant: Vec::new(),
    };
    let err = validate(&node, &BuildOptions::default()).unwrap_err();
    assert_eq!(
        err,
        StructuralError::EmptyRequiredList {
            owner: "Participants",
            field: "participant"
        }
    );
}

#[test]
fn required_list_with_one_element_passes() {
    let node = Participants {
        participant: vec![reference("Practitioner/dr-who")],
    };
    let warnings = validate(&node, &BuildOptions::default()).unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn trusted_options_skip_the_required_list_check() {
    let node = Participants {
        participant: Vec::new(),
    };
    assert!(validate(&node, &BuildOptions::trusted()).unwrap().is_empty());
}
