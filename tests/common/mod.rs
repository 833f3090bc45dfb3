use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;

pub const LOINC: &str = "http://loinc.org";
pub const SNOMED: &str = "http://snomed.info/sct";
pub const CLINICAL_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-clinical";
pub const CATEGORY_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/condition-category";

#[allow(dead_code)]
pub fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::of(literal))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn typed_reference(literal: &str, resource_type: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::of(literal))
        .r#type(Uri::of(resource_type))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn coding(system: &str, code: &str) -> Coding {
    Coding::builder()
        .system(Uri::of(system))
        .code(Code::of(code))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn concept(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .add_coding(coding(system, code))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn text_concept(text: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .text(FhirString::of(text))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn identifier(system: &str, value: &str) -> Identifier {
    Identifier::builder()
        .system(Uri::of(system))
        .value(FhirString::of(value))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn data_absent_reason(reason: &str) -> Extension {
    Extension::builder()
        .url(DATA_ABSENT_REASON_URL)
        .value(Code::of(reason))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn narrative(div: &str) -> Narrative {
    Narrative::builder()
        .status(Code::of("generated"))
        .div(div)
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn heart_rate_builder() -> ObservationBuilder {
    Observation::builder()
        .status(Code::of("final"))
        .code(concept(LOINC, "8867-4"))
        .subject(reference("Patient/example"))
}

#[allow(dead_code)]
pub fn condition_builder() -> ConditionBuilder {
    Condition::builder()
        .clinical_status(concept(CLINICAL_STATUS_SYSTEM, "active"))
        .code(concept(SNOMED, "39065001"))
        .subject(reference("Patient/example"))
}

/// Patient with one identifier per value, all in the same system.
#[allow(dead_code)]
pub fn patient_with_identifiers(values: &[&str]) -> Patient {
    values
        .iter()
        .fold(Patient::builder().id("example"), |builder, value| {
            builder.add_identifier(identifier("http://hospital.example.org/mrn", value))
        })
        .build()
        .unwrap()
}
