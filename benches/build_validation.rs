use criterion::{Criterion, criterion_group, criterion_main};
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use std::hint::black_box;

const LOINC: &str = "http://loinc.org";

fn coding(system: &str, code: &str) -> Coding {
    Coding::builder()
        .system(Uri::of(system))
        .code(Code::of(code))
        .build()
        .unwrap()
}

fn concept(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .add_coding(coding(system, code))
        .build()
        .unwrap()
}

fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::of(literal))
        .build()
        .unwrap()
}

fn identifiers(count: usize) -> Vec<Identifier> {
    (0..count)
        .map(|i| {
            Identifier::builder()
                .system(Uri::of("http://hospital.example.org/mrn"))
                .value(FhirString::of(format!("mrn-{i}")))
                .build()
                .unwrap()
        })
        .collect()
}

fn large_patient() -> PatientBuilder {
    Patient::builder()
        .id("bench")
        .identifier(identifiers(50))
        .gender(Code::of("female"))
        .add_general_practitioner(reference("Practitioner/1"))
}

fn blood_pressure() -> ObservationBuilder {
    let component = |code: &str, value: i32| {
        ObservationComponent::builder()
            .code(concept(LOINC, code))
            .value(Integer::of(value))
            .build()
            .unwrap()
    };
    Observation::builder()
        .status(Code::of("final"))
        .code(concept(LOINC, "85354-9"))
        .subject(reference("Patient/bench"))
        .add_component(component("8480-6", 120))
        .add_component(component("8462-4", 80))
}

fn bench_patient_build(c: &mut Criterion) {
    let builder = large_patient();

    c.bench_function("patient_build_validated", |b| {
        b.iter(|| black_box(builder.build_with(&BuildOptions::default())).unwrap())
    });
    c.bench_function("patient_build_trusted", |b| {
        b.iter(|| black_box(builder.build_with(&BuildOptions::trusted())).unwrap())
    });
}

fn bench_observation_build(c: &mut Criterion) {
    let builder = blood_pressure();

    c.bench_function("observation_build", |b| {
        b.iter(|| black_box(builder.build_with(&BuildOptions::default())).unwrap())
    });
}

fn bench_validate(c: &mut Criterion) {
    let patient = large_patient().build().unwrap();
    let options = BuildOptions::default();

    c.bench_function("patient_validate", |b| {
        b.iter(|| black_box(validate(&patient, &options)).unwrap())
    });
}

fn bench_traversal(c: &mut Criterion) {
    let patient = large_patient().build().unwrap();

    c.bench_function("patient_fingerprint", |b| {
        b.iter(|| black_box(fingerprint(&patient)))
    });
    c.bench_function("patient_collect_identifiers", |b| {
        b.iter(|| black_box(collect::<Identifier>(&patient).len()))
    });
}

criterion_group!(
    benches,
    bench_patient_build,
    bench_observation_build,
    bench_validate,
    bench_traversal
);
criterion_main!(benches);
