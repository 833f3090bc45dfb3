mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use proptest::prelude::*;

#[derive(Default)]
struct Depth {
    open: usize,
    max: usize,
    underflow: bool,
}

impl<'a> Visitor<'a> for Depth {
    fn visit_start(&mut self, _at: Location, _node: &'a dyn Visitable) {
        self.open += 1;
        self.max = self.max.max(self.open);
    }

    fn visit_end(&mut self, _at: Location, _node: &'a dyn Visitable) {
        self.underflow |= self.open == 0;
        self.open = self.open.saturating_sub(1);
    }
}

fn identifier_values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,10}", 0..6)
}

fn patient_from(values: &[String]) -> Patient {
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    patient_with_identifiers(&values)
}

proptest! {
    #[test]
    fn rebuilding_preserves_the_node(values in identifier_values()) {
        let patient = patient_from(&values);
        let rebuilt = PatientBuilder::from(&patient).build().unwrap();
        prop_assert_eq!(rebuilt, patient);
    }

    #[test]
    fn walks_are_balanced(values in identifier_values()) {
        let patient = patient_from(&values);
        let mut depth = Depth::default();
        walk(&patient, &mut depth);

        prop_assert_eq!(depth.open, 0);
        // Patient, Identifier, then the Identifier's primitives
        let expected = if values.is_empty() { 1 } else { 3 };
        prop_assert_eq!(depth.max, expected);
        prop_assert!(!depth.underflow);
    }

    #[test]
    fn fingerprint_is_deterministic(values in identifier_values()) {
        let first = patient_from(&values);
        let second = patient_from(&values);
        prop_assert_eq!(fingerprint(&first), fingerprint(&second));
        prop_assert_eq!(collect::<Identifier>(&first).len(), values.len());
    }

    #[test]
    fn fingerprint_tracks_identifier_values(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        let left = patient_from(&[a]);
        let right = patient_from(&[b]);
        prop_assert_ne!(fingerprint(&left), fingerprint(&right));
    }

    #[test]
    fn ids_matching_the_pattern_build(id in "[A-Za-z0-9.-]{1,64}") {
        prop_assert!(Id::builder().value(id.clone()).build().is_ok());
        prop_assert!(Patient::builder().id(id).build().is_ok());
    }

    #[test]
    fn overlong_ids_are_rejected(id in "[a-z]{65,80}") {
        prop_assert!(Id::builder().value(id).build().is_err());
    }
}
