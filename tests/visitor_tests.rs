mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use pretty_assertions::assert_eq;

fn label(at: Location, node: &dyn Visitable) -> String {
    match at.index {
        Some(index) => format!("{}[{index}]:{}", at.name, node.type_name()),
        None => format!("{}:{}", at.name, node.type_name()),
    }
}

/// Records every hook as a line of text.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_pre: Option<&'static str>,
    skip_visit: Option<&'static str>,
}

impl Recorder {
    fn events_with(&self, prefix: &str) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| event.strip_prefix(prefix))
            .collect()
    }
}

impl<'a> Visitor<'a> for Recorder {
    fn pre_visit(&mut self, at: Location, node: &'a dyn Visitable) -> VisitFlow {
        if self.skip_pre == Some(node.type_name()) {
            return VisitFlow::Skip;
        }
        self.events.push(format!("pre {}", label(at, node)));
        VisitFlow::Continue
    }

    fn visit_start(&mut self, at: Location, node: &'a dyn Visitable) {
        self.events.push(format!("start {}", label(at, node)));
    }

    fn visit(&mut self, at: Location, node: &'a dyn Visitable) -> VisitFlow {
        self.events.push(format!("visit {}", label(at, node)));
        if self.skip_visit == Some(node.type_name()) {
            VisitFlow::Skip
        } else {
            VisitFlow::Continue
        }
    }

    fn visit_end(&mut self, at: Location, node: &'a dyn Visitable) {
        self.events.push(format!("end {}", label(at, node)));
    }

    fn post_visit(&mut self, at: Location, node: &'a dyn Visitable) {
        self.events.push(format!("post {}", label(at, node)));
    }

    fn visit_list_start(&mut self, name: &'static str, len: usize) {
        self.events.push(format!("list-start {name} {len}"));
    }

    fn visit_list_end(&mut self, name: &'static str, len: usize) {
        self.events.push(format!("list-end {name} {len}"));
    }

    fn visit_primitive(&mut self, name: &'static str, value: &PrimitiveValue<'a>) {
        self.events.push(format!("primitive {name}={value}"));
    }
}

fn two_identifier_patient() -> Patient {
    patient_with_identifiers(&["1", "2"])
}

#[test]
fn three_level_tree_walks_in_declared_order() {
    let patient = two_identifier_patient();
    let mut recorder = Recorder::default();
    walk(&patient, &mut recorder);

    assert_eq!(
        recorder.events_with("start "),
        vec![
            "Patient:Patient",
            "identifier[0]:Identifier",
            "system:uri",
            "value:string",
            "identifier[1]:Identifier",
            "system:uri",
            "value:string",
        ]
    );
    assert_eq!(recorder.events_with("pre ").len(), 7);
    assert_eq!(recorder.events_with("post ").len(), 7);
}

#[test]
fn hooks_fire_in_order_for_each_node() {
    let identifier = identifier("urn:sys", "a");
    let mut recorder = Recorder::default();
    walk(&identifier, &mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            "pre Identifier:Identifier",
            "start Identifier:Identifier",
            "visit Identifier:Identifier",
            "pre system:uri",
            "start system:uri",
            "visit system:uri",
            "primitive value=urn:sys",
            "end system:uri",
            "post system:uri",
            "pre value:string",
            "start value:string",
            "visit value:string",
            "primitive value=a",
            "end value:string",
            "post value:string",
            "end Identifier:Identifier",
            "post Identifier:Identifier",
        ]
    );
}

#[test]
fn start_and_end_are_balanced_and_nested() {
    let observation = heart_rate_builder()
        .add_component(
            ObservationComponent::builder()
                .code(concept(LOINC, "8480-6"))
                .value(Integer::of(120))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let mut recorder = Recorder::default();
    walk(&observation, &mut recorder);

    let mut open = Vec::new();
    for event in &recorder.events {
        if let Some(node) = event.strip_prefix("start ") {
            open.push(node);
        } else if let Some(node) = event.strip_prefix("end ") {
            assert_eq!(open.pop(), Some(node));
        }
    }
    assert!(open.is_empty());
}

#[test]
fn skip_from_pre_visit_suppresses_the_whole_subtree() {
    let patient = two_identifier_patient();
    let mut recorder = Recorder {
        skip_pre: Some("Identifier"),
        ..Recorder::default()
    };
    walk(&patient, &mut recorder);

    assert_eq!(recorder.events_with("start "), vec!["Patient:Patient"]);
    assert_eq!(recorder.events_with("end "), vec!["Patient:Patient"]);
    assert!(recorder.events_with("post identifier").is_empty());
    assert!(recorder.events_with("primitive value=").is_empty());
}

#[test]
fn skip_from_visit_suppresses_only_children() {
    let patient = two_identifier_patient();
    let mut recorder = Recorder {
        skip_visit: Some("Identifier"),
        ..Recorder::default()
    };
    walk(&patient, &mut recorder);

    assert_eq!(
        recorder.events_with("end "),
        vec![
            "identifier[0]:Identifier",
            "identifier[1]:Identifier",
            "Patient:Patient"
        ]
    );
    assert_eq!(recorder.events_with("post ").len(), 3);
    assert!(!recorder.events.iter().any(|event| event.contains("uri")));
}

#[test]
fn list_hooks_surround_non_empty_lists_only() {
    let patient = two_identifier_patient();
    let mut recorder = Recorder::default();
    walk(&patient, &mut recorder);

    assert_eq!(recorder.events_with("list-start "), vec!["identifier 2"]);
    assert_eq!(recorder.events_with("list-end "), vec!["identifier 2"]);

    let start = recorder
        .events
        .iter()
        .position(|event| event == "list-start identifier 2")
        .unwrap();
    assert_eq!(recorder.events[start + 1], "pre identifier[0]:Identifier");
}

#[test]
fn attribute_payloads_are_visited_as_primitives() {
    let patient = two_identifier_patient();
    let mut recorder = Recorder::default();
    walk(&patient, &mut recorder);

    assert_eq!(
        recorder.events_with("primitive "),
        vec![
            "id=example",
            "value=http://hospital.example.org/mrn",
            "value=1",
            "value=http://hospital.example.org/mrn",
            "value=2",
        ]
    );
}

#[test]
fn contained_resources_are_walked_as_their_resource_type() {
    let contained = Patient::builder().id("p1").build().unwrap();
    let condition = condition_builder()
        .add_contained(contained)
        .subject(reference("#p1"))
        .build()
        .unwrap();

    let mut recorder = Recorder::default();
    walk(&condition, &mut recorder);
    assert!(
        recorder
            .events_with("start ")
            .contains(&"contained[0]:Patient")
    );
}

#[test]
fn collecting_visitor_finds_nodes_by_type() {
    let patient = two_identifier_patient();
    assert_eq!(collect::<Identifier>(&patient).len(), 2);
    assert_eq!(collect::<Patient>(&patient).len(), 1);

    let mut visitor = CollectingVisitor::<Uri>::new();
    walk(&patient, &mut visitor);
    let systems: Vec<_> = visitor.found().iter().map(|uri| uri.as_str()).collect();
    assert_eq!(
        systems,
        vec![
            Some("http://hospital.example.org/mrn"),
            Some("http://hospital.example.org/mrn")
        ]
    );
}

#[test]
fn fingerprint_follows_structure() {
    let a = patient_with_identifiers(&["1", "2"]);
    let b = patient_with_identifiers(&["1", "2"]);
    let swapped = patient_with_identifiers(&["2", "1"]);

    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_ne!(fingerprint(&a), fingerprint(&swapped));
    assert_eq!(fingerprint(&a).len(), 64);
}

#[test]
fn fingerprint_separates_adjacent_payloads() {
    let first = Identifier::builder()
        .system(Uri::of("urn:ab"))
        .value(FhirString::of("c"))
        .build()
        .unwrap();
    let second = Identifier::builder()
        .system(Uri::of("urn:a"))
        .value(FhirString::of("bc"))
        .build()
        .unwrap();
    assert_ne!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn summary_fields_lists_populated_summary_elements() {
    let patient = Patient::builder()
        .id("example")
        .text(narrative("<div>Jane</div>"))
        .add_identifier(identifier("urn:sys", "1"))
        .gender(Code::of("female"))
        .add_general_practitioner(reference("Practitioner/1"))
        .build()
        .unwrap();

    assert_eq!(summary_fields(&patient), vec!["id", "identifier", "gender"]);
}
