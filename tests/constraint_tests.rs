mod common;

use common::*;
use octofhir_fhirmodel::prelude::*;
use octofhir_fhirmodel::*;
use pretty_assertions::assert_eq;

fn note_extension() -> Extension {
    Extension::builder()
        .url("http://example.org/fhir/StructureDefinition/note")
        .value(FhirString::of("reviewed"))
        .build()
        .unwrap()
}

fn failing(key: &'static str) -> impl Fn(&dyn Visitable, &ConstraintDescriptor) -> Result<bool> {
    move |_node: &dyn Visitable, constraint: &ConstraintDescriptor| Ok(constraint.key != key)
}

#[test]
fn constraints_are_skipped_without_an_evaluator() {
    let built = ConditionStage::builder()
        .add_extension(note_extension())
        .build_with(&BuildOptions::default())
        .unwrap();
    assert!(!built.has_warnings());
}

#[test]
fn false_error_constraint_fails_the_build() {
    let evaluator = failing("con-1");
    let options = BuildOptions::default().with_evaluator(&evaluator);

    let err = ConditionStage::builder()
        .add_extension(note_extension())
        .build_with(&options)
        .unwrap_err();
    assert_eq!(
        err,
        StructuralError::ConstraintViolation {
            owner: "Condition.Stage",
            key: "con-1",
            human: "Stage SHALL have summary or assessment",
        }
    );
    assert_eq!(err.field(), None);
}

#[test]
fn satisfied_constraints_produce_nothing() {
    let evaluator = failing("none");
    let options = BuildOptions::default().with_evaluator(&evaluator);
    let built = condition_builder().build_with(&options).unwrap();
    assert!(!built.has_warnings());
}

#[test]
fn false_warning_constraint_is_an_advisory() {
    let evaluator = failing("dom-6");
    let options = BuildOptions::default().with_evaluator(&evaluator);

    let built = condition_builder().build_with(&options).unwrap();
    assert_eq!(built.warnings().len(), 1);

    let warning = &built.warnings()[0];
    assert_eq!(
        warning.kind,
        AdvisoryKind::Constraint {
            key: "dom-6".to_string()
        }
    );
    assert_eq!(warning.owner, "Condition");
    assert!(warning.message.starts_with("dom-6: "));
}

#[test]
fn evaluator_errors_become_unevaluated_advisories() {
    let evaluator = |_node: &dyn Visitable, constraint: &ConstraintDescriptor| {
        if constraint.key == "con-5" {
            Err(FhirModelError::evaluation_error("unsupported function: select"))
        } else {
            Ok(true)
        }
    };
    let options = BuildOptions::default().with_evaluator(&evaluator);

    let built = condition_builder().build_with(&options).unwrap();
    assert_eq!(
        built.warnings()[0].kind,
        AdvisoryKind::Unevaluated {
            key: "con-5".to_string()
        }
    );
    assert!(built.warnings()[0].message.contains("unsupported function"));
}

#[test]
fn evaluator_sees_the_node_under_construction() {
    let evaluator = |node: &dyn Visitable, constraint: &ConstraintDescriptor| -> Result<bool> {
        if constraint.key != "con-1" {
            return Ok(true);
        }
        let stage = node
            .downcast_ref::<ConditionStage>()
            .ok_or_else(|| FhirModelError::evaluation_error("not a stage"))?;
        Ok(stage.summary().is_some() || !stage.assessment().is_empty())
    };
    let options = BuildOptions::default().with_evaluator(&evaluator);

    assert!(
        ConditionStage::builder()
            .summary(text_concept("stage II"))
            .build_with(&options)
            .is_ok()
    );
    assert!(
        ConditionStage::builder()
            .add_extension(note_extension())
            .build_with(&options)
            .is_err()
    );
}

#[test]
fn advisories_serialize_with_a_type_tag() {
    let warning = AdvisoryWarning::constraint("Condition", "dom-6", "dom-6: narrative");
    let json = serde_json::to_value(&warning).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "kind": { "type": "constraint", "key": "dom-6" },
            "owner": "Condition",
            "message": "dom-6: narrative",
        })
    );

    let back: AdvisoryWarning = serde_json::from_value(json).unwrap();
    assert_eq!(back, warning);
}

#[test]
fn validation_config_loads_from_json() {
    let config = ValidationConfig::from_json_str(
        r#"{"enabled": true, "reportExampleBindings": true, "maxStringLength": 64}"#,
    )
    .unwrap();
    assert!(config.report_example_bindings);
    assert_eq!(config.max_string_length, 64);
    assert!(config.check_control_chars);

    let options = BuildOptions::new(config);
    assert!(!options.is_trusted());
}
