//! Value-set binding checks for coded fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::BuildOptions;
use crate::error::{BuildResult, StructuralError};
use crate::model::{
    Code, CodeableConcept, Coding, DATA_ABSENT_REASON_URL, Extension, FhirString, Markdown,
    Quantity, Uri,
};
use crate::types::{BindingDescriptor, BindingStrength, Field, Visitable};
use crate::validation::AdvisoryWarning;

pub const ALL_LANGUAGES_URL: &str = "http://hl7.org/fhir/ValueSet/all-languages";
pub const BCP_47_URN: &str = "urn:ietf:bcp:47";
pub const UCUM_UNITS_URL: &str = "http://hl7.org/fhir/ValueSet/ucum-units";
pub const UCUM_SYSTEM_URL: &str = "http://unitsofmeasure.org";

static LANGUAGE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-zA-Z]{2,3}(?:-[a-zA-Z0-9]{1,8})*|[xX](?:-[a-zA-Z0-9]{1,8})+)$")
        .expect("valid language tag pattern")
});

/// BCP-47 tag syntax, including private-use `x-` tags.
pub fn is_valid_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG.is_match(tag)
}

/// UCUM expression syntax: printable ASCII without spaces and with balanced
/// `[]`, `{}` and `()` groups.
pub fn is_valid_ucum_code(code: &str) -> bool {
    if code.is_empty() || !code.bytes().all(|byte| (0x21..=0x7e).contains(&byte)) {
        return false;
    }
    let mut open = Vec::new();
    for ch in code.chars() {
        match ch {
            '[' | '{' | '(' => open.push(ch),
            ']' | '}' | ')' => {
                let expected = match ch {
                    ']' => '[',
                    '}' => '{',
                    _ => '(',
                };
                if open.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }
    open.is_empty()
}

/// Why a coded value failed its binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingMismatch {
    /// The offending code or system, empty when no code was given.
    pub code: String,
    pub reason: &'static str,
}

impl BindingMismatch {
    fn new(code: impl Into<String>, reason: &'static str) -> Self {
        Self {
            code: code.into(),
            reason,
        }
    }

    pub fn describe(&self, binding: &BindingDescriptor) -> String {
        if self.code.is_empty() {
            format!("{} for value set '{}'", self.reason, binding.value_set_url())
        } else {
            format!(
                "'{}' {} for value set '{}'",
                self.code,
                self.reason,
                binding.value_set_url()
            )
        }
    }
}

enum Coded<'a> {
    Text(Option<&'a str>),
    Coding {
        system: Option<&'a str>,
        code: Option<&'a str>,
    },
    Concept(&'a CodeableConcept),
}

fn coded(node: &dyn Visitable) -> Option<Coded<'_>> {
    if let Some(code) = node.downcast_ref::<Code>() {
        Some(Coded::Text(code.as_str()))
    } else if let Some(uri) = node.downcast_ref::<Uri>() {
        Some(Coded::Text(uri.as_str()))
    } else if let Some(string) = node.downcast_ref::<FhirString>() {
        Some(Coded::Text(string.as_str()))
    } else if let Some(markdown) = node.downcast_ref::<Markdown>() {
        Some(Coded::Text(markdown.as_str()))
    } else if let Some(coding) = node.downcast_ref::<Coding>() {
        Some(Coded::Coding {
            system: coding.system_value(),
            code: coding.code_value(),
        })
    } else if let Some(quantity) = node.downcast_ref::<Quantity>() {
        Some(Coded::Coding {
            system: quantity.system_value(),
            code: quantity.code_value(),
        })
    } else {
        node.downcast_ref::<CodeableConcept>().map(Coded::Concept)
    }
}

/// Callers only consult this once the node is known to carry no coded content,
/// so a DAR-tagged node that also has a value is still checked.
fn has_data_absent_reason(node: &dyn Visitable) -> bool {
    node.fields()
        .iter()
        .filter(|field| field.name() == "extension")
        .flat_map(|field| field.value.nodes())
        .filter_map(|extension| extension.downcast_ref::<Extension>())
        .any(|extension| extension.url() == DATA_ABSENT_REASON_URL)
}

fn is_syntax_validated(binding: &BindingDescriptor) -> bool {
    matches!(binding.value_set_url(), ALL_LANGUAGES_URL | UCUM_UNITS_URL)
}

/// Checks one coded node against `binding`, ignoring the binding strength.
///
/// Returns `None` when the value satisfies the binding, when the node is not
/// a coded type, or when membership cannot be decided (a value set with no
/// embedded codes and no terminology service that knows it).
pub fn check_binding(
    node: &dyn Visitable,
    binding: &BindingDescriptor,
    options: &BuildOptions<'_>,
) -> Option<BindingMismatch> {
    let extended = options.config.extended_codeable_concept_validation;
    match coded(node)? {
        Coded::Concept(concept) if extended => {
            check_concept(concept, has_data_absent_reason(node), binding, options)
        }
        Coded::Concept(concept) => check_concept_legacy(concept, binding),
        _ if !extended => None,
        Coded::Text(value) => match value {
            Some(code) => check_code(None, code, binding, options),
            None if has_data_absent_reason(node) => None,
            None => Some(BindingMismatch::new("", "does not contain a valid code")),
        },
        Coded::Coding { system, code } => {
            check_coding(system, code, has_data_absent_reason(node), binding, options)
        }
    }
}

fn check_coding(
    system: Option<&str>,
    code: Option<&str>,
    absent: bool,
    binding: &BindingDescriptor,
    options: &BuildOptions<'_>,
) -> Option<BindingMismatch> {
    match (system, code) {
        (Some(system), Some(code)) => {
            if is_syntax_validated(binding) {
                return check_syntax(Some(system), code, binding);
            }
            match binding.system {
                Some(expected) if expected != system => {
                    Some(BindingMismatch::new(system, "is not a valid system"))
                }
                _ => check_code(Some(system), code, binding, options),
            }
        }
        (None, None) if absent => None,
        (_, code) => Some(BindingMismatch::new(
            code.unwrap_or_default(),
            "does not contain a valid system and code combination",
        )),
    }
}

fn check_code(
    system: Option<&str>,
    code: &str,
    binding: &BindingDescriptor,
    options: &BuildOptions<'_>,
) -> Option<BindingMismatch> {
    if is_syntax_validated(binding) {
        return check_syntax(system, code, binding);
    }
    if binding.codes.is_empty() {
        return check_membership(system, code, binding, options);
    }
    if binding.codes.contains(&code) {
        None
    } else {
        Some(BindingMismatch::new(code, "is not a valid code"))
    }
}

fn check_syntax(
    system: Option<&str>,
    code: &str,
    binding: &BindingDescriptor,
) -> Option<BindingMismatch> {
    let (expected_system, valid) = if binding.value_set_url() == ALL_LANGUAGES_URL {
        (BCP_47_URN, is_valid_language_tag(code))
    } else {
        (UCUM_SYSTEM_URL, is_valid_ucum_code(code))
    };
    match system {
        Some(system) if system != expected_system => {
            Some(BindingMismatch::new(system, "is not a valid system"))
        }
        _ if !valid => Some(BindingMismatch::new(code, "is not a valid code")),
        _ => None,
    }
}

fn check_membership(
    system: Option<&str>,
    code: &str,
    binding: &BindingDescriptor,
    options: &BuildOptions<'_>,
) -> Option<BindingMismatch> {
    let service = options
        .terminology
        .filter(|service| service.has_value_set(binding.value_set));
    let Some(service) = service else {
        tracing::debug!(
            value_set = binding.value_set,
            "no terminology for value set, skipping membership check"
        );
        return None;
    };
    if service.is_member(system, code, binding.value_set) {
        None
    } else {
        Some(BindingMismatch::new(code, "is not a member"))
    }
}

fn check_concept(
    concept: &CodeableConcept,
    absent: bool,
    binding: &BindingDescriptor,
    options: &BuildOptions<'_>,
) -> Option<BindingMismatch> {
    let codings = concept.coding();
    if codings.is_empty() && concept.text().is_none() && absent {
        return None;
    }
    let mut first = None;
    for coding in codings {
        let mismatch = check_coding(
            coding.system_value(),
            coding.code_value(),
            has_data_absent_reason(coding),
            binding,
            options,
        );
        match mismatch {
            None => return None,
            Some(mismatch) => {
                first.get_or_insert(mismatch.code);
            }
        }
    }
    Some(BindingMismatch::new(
        first.unwrap_or_default(),
        "does not contain a Coding element with a valid system and code combination",
    ))
}

/// Only concepts with at least one system+code coding are checked, and only
/// against embedded codes.
fn check_concept_legacy(
    concept: &CodeableConcept,
    binding: &BindingDescriptor,
) -> Option<BindingMismatch> {
    let mut coded = concept
        .coding()
        .iter()
        .filter_map(|coding| coding.system_value().zip(coding.code_value()))
        .peekable();
    if binding.codes.is_empty() || coded.peek().is_none() {
        return None;
    }
    let mut first = None;
    for (system, code) in coded {
        if binding.system == Some(system) && binding.codes.contains(&code) {
            return None;
        }
        first.get_or_insert(code);
    }
    Some(BindingMismatch::new(
        first.unwrap_or_default(),
        "does not contain a Coding element with a valid system and code combination",
    ))
}

pub(crate) fn check_field(
    owner: &'static str,
    field: &Field<'_>,
    binding: &'static BindingDescriptor,
    options: &BuildOptions<'_>,
    warnings: &mut Vec<AdvisoryWarning>,
) -> BuildResult<()> {
    if binding.strength == BindingStrength::Example && !options.config.report_example_bindings {
        return Ok(());
    }
    let name = field.descriptor.name;
    for node in field.value.nodes() {
        let Some(mismatch) = check_binding(node, binding, options) else {
            continue;
        };
        if binding.strength == BindingStrength::Required {
            return Err(StructuralError::BindingViolation {
                owner,
                field: name,
                value_set: binding.value_set_url().to_string(),
                code: mismatch.code,
            });
        }
        warnings.push(AdvisoryWarning::binding(
            owner,
            name,
            binding.strength,
            format!("{} ({} binding)", mismatch.describe(binding), binding.strength),
        ));
    }
    Ok(())
}
