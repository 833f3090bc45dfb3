use crate::error::{BuildResult, StructuralError};
use crate::types::{Field, FieldValue};

/// A populated choice field must hold one of its declared alternatives.
pub(crate) fn check_choice(owner: &'static str, field: &Field<'_>) -> BuildResult<()> {
    let permitted = field.descriptor.choice_types;
    if permitted.is_empty() {
        return Ok(());
    }
    if let FieldValue::Node(node) = &field.value {
        let actual = node.type_name();
        if !permitted.contains(&actual) {
            return Err(StructuralError::ChoiceTypeMismatch {
                owner,
                field: field.descriptor.name,
                actual: actual.to_string(),
                permitted: permitted.join(", "),
            });
        }
    }
    Ok(())
}

/// The serialized element name of one alternative, e.g. `onset` + `dateTime`
/// gives `onsetDateTime`.
pub fn choice_element_name(field: &str, type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{field}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_capitalize_the_type() {
        assert_eq!(choice_element_name("onset", "dateTime"), "onsetDateTime");
        assert_eq!(choice_element_name("value", "Quantity"), "valueQuantity");
        assert_eq!(choice_element_name("deceased", "boolean"), "deceasedBoolean");
    }
}
