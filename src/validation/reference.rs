use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{BuildResult, StructuralError};
use crate::model::Reference;
use crate::types::{Field, is_resource_type};

static RELATIVE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Za-z]+)/[A-Za-z0-9\-\.]{1,64}(?:/_history/[A-Za-z0-9\-\.]{1,64})?$")
        .expect("valid relative reference pattern")
});

/// What a literal `Reference.reference` says about its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget<'a> {
    /// `Type/id`, `Type/id/_history/vid` or a conditional `Type?query`.
    Typed(&'a str),
    /// `#id` into the containing resource; an empty id means the container itself.
    Local(&'a str),
    /// Absolute URLs, URNs and bare identifiers name no type.
    Opaque,
}

pub fn literal_target(literal: &str) -> ReferenceTarget<'_> {
    if let Some(id) = literal.strip_prefix('#') {
        return ReferenceTarget::Local(id);
    }
    if Url::parse(literal).is_ok() {
        return ReferenceTarget::Opaque;
    }
    if let Some((resource_type, _)) = literal.split_once('?') {
        return ReferenceTarget::Typed(resource_type);
    }
    match RELATIVE_REFERENCE
        .captures(literal)
        .and_then(|captures| captures.get(1))
    {
        Some(resource_type) => ReferenceTarget::Typed(resource_type.as_str()),
        None => ReferenceTarget::Opaque,
    }
}

/// An empty target set, or one naming `Resource`, admits any resource type.
pub(crate) fn allows(allowed: &[&str], resource_type: &str) -> bool {
    allowed.is_empty() || allowed.contains(&"Resource") || allowed.contains(&resource_type)
}

pub(crate) fn check_field(owner: &'static str, field: &Field<'_>) -> BuildResult<()> {
    for node in field.value.nodes() {
        if let Some(reference) = node.downcast_ref::<Reference>() {
            check_reference(
                owner,
                field.descriptor.name,
                reference,
                field.descriptor.reference_targets,
            )?;
        }
    }
    Ok(())
}

fn check_reference(
    owner: &'static str,
    field: &'static str,
    reference: &Reference,
    allowed: &[&str],
) -> BuildResult<()> {
    let mismatch = |actual: &str| StructuralError::ReferenceTypeMismatch {
        owner,
        field,
        actual: actual.to_string(),
        allowed: allowed.join(", "),
    };

    let literal = reference.literal();
    let literal_type = match literal.map(literal_target) {
        Some(ReferenceTarget::Typed(resource_type)) => Some(resource_type),
        Some(ReferenceTarget::Opaque) => {
            tracing::trace!(owner, field, "reference target not determinable, skipping type check");
            None
        }
        // local references are resolved once the owning resource is built
        Some(ReferenceTarget::Local(_)) | None => None,
    };

    if let Some(resource_type) = literal_type {
        if !is_resource_type(resource_type) {
            return Err(StructuralError::UnknownResourceType {
                owner,
                field,
                actual: literal.unwrap_or(resource_type).to_string(),
            });
        }
        if !allows(allowed, resource_type) {
            return Err(mismatch(resource_type));
        }
    }

    if let Some(declared) = reference.declared_type() {
        if !is_resource_type(declared) {
            return Err(StructuralError::UnknownResourceType {
                owner,
                field,
                actual: declared.to_string(),
            });
        }
        if !allows(allowed, declared) {
            return Err(mismatch(declared));
        }
        if let Some(resource_type) = literal_type
            && resource_type != declared
        {
            return Err(StructuralError::ReferenceTypeConflict {
                owner,
                field,
                literal: literal.unwrap_or(resource_type).to_string(),
                declared: declared.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_and_versioned_literals_name_their_type() {
        assert_eq!(literal_target("Patient/123"), ReferenceTarget::Typed("Patient"));
        assert_eq!(
            literal_target("Observation/a.b-c/_history/2"),
            ReferenceTarget::Typed("Observation")
        );
    }

    #[test]
    fn conditional_literal_uses_the_text_before_the_query() {
        assert_eq!(
            literal_target("Patient?identifier=http://acme.org/mrn|42"),
            ReferenceTarget::Typed("Patient")
        );
    }

    #[test]
    fn absolute_and_urn_literals_are_opaque() {
        assert_eq!(
            literal_target("http://example.org/fhir/Patient/1"),
            ReferenceTarget::Opaque
        );
        assert_eq!(
            literal_target("urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7"),
            ReferenceTarget::Opaque
        );
        assert_eq!(literal_target("just-an-id"), ReferenceTarget::Opaque);
    }

    #[test]
    fn local_literals_keep_the_fragment() {
        assert_eq!(literal_target("#med1"), ReferenceTarget::Local("med1"));
        assert_eq!(literal_target("#"), ReferenceTarget::Local(""));
    }

    #[test]
    fn resource_in_the_allowed_set_admits_anything() {
        assert!(allows(&["Resource"], "Device"));
        assert!(allows(&[], "Device"));
        assert!(!allows(&["Patient", "Group"], "Device"));
    }
}
