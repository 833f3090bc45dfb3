use crate::error::{BuildResult, StructuralError};
use crate::types::{Cardinality, Field, FieldValue};

/// Builder-side storage for a repeated field.
///
/// Elements are staged as `Option<T>` so a caller can stage a null entry;
/// `finish` rejects it when the node is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagedList<T>(Vec<Option<T>>);

impl<T> Default for StagedList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Clone> StagedList<T> {
    pub fn push(&mut self, value: impl Into<Option<T>>) {
        self.0.push(value.into());
    }

    /// Clears the list, then stages a copy of `values`.
    pub fn replace<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<T>>,
    {
        self.0 = values.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(&self, owner: &'static str, field: &'static str) -> BuildResult<Vec<T>> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .clone()
                    .ok_or(StructuralError::NullListElement { owner, field, index })
            })
            .collect()
    }
}

impl<T: Clone> From<&[T]> for StagedList<T> {
    fn from(values: &[T]) -> Self {
        Self(values.iter().cloned().map(Some).collect())
    }
}

impl<T: Clone> From<&Vec<T>> for StagedList<T> {
    fn from(values: &Vec<T>) -> Self {
        Self::from(values.as_slice())
    }
}

/// Presence check for a required singular field.
pub fn require<T: Clone>(
    value: &Option<T>,
    owner: &'static str,
    field: &'static str,
) -> BuildResult<T> {
    value
        .clone()
        .ok_or(StructuralError::MissingRequired { owner, field })
}

pub(crate) fn check_cardinality(owner: &'static str, field: &Field<'_>) -> BuildResult<()> {
    let name = field.descriptor.name;
    match (field.descriptor.cardinality, &field.value) {
        (Cardinality::Required, FieldValue::Absent) => {
            Err(StructuralError::MissingRequired { owner, field: name })
        }
        (Cardinality::RequiredList, value) if !value.is_present() => {
            Err(StructuralError::EmptyRequiredList { owner, field: name })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_entry_is_reported_with_its_index() {
        let mut list = StagedList::<u32>::default();
        list.push(1u32);
        list.push(None);
        let err = list.finish("Patient", "identifier").unwrap_err();
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
    fn replace_discards_previous_entries() {
        let mut list = StagedList::<u32>::default();
        list.push(None);
        list.replace([Some(2u32), Some(3)]);
        assert_eq!(list.finish("Patient", "identifier").unwrap(), vec![2, 3]);
    }

    #[test]
    fn require_names_the_field() {
        let err = require::<u32>(&None, "Condition", "subject").unwrap_err();
        assert_eq!(err.field(), Some("subject"));
        assert_eq!(err.owner(), "Condition");
    }
}
