//! Common fields shared by elements, backbone elements and resources, and the
//! builder capabilities that set them.

use crate::error::BuildResult;
use crate::model::{Code, ContainedResource, Extension, Meta, Narrative, Uri};
use crate::types::FieldValue;
use crate::validation::StagedList;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
}

impl ElementBase {
    /// `[id, extension]`
    pub(crate) fn field_values(&self) -> [FieldValue<'_>; 2] {
        [
            FieldValue::text(self.id.as_deref()),
            FieldValue::list(&self.extension),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBaseBuilder {
    id: Option<String>,
    extension: StagedList<Extension>,
}

impl ElementBaseBuilder {
    pub(crate) fn finish(&self, owner: &'static str) -> BuildResult<ElementBase> {
        Ok(ElementBase {
            id: self.id.clone(),
            extension: self.extension.finish(owner, "extension")?,
        })
    }
}

impl From<&ElementBase> for ElementBaseBuilder {
    fn from(base: &ElementBase) -> Self {
        Self {
            id: base.id.clone(),
            extension: StagedList::from(&base.extension),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneBase {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneBase {
    /// `[id, extension, modifierExtension]`
    pub(crate) fn field_values(&self) -> [FieldValue<'_>; 3] {
        [
            FieldValue::text(self.id.as_deref()),
            FieldValue::list(&self.extension),
            FieldValue::list(&self.modifier_extension),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneBaseBuilder {
    id: Option<String>,
    extension: StagedList<Extension>,
    modifier_extension: StagedList<Extension>,
}

impl BackboneBaseBuilder {
    pub(crate) fn finish(&self, owner: &'static str) -> BuildResult<BackboneBase> {
        Ok(BackboneBase {
            id: self.id.clone(),
            extension: self.extension.finish(owner, "extension")?,
            modifier_extension: self.modifier_extension.finish(owner, "modifierExtension")?,
        })
    }
}

impl From<&BackboneBase> for BackboneBaseBuilder {
    fn from(base: &BackboneBase) -> Self {
        Self {
            id: base.id.clone(),
            extension: StagedList::from(&base.extension),
            modifier_extension: StagedList::from(&base.modifier_extension),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    pub(crate) id: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<Uri>,
    pub(crate) language: Option<Code>,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<ContainedResource>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl ResourceBase {
    /// `[id, meta, implicitRules, language, text, contained, extension, modifierExtension]`
    pub(crate) fn field_values(&self) -> [FieldValue<'_>; 8] {
        [
            FieldValue::text(self.id.as_deref()),
            FieldValue::node(self.meta.as_ref()),
            FieldValue::node(self.implicit_rules.as_ref()),
            FieldValue::node(self.language.as_ref()),
            FieldValue::node(self.text.as_ref()),
            FieldValue::list(&self.contained),
            FieldValue::list(&self.extension),
            FieldValue::list(&self.modifier_extension),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBaseBuilder {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<ContainedResource>,
    extension: StagedList<Extension>,
    modifier_extension: StagedList<Extension>,
}

impl ResourceBaseBuilder {
    pub(crate) fn finish(&self, owner: &'static str) -> BuildResult<ResourceBase> {
        Ok(ResourceBase {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
            text: self.text.clone(),
            contained: self.contained.clone(),
            extension: self.extension.finish(owner, "extension")?,
            modifier_extension: self.modifier_extension.finish(owner, "modifierExtension")?,
        })
    }
}

impl From<&ResourceBase> for ResourceBaseBuilder {
    fn from(base: &ResourceBase) -> Self {
        Self {
            id: base.id.clone(),
            meta: base.meta.clone(),
            implicit_rules: base.implicit_rules.clone(),
            language: base.language.clone(),
            text: base.text.clone(),
            contained: base.contained.clone(),
            extension: StagedList::from(&base.extension),
            modifier_extension: StagedList::from(&base.modifier_extension),
        }
    }
}

pub trait ElementBuilder: Sized {
    fn element_mut(&mut self) -> &mut ElementBaseBuilder;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_mut().id = Some(id.into());
        self
    }

    fn add_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.element_mut().extension.push(extension);
        self
    }

    fn extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.element_mut().extension.replace(extensions);
        self
    }
}

pub trait BackboneElementBuilder: Sized {
    fn backbone_mut(&mut self) -> &mut BackboneBaseBuilder;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.backbone_mut().id = Some(id.into());
        self
    }

    fn add_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.backbone_mut().extension.push(extension);
        self
    }

    fn extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.backbone_mut().extension.replace(extensions);
        self
    }

    fn add_modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.backbone_mut().modifier_extension.push(extension);
        self
    }

    fn modifier_extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.backbone_mut().modifier_extension.replace(extensions);
        self
    }
}

pub trait ResourceBuilder: Sized {
    fn resource_mut(&mut self) -> &mut ResourceBaseBuilder;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.resource_mut().id = Some(id.into());
        self
    }

    fn meta(mut self, meta: impl Into<Option<Meta>>) -> Self {
        self.resource_mut().meta = meta.into();
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Option<Uri>>) -> Self {
        self.resource_mut().implicit_rules = implicit_rules.into();
        self
    }

    fn language(mut self, language: impl Into<Option<Code>>) -> Self {
        self.resource_mut().language = language.into();
        self
    }

    fn text(mut self, text: impl Into<Option<Narrative>>) -> Self {
        self.resource_mut().text = text.into();
        self
    }

    fn add_contained(mut self, resource: impl Into<ContainedResource>) -> Self {
        self.resource_mut().contained.push(resource.into());
        self
    }

    fn contained<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ContainedResource>,
    {
        self.resource_mut().contained = resources.into_iter().map(Into::into).collect();
        self
    }

    fn add_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.resource_mut().extension.push(extension);
        self
    }

    fn extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.resource_mut().extension.replace(extensions);
        self
    }

    fn add_modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.resource_mut().modifier_extension.push(extension);
        self
    }

    fn modifier_extension<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Extension>>,
    {
        self.resource_mut().modifier_extension.replace(extensions);
        self
    }
}

/// Capability impls for a complex datatype whose common fields live in `element`.
macro_rules! element_node {
    ($node:ident, $builder:ident) => {
        impl $crate::types::HasId for $node {
            fn id(&self) -> Option<&str> {
                self.element.id.as_deref()
            }
        }

        impl $crate::types::HasExtensions for $node {
            fn extension(&self) -> &[$crate::model::Extension] {
                &self.element.extension
            }
        }

        impl $crate::model::ElementBuilder for $builder {
            fn element_mut(&mut self) -> &mut $crate::model::ElementBaseBuilder {
                &mut self.element
            }
        }
    };
}

macro_rules! backbone_node {
    ($node:ident, $builder:ident) => {
        impl $crate::types::HasId for $node {
            fn id(&self) -> Option<&str> {
                self.backbone.id.as_deref()
            }
        }

        impl $crate::types::HasExtensions for $node {
            fn extension(&self) -> &[$crate::model::Extension] {
                &self.backbone.extension
            }

            fn modifier_extension(&self) -> &[$crate::model::Extension] {
                &self.backbone.modifier_extension
            }
        }

        impl $crate::model::BackboneElementBuilder for $builder {
            fn backbone_mut(&mut self) -> &mut $crate::model::BackboneBaseBuilder {
                &mut self.backbone
            }
        }
    };
}

macro_rules! resource_node {
    ($node:ident, $builder:ident) => {
        impl $crate::types::HasId for $node {
            fn id(&self) -> Option<&str> {
                self.resource.id.as_deref()
            }
        }

        impl $crate::types::HasExtensions for $node {
            fn extension(&self) -> &[$crate::model::Extension] {
                &self.resource.extension
            }

            fn modifier_extension(&self) -> &[$crate::model::Extension] {
                &self.resource.modifier_extension
            }
        }

        impl $crate::types::Narratable for $node {
            fn text(&self) -> Option<&$crate::model::Narrative> {
                self.resource.text.as_ref()
            }
        }

        impl $crate::types::ResourceNode for $node {
            fn meta(&self) -> Option<&$crate::model::Meta> {
                self.resource.meta.as_ref()
            }

            fn implicit_rules(&self) -> Option<&str> {
                self.resource
                    .implicit_rules
                    .as_ref()
                    .and_then(|uri| uri.as_str())
            }

            fn language(&self) -> Option<&str> {
                self.resource.language.as_ref().and_then(|code| code.as_str())
            }

            fn contained(&self) -> &[$crate::model::ContainedResource] {
                &self.resource.contained
            }
        }

        impl $crate::model::ResourceBuilder for $builder {
            fn resource_mut(&mut self) -> &mut $crate::model::ResourceBaseBuilder {
                &mut self.resource
            }
        }

        impl From<$node> for $crate::model::ContainedResource {
            fn from(resource: $node) -> Self {
                Self::$node(resource)
            }
        }
    };
}

pub(crate) use {backbone_node, element_node, resource_node};
