//! Depth-first traversal over built nodes.
//!
//! [`walk`] visits fields in the order the node's descriptor declares them.
//! For every node the hooks fire as
//! `pre_visit → visit_start → visit → children → visit_end → post_visit`.
//! [`VisitFlow::Skip`] from `pre_visit` suppresses every other hook for that
//! node and its subtree; from `visit` it only suppresses the children.

pub mod collect;
pub mod fingerprint;

pub use collect::{CollectingVisitor, collect};
pub use fingerprint::{fingerprint, summary_fields};

use crate::types::{FieldValue, PrimitiveValue, Visitable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitFlow {
    Continue,
    Skip,
}

/// Where a node sits in its parent: the field name and, for repeated
/// fields, the element index. The root uses its type name and no index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub name: &'static str,
    pub index: Option<usize>,
}

impl Location {
    pub fn root(node: &dyn Visitable) -> Self {
        Self {
            name: node.type_name(),
            index: None,
        }
    }

    pub fn field(name: &'static str) -> Self {
        Self { name, index: None }
    }

    pub fn element(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index: Some(index),
        }
    }
}

#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn pre_visit(&mut self, at: Location, node: &'a dyn Visitable) -> VisitFlow {
        VisitFlow::Continue
    }

    fn visit_start(&mut self, at: Location, node: &'a dyn Visitable) {}

    fn visit(&mut self, at: Location, node: &'a dyn Visitable) -> VisitFlow {
        VisitFlow::Continue
    }

    fn visit_end(&mut self, at: Location, node: &'a dyn Visitable) {}

    fn post_visit(&mut self, at: Location, node: &'a dyn Visitable) {}

    /// Fires around the elements of a non-empty repeated field.
    fn visit_list_start(&mut self, name: &'static str, len: usize) {}

    fn visit_list_end(&mut self, name: &'static str, len: usize) {}

    /// A raw payload: a primitive's `value`, an `id` or another attribute.
    fn visit_primitive(&mut self, name: &'static str, value: &PrimitiveValue<'a>) {}
}

pub fn walk<'a, V>(root: &'a dyn Visitable, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    walk_node(Location::root(root), root, visitor);
}

fn walk_node<'a, V>(at: Location, node: &'a dyn Visitable, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    if visitor.pre_visit(at, node) == VisitFlow::Skip {
        return;
    }
    visitor.visit_start(at, node);
    if visitor.visit(at, node) == VisitFlow::Continue {
        for field in node.fields() {
            let name = field.name();
            match field.value {
                FieldValue::Absent => {}
                FieldValue::Primitive(value) => visitor.visit_primitive(name, &value),
                FieldValue::Node(child) => walk_node(Location::field(name), child, visitor),
                FieldValue::List(items) if items.is_empty() => {}
                FieldValue::List(items) => {
                    let len = items.len();
                    visitor.visit_list_start(name, len);
                    for (index, item) in items.into_iter().enumerate() {
                        walk_node(Location::element(name, index), item, visitor);
                    }
                    visitor.visit_list_end(name, len);
                }
            }
        }
    }
    visitor.visit_end(at, node);
    visitor.post_visit(at, node);
}
