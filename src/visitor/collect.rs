use crate::types::Visitable;
use crate::visitor::{Location, Visitor, walk};

/// Gathers every node of type `T` in walk order, the root included.
#[derive(Debug)]
pub struct CollectingVisitor<'a, T: Visitable> {
    found: Vec<&'a T>,
}

impl<T: Visitable> Default for CollectingVisitor<'_, T> {
    fn default() -> Self {
        Self { found: Vec::new() }
    }
}

impl<'a, T: Visitable> CollectingVisitor<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(&self) -> &[&'a T] {
        &self.found
    }

    pub fn into_found(self) -> Vec<&'a T> {
        self.found
    }
}

impl<'a, T: Visitable> Visitor<'a> for CollectingVisitor<'a, T> {
    fn visit_start(&mut self, _at: Location, node: &'a dyn Visitable) {
        if let Some(typed) = node.downcast_ref::<T>() {
            self.found.push(typed);
        }
    }
}

pub fn collect<'a, T: Visitable>(root: &'a dyn Visitable) -> Vec<&'a T> {
    let mut visitor = CollectingVisitor::new();
    walk(root, &mut visitor);
    visitor.into_found()
}
