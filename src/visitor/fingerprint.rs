use sha2::{Digest, Sha256};

use crate::types::{PrimitiveValue, Visitable};
use crate::visitor::{Location, Visitor, walk};

struct FingerprintVisitor {
    hasher: Sha256,
}

impl FingerprintVisitor {
    fn write_location(&mut self, at: Location) {
        self.hasher.update(at.name.as_bytes());
        if let Some(index) = at.index {
            self.hasher.update(format!("[{index}]").as_bytes());
        }
    }
}

impl<'a> Visitor<'a> for FingerprintVisitor {
    fn visit_start(&mut self, at: Location, node: &'a dyn Visitable) {
        self.write_location(at);
        self.hasher.update(b":");
        self.hasher.update(node.type_name().as_bytes());
        self.hasher.update(b"{");
    }

    fn visit_end(&mut self, _at: Location, _node: &'a dyn Visitable) {
        self.hasher.update(b"}");
    }

    fn visit_primitive(&mut self, name: &'static str, value: &PrimitiveValue<'a>) {
        let tag: &[u8] = match value {
            PrimitiveValue::Boolean(_) => b"b",
            PrimitiveValue::Integer(_) => b"i",
            PrimitiveValue::Decimal(_) => b"d",
            PrimitiveValue::Text(_) => b"s",
        };
        let text = value.to_string();
        self.hasher.update(name.as_bytes());
        self.hasher.update(tag);
        // length prefix keeps "ab"+"c" apart from "a"+"bc"
        self.hasher.update(text.len().to_le_bytes());
        self.hasher.update(text.as_bytes());
    }
}

/// SHA-256 over the canonical walk of `root`, as lowercase hex.
///
/// Structurally equal trees give equal fingerprints. Field names, list
/// indices, type names and primitive payloads all contribute.
pub fn fingerprint(root: &dyn Visitable) -> String {
    let mut visitor = FingerprintVisitor {
        hasher: Sha256::new(),
    };
    walk(root, &mut visitor);
    format!("{:x}", visitor.hasher.finalize())
}

/// Names of the populated summary fields of `node`, in declared order.
pub fn summary_fields(node: &dyn Visitable) -> Vec<&'static str> {
    node.fields()
        .iter()
        .filter(|field| field.descriptor.summary && field.value.is_present())
        .map(|field| field.name())
        .collect()
}
