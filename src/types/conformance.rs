// Mon Oct 19 2026 - Alex

use crate::types::{PrimitiveType, TypeDescriptor, TypeKind};
use ahash::AHashSet;

impl TypeDescriptor {
    /// Static assignability: a value whose runtime type is `runtime` may be stored in `self`.
    pub fn is_assignable_from(&self, runtime: &TypeDescriptor) -> bool {
        if self.id() == runtime.id() {
            return true;
        }
        match self.kind() {
            TypeKind::Any => return true,
            TypeKind::Nullable(inner) => return inner.is_assignable_from(runtime),
            TypeKind::Collection { element: None } => {
                if runtime.is_collection() || matches!(runtime.kind(), TypeKind::Primitive(PrimitiveType::String)) {
                    return true;
                }
            }
            TypeKind::Collection { element: Some(element) } => {
                if let TypeKind::Collection { element: Some(other) } = runtime.kind() {
                    if element.id() == other.id() {
                        return true;
                    }
                }
            }
            _ => {}
        }
        runtime.bases().iter().any(|base| self.is_assignable_from(base))
    }

    /// Whether `runtime` has a superset of the member names of `self`.
    pub fn is_duck_implemented_by(&self, runtime: &TypeDescriptor) -> bool {
        let runtime_names: AHashSet<&str> = runtime.data_members().iter().map(|m| m.name()).collect();
        self.data_members().iter().all(|m| runtime_names.contains(m.name()))
    }
}

/// Duck typing: `runtime` conforms to `target` by assignability, or by exposing every
/// data member name `target` declares.
pub fn is_structurally_compatible(runtime: &TypeDescriptor, target: &TypeDescriptor) -> bool {
    target.is_assignable_from(runtime) || target.is_duck_implemented_by(runtime)
}
