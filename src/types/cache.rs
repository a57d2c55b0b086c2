// Mon Oct 19 2026 - Alex

use crate::types::{PrimitiveType, TypeBuilder, TypeDescriptor, TypeRef};
use ahash::AHashMap;
use parking_lot::RwLock;

/// Name-keyed store of descriptors, used to resolve type names in schemas.
pub struct TypeRegistry {
    cache: RwLock<AHashMap<String, TypeRef>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Registry pre-populated with `object`, `enumerable` and every primitive.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.insert(TypeDescriptor::any());
        registry.insert(TypeDescriptor::enumerable());
        for ty in PrimitiveType::ALL {
            registry.insert(TypeDescriptor::primitive(ty));
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.cache.read().get(name).cloned()
    }

    /// Inserts under the descriptor's own name, returning any descriptor it replaced.
    pub fn insert(&self, ty: TypeRef) -> Option<TypeRef> {
        self.cache.write().insert(ty.name().to_string(), ty)
    }

    /// Returns the registered type, or declares and registers an empty class shell.
    pub fn get_or_declare(&self, name: &str) -> TypeRef {
        if let Some(ty) = self.get(name) {
            return ty;
        }
        self.cache
            .write()
            .entry(name.to_string())
            .or_insert_with(|| TypeBuilder::declare_class(name))
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cache.read().contains_key(name)
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
