// Mon Oct 19 2026 - Alex

use crate::types::{DataMember, DeclaredMember, PrimitiveType};
use ahash::AHashMap;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    fn next() -> Self {
        Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

pub type TypeRef = Arc<TypeDescriptor>;

#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Root type every value conforms to. Declares no members.
    Any,
    Primitive(PrimitiveType),
    Enum { variants: Vec<String> },
    Nullable(TypeRef),
    Collection { element: Option<TypeRef> },
    /// Reference composite.
    Class,
    /// Value composite.
    Record,
}

/// Bases and members of a composite, fixed once when its builder completes.
#[derive(Debug, Default)]
pub(crate) struct Shape {
    pub(crate) bases: Vec<TypeRef>,
    pub(crate) members: Vec<DeclaredMember>,
}

/// Static description of a type: its classification, bases and declared members.
///
/// Descriptors live as long as the types they describe. Composite descriptors may be
/// handed out before their shape is known so that recursive types can refer to
/// themselves; see [`crate::types::TypeBuilder`].
pub struct TypeDescriptor {
    id: TypeId,
    name: String,
    kind: TypeKind,
    pub(crate) shape: OnceCell<Shape>,
    pub(crate) data_members: OnceCell<Vec<DataMember>>,
}

struct Builtins {
    any: TypeRef,
    enumerable: TypeRef,
    primitives: AHashMap<PrimitiveType, TypeRef>,
}

static BUILTINS: Lazy<Builtins> = Lazy::new(|| {
    let primitives = PrimitiveType::ALL
        .iter()
        .map(|&p| (p, TypeDescriptor::completed(p.name(), TypeKind::Primitive(p))))
        .collect();
    Builtins {
        any: TypeDescriptor::completed("object", TypeKind::Any),
        enumerable: TypeDescriptor::completed("enumerable", TypeKind::Collection { element: None }),
        primitives,
    }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ConstructedKey {
    Nullable(TypeId),
    Collection(TypeId),
}

static CONSTRUCTED: Lazy<RwLock<AHashMap<ConstructedKey, TypeRef>>> =
    Lazy::new(|| RwLock::new(AHashMap::new()));

impl TypeDescriptor {
    pub(crate) fn shell(name: &str, kind: TypeKind) -> TypeRef {
        Arc::new(Self {
            id: TypeId::next(),
            name: name.to_string(),
            kind,
            shape: OnceCell::new(),
            data_members: OnceCell::new(),
        })
    }

    fn completed(name: &str, kind: TypeKind) -> TypeRef {
        let ty = Self::shell(name, kind);
        let _ = ty.shape.set(Shape::default());
        ty
    }

    pub fn any() -> TypeRef {
        BUILTINS.any.clone()
    }

    /// The untyped collection type: every collection and the string type conform to it.
    pub fn enumerable() -> TypeRef {
        BUILTINS.enumerable.clone()
    }

    pub fn primitive(ty: PrimitiveType) -> TypeRef {
        BUILTINS.primitives[&ty].clone()
    }

    pub fn enumeration(name: &str, variants: &[&str]) -> TypeRef {
        let variants = variants.iter().map(|v| v.to_string()).collect();
        Self::completed(name, TypeKind::Enum { variants })
    }

    /// Nullable wrapper. Constructed once per underlying type.
    pub fn nullable(inner: &TypeRef) -> TypeRef {
        if inner.is_nullable() {
            return inner.clone();
        }
        Self::constructed(ConstructedKey::Nullable(inner.id), || {
            Self::completed(&format!("{}?", inner.name), TypeKind::Nullable(inner.clone()))
        })
    }

    /// Collection of `element`. Constructed once per element type.
    pub fn collection(element: &TypeRef) -> TypeRef {
        Self::constructed(ConstructedKey::Collection(element.id), || {
            Self::completed(
                &format!("[{}]", element.name),
                TypeKind::Collection {
                    element: Some(element.clone()),
                },
            )
        })
    }

    fn constructed(key: ConstructedKey, create: impl FnOnce() -> TypeRef) -> TypeRef {
        if let Some(ty) = CONSTRUCTED.read().get(&key) {
            return ty.clone();
        }
        CONSTRUCTED.write().entry(key).or_insert_with(create).clone()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Whether the shape has been fixed. Always true outside of a pending builder.
    pub fn is_complete(&self) -> bool {
        self.shape.get().is_some()
    }

    pub fn bases(&self) -> &[TypeRef] {
        self.shape.get().map(|s| s.bases.as_slice()).unwrap_or(&[])
    }

    pub fn declared_members(&self) -> &[DeclaredMember] {
        self.shape.get().map(|s| s.members.as_slice()).unwrap_or(&[])
    }

    pub fn variants(&self) -> &[String] {
        match &self.kind {
            TypeKind::Enum { variants } => variants,
            _ => &[],
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.kind, TypeKind::Nullable(_))
    }

    pub fn nullable_underlying(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match &self.kind {
            TypeKind::Primitive(p) => p.is_numeric(),
            TypeKind::Nullable(inner) => inner.is_numeric(),
            _ => false,
        }
    }

    pub fn is_primitive_scalar(&self) -> bool {
        match &self.kind {
            TypeKind::Primitive(_) | TypeKind::Enum { .. } => true,
            TypeKind::Nullable(inner) => inner.is_primitive_scalar(),
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(PrimitiveType::String))
    }

    /// Iterable types other than string. A composite deriving from a collection counts.
    pub fn is_collection(&self) -> bool {
        match &self.kind {
            TypeKind::Collection { .. } => true,
            TypeKind::Class | TypeKind::Record => self.bases().iter().any(|b| b.is_collection()),
            _ => false,
        }
    }

    /// Statically known element type, if any.
    pub fn element_type(&self) -> Option<TypeRef> {
        match &self.kind {
            TypeKind::Collection { element } => element.clone(),
            TypeKind::Class | TypeKind::Record => self
                .bases()
                .iter()
                .filter(|b| b.is_collection())
                .find_map(|b| b.element_type()),
            _ => None,
        }
    }

    pub fn is_value_type(&self) -> bool {
        match &self.kind {
            TypeKind::Primitive(p) => p.is_value_type(),
            TypeKind::Enum { .. } | TypeKind::Record | TypeKind::Nullable(_) => true,
            TypeKind::Any | TypeKind::Collection { .. } | TypeKind::Class => false,
        }
    }

    /// A value type that cannot hold null.
    pub fn is_non_nullable_value_type(&self) -> bool {
        self.is_value_type() && !self.is_nullable()
    }
}

/// Strips a nullable wrapper, returning the type itself otherwise.
pub fn underlying(ty: &TypeRef) -> TypeRef {
    ty.nullable_underlying().cloned().unwrap_or_else(|| ty.clone())
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("id", &self.id.0)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
