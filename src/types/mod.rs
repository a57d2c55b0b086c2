// Mon Oct 19 2026 - Alex

pub mod builder;
pub mod cache;
pub mod conformance;
pub mod descriptor;
pub mod error;
pub mod introspect;
pub mod member;
pub mod primitive;

pub use builder::TypeBuilder;
pub use cache::TypeRegistry;
pub use conformance::is_structurally_compatible;
pub use descriptor::{underlying, TypeDescriptor, TypeId, TypeKind, TypeRef};
pub use error::TypeError;
pub use member::{DataMember, DeclaredMember, MemberFlags, MemberKey, MemberKind};
pub use primitive::PrimitiveType;
