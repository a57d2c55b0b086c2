// Mon Oct 19 2026 - Alex

use crate::types::descriptor::Shape;
use crate::types::{DeclaredMember, MemberFlags, TypeDescriptor, TypeError, TypeKind, TypeRef};
use ahash::AHashSet;

/// Builds class and record descriptors.
///
/// The descriptor exists as soon as the builder does; [`TypeBuilder::handle`] returns it
/// so members can refer to the type being built. Until [`TypeBuilder::build`] runs, the
/// handle reports no bases and no members.
pub struct TypeBuilder {
    ty: TypeRef,
    bases: Vec<TypeRef>,
    members: Vec<DeclaredMember>,
}

impl TypeBuilder {
    pub fn class(name: &str) -> Self {
        Self::from_shell_unchecked(TypeDescriptor::shell(name, TypeKind::Class))
    }

    pub fn record(name: &str) -> Self {
        Self::from_shell_unchecked(TypeDescriptor::shell(name, TypeKind::Record))
    }

    /// Declares a class without members yet; complete it later with [`TypeBuilder::for_shell`].
    pub fn declare_class(name: &str) -> TypeRef {
        TypeDescriptor::shell(name, TypeKind::Class)
    }

    pub fn declare_record(name: &str) -> TypeRef {
        TypeDescriptor::shell(name, TypeKind::Record)
    }

    pub fn for_shell(ty: TypeRef) -> Result<Self, TypeError> {
        if !matches!(ty.kind(), TypeKind::Class | TypeKind::Record) {
            return Err(TypeError::NotComposite(ty.name().to_string()));
        }
        if ty.is_complete() {
            return Err(TypeError::AlreadyDefined(ty.name().to_string()));
        }
        Ok(Self::from_shell_unchecked(ty))
    }

    fn from_shell_unchecked(ty: TypeRef) -> Self {
        Self {
            ty,
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn handle(&self) -> TypeRef {
        self.ty.clone()
    }

    pub fn base(mut self, base: TypeRef) -> Self {
        self.bases.push(base);
        self
    }

    pub fn property(self, name: &str, data_type: TypeRef) -> Self {
        self.member(DeclaredMember::property(name, data_type))
    }

    pub fn field(self, name: &str, data_type: TypeRef) -> Self {
        self.member(DeclaredMember::field(name, data_type))
    }

    pub fn override_property(self, name: &str, data_type: TypeRef) -> Self {
        self.member(DeclaredMember::property(name, data_type).with_flags(MemberFlags::default() | MemberFlags::OVERRIDE))
    }

    pub fn member(mut self, member: DeclaredMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> Result<TypeRef, TypeError> {
        let mut seen = AHashSet::new();
        for member in &self.members {
            if !seen.insert(member.name()) {
                return Err(TypeError::DuplicateMember {
                    type_name: self.ty.name().to_string(),
                    member: member.name().to_string(),
                });
            }
        }

        for base in &self.bases {
            if reaches(base, &self.ty) {
                return Err(TypeError::CyclicBase {
                    type_name: self.ty.name().to_string(),
                    base: base.name().to_string(),
                });
            }
        }

        let shape = Shape {
            bases: self.bases,
            members: self.members,
        };
        self.ty
            .shape
            .set(shape)
            .map_err(|_| TypeError::AlreadyDefined(self.ty.name().to_string()))?;
        log::debug!("defined type {}", self.ty.name());
        Ok(self.ty)
    }
}

fn reaches(from: &TypeDescriptor, target: &TypeDescriptor) -> bool {
    from.id() == target.id() || from.bases().iter().any(|b| reaches(b, target))
}
