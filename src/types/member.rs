// Mon Oct 19 2026 - Alex

use crate::types::{TypeId, TypeRef};
use crate::value::Value;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Visibility and shape flags of a declared member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const PUBLIC = 0b0000_0001;
        const STATIC = 0b0000_0010;
        const READABLE = 0b0000_0100;
        const INDEXED = 0b0000_1000;
        /// Re-declares a same-named member of a base type, hiding it from the flattened set.
        const OVERRIDE = 0b0001_0000;
    }
}

impl Default for MemberFlags {
    fn default() -> Self {
        Self::PUBLIC | Self::READABLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Property => write!(f, "property"),
            MemberKind::Field => write!(f, "field"),
        }
    }
}

/// Slot address of a member value on an instance: the declaring type plus the member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub declaring: TypeId,
    pub name: String,
}

/// A member exactly as a type declares it, before any filtering.
#[derive(Debug, Clone)]
pub struct DeclaredMember {
    name: String,
    kind: MemberKind,
    flags: MemberFlags,
    data_type: TypeRef,
}

impl DeclaredMember {
    pub fn new(name: &str, kind: MemberKind, data_type: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            kind,
            flags: MemberFlags::default(),
            data_type,
        }
    }

    pub fn property(name: &str, data_type: TypeRef) -> Self {
        Self::new(name, MemberKind::Property, data_type)
    }

    pub fn field(name: &str, data_type: TypeRef) -> Self {
        Self::new(name, MemberKind::Field, data_type)
    }

    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn flags(&self) -> MemberFlags {
        self.flags
    }

    pub fn data_type(&self) -> &TypeRef {
        &self.data_type
    }

    /// Public, instance-level, readable and not an indexer.
    pub fn is_data_member(&self) -> bool {
        self.flags.contains(MemberFlags::PUBLIC | MemberFlags::READABLE)
            && !self.flags.intersects(MemberFlags::STATIC | MemberFlags::INDEXED)
    }
}

/// A comparable data member, resolved against the type that declares it.
#[derive(Debug, Clone)]
pub struct DataMember {
    name: String,
    kind: MemberKind,
    declaring_id: TypeId,
    declaring_name: String,
    data_type: TypeRef,
}

impl DataMember {
    pub(crate) fn new(declared: &DeclaredMember, declaring_id: TypeId, declaring_name: &str) -> Self {
        Self {
            name: declared.name.clone(),
            kind: declared.kind,
            declaring_id,
            declaring_name: declaring_name.to_string(),
            data_type: declared.data_type.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn declaring_type(&self) -> TypeId {
        self.declaring_id
    }

    pub fn declaring_type_name(&self) -> &str {
        &self.declaring_name
    }

    pub fn data_type(&self) -> &TypeRef {
        &self.data_type
    }

    pub fn key(&self) -> MemberKey {
        MemberKey {
            declaring: self.declaring_id,
            name: self.name.clone(),
        }
    }

    /// Reads this member off a composite value. `None` when the value has no such slot.
    pub fn get(&self, value: &Value) -> Option<Value> {
        value.as_instance()?.get(&self.key())
    }
}

impl fmt::Display for DataMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_name, self.name)
    }
}
