// Mon Oct 19 2026 - Alex

use crate::types::{DataMember, MemberKey, TypeDescriptor, TypeKind, TypeRef};
use crate::value::{Value, ValueError};
use ahash::AHashSet;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Member storage of a class or record value.
///
/// Slots are keyed by declaring type and name, so two inherited members that share a
/// name keep separate values. Slots are writable after construction, which is how
/// reference cycles get wired up.
pub struct Instance {
    ty: TypeRef,
    slots: RwLock<IndexMap<MemberKey, Value>>,
}

impl Instance {
    pub fn new(ty: TypeRef) -> Self {
        let slots = ty.data_members().iter().map(|m| (m.key(), Value::Null)).collect();
        Self {
            ty,
            slots: RwLock::new(slots),
        }
    }

    pub fn runtime_type(&self) -> &TypeRef {
        &self.ty
    }

    pub fn get(&self, key: &MemberKey) -> Option<Value> {
        self.slots.read().get(key).cloned()
    }

    pub fn get_by_name(&self, name: &str) -> Option<Value> {
        let member = self.ty.try_get_data_member(name)?;
        self.get(&member.key())
    }

    /// Sets the first data member called `name`.
    pub fn set(&self, name: &str, value: Value) -> Result<(), ValueError> {
        let member = self.ty.try_get_data_member(name).ok_or_else(|| ValueError::UnknownMember {
            type_name: self.ty.name().to_string(),
            member: name.to_string(),
        })?;
        self.set_member(member, value)
    }

    /// Fails when `value` is a record whose record-valued members lead back to this
    /// instance: a record holds its members by value and cannot contain itself.
    pub fn set_member(&self, member: &DataMember, value: Value) -> Result<(), ValueError> {
        if let Value::Record(record) = &value {
            if self.reachable_from(record) {
                return Err(ValueError::RecordCycle {
                    type_name: self.ty.name().to_string(),
                    member: member.to_string(),
                });
            }
        }
        let mut slots = self.slots.write();
        let slot = slots.get_mut(&member.key()).ok_or_else(|| ValueError::UnknownMember {
            type_name: self.ty.name().to_string(),
            member: member.to_string(),
        })?;
        *slot = value;
        Ok(())
    }

    /// Whether this instance is `start` or sits below it along record-valued slots.
    fn reachable_from(&self, start: &Arc<Instance>) -> bool {
        let target = self as *const Instance;
        let mut pending = vec![start.clone()];
        let mut seen = AHashSet::new();
        while let Some(record) = pending.pop() {
            if Arc::as_ptr(&record) == target {
                return true;
            }
            if !seen.insert(Arc::as_ptr(&record) as usize) {
                continue;
            }
            pending.extend(record.slots.read().values().filter_map(|v| match v {
                Value::Record(inner) => Some(inner.clone()),
                _ => None,
            }));
        }
        false
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.ty.name())
            .field("members", &self.len())
            .finish()
    }
}

/// A reference-typed collection value.
pub struct Sequence {
    ty: TypeRef,
    items: RwLock<Vec<Value>>,
}

impl Sequence {
    pub fn new(ty: TypeRef, items: Vec<Value>) -> Result<Self, ValueError> {
        if !ty.is_collection() {
            return Err(ValueError::NotCollection(ty.name().to_string()));
        }
        Ok(Self {
            ty,
            items: RwLock::new(items),
        })
    }

    pub(crate) fn untyped(items: Vec<Value>) -> Self {
        Self {
            ty: TypeDescriptor::enumerable(),
            items: RwLock::new(items),
        }
    }

    pub fn runtime_type(&self) -> &TypeRef {
        &self.ty
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Vec<Value> {
        self.items.read().clone()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.items.write().push(value);
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("type", &self.ty.name())
            .field("len", &self.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    ty: TypeRef,
    variant: usize,
}

impl EnumValue {
    pub fn new(ty: &TypeRef, variant: &str) -> Result<Self, ValueError> {
        if !matches!(ty.kind(), TypeKind::Enum { .. }) {
            return Err(ValueError::NotEnum(ty.name().to_string()));
        }
        let index = ty
            .variants()
            .iter()
            .position(|v| v == variant)
            .ok_or_else(|| ValueError::UnknownVariant {
                type_name: ty.name().to_string(),
                variant: variant.to_string(),
            })?;
        Ok(Self {
            ty: ty.clone(),
            variant: index,
        })
    }

    pub fn runtime_type(&self) -> &TypeRef {
        &self.ty
    }

    pub fn index(&self) -> usize {
        self.variant
    }

    pub fn name(&self) -> &str {
        &self.ty.variants()[self.variant]
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty.id() == other.ty.id() && self.variant == other.variant
    }
}
