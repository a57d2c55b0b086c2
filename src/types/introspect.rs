// Mon Oct 19 2026 - Alex

use crate::types::{DataMember, MemberFlags, MemberKind, TypeDescriptor, TypeId};
use ahash::AHashSet;

impl TypeDescriptor {
    /// Public, instance, readable members: properties first, then fields, each in
    /// declaration order with a type's own members ahead of its bases'.
    ///
    /// Same-named members from different declaring types are all returned; callers
    /// that need a single member per name must check for ambiguity themselves.
    pub fn data_members(&self) -> &[DataMember] {
        if !self.is_complete() {
            return &[];
        }
        self.data_members.get_or_init(|| {
            let mut walk = MemberWalk::default();
            walk.visit(self);
            log::trace!(
                "resolved {} data members for {}",
                walk.properties.len() + walk.fields.len(),
                self.name()
            );
            walk.properties.extend(walk.fields);
            walk.properties
        })
    }

    pub fn try_get_data_member(&self, name: &str) -> Option<&DataMember> {
        self.data_members().iter().find(|m| m.name() == name)
    }

    pub fn has_data_member(&self, name: &str) -> bool {
        self.try_get_data_member(name).is_some()
    }
}

#[derive(Default)]
struct MemberWalk {
    visited: AHashSet<TypeId>,
    overridden: AHashSet<String>,
    properties: Vec<DataMember>,
    fields: Vec<DataMember>,
}

impl MemberWalk {
    fn visit(&mut self, ty: &TypeDescriptor) {
        if !self.visited.insert(ty.id()) {
            return;
        }

        let mut overrides = Vec::new();
        for declared in ty.declared_members().iter().filter(|m| m.is_data_member()) {
            if self.overridden.contains(declared.name()) {
                continue;
            }
            if declared.flags().contains(MemberFlags::OVERRIDE) {
                overrides.push(declared.name().to_string());
            }
            let member = DataMember::new(declared, ty.id(), ty.name());
            match declared.kind() {
                MemberKind::Property => self.properties.push(member),
                MemberKind::Field => self.fields.push(member),
            }
        }
        // Hiding applies to bases only, never to siblings declared on the same type.
        self.overridden.extend(overrides);

        for base in ty.bases() {
            self.visit(base);
        }
    }
}
