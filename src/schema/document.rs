// Mon Oct 19 2026 - Alex

use crate::types::{MemberFlags, MemberKind};
use serde::{Deserialize, Serialize};

/// Serialized set of type definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Class,
    Record,
    Enum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: DefinitionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKindDefinition {
    #[default]
    Property,
    Field,
}

impl From<MemberKindDefinition> for MemberKind {
    fn from(kind: MemberKindDefinition) -> Self {
        match kind {
            MemberKindDefinition::Property => MemberKind::Property,
            MemberKindDefinition::Field => MemberKind::Field,
        }
    }
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDefinition {
    pub name: String,
    /// Type expression, e.g. `i32`, `[Line]`, `Customer?`.
    #[serde(rename = "type")]
    pub type_expr: String,
    #[serde(default)]
    pub kind: MemberKindDefinition,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default = "yes")]
    pub readable: bool,
    #[serde(default = "yes")]
    pub public: bool,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default, rename = "override")]
    pub overrides: bool,
}

impl MemberDefinition {
    pub fn flags(&self) -> MemberFlags {
        let mut flags = MemberFlags::empty();
        flags.set(MemberFlags::PUBLIC, self.public);
        flags.set(MemberFlags::STATIC, self.is_static);
        flags.set(MemberFlags::READABLE, self.readable);
        flags.set(MemberFlags::INDEXED, self.indexed);
        flags.set(MemberFlags::OVERRIDE, self.overrides);
        flags
    }
}
