// Mon Oct 19 2026 - Alex

pub mod document;
pub mod error;
pub mod json;
pub mod parse;

pub use document::{DefinitionKind, MemberDefinition, MemberKindDefinition, SchemaDocument, TypeDefinition};
pub use error::SchemaError;
pub use json::to_value;
pub use parse::parse_type_expr;

use crate::types::{DeclaredMember, TypeBuilder, TypeDescriptor, TypeKind, TypeRef, TypeRegistry};
use ahash::{AHashMap, AHashSet};
use std::path::Path;

/// Types loaded from a [`SchemaDocument`], resolvable by name or type expression.
pub struct Schema {
    registry: TypeRegistry,
}

impl Schema {
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading schema from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(text)?;
        Self::load(&document)
    }

    /// Declares every definition first, then completes classes and records bases-first,
    /// so members may refer to any type in the document, including their own.
    pub fn load(document: &SchemaDocument) -> Result<Self, SchemaError> {
        let registry = TypeRegistry::with_builtins();

        let mut definitions: AHashMap<&str, &TypeDefinition> = AHashMap::new();
        for definition in &document.types {
            if registry.contains(&definition.name) || definitions.insert(&definition.name, definition).is_some() {
                return Err(SchemaError::DuplicateDefinition(definition.name.clone()));
            }
            registry.insert(declare(definition)?);
        }

        for definition in build_order(document, &definitions)? {
            if definition.kind == DefinitionKind::Enum {
                continue;
            }
            complete(definition, &registry)?;
        }

        log::info!("loaded {} types from schema", document.types.len());
        Ok(Self { registry })
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.registry.get(name)
    }

    /// Resolves a type expression such as `[Order]` or `Customer?`.
    pub fn resolve(&self, expr: &str) -> Result<TypeRef, SchemaError> {
        parse_type_expr(expr, &self.registry, "target")
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

fn declare(definition: &TypeDefinition) -> Result<TypeRef, SchemaError> {
    let ty = match definition.kind {
        DefinitionKind::Class => TypeBuilder::declare_class(&definition.name),
        DefinitionKind::Record => TypeBuilder::declare_record(&definition.name),
        DefinitionKind::Enum => {
            if definition.variants.is_empty() {
                return Err(SchemaError::EmptyEnum(definition.name.clone()));
            }
            let variants: Vec<&str> = definition.variants.iter().map(String::as_str).collect();
            TypeDescriptor::enumeration(&definition.name, &variants)
        }
    };
    Ok(ty)
}

fn complete(definition: &TypeDefinition, registry: &TypeRegistry) -> Result<(), SchemaError> {
    let shell = registry.get(&definition.name).ok_or_else(|| SchemaError::UnknownType {
        name: definition.name.clone(),
        context: "schema".to_string(),
    })?;
    let mut builder = TypeBuilder::for_shell(shell)?;

    for base_name in &definition.bases {
        let base = parse_type_expr(base_name, registry, &definition.name)?;
        let composite = matches!(base.kind(), TypeKind::Class | TypeKind::Record);
        if !composite && !base.is_collection() {
            return Err(SchemaError::InvalidBase {
                type_name: definition.name.clone(),
                base: base_name.clone(),
            });
        }
        builder = builder.base(base);
    }

    for member in &definition.members {
        let context = format!("{}.{}", definition.name, member.name);
        let data_type = parse_type_expr(&member.type_expr, registry, &context)?;
        builder = builder.member(DeclaredMember::new(&member.name, member.kind.into(), data_type).with_flags(member.flags()));
    }

    builder.build()?;
    Ok(())
}

/// Definitions ordered so that every base comes before the types deriving from it.
fn build_order<'d>(
    document: &'d SchemaDocument,
    definitions: &AHashMap<&str, &'d TypeDefinition>,
) -> Result<Vec<&'d TypeDefinition>, SchemaError> {
    let mut order = Vec::with_capacity(document.types.len());
    let mut done = AHashSet::new();
    let mut in_progress = AHashSet::new();
    for definition in &document.types {
        visit(definition, definitions, &mut done, &mut in_progress, &mut order)?;
    }
    Ok(order)
}

fn visit<'d>(
    definition: &'d TypeDefinition,
    definitions: &AHashMap<&str, &'d TypeDefinition>,
    done: &mut AHashSet<&'d str>,
    in_progress: &mut AHashSet<&'d str>,
    order: &mut Vec<&'d TypeDefinition>,
) -> Result<(), SchemaError> {
    let name = definition.name.as_str();
    if done.contains(name) {
        return Ok(());
    }
    if !in_progress.insert(name) {
        return Err(SchemaError::CyclicInheritance(name.to_string()));
    }
    for base in &definition.bases {
        if let Some(base_definition) = definitions.get(base.trim()) {
            visit(base_definition, definitions, done, in_progress, order)?;
        }
    }
    in_progress.remove(name);
    done.insert(name);
    order.push(definition);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;

    const ORDERS: &str = r#"{ "types": [
        { "name": "Line", "kind": "record", "members": [
            { "name": "Sku", "type": "string" },
            { "name": "Qty", "type": "int" }
        ] },
        { "name": "Order", "kind": "class", "bases": ["Entity"], "members": [
            { "name": "Lines", "type": "[Line]" },
            { "name": "Status", "type": "Status" },
            { "name": "Parent", "type": "Order?" },
            { "name": "Secret", "type": "string", "public": false }
        ] },
        { "name": "Entity", "kind": "class", "members": [{ "name": "Id", "type": "guid" }] },
        { "name": "Status", "kind": "enum", "variants": ["Open", "Closed"] }
    ] }"#;

    #[test]
    fn test_load_resolves_forward_and_recursive_references() {
        let schema = Schema::from_json_str(ORDERS).unwrap();
        let order = schema.get("Order").unwrap();
        let names: Vec<&str> = order.data_members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Lines", "Status", "Parent", "Id"]);

        let parent = order.try_get_data_member("Parent").unwrap();
        assert_eq!(parent.data_type().nullable_underlying().unwrap().id(), order.id());
        let entity = schema.get("Entity").unwrap();
        assert!(entity.is_assignable_from(&order));
        assert!(schema.get("Line").unwrap().is_value_type());
    }

    #[test]
    fn test_resolve_expressions() {
        let schema = Schema::from_json_str(ORDERS).unwrap();
        assert_eq!(schema.resolve("[Order]").unwrap().name(), "[Order]");
        assert_eq!(schema.resolve("long").unwrap().id(), TypeDescriptor::primitive(PrimitiveType::I64).id());
        assert!(schema.resolve("Invoice").is_err());
    }

    #[test]
    fn test_duplicate_definition() {
        let text = r#"{ "types": [
            { "name": "A", "kind": "class" },
            { "name": "A", "kind": "record" }
        ] }"#;
        assert!(matches!(Schema::from_json_str(text), Err(SchemaError::DuplicateDefinition(ref n)) if n == "A"));

        let shadow = r#"{ "types": [{ "name": "string", "kind": "class" }] }"#;
        assert!(matches!(Schema::from_json_str(shadow), Err(SchemaError::DuplicateDefinition(_))));
    }

    #[test]
    fn test_unknown_member_type() {
        let text = r#"{ "types": [{ "name": "A", "kind": "class", "members": [{ "name": "B", "type": "[Missing]" }] }] }"#;
        let err = Schema::from_json_str(text).err().unwrap();
        assert_eq!(err.to_string(), "Unknown type Missing referenced by A.B");
    }

    #[test]
    fn test_inheritance_cycle() {
        let text = r#"{ "types": [
            { "name": "A", "kind": "class", "bases": ["B"] },
            { "name": "B", "kind": "class", "bases": ["A"] }
        ] }"#;
        assert!(matches!(Schema::from_json_str(text), Err(SchemaError::CyclicInheritance(_))));
    }

    #[test]
    fn test_invalid_bases() {
        let text = r#"{ "types": [{ "name": "A", "kind": "class", "bases": ["int"] }] }"#;
        assert!(matches!(Schema::from_json_str(text), Err(SchemaError::InvalidBase { .. })));

        let text = r#"{ "types": [{ "name": "Tags", "kind": "class", "bases": ["[string]"] }] }"#;
        let schema = Schema::from_json_str(text).unwrap();
        let tags = schema.get("Tags").unwrap();
        assert!(tags.is_collection());
    }

    #[test]
    fn test_empty_enum_rejected() {
        let text = r#"{ "types": [{ "name": "E", "kind": "enum" }] }"#;
        assert!(matches!(Schema::from_json_str(text), Err(SchemaError::EmptyEnum(_))));
    }

    #[test]
    fn test_duplicate_member_surfaces_type_error() {
        let text = r#"{ "types": [{ "name": "A", "kind": "class", "members": [
            { "name": "X", "type": "int" },
            { "name": "X", "type": "int", "kind": "field" }
        ] }] }"#;
        assert!(matches!(Schema::from_json_str(text), Err(SchemaError::Type(_))));
    }
}
