// Mon Oct 19 2026 - Alex

use crate::schema::SchemaError;
use crate::types::{PrimitiveType, TypeDescriptor, TypeRef, TypeRegistry};

/// Resolves a type expression against `registry`.
///
/// Grammar: `T?` is nullable, `[T]` a collection of `T`; `object`, `enumerable`,
/// primitive keywords and registered names are leaves. `context` names the referrer
/// in errors.
pub fn parse_type_expr(expr: &str, registry: &TypeRegistry, context: &str) -> Result<TypeRef, SchemaError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(SchemaError::InvalidTypeExpression(expr.to_string()));
    }

    if let Some(inner) = expr.strip_suffix('?') {
        let inner = parse_type_expr(inner, registry, context)?;
        return Ok(TypeDescriptor::nullable(&inner));
    }

    if expr.starts_with('[') || expr.ends_with(']') {
        let inner = expr
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| SchemaError::InvalidTypeExpression(expr.to_string()))?;
        let element = parse_type_expr(inner, registry, context)?;
        return Ok(TypeDescriptor::collection(&element));
    }

    if !expr.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
        return Err(SchemaError::InvalidTypeExpression(expr.to_string()));
    }

    if let Some(primitive) = PrimitiveType::from_name(expr) {
        return Ok(TypeDescriptor::primitive(primitive));
    }
    registry.get(expr).ok_or_else(|| SchemaError::UnknownType {
        name: expr.to_string(),
        context: context.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeBuilder, TypeKind};

    fn parse(expr: &str, registry: &TypeRegistry) -> Result<TypeRef, SchemaError> {
        parse_type_expr(expr, registry, "test")
    }

    #[test]
    fn test_builtins_and_aliases() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(parse("int", &registry).unwrap().name(), "i32");
        assert_eq!(parse("double", &registry).unwrap().name(), "f64");
        assert_eq!(parse("object", &registry).unwrap().id(), TypeDescriptor::any().id());
        assert_eq!(parse("enumerable", &registry).unwrap().id(), TypeDescriptor::enumerable().id());
    }

    #[test]
    fn test_nested_expressions() {
        let registry = TypeRegistry::with_builtins();
        let ty = parse("[int?]?", &registry).unwrap();
        let TypeKind::Nullable(list) = ty.kind() else {
            panic!("expected nullable, got {:?}", ty);
        };
        let element = list.element_type().unwrap();
        assert!(element.is_nullable());
        assert_eq!(element.nullable_underlying().unwrap().name(), "i32");
    }

    #[test]
    fn test_declared_names() {
        let registry = TypeRegistry::with_builtins();
        registry.insert(TypeBuilder::class("Order").build().unwrap());
        assert_eq!(parse("[Order]", &registry).unwrap().name(), "[Order]");
        assert!(matches!(
            parse("Invoice", &registry),
            Err(SchemaError::UnknownType { ref name, .. }) if name == "Invoice"
        ));
    }

    #[test]
    fn test_malformed_expressions() {
        let registry = TypeRegistry::with_builtins();
        for expr in ["", "[int", "int]", "?", "Map<int>"] {
            assert!(parse(expr, &registry).is_err(), "{} should not parse", expr);
        }
    }
}
