// Mon Oct 19 2026 - Alex

use crate::schema::SchemaError;
use crate::types::{PrimitiveType, TypeBuilder, TypeDescriptor, TypeKind, TypeRef};
use crate::value::{Decimal, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Number, Value as JsonValue};
use uuid::Uuid;

const ANONYMOUS: &str = "<anonymous>";

/// Converts a JSON document into a [`Value`], guided by `ty`.
///
/// Numbers narrow to the declared width and must fit it. Strings become dates, guids
/// or enum variants where declared. Objects become instances of an anonymous class
/// whose members are exactly the JSON keys; a key typed by `ty` keeps that type,
/// anything else is inferred. JSON whose shape does not fit the declared type is
/// inferred as well, so the comparison can report it.
pub fn to_value(json: &JsonValue, ty: &TypeRef) -> Result<Value, SchemaError> {
    convert(json, ty, "$")
}

/// Converts without a declared type.
pub fn infer_value(json: &JsonValue) -> Result<Value, SchemaError> {
    infer(json, "$")
}

fn convert(json: &JsonValue, ty: &TypeRef, path: &str) -> Result<Value, SchemaError> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    match ty.kind() {
        TypeKind::Nullable(inner) => convert(json, inner, path),
        TypeKind::Any => infer(json, path),
        TypeKind::Primitive(primitive) => convert_primitive(json, *primitive, path),
        TypeKind::Enum { .. } => match json {
            JsonValue::String(variant) => Value::enumeration(ty, variant)
                .map_err(|err| SchemaError::conversion(path, ty.name(), err.to_string())),
            _ => infer(json, path),
        },
        TypeKind::Collection { .. } | TypeKind::Class | TypeKind::Record => match json {
            JsonValue::Array(items) if ty.is_collection() => {
                let element = ty.element_type();
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    let value = match &element {
                        Some(element) => convert(item, element, &item_path)?,
                        None => infer(item, &item_path)?,
                    };
                    values.push(value);
                }
                Ok(Value::seq(ty, values)?)
            }
            JsonValue::Object(map) if !matches!(ty.kind(), TypeKind::Collection { .. }) => {
                convert_object(map, Some(ty), path)
            }
            _ => infer(json, path),
        },
    }
}

fn convert_object(map: &Map<String, JsonValue>, ty: Option<&TypeRef>, path: &str) -> Result<Value, SchemaError> {
    let mut builder = TypeBuilder::class(ANONYMOUS);
    let mut members = Vec::with_capacity(map.len());
    for (key, item) in map {
        let member_path = format!("{}.{}", path, key);
        let declared = ty
            .and_then(|t| t.try_get_data_member(key))
            .map(|m| m.data_type().clone());
        let value = match &declared {
            Some(declared) => convert(item, declared, &member_path)?,
            None => infer(item, &member_path)?,
        };
        let member_type = declared
            .or_else(|| value.runtime_type())
            .unwrap_or_else(TypeDescriptor::any);
        builder = builder.property(key, member_type);
        members.push((key.as_str(), value));
    }
    let anonymous = builder.build()?;
    Ok(Value::object(&anonymous, members)?)
}

fn infer(json: &JsonValue, path: &str) -> Result<Value, SchemaError> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(v) => Ok(Value::Bool(*v)),
        JsonValue::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Value::I64(v))
            } else if let Some(v) = n.as_u64() {
                Ok(Value::U64(v))
            } else {
                n.as_f64()
                    .map(Value::F64)
                    .ok_or_else(|| SchemaError::conversion(path, "f64", format!("{} is not representable", n)))
            }
        }
        JsonValue::String(s) => Ok(Value::Str(s.clone())),
        JsonValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                values.push(infer(item, &format!("{}[{}]", path, index))?);
            }
            Ok(Value::list(values))
        }
        JsonValue::Object(map) => convert_object(map, None, path),
    }
}

fn convert_primitive(json: &JsonValue, primitive: PrimitiveType, path: &str) -> Result<Value, SchemaError> {
    let name = primitive.name();
    let invalid = |reason: String| SchemaError::conversion(path, name, reason);

    match (primitive, json) {
        (PrimitiveType::Bool, JsonValue::Bool(v)) => Ok(Value::Bool(*v)),
        (PrimitiveType::Char, JsonValue::String(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(invalid(format!("{:?} is not a single character", s))),
            }
        }
        (PrimitiveType::String, JsonValue::String(s)) => Ok(Value::Str(s.clone())),
        (PrimitiveType::Uri, JsonValue::String(s)) => Ok(Value::Uri(s.clone())),
        (PrimitiveType::DateTime, JsonValue::String(s)) => parse_datetime(s)
            .map(Value::DateTime)
            .ok_or_else(|| invalid(format!("{:?} is not a date", s))),
        (PrimitiveType::DateTimeOffset, JsonValue::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(Value::DateTimeOffset)
            .map_err(|err| invalid(err.to_string())),
        (PrimitiveType::Duration, JsonValue::Number(n)) => {
            let seconds = n.as_f64().ok_or_else(|| invalid(format!("{} is not representable", n)))?;
            Ok(Value::Duration(chrono::Duration::milliseconds((seconds * 1000.0).round() as i64)))
        }
        (PrimitiveType::Guid, JsonValue::String(s)) => Uuid::parse_str(s)
            .map(Value::Guid)
            .map_err(|err| invalid(err.to_string())),
        (PrimitiveType::Decimal, JsonValue::Number(n)) => parse_decimal(&n.to_string()).map_err(invalid),
        (PrimitiveType::Decimal, JsonValue::String(s)) => parse_decimal(s).map_err(invalid),
        (PrimitiveType::F32, JsonValue::Number(n)) => n
            .as_f64()
            .map(|v| Value::F32(v as f32))
            .ok_or_else(|| invalid(format!("{} is not representable", n))),
        (PrimitiveType::F64, JsonValue::Number(n)) => n
            .as_f64()
            .map(Value::F64)
            .ok_or_else(|| invalid(format!("{} is not representable", n))),
        (p, JsonValue::Number(n)) if p.is_integer() => convert_integer(n, p, path),
        _ => infer(json, path),
    }
}

/// Narrows a JSON number to an integer kind. A number with a fraction stays a float.
fn convert_integer(n: &Number, primitive: PrimitiveType, path: &str) -> Result<Value, SchemaError> {
    let wide: i128 = if let Some(v) = n.as_i64() {
        v as i128
    } else if let Some(v) = n.as_u64() {
        v as i128
    } else {
        let v = n.as_f64().unwrap_or(f64::NAN);
        if !v.is_finite() || v.fract() != 0.0 || v.abs() > i128::MAX as f64 {
            return Ok(Value::F64(v));
        }
        v as i128
    };

    let out_of_range = |_: std::num::TryFromIntError| SchemaError::conversion(path, primitive.name(), format!("{} is out of range", wide));
    let value = match primitive {
        PrimitiveType::I8 => i8::try_from(wide).map(Value::I8),
        PrimitiveType::I16 => i16::try_from(wide).map(Value::I16),
        PrimitiveType::I32 => i32::try_from(wide).map(Value::I32),
        PrimitiveType::I64 => i64::try_from(wide).map(Value::I64),
        PrimitiveType::U8 => u8::try_from(wide).map(Value::U8),
        PrimitiveType::U16 => u16::try_from(wide).map(Value::U16),
        PrimitiveType::U32 => u32::try_from(wide).map(Value::U32),
        PrimitiveType::U64 => u64::try_from(wide).map(Value::U64),
        other => return Err(SchemaError::conversion(path, other.name(), "not an integer type")),
    };
    value.map_err(out_of_range)
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_decimal(s: &str) -> Result<Value, String> {
    s.parse::<Decimal>().map(Value::Decimal).map_err(|err| err.to_string())
}
