// Mon Oct 19 2026 - Alex

pub mod decimal;
pub mod display;
pub mod error;
pub mod instance;
pub mod numeric;

pub use decimal::Decimal;
pub use display::to_primitive_string;
pub use error::ValueError;
pub use instance::{EnumValue, Instance, Sequence};
pub use numeric::Numeric;

use crate::types::{PrimitiveType, TypeBuilder, TypeDescriptor, TypeKind, TypeRef};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use std::sync::Arc;
use uuid::Uuid;

/// A runtime value as seen by the comparison engine.
///
/// `Object` and `Seq` are reference kinds: clones share the same storage and compare
/// by pointer identity. Every other variant is a value kind.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Str(String),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Duration(chrono::Duration),
    Guid(Uuid),
    Uri(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Enum(EnumValue),
    Record(Arc<Instance>),
    Object(Arc<Instance>),
    Seq(Arc<Sequence>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        let ty = match self {
            Value::Bool(_) => PrimitiveType::Bool,
            Value::Char(_) => PrimitiveType::Char,
            Value::Str(_) => PrimitiveType::String,
            Value::DateTime(_) => PrimitiveType::DateTime,
            Value::DateTimeOffset(_) => PrimitiveType::DateTimeOffset,
            Value::Duration(_) => PrimitiveType::Duration,
            Value::Guid(_) => PrimitiveType::Guid,
            Value::Uri(_) => PrimitiveType::Uri,
            Value::I8(_) => PrimitiveType::I8,
            Value::I16(_) => PrimitiveType::I16,
            Value::I32(_) => PrimitiveType::I32,
            Value::I64(_) => PrimitiveType::I64,
            Value::U8(_) => PrimitiveType::U8,
            Value::U16(_) => PrimitiveType::U16,
            Value::U32(_) => PrimitiveType::U32,
            Value::U64(_) => PrimitiveType::U64,
            Value::F32(_) => PrimitiveType::F32,
            Value::F64(_) => PrimitiveType::F64,
            Value::Decimal(_) => PrimitiveType::Decimal,
            _ => return None,
        };
        Some(ty)
    }

    /// Runtime type of the value, `None` for null.
    pub fn runtime_type(&self) -> Option<TypeRef> {
        match self {
            Value::Null => None,
            Value::Enum(e) => Some(e.runtime_type().clone()),
            Value::Record(i) | Value::Object(i) => Some(i.runtime_type().clone()),
            Value::Seq(s) => Some(s.runtime_type().clone()),
            other => other.primitive_type().map(TypeDescriptor::primitive),
        }
    }

    pub fn type_name(&self) -> String {
        self.runtime_type()
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Whether the value's runtime type is a value type. Null is not.
    pub fn is_value_kind(&self) -> bool {
        match self {
            Value::Null | Value::Str(_) | Value::Uri(_) | Value::Object(_) | Value::Seq(_) => false,
            _ => true,
        }
    }

    /// Pointer identity of reference kinds.
    pub fn reference_id(&self) -> Option<usize> {
        match self {
            Value::Object(i) => Some(Arc::as_ptr(i) as *const () as usize),
            Value::Seq(s) => Some(Arc::as_ptr(s) as *const () as usize),
            _ => None,
        }
    }

    pub fn same_reference(a: &Value, b: &Value) -> bool {
        match (a.reference_id(), b.reference_id()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Record(i) | Value::Object(i) => Some(i),
            _ => None,
        }
    }

    /// Items of an iterable value: sequences, and strings as sequences of chars.
    pub fn as_iterable(&self) -> Option<Vec<Value>> {
        match self {
            Value::Seq(s) => Some(s.items()),
            Value::Str(s) => Some(s.chars().map(Value::Char).collect()),
            _ => None,
        }
    }

    /// Exact equality of two atomic values of the same kind.
    pub fn primitive_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::DateTimeOffset(a), Value::DateTimeOffset(b)) => a == b && a.offset() == b.offset(),
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Guid(a), Value::Guid(b)) => a == b,
            (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            _ => false,
        }
    }

    pub fn uri(uri: &str) -> Value {
        Value::Uri(uri.to_string())
    }

    pub fn enumeration(ty: &TypeRef, variant: &str) -> Result<Value, ValueError> {
        Ok(Value::Enum(EnumValue::new(ty, variant)?))
    }

    /// New reference instance of `ty` with the given members set by name.
    pub fn object<S: AsRef<str>>(ty: &TypeRef, members: impl IntoIterator<Item = (S, Value)>) -> Result<Value, ValueError> {
        Ok(Value::Object(Arc::new(populate(ty, members)?)))
    }

    /// New value instance of the record type `ty`.
    pub fn record<S: AsRef<str>>(ty: &TypeRef, members: impl IntoIterator<Item = (S, Value)>) -> Result<Value, ValueError> {
        Ok(Value::Record(Arc::new(populate(ty, members)?)))
    }

    /// Object of a fresh class whose properties are exactly `members`, typed by the
    /// runtime type of each value (`object` for null).
    pub fn anonymous<S: AsRef<str>>(members: impl IntoIterator<Item = (S, Value)>) -> Result<Value, ValueError> {
        let members: Vec<(S, Value)> = members.into_iter().collect();
        let mut builder = TypeBuilder::class("<anonymous>");
        for (name, value) in &members {
            let ty = value.runtime_type().unwrap_or_else(TypeDescriptor::any);
            builder = builder.property(name.as_ref(), ty);
        }
        let ty = builder.build()?;
        Value::object(&ty, members)
    }

    pub fn seq(ty: &TypeRef, items: Vec<Value>) -> Result<Value, ValueError> {
        Ok(Value::Seq(Arc::new(Sequence::new(ty.clone(), items)?)))
    }

    /// Untyped sequence.
    pub fn list(items: Vec<Value>) -> Value {
        Value::Seq(Arc::new(Sequence::untyped(items)))
    }
}

fn populate<S: AsRef<str>>(ty: &TypeRef, members: impl IntoIterator<Item = (S, Value)>) -> Result<Instance, ValueError> {
    if !matches!(ty.kind(), TypeKind::Class | TypeKind::Record) {
        return Err(ValueError::NotComposite(ty.name().to_string()));
    }
    let instance = Instance::new(ty.clone());
    for (name, value) in members {
        instance.set(name.as_ref(), value)?;
    }
    Ok(instance)
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    char => Char,
    String => Str,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    chrono::Duration => Duration,
    Uuid => Guid,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    EnumValue => Enum,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
