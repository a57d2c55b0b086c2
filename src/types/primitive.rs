// Mon Oct 19 2026 - Alex

use std::fmt;

/// Closed set of atomic kinds compared by value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Bool,
    Char,
    String,
    DateTime,
    DateTimeOffset,
    Duration,
    Guid,
    Uri,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 19] = [
        Self::Bool,
        Self::Char,
        Self::String,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::Duration,
        Self::Guid,
        Self::Uri,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Decimal,
    ];

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || self == Self::Decimal
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// String and Uri are reference types; every other primitive is a value type.
    pub fn is_value_type(self) -> bool {
        !matches!(self, Self::String | Self::Uri)
    }

    /// Inclusive range of an integer kind, `None` for everything else.
    pub fn integer_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::U32 => (0, u32::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::DateTimeOffset => "datetimeoffset",
            Self::Duration => "duration",
            Self::Guid => "guid",
            Self::Uri => "uri",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "decimal",
        }
    }

    /// Resolves a type-expression keyword, including the common C#-style aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "bool" | "boolean" => Self::Bool,
            "char" => Self::Char,
            "string" | "str" => Self::String,
            "datetime" => Self::DateTime,
            "datetimeoffset" => Self::DateTimeOffset,
            "duration" | "timespan" => Self::Duration,
            "guid" | "uuid" => Self::Guid,
            "uri" | "url" => Self::Uri,
            "i8" | "sbyte" => Self::I8,
            "i16" | "short" => Self::I16,
            "i32" | "int" => Self::I32,
            "i64" | "long" => Self::I64,
            "u8" | "byte" => Self::U8,
            "u16" | "ushort" => Self::U16,
            "u32" | "uint" => Self::U32,
            "u64" | "ulong" => Self::U64,
            "f32" | "float" => Self::F32,
            "f64" | "double" => Self::F64,
            "decimal" => Self::Decimal,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_classification() {
        let numeric: Vec<_> = PrimitiveType::ALL.iter().filter(|p| p.is_numeric()).collect();
        assert_eq!(numeric.len(), 11);
        assert!(!PrimitiveType::Bool.is_numeric());
        assert!(!PrimitiveType::Char.is_numeric());
        assert!(PrimitiveType::Decimal.is_numeric());
        assert!(!PrimitiveType::Decimal.is_integer());
    }

    #[test]
    fn test_value_types() {
        assert!(!PrimitiveType::String.is_value_type());
        assert!(!PrimitiveType::Uri.is_value_type());
        assert!(PrimitiveType::Guid.is_value_type());
        assert!(PrimitiveType::I32.is_value_type());
    }

    #[test]
    fn test_names_round_trip() {
        for ty in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(PrimitiveType::from_name("int"), Some(PrimitiveType::I32));
        assert_eq!(PrimitiveType::from_name("Order"), None);
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(PrimitiveType::U8.integer_range(), Some((0, 255)));
        assert_eq!(PrimitiveType::F64.integer_range(), None);
    }
}
