// Mon Oct 19 2026 - Alex

use crate::value::{Decimal, Value};

/// Width-independent view of a numeric value.
///
/// Integers of any width and signedness compare exactly, decimals compare after
/// normalization, and anything involving a float compares as `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Numeric {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Numeric {
    pub fn from_value(value: &Value) -> Option<Self> {
        let numeric = match value {
            Value::I8(v) => Self::Int(*v as i128),
            Value::I16(v) => Self::Int(*v as i128),
            Value::I32(v) => Self::Int(*v as i128),
            Value::I64(v) => Self::Int(*v as i128),
            Value::U8(v) => Self::Int(*v as i128),
            Value::U16(v) => Self::Int(*v as i128),
            Value::U32(v) => Self::Int(*v as i128),
            Value::U64(v) => Self::Int(*v as i128),
            Value::F32(v) => Self::Float(*v as f64),
            Value::F64(v) => Self::Float(*v),
            Value::Decimal(v) => Self::Decimal(*v),
            _ => return None,
        };
        Some(numeric)
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Decimal(v) => v.to_f64(),
        }
    }

    /// Numeric equality against an arbitrary value. Non-numeric values never match.
    pub fn equals_value(&self, other: &Value) -> bool {
        Self::from_value(other).map_or(false, |other| *self == other)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Int(a), Self::Decimal(d)) | (Self::Decimal(d), Self::Int(a)) => Decimal::from_i128(*a) == *d,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cross_width_equality() {
        let three = Numeric::from_value(&Value::from(3i32)).unwrap();
        assert!(three.equals_value(&Value::from(3.0f64)));
        assert!(three.equals_value(&Value::from(3u8)));
        assert!(three.equals_value(&Value::from(3i64)));
        assert!(three.equals_value(&Value::Decimal("3.00".parse().unwrap())));
        assert!(!three.equals_value(&Value::from(4i32)));
        assert!(!three.equals_value(&Value::from("3")));
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let max = Numeric::from_value(&Value::from(u64::MAX)).unwrap();
        assert!(!max.equals_value(&Value::from(i64::MAX)));
        assert!(max.equals_value(&Value::from(u64::MAX)));
    }

    #[test]
    fn test_non_numeric() {
        assert!(Numeric::from_value(&Value::from(true)).is_none());
        assert!(Numeric::from_value(&Value::Null).is_none());
    }

    proptest! {
        /// Any i32 equals itself at every wider width and as a double.
        #[test]
        fn i32_equals_wider_widths(v in any::<i32>()) {
            let n = Numeric::from_value(&Value::from(v)).unwrap();
            prop_assert!(n.equals_value(&Value::from(v as i64)));
            prop_assert!(n.equals_value(&Value::from(v as f64)));
            prop_assert!(n.equals_value(&Value::Decimal(Decimal::from_i128(v as i128))));
        }
    }
}
