// Mon Oct 19 2026 - Alex

use crate::assert::AssertNode;
use crate::types::TypeRef;
use crate::value::Value;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Actual,
    Expected,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Actual => write!(f, "actual"),
            Side::Expected => write!(f, "expected"),
        }
    }
}

/// Why a node failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    #[error("target type is null but {0} is non-null")]
    NullTargetViolation(Side),
    #[error("target type is a non-nullable value type but actual is null")]
    NonNullableActualIsNull,
    #[error("actual is null but expected is non-null")]
    ActualNullExpectedNonNull,
    #[error("actual is non-null but expected is null")]
    ActualNonNullExpectedNull,
    #[error("target type is numeric but actual is not a number")]
    ActualNotNumeric,
    #[error("actual and expected are not equal as numbers")]
    NumericMismatch,
    #[error("target type is a primitive type but actual is not an instance of it")]
    ActualViolatesPrimitiveType,
    #[error("actual and expected are not equal as primitive values")]
    PrimitiveMismatch,
    #[error("actual and expected are the same reference but violate the target type")]
    SharedReferenceViolatesTarget,
    #[error("actual is a circular reference but expected is not")]
    CircularActualWithoutCircularExpected,
    #[error("actual and expected are circular references to the same path but violate the target type")]
    CircularReferenceViolatesTarget,
    #[error("expected is a circular reference but actual is not")]
    CircularExpectedWithoutCircularActual,
    #[error("target type is a collection but actual ({0}) is not")]
    ActualNotCollection(String),
    #[error("actual is a collection but expected ({0}) is not")]
    ExpectedNotCollection(String),
    #[error("actual has {actual} items but expected has {expected}")]
    CollectionLengthMismatch { actual: usize, expected: usize },
    #[error("data member {0} not found on actual")]
    MissingMemberOnActual(String),
    #[error("data member {0} not found on expected")]
    MissingMemberOnExpected(String),
    #[error("expected has data members '{}' that the target type does not declare", .0.join("', '"))]
    ExpectedHasExtraMembers(Vec<String>),
}

/// First divergence found between actual and expected.
#[derive(Debug, Clone)]
pub struct StructuralMismatch {
    pub path: String,
    pub target_type: Option<TypeRef>,
    pub actual: Value,
    pub expected: Value,
    pub kind: MismatchKind,
    pub message: Option<String>,
}

impl StructuralMismatch {
    pub fn new(node: &AssertNode<'_>, kind: MismatchKind, message: Option<&str>) -> Self {
        Self {
            path: node.path().to_string(),
            target_type: node.target_type().cloned(),
            actual: node.actual().clone(),
            expected: node.expected().clone(),
            kind,
            message: message.map(str::to_string),
        }
    }
}

impl fmt::Display for StructuralMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        writeln!(f, "{}", self.kind)?;
        writeln!(f, "{{")?;
        writeln!(f, "      path: {}", self.path)?;
        writeln!(
            f,
            "    target: {}",
            self.target_type.as_ref().map(|t| t.name()).unwrap_or("(null)")
        )?;
        writeln!(f, "    actual: {}", self.actual)?;
        writeln!(f, "  expected: {}", self.expected)?;
        write!(f, "}}")
    }
}

impl std::error::Error for StructuralMismatch {}

/// The target type itself cannot be compared against. A defect in the caller's types,
/// not a difference in the data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{} in type '{type_name}' are ambiguous", .members.iter().map(|m| format!("'{}'", m)).join(" and "))]
    AmbiguousMember { type_name: String, members: Vec<String> },
}

#[derive(Error, Debug)]
pub enum AssertError {
    #[error(transparent)]
    Mismatch(Box<StructuralMismatch>),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl AssertError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, AssertError::Mismatch(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AssertError::Configuration(_))
    }

    pub fn mismatch(&self) -> Option<&StructuralMismatch> {
        match self {
            AssertError::Mismatch(m) => Some(m),
            AssertError::Configuration(_) => None,
        }
    }

    pub fn kind(&self) -> Option<&MismatchKind> {
        self.mismatch().map(|m| &m.kind)
    }
}

impl From<StructuralMismatch> for AssertError {
    fn from(mismatch: StructuralMismatch) -> Self {
        AssertError::Mismatch(Box::new(mismatch))
    }
}
