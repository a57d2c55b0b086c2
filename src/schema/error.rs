// Mon Oct 19 2026 - Alex

use crate::types::TypeError;
use crate::value::ValueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Type {0} is defined more than once")]
    DuplicateDefinition(String),
    #[error("Unknown type {name} referenced by {context}")]
    UnknownType { name: String, context: String },
    #[error("Invalid type expression '{0}'")]
    InvalidTypeExpression(String),
    #[error("Type {type_name} cannot derive from {base}")]
    InvalidBase { type_name: String, base: String },
    #[error("Inheritance cycle through {0}")]
    CyclicInheritance(String),
    #[error("Enum {0} declares no variants")]
    EmptyEnum(String),
    #[error("Cannot convert {path} to {type_name}: {reason}")]
    Conversion {
        path: String,
        type_name: String,
        reason: String,
    },
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl SchemaError {
    pub(crate) fn conversion(path: &str, type_name: &str, reason: impl Into<String>) -> Self {
        SchemaError::Conversion {
            path: path.to_string(),
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}
