// Mon Oct 19 2026 - Alex

use crate::types::TypeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Type {type_name} has no data member {member}")]
    UnknownMember { type_name: String, member: String },
    #[error("Type {0} is not a class or record")]
    NotComposite(String),
    #[error("Type {0} is not an enum")]
    NotEnum(String),
    #[error("Enum {type_name} has no variant {variant}")]
    UnknownVariant { type_name: String, variant: String },
    #[error("Type {0} is not a collection")]
    NotCollection(String),
    #[error("Record {type_name} cannot contain itself through {member}")]
    RecordCycle { type_name: String, member: String },
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}
