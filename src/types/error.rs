// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Type {type_name} declares member {member} more than once")]
    DuplicateMember { type_name: String, member: String },
    #[error("Type {0} is already defined")]
    AlreadyDefined(String),
    #[error("Type {0} is not a class or record")]
    NotComposite(String),
    #[error("Type {type_name} would inherit from itself through {base}")]
    CyclicBase { type_name: String, base: String },
}
