// Mon Oct 19 2026 - Alex

pub mod assert;
pub mod config;
pub mod schema;
pub mod types;
pub mod utils;
pub mod value;

pub use assert::{assert_deep_equal, AssertError, DeepAssert, MismatchKind, StructuralMismatch};
pub use config::AssertConfig;
pub use schema::{Schema, SchemaError};
pub use types::{TypeBuilder, TypeDescriptor, TypeRef};
pub use value::Value;
