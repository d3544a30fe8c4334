//! Operation layer: identifiers, definitions and definition catalogs.
//!
//! This module is data only. Graph construction lives in `resolver`.

pub mod definition;
pub mod id;

pub use definition::{OperationCatalog, OperationDefinition, OperationList};
pub use id::OperationType;
