//!
//! # KubeVirt CRD validation schemas
//!
//! Static table of OpenAPI v3 schema documents, keyed by the singular
//! resource name of each KubeVirt custom resource. The documents are
//! compiled into the binary and handed out verbatim.
//!
mod error;
mod kind;
mod table;
mod validation;

pub use error::SchemaError;
pub use kind::CrdKind;
pub use table::{CRDS_VALIDATION, SchemaTable, get};
pub use validation::{AdditionalProperties, CustomResourceValidation, JsonSchemaProps};

/// Root key of every schema document in the table
pub const OPEN_API_V3_SCHEMA: &str = "openAPIV3Schema";
