use serde_json::Error as SerdeJsonError;
use serde_yaml::Error as SerdeYamlError;

use virt_crd_schema::SchemaError;

/// Errors that may occur while building or rendering CRD manifests
#[derive(thiserror::Error, Debug)]
pub enum CrdError {
    /// The CRD does not declare the requested version
    #[error("version {version} not found in CustomResourceDefinition: {crd}")]
    VersionNotFound { version: String, crd: String },
    /// The stored validation could not be decoded
    #[error("invalid validation schema")]
    Schema(#[from] SchemaError),
    #[error("failed to serialize manifest as YAML")]
    Yaml(#[from] SerdeYamlError),
    #[error("failed to serialize manifest as JSON")]
    Json(#[from] SerdeJsonError),
}
