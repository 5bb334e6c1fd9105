use serde_yaml::Error as SerdeYamlError;

/// Errors raised while looking up or decoding a schema document
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    /// The name does not match any entry of the table
    #[error("unknown CRD kind: {0}")]
    UnknownKind(String),
    /// The stored document could not be decoded into a validation
    #[error("could not decode validation for {kind}")]
    Yaml {
        kind: String,
        #[source]
        source: SerdeYamlError,
    },
}
