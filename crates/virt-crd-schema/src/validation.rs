use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::SchemaError;

/// Decoded validation stanza of a CRD version
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomResourceValidation {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: JsonSchemaProps,
}

impl CustomResourceValidation {
    /// decode a document of the validation table
    pub fn from_yaml(kind: &str, document: &str) -> Result<Self, SchemaError> {
        debug!(kind, bytes = document.len(), "decoding validation");
        serde_yaml::from_str(document).map_err(|source| SchemaError::Yaml {
            kind: kind.to_owned(),
            source,
        })
    }

    pub fn schema(&self) -> &JsonSchemaProps {
        &self.open_api_v3_schema
    }
}

/// Subset of the OpenAPI v3 schema object accepted by Kubernetes for CRDs.
///
/// Keywords without a dedicated field are kept in `extra`, so decoding and
/// re-encoding a document does not drop anything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchemaProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, JsonSchemaProps>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchemaProps>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<JsonSchemaProps>,
    #[serde(
        rename = "x-kubernetes-preserve-unknown-fields",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preserve_unknown_fields: Option<bool>,
    #[serde(
        rename = "x-kubernetes-int-or-string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub int_or_string: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// `additionalProperties` is either a flag or a schema for the map values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<JsonSchemaProps>),
}

impl JsonSchemaProps {
    pub fn is_object(&self) -> bool {
        self.type_.as_deref() == Some("object")
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|field| field == name)
    }

    /// Walk nested `properties` along a dotted path such as `spec.template`.
    ///
    /// A segment ending in `[]` steps into the array's `items` schema,
    /// e.g. `spec.volumes[].containerDisk`.
    pub fn property(&self, path: &str) -> Option<&JsonSchemaProps> {
        path.split('.').try_fold(self, |node, segment| {
            match segment.strip_suffix("[]") {
                Some(name) => node.properties.get(name)?.items.as_deref(),
                None => node.properties.get(segment),
            }
        })
    }

    /// number of schema nodes in this tree, including this one
    pub fn node_count(&self) -> usize {
        let nested: usize = self.properties.values().map(Self::node_count).sum();
        let items = self.items.as_deref().map_or(0, Self::node_count);
        let additional = match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => schema.node_count(),
            _ => 0,
        };
        let any_of: usize = self.any_of.iter().map(Self::node_count).sum();
        1 + nested + items + additional + any_of
    }
}
