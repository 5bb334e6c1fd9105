//!
//! # CRD object model
//!
//! Serde mirror of the `apiextensions.k8s.io/v1` CustomResourceDefinition
//! fields the operator sets. Field names follow the Kubernetes JSON encoding.
//!
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use virt_crd_schema::CustomResourceValidation;

use crate::CrdError;

pub const CRD_API_VERSION: &str = "apiextensions.k8s.io/v1";
pub const CRD_KIND: &str = "CustomResourceDefinition";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinition {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: CustomResourceDefinitionSpec,
}

impl Default for CustomResourceDefinition {
    fn default() -> Self {
        Self {
            api_version: CRD_API_VERSION.to_owned(),
            kind: CRD_KIND.to_owned(),
            metadata: ObjectMeta::default(),
            spec: CustomResourceDefinitionSpec::default(),
        }
    }
}

impl CustomResourceDefinition {
    /// metadata.name, `<plural>.<group>`
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn get_version(&self, version: &str) -> Result<&CustomResourceDefinitionVersion, CrdError> {
        self.spec
            .versions
            .iter()
            .find(|v| v.name == version)
            .ok_or_else(|| self.version_not_found(version))
    }

    pub fn get_version_mut(
        &mut self,
        version: &str,
    ) -> Result<&mut CustomResourceDefinitionVersion, CrdError> {
        let not_found = self.version_not_found(version);
        self.spec
            .versions
            .iter_mut()
            .find(|v| v.name == version)
            .ok_or(not_found)
    }

    /// the version persisted by the API server
    pub fn storage_version(&self) -> Option<&CustomResourceDefinitionVersion> {
        self.spec.versions.iter().find(|v| v.storage)
    }

    fn version_not_found(&self, version: &str) -> CrdError {
        CrdError::VersionNotFound {
            version: version.to_owned(),
            crd: self.metadata.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionSpec {
    pub group: String,
    pub names: CustomResourceDefinitionNames,
    pub scope: ResourceScope,
    pub versions: Vec<CustomResourceDefinitionVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_unknown_fields: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionNames {
    pub plural: String,
    pub singular: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceScope {
    #[default]
    Namespaced,
    Cluster,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CustomResourceValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresources: Option<CustomResourceSubresources>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_printer_columns: Vec<CustomResourceColumnDefinition>,
}

impl CustomResourceDefinitionVersion {
    /// a served and stored version with nothing else set
    pub fn served(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            served: true,
            storage: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub priority: i32,
    pub json_path: String,
}

impl CustomResourceColumnDefinition {
    pub fn new(name: &str, type_: &str, json_path: &str) -> Self {
        Self {
            name: name.to_owned(),
            type_: type_.to_owned(),
            json_path: json_path.to_owned(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// columns with priority above 0 only show with `-o wide`
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceSubresources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomResourceSubresourceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<CustomResourceSubresourceScale>,
}

impl CustomResourceSubresources {
    pub fn status() -> Self {
        Self {
            status: Some(CustomResourceSubresourceStatus {}),
            scale: None,
        }
    }
}

/// enables the `/status` subresource; carries no fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomResourceSubresourceStatus {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceSubresourceScale {
    pub spec_replicas_path: String,
    pub status_replicas_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector_path: Option<String>,
}
