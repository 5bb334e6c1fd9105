//!
//! # KubeVirt CustomResourceDefinitions
//!
//! Builds the `apiextensions.k8s.io/v1` CustomResourceDefinition objects the
//! operator installs, with their validation patched in from the schema table.
//!
pub mod components;
pub mod manifest;
pub mod types;

mod error;
mod patch;

pub use error::CrdError;
pub use patch::{VersionField, add_fields_to_version};
pub use components::{all_crds, crd_for_kind};

pub use virt_crd_schema as schema;

/// API group of the core KubeVirt resources
pub const GROUP: &str = "kubevirt.io";
/// served and storage version of the core KubeVirt resources
pub const API_VERSION: &str = "v1alpha3";

/// API group of the snapshot and restore resources
pub const SNAPSHOT_GROUP: &str = "snapshot.kubevirt.io";
pub const SNAPSHOT_API_VERSION: &str = "v1alpha1";

/// label attached to every CRD owned by the install strategy
pub const APP_LABEL: &str = "kubevirt.io";
/// label attached to the CRD shipped alongside the operator itself
pub const OPERATOR_LABEL: &str = "operator.kubevirt.io";
