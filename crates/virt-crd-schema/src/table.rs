use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::{CrdKind, CustomResourceValidation, SchemaError};

pub(crate) const DATA_VOLUME_TEMPLATE_SPEC: &str =
    include_str!("../schemas/datavolumetemplatespec.yaml");
pub(crate) const KUBEVIRT: &str = include_str!("../schemas/kubevirt.yaml");
pub(crate) const VIRTUAL_MACHINE: &str = include_str!("../schemas/virtualmachine.yaml");
pub(crate) const VIRTUAL_MACHINE_INSTANCE: &str =
    include_str!("../schemas/virtualmachineinstance.yaml");
pub(crate) const VIRTUAL_MACHINE_INSTANCE_MIGRATION: &str =
    include_str!("../schemas/virtualmachineinstancemigration.yaml");
pub(crate) const VIRTUAL_MACHINE_INSTANCE_PRESET: &str =
    include_str!("../schemas/virtualmachineinstancepreset.yaml");
pub(crate) const VIRTUAL_MACHINE_INSTANCE_REPLICA_SET: &str =
    include_str!("../schemas/virtualmachineinstancereplicaset.yaml");
pub(crate) const VIRTUAL_MACHINE_RESTORE: &str =
    include_str!("../schemas/virtualmachinerestore.yaml");
pub(crate) const VIRTUAL_MACHINE_SNAPSHOT: &str =
    include_str!("../schemas/virtualmachinesnapshot.yaml");
pub(crate) const VIRTUAL_MACHINE_SNAPSHOT_CONTENT: &str =
    include_str!("../schemas/virtualmachinesnapshotcontent.yaml");

/// Validation documents for every CRD the operator installs.
///
/// Built once on first access and never modified afterwards, so it can be
/// read from any thread.
pub static CRDS_VALIDATION: Lazy<SchemaTable> = Lazy::new(SchemaTable::load);

/// Look up the schema document stored for `kind`.
///
/// Returns the stored text byte-for-byte, or `None` for names outside the table.
pub fn get(kind: &str) -> Option<&'static str> {
    CRDS_VALIDATION.get(kind)
}

/// Read-only mapping from singular resource name to schema document
#[derive(Debug)]
pub struct SchemaTable {
    entries: BTreeMap<&'static str, &'static str>,
}

impl SchemaTable {
    fn load() -> Self {
        let entries: BTreeMap<_, _> = CrdKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str(), kind.schema()))
            .collect();
        debug!(entries = entries.len(), "loaded CRD validation table");
        Self { entries }
    }

    pub fn get(&self, kind: &str) -> Option<&'static str> {
        let schema = self.entries.get(kind).copied();
        if schema.is_none() {
            trace!(kind, "no validation stored");
        }
        schema
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// table keys, sorted
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(kind, schema)| (*kind, *schema))
    }

    /// Decode the document stored for `kind`.
    ///
    /// The stored text is left untouched; the caller owns the decoded copy.
    pub fn parse(&self, kind: &str) -> Result<CustomResourceValidation, SchemaError> {
        let schema = self
            .get(kind)
            .ok_or_else(|| SchemaError::UnknownKind(kind.to_owned()))?;
        CustomResourceValidation::from_yaml(kind, schema)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_has_every_kind() {
        assert_eq!(CRDS_VALIDATION.len(), CrdKind::ALL.len());
        for kind in CrdKind::ALL {
            assert!(CRDS_VALIDATION.contains(kind.as_str()), "{kind} missing");
        }
    }

    #[test]
    fn test_get_is_verbatim() {
        assert_eq!(get("kubevirt"), Some(KUBEVIRT));
        assert_eq!(
            get("virtualmachine"),
            Some(CrdKind::VirtualMachine.schema())
        );
        assert!(get("virtualmachineinstance").unwrap().starts_with("openAPIV3Schema:"));
    }

    #[test]
    fn test_get_miss() {
        assert_eq!(get("doesnotexist"), None);
        assert_eq!(get(""), None);
        assert_eq!(get("VirtualMachine"), None);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = CRDS_VALIDATION.parse("doesnotexist").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind(_)));
    }
}
