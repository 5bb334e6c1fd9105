use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SchemaError;
use crate::table::{
    DATA_VOLUME_TEMPLATE_SPEC, KUBEVIRT, VIRTUAL_MACHINE, VIRTUAL_MACHINE_INSTANCE,
    VIRTUAL_MACHINE_INSTANCE_MIGRATION, VIRTUAL_MACHINE_INSTANCE_PRESET,
    VIRTUAL_MACHINE_INSTANCE_REPLICA_SET, VIRTUAL_MACHINE_RESTORE, VIRTUAL_MACHINE_SNAPSHOT,
    VIRTUAL_MACHINE_SNAPSHOT_CONTENT,
};

/// Resource kinds that carry an entry in the validation table.
///
/// The string form is the singular resource name, which is also the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrdKind {
    DataVolumeTemplateSpec,
    KubeVirt,
    VirtualMachine,
    VirtualMachineInstance,
    VirtualMachineInstanceMigration,
    VirtualMachineInstancePreset,
    VirtualMachineInstanceReplicaSet,
    VirtualMachineRestore,
    VirtualMachineSnapshot,
    VirtualMachineSnapshotContent,
}

impl CrdKind {
    /// every kind, in table key order
    pub const ALL: [CrdKind; 10] = [
        Self::DataVolumeTemplateSpec,
        Self::KubeVirt,
        Self::VirtualMachine,
        Self::VirtualMachineInstance,
        Self::VirtualMachineInstanceMigration,
        Self::VirtualMachineInstancePreset,
        Self::VirtualMachineInstanceReplicaSet,
        Self::VirtualMachineRestore,
        Self::VirtualMachineSnapshot,
        Self::VirtualMachineSnapshotContent,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DataVolumeTemplateSpec => "datavolumetemplatespec",
            Self::KubeVirt => "kubevirt",
            Self::VirtualMachine => "virtualmachine",
            Self::VirtualMachineInstance => "virtualmachineinstance",
            Self::VirtualMachineInstanceMigration => "virtualmachineinstancemigration",
            Self::VirtualMachineInstancePreset => "virtualmachineinstancepreset",
            Self::VirtualMachineInstanceReplicaSet => "virtualmachineinstancereplicaset",
            Self::VirtualMachineRestore => "virtualmachinerestore",
            Self::VirtualMachineSnapshot => "virtualmachinesnapshot",
            Self::VirtualMachineSnapshotContent => "virtualmachinesnapshotcontent",
        }
    }

    /// Schema document for this kind. Never misses, unlike a lookup by name.
    pub const fn schema(&self) -> &'static str {
        match self {
            Self::DataVolumeTemplateSpec => DATA_VOLUME_TEMPLATE_SPEC,
            Self::KubeVirt => KUBEVIRT,
            Self::VirtualMachine => VIRTUAL_MACHINE,
            Self::VirtualMachineInstance => VIRTUAL_MACHINE_INSTANCE,
            Self::VirtualMachineInstanceMigration => VIRTUAL_MACHINE_INSTANCE_MIGRATION,
            Self::VirtualMachineInstancePreset => VIRTUAL_MACHINE_INSTANCE_PRESET,
            Self::VirtualMachineInstanceReplicaSet => VIRTUAL_MACHINE_INSTANCE_REPLICA_SET,
            Self::VirtualMachineRestore => VIRTUAL_MACHINE_RESTORE,
            Self::VirtualMachineSnapshot => VIRTUAL_MACHINE_SNAPSHOT,
            Self::VirtualMachineSnapshotContent => VIRTUAL_MACHINE_SNAPSHOT_CONTENT,
        }
    }
}

impl fmt::Display for CrdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrdKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownKind(s.to_owned()))
    }
}
