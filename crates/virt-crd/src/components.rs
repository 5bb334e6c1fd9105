//!
//! # CRD constructors
//!
//! One constructor per resource the operator installs. Each returns a CRD
//! with names, printer columns and subresources set, and the validation
//! patched into every version.
//!
use std::collections::BTreeMap;

use tracing::debug;

use virt_crd_schema::CrdKind;

use crate::types::{
    CustomResourceColumnDefinition as Column, CustomResourceDefinition,
    CustomResourceDefinitionNames, CustomResourceDefinitionSpec, CustomResourceDefinitionVersion,
    CustomResourceSubresourceScale, CustomResourceSubresourceStatus, CustomResourceSubresources,
    ObjectMeta, ResourceScope,
};
use crate::{
    API_VERSION, APP_LABEL, CrdError, GROUP, OPERATOR_LABEL, SNAPSHOT_API_VERSION, SNAPSHOT_GROUP,
    VersionField,
};

const CREATION_TIMESTAMP_JSON_PATH: &str = ".metadata.creationTimestamp";
const ERROR_MESSAGE_JSON_PATH: &str = ".status.error.message";

/// Static identity of a CRD
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CrdDescriptor {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
    pub short_names: &'static [&'static str],
}

impl CrdDescriptor {
    /// metadata.name of the CRD object
    pub fn crd_name(&self) -> String {
        format!("{}.{}", self.plural, self.group)
    }
}

pub const VIRTUAL_MACHINE_INSTANCE_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "VirtualMachineInstance",
    plural: "virtualmachineinstances",
    singular: "virtualmachineinstance",
    short_names: &["vmi", "vmis"],
};

pub const VIRTUAL_MACHINE_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "VirtualMachine",
    plural: "virtualmachines",
    singular: "virtualmachine",
    short_names: &["vm", "vms"],
};

pub const VIRTUAL_MACHINE_INSTANCE_PRESET_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "VirtualMachineInstancePreset",
    plural: "virtualmachineinstancepresets",
    singular: "virtualmachineinstancepreset",
    short_names: &["vmipreset", "vmipresets"],
};

pub const VIRTUAL_MACHINE_INSTANCE_REPLICA_SET_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "VirtualMachineInstanceReplicaSet",
    plural: "virtualmachineinstancereplicasets",
    singular: "virtualmachineinstancereplicaset",
    short_names: &["vmirs", "vmirss"],
};

pub const VIRTUAL_MACHINE_INSTANCE_MIGRATION_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "VirtualMachineInstanceMigration",
    plural: "virtualmachineinstancemigrations",
    singular: "virtualmachineinstancemigration",
    short_names: &["vmim", "vmims"],
};

pub const KUBEVIRT_API: CrdDescriptor = CrdDescriptor {
    group: GROUP,
    version: API_VERSION,
    kind: "KubeVirt",
    plural: "kubevirts",
    singular: "kubevirt",
    short_names: &["kv", "kvs"],
};

pub const VIRTUAL_MACHINE_SNAPSHOT_API: CrdDescriptor = CrdDescriptor {
    group: SNAPSHOT_GROUP,
    version: SNAPSHOT_API_VERSION,
    kind: "VirtualMachineSnapshot",
    plural: "virtualmachinesnapshots",
    singular: "virtualmachinesnapshot",
    short_names: &["vmsnapshot", "vmsnapshots"],
};

pub const VIRTUAL_MACHINE_SNAPSHOT_CONTENT_API: CrdDescriptor = CrdDescriptor {
    group: SNAPSHOT_GROUP,
    version: SNAPSHOT_API_VERSION,
    kind: "VirtualMachineSnapshotContent",
    plural: "virtualmachinesnapshotcontents",
    singular: "virtualmachinesnapshotcontent",
    short_names: &["vmsnapshotcontent", "vmsnapshotcontents"],
};

pub const VIRTUAL_MACHINE_RESTORE_API: CrdDescriptor = CrdDescriptor {
    group: SNAPSHOT_GROUP,
    version: SNAPSHOT_API_VERSION,
    kind: "VirtualMachineRestore",
    plural: "virtualmachinerestores",
    singular: "virtualmachinerestore",
    short_names: &["vmrestore", "vmrestores"],
};

/// Descriptor of the CRD installed for `kind`.
///
/// `datavolumetemplatespec` only validates embedded templates and has no CRD of its own.
pub fn descriptor(kind: CrdKind) -> Option<&'static CrdDescriptor> {
    match kind {
        CrdKind::DataVolumeTemplateSpec => None,
        CrdKind::KubeVirt => Some(&KUBEVIRT_API),
        CrdKind::VirtualMachine => Some(&VIRTUAL_MACHINE_API),
        CrdKind::VirtualMachineInstance => Some(&VIRTUAL_MACHINE_INSTANCE_API),
        CrdKind::VirtualMachineInstanceMigration => Some(&VIRTUAL_MACHINE_INSTANCE_MIGRATION_API),
        CrdKind::VirtualMachineInstancePreset => Some(&VIRTUAL_MACHINE_INSTANCE_PRESET_API),
        CrdKind::VirtualMachineInstanceReplicaSet => {
            Some(&VIRTUAL_MACHINE_INSTANCE_REPLICA_SET_API)
        }
        CrdKind::VirtualMachineRestore => Some(&VIRTUAL_MACHINE_RESTORE_API),
        CrdKind::VirtualMachineSnapshot => Some(&VIRTUAL_MACHINE_SNAPSHOT_API),
        CrdKind::VirtualMachineSnapshotContent => Some(&VIRTUAL_MACHINE_SNAPSHOT_CONTENT_API),
    }
}

fn new_crd(descriptor: &CrdDescriptor, label: &str) -> CustomResourceDefinition {
    CustomResourceDefinition {
        metadata: ObjectMeta {
            name: descriptor.crd_name(),
            labels: BTreeMap::from([(label.to_owned(), String::new())]),
        },
        spec: CustomResourceDefinitionSpec {
            group: descriptor.group.to_owned(),
            names: CustomResourceDefinitionNames {
                plural: descriptor.plural.to_owned(),
                singular: descriptor.singular.to_owned(),
                kind: descriptor.kind.to_owned(),
                short_names: descriptor.short_names.iter().map(|s| s.to_string()).collect(),
                categories: vec!["all".to_owned()],
            },
            scope: ResourceScope::Namespaced,
            versions: vec![CustomResourceDefinitionVersion::served(descriptor.version)],
            preserve_unknown_fields: None,
        },
        ..Default::default()
    }
}

fn new_blank_crd(descriptor: &CrdDescriptor) -> CustomResourceDefinition {
    new_crd(descriptor, APP_LABEL)
}

fn finish(mut crd: CustomResourceDefinition) -> Result<CustomResourceDefinition, CrdError> {
    crd.patch_validation_for_all_versions()?;
    debug!(crd = %crd.metadata.name, "built CustomResourceDefinition");
    Ok(crd)
}

fn age_column() -> Column {
    Column::new("Age", "date", CREATION_TIMESTAMP_JSON_PATH)
}

fn error_column() -> Column {
    Column::new("Error", "string", ERROR_MESSAGE_JSON_PATH)
}

pub fn virtual_machine_instance_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_INSTANCE_API);
    crd.add_fields_to_all_versions([VersionField::PrinterColumns(vec![
        age_column(),
        Column::new("Phase", "string", ".status.phase"),
        Column::new("IP", "string", ".status.interfaces[0].ipAddress"),
        Column::new("NodeName", "string", ".status.nodeName"),
        Column::new(
            "Live-Migratable",
            "string",
            ".status.conditions[?(@.type=='LiveMigratable')].status",
        )
        .priority(1),
        Column::new(
            "Paused",
            "string",
            ".status.conditions[?(@.type=='Paused')].status",
        )
        .priority(1),
    ])]);
    finish(crd)
}

pub fn virtual_machine_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_API);
    crd.add_fields_to_all_versions([
        VersionField::PrinterColumns(vec![
            age_column(),
            Column::new("Status", "string", ".status.printableStatus")
                .description("Human Readable Status"),
            Column::new("Volume", "string", ".spec.volumes[0].name").description("Primary Volume"),
            Column::new("Created", "boolean", ".status.created").priority(1),
        ]),
        VersionField::Subresources(CustomResourceSubresources::status()),
    ]);
    finish(crd)
}

pub fn virtual_machine_instance_preset_crd() -> Result<CustomResourceDefinition, CrdError> {
    finish(new_blank_crd(&VIRTUAL_MACHINE_INSTANCE_PRESET_API))
}

pub fn virtual_machine_instance_replica_set_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_INSTANCE_REPLICA_SET_API);
    crd.add_fields_to_all_versions([
        VersionField::PrinterColumns(vec![
            Column::new("Desired", "integer", ".spec.replicas")
                .description("Number of desired VirtualMachineInstances"),
            Column::new("Current", "integer", ".status.replicas")
                .description("Number of managed and not final or deleted VirtualMachineInstances"),
            Column::new("Ready", "integer", ".status.readyReplicas").description(
                "Number of managed VirtualMachineInstances which are ready to receive traffic",
            ),
            age_column(),
        ]),
        VersionField::Subresources(CustomResourceSubresources {
            status: Some(CustomResourceSubresourceStatus {}),
            scale: Some(CustomResourceSubresourceScale {
                spec_replicas_path: ".spec.replicas".to_owned(),
                status_replicas_path: ".status.replicas".to_owned(),
                label_selector_path: Some(".status.labelSelector".to_owned()),
            }),
        }),
    ]);
    finish(crd)
}

pub fn virtual_machine_instance_migration_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_INSTANCE_MIGRATION_API);
    crd.add_fields_to_all_versions([VersionField::Subresources(CustomResourceSubresources::status())]);
    finish(crd)
}

/// Labelled with [`OPERATOR_LABEL`] instead of [`APP_LABEL`].
pub fn kubevirt_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_crd(&KUBEVIRT_API, OPERATOR_LABEL);
    crd.add_fields_to_all_versions([
        VersionField::PrinterColumns(vec![
            age_column(),
            Column::new("Phase", "string", ".status.phase"),
        ]),
        VersionField::Subresources(CustomResourceSubresources::status()),
    ]);
    finish(crd)
}

pub fn virtual_machine_snapshot_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_SNAPSHOT_API);
    crd.add_fields_to_all_versions([VersionField::PrinterColumns(vec![
        Column::new("SourceKind", "string", ".spec.source.kind"),
        Column::new("SourceName", "string", ".spec.source.name"),
        Column::new("ReadyToUse", "boolean", ".status.readyToUse"),
        Column::new("CreationTime", "date", ".status.creationTime"),
        error_column(),
    ])]);
    finish(crd)
}

pub fn virtual_machine_snapshot_content_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_SNAPSHOT_CONTENT_API);
    crd.add_fields_to_all_versions([VersionField::PrinterColumns(vec![
        Column::new("ReadyToUse", "boolean", ".status.readyToUse"),
        Column::new("CreationTime", "date", ".status.creationTime"),
        error_column(),
    ])]);
    finish(crd)
}

pub fn virtual_machine_restore_crd() -> Result<CustomResourceDefinition, CrdError> {
    let mut crd = new_blank_crd(&VIRTUAL_MACHINE_RESTORE_API);
    crd.add_fields_to_all_versions([VersionField::PrinterColumns(vec![
        Column::new("TargetKind", "string", ".spec.target.kind"),
        Column::new("TargetName", "string", ".spec.target.name"),
        Column::new("Complete", "boolean", ".status.complete"),
        Column::new("RestoreTime", "date", ".status.restoreTime"),
        error_column(),
    ])]);
    finish(crd)
}

/// CRD built for `kind`, or `None` for kinds without a CRD of their own
pub fn crd_for_kind(kind: CrdKind) -> Result<Option<CustomResourceDefinition>, CrdError> {
    let crd = match kind {
        CrdKind::DataVolumeTemplateSpec => return Ok(None),
        CrdKind::KubeVirt => kubevirt_crd()?,
        CrdKind::VirtualMachine => virtual_machine_crd()?,
        CrdKind::VirtualMachineInstance => virtual_machine_instance_crd()?,
        CrdKind::VirtualMachineInstanceMigration => virtual_machine_instance_migration_crd()?,
        CrdKind::VirtualMachineInstancePreset => virtual_machine_instance_preset_crd()?,
        CrdKind::VirtualMachineInstanceReplicaSet => virtual_machine_instance_replica_set_crd()?,
        CrdKind::VirtualMachineRestore => virtual_machine_restore_crd()?,
        CrdKind::VirtualMachineSnapshot => virtual_machine_snapshot_crd()?,
        CrdKind::VirtualMachineSnapshotContent => virtual_machine_snapshot_content_crd()?,
    };
    Ok(Some(crd))
}

/// Every CRD the operator installs, in install order
pub fn all_crds() -> Result<Vec<CustomResourceDefinition>, CrdError> {
    Ok(vec![
        virtual_machine_instance_crd()?,
        virtual_machine_crd()?,
        virtual_machine_instance_preset_crd()?,
        virtual_machine_instance_replica_set_crd()?,
        virtual_machine_instance_migration_crd()?,
        kubevirt_crd()?,
        virtual_machine_snapshot_crd()?,
        virtual_machine_snapshot_content_crd()?,
        virtual_machine_restore_crd()?,
    ])
}
