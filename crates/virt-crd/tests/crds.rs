use std::collections::BTreeSet;

use serde::Deserialize;

use virt_crd::components::{
    kubevirt_crd, virtual_machine_instance_replica_set_crd, virtual_machine_restore_crd,
};
use virt_crd::manifest::{ManifestFormat, render};
use virt_crd::schema::{CRDS_VALIDATION, CrdKind};
use virt_crd::types::CustomResourceDefinition;
use virt_crd::{
    APP_LABEL, OPERATOR_LABEL, SNAPSHOT_API_VERSION, SNAPSHOT_GROUP, all_crds, crd_for_kind,
};

fn crds() -> Vec<CustomResourceDefinition> {
    all_crds().expect("all crds build")
}

#[test]
fn every_crd_is_unique_and_patched() {
    let crds = crds();
    assert_eq!(crds.len(), 9);

    let names: BTreeSet<&str> = crds.iter().map(|crd| crd.name()).collect();
    assert_eq!(names.len(), crds.len());

    for crd in &crds {
        assert_eq!(crd.spec.preserve_unknown_fields, Some(false), "{}", crd.name());
        assert!(CRDS_VALIDATION.contains(&crd.spec.names.singular));
        for version in &crd.spec.versions {
            let schema = version.schema.as_ref().expect("validation attached");
            assert!(schema.schema().is_object());
        }
    }
}

#[test]
fn build_order_is_stable() {
    let first: Vec<String> = crds().iter().map(|crd| crd.name().to_owned()).collect();
    let second: Vec<String> = crds().iter().map(|crd| crd.name().to_owned()).collect();
    assert_eq!(first, second);
    assert_eq!(first[0], "virtualmachineinstances.kubevirt.io");
}

#[test]
fn one_served_storage_version_each() {
    for crd in crds() {
        assert_eq!(crd.spec.versions.len(), 1);
        let storage = crd.storage_version().expect("storage version");
        assert!(storage.served);
        assert!(crd.spec.names.categories.iter().any(|c| c == "all"));
    }
}

#[test]
fn snapshot_resources_use_snapshot_group() {
    let crd = virtual_machine_restore_crd().expect("restore");
    assert_eq!(crd.name(), "virtualmachinerestores.snapshot.kubevirt.io");
    assert_eq!(crd.spec.group, SNAPSHOT_GROUP);
    assert!(crd.get_version(SNAPSHOT_API_VERSION).is_ok());
    assert_eq!(crd.spec.names.short_names, ["vmrestore", "vmrestores"]);
}

#[test]
fn kubevirt_carries_operator_label() {
    let crd = kubevirt_crd().expect("kubevirt");
    assert!(crd.metadata.labels.contains_key(OPERATOR_LABEL));
    assert!(!crd.metadata.labels.contains_key(APP_LABEL));

    for crd in crds().iter().filter(|crd| crd.spec.names.kind != "KubeVirt") {
        assert_eq!(crd.metadata.labels.get(APP_LABEL).map(String::as_str), Some(""));
    }
}

#[test]
fn replica_set_scales() {
    let crd = virtual_machine_instance_replica_set_crd().expect("replica set");
    let version = crd.storage_version().expect("version");
    let subresources = version.subresources.as_ref().expect("subresources");
    let scale = subresources.scale.as_ref().expect("scale");

    assert!(subresources.status.is_some());
    assert_eq!(scale.spec_replicas_path, ".spec.replicas");
    assert_eq!(scale.status_replicas_path, ".status.replicas");
    assert_eq!(scale.label_selector_path.as_deref(), Some(".status.labelSelector"));

    let columns: Vec<&str> = version
        .additional_printer_columns
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(columns, ["Desired", "Current", "Ready", "Age"]);
}

#[test]
fn template_spec_has_no_crd() {
    assert!(crd_for_kind(CrdKind::DataVolumeTemplateSpec).unwrap().is_none());
    let vm = crd_for_kind(CrdKind::VirtualMachine).unwrap().expect("vm crd");
    assert_eq!(vm.spec.names.short_names, ["vm", "vms"]);
}

#[test]
fn yaml_manifest_decodes_back() {
    let crds = crds();
    let stream = render(&crds, ManifestFormat::Yaml).expect("render");

    let decoded: Vec<CustomResourceDefinition> = serde_yaml::Deserializer::from_str(&stream)
        .map(|doc| CustomResourceDefinition::deserialize(doc).expect("decode"))
        .collect();
    assert_eq!(decoded, crds);
}

#[test]
fn json_manifest_uses_kubernetes_encoding() {
    let crd = kubevirt_crd().expect("kubevirt");
    let json: serde_json::Value =
        serde_json::from_str(&render(&[crd], ManifestFormat::Json).unwrap()).unwrap();

    assert_eq!(json["apiVersion"], "apiextensions.k8s.io/v1");
    assert_eq!(json["spec"]["preserveUnknownFields"], false);
    let version = &json["spec"]["versions"][0];
    assert_eq!(version["name"], "v1alpha3");
    assert_eq!(version["schema"]["openAPIV3Schema"]["type"], "object");
    assert_eq!(version["subresources"]["status"], serde_json::json!({}));
}
