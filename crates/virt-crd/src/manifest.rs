//!
//! # Manifest rendering
//!
//! Renders CRDs as documents `kubectl apply -f` accepts: a YAML stream with
//! one document per CRD, or pretty printed JSON.
//!
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CrdError;
use crate::types::CustomResourceDefinition;

const YAML_DOCUMENT_SEPARATOR: &str = "---\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    #[default]
    Yaml,
    Json,
}

impl ManifestFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// file a single CRD is written to, `<crd-name>.<extension>`
    pub fn file_name(&self, crd: &CustomResourceDefinition) -> String {
        format!("{}.{}", crd.name(), self.extension())
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ManifestFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported manifest format: {other}")),
        }
    }
}

/// Single CRD as a YAML document, led by a document separator.
pub fn to_yaml(crd: &CustomResourceDefinition) -> Result<String, CrdError> {
    let body = serde_yaml::to_string(crd)?;
    Ok(format!("{YAML_DOCUMENT_SEPARATOR}{body}"))
}

pub fn to_yaml_stream(crds: &[CustomResourceDefinition]) -> Result<String, CrdError> {
    crds.iter().map(to_yaml).collect()
}

/// Pretty JSON. A single CRD renders as an object, several as an array.
pub fn to_json(crds: &[CustomResourceDefinition]) -> Result<String, CrdError> {
    let json = match crds {
        [crd] => serde_json::to_string_pretty(crd)?,
        _ => serde_json::to_string_pretty(crds)?,
    };
    Ok(json)
}

pub fn render(crds: &[CustomResourceDefinition], format: ManifestFormat) -> Result<String, CrdError> {
    match format {
        ManifestFormat::Yaml => to_yaml_stream(crds),
        ManifestFormat::Json => to_json(crds),
    }
}

#[cfg(test)]
mod test {
    use crate::components::{kubevirt_crd, virtual_machine_crd};

    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("YAML".parse::<ManifestFormat>(), Ok(ManifestFormat::Yaml));
        assert_eq!("yml".parse::<ManifestFormat>(), Ok(ManifestFormat::Yaml));
        assert_eq!("json".parse::<ManifestFormat>(), Ok(ManifestFormat::Json));
        assert!("toml".parse::<ManifestFormat>().is_err());
    }

    #[test]
    fn test_file_name() {
        let crd = kubevirt_crd().expect("crd");
        assert_eq!(
            ManifestFormat::Json.file_name(&crd),
            "kubevirts.kubevirt.io.json"
        );
    }

    #[test]
    fn test_yaml_stream() {
        let crds = vec![virtual_machine_crd().expect("vm"), kubevirt_crd().expect("kv")];
        let stream = render(&crds, ManifestFormat::Yaml).expect("render");

        assert!(stream.starts_with("---\n"));
        assert_eq!(stream.matches("---\n").count(), 2);
        assert!(stream.contains("kind: CustomResourceDefinition"));
        assert!(stream.contains("name: virtualmachines.kubevirt.io"));
    }

    #[test]
    fn test_json_single_and_many() {
        let vm = virtual_machine_crd().expect("vm");

        let single: serde_json::Value =
            serde_json::from_str(&to_json(std::slice::from_ref(&vm)).unwrap()).unwrap();
        assert_eq!(single["metadata"]["name"], "virtualmachines.kubevirt.io");

        let many: serde_json::Value =
            serde_json::from_str(&to_json(&[vm.clone(), vm]).unwrap()).unwrap();
        assert_eq!(many.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_empty_render() {
        assert_eq!(render(&[], ManifestFormat::Yaml).unwrap(), "");
        assert_eq!(render(&[], ManifestFormat::Json).unwrap(), "[]");
    }
}
