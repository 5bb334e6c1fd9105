//! Manifest Command
//!
//! Renders CRDs to stdout, or one file per CRD under `--output-dir`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use virt_crd::manifest::{ManifestFormat, render};
use virt_crd::types::CustomResourceDefinition;
use virt_crd::{all_crds, crd_for_kind};
use virt_crd_schema::CrdKind;

use crate::config::{ManifestConfig, SaveLoadConfig};

#[derive(Debug, Parser)]
pub struct ManifestOpt {
    /// Only render the CRD of this kind, may be repeated
    #[arg(long = "kind", value_name = "KIND")]
    pub kinds: Vec<CrdKind>,

    /// Manifest format, yaml or json
    #[arg(short = 'O', long = "output", value_name = "FORMAT")]
    pub output: Option<ManifestFormat>,

    /// Write one file per CRD into this directory instead of stdout
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with default kinds, format and extra labels
    #[arg(long, value_name = "FILE", env = "VIRT_CRDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Save the effective settings to this file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

impl ManifestOpt {
    pub fn process(&self) -> Result<()> {
        let config = self.effective_config()?;
        if let Some(path) = &self.save_config {
            config
                .save_to(path)
                .with_context(|| format!("saving config to {}", path.display()))?;
        }

        let format = config.output.unwrap_or_default();
        let crds = build_crds(&config)?;

        match &self.output_dir {
            Some(dir) => {
                for path in write_to_dir(&crds, format, dir)? {
                    info!(path = %path.display(), "wrote manifest");
                }
            }
            None => print!("{}", render(&crds, format)?),
        }
        Ok(())
    }

    /// settings from `--config`, overridden by flags given on the command line
    fn effective_config(&self) -> Result<ManifestConfig> {
        let mut config = match &self.config {
            Some(path) => ManifestConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ManifestConfig::default(),
        };

        if !self.kinds.is_empty() {
            config.kinds = self.kinds.clone();
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        Ok(config)
    }
}

/// CRDs selected by `config`, with its extra labels applied
pub fn build_crds(config: &ManifestConfig) -> Result<Vec<CustomResourceDefinition>> {
    let mut crds = if config.kinds.is_empty() {
        all_crds()?
    } else {
        let mut crds = Vec::with_capacity(config.kinds.len());
        for kind in &config.kinds {
            match crd_for_kind(*kind)? {
                Some(crd) => crds.push(crd),
                None => warn!(%kind, "kind has no CustomResourceDefinition, skipping"),
            }
        }
        crds
    };

    for crd in &mut crds {
        add_labels(crd, &config.extra_labels);
    }
    Ok(crds)
}

fn add_labels(crd: &mut CustomResourceDefinition, labels: &BTreeMap<String, String>) {
    crd.metadata
        .labels
        .extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Write each CRD to `<dir>/<crd-name>.<ext>`, creating `dir` if needed.
pub fn write_to_dir(
    crds: &[CustomResourceDefinition],
    format: ManifestFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::with_capacity(crds.len());
    for crd in crds {
        let path = dir.join(format.file_name(crd));
        let body = render(std::slice::from_ref(crd), format)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    fn opt(args: &[&str]) -> ManifestOpt {
        ManifestOpt::try_parse_from(std::iter::once("manifest").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn parses_repeated_kinds() {
        let opt = opt(&["--kind", "virtualmachine", "--kind", "kubevirt", "-O", "json"]);
        assert_eq!(opt.kinds, vec![CrdKind::VirtualMachine, CrdKind::KubeVirt]);
        assert_eq!(opt.output, Some(ManifestFormat::Json));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(
            ManifestOpt::try_parse_from(["manifest", "--kind", "pod"]).is_err()
        );
    }

    #[test]
    fn flags_override_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("virt-crds.toml");
        fs::write(
            &path,
            "kinds = [\"kubevirt\"]\noutput = \"json\"\n[extra_labels]\nteam = \"virt\"\n",
        )
        .unwrap();

        let config = opt(&["--config", path.to_str().unwrap(), "-O", "yaml"])
            .effective_config()
            .unwrap();
        assert_eq!(config.kinds, vec![CrdKind::KubeVirt]);
        assert_eq!(config.output, Some(ManifestFormat::Yaml));
        assert_eq!(config.extra_labels.len(), 1);
    }

    #[test]
    fn skips_kinds_without_crd_and_adds_labels() {
        let config = ManifestConfig {
            kinds: vec![CrdKind::DataVolumeTemplateSpec, CrdKind::VirtualMachineRestore],
            extra_labels: BTreeMap::from([("team".to_owned(), "virt".to_owned())]),
            ..Default::default()
        };
        let crds = build_crds(&config).unwrap();

        assert_eq!(crds.len(), 1);
        let labels = &crds[0].metadata.labels;
        assert_eq!(labels.get("team").map(String::as_str), Some("virt"));
        assert!(labels.contains_key(virt_crd::APP_LABEL));
    }

    #[test]
    fn writes_one_file_per_crd() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("crds");
        let crds = build_crds(&ManifestConfig::default()).unwrap();

        let written = write_to_dir(&crds, ManifestFormat::Yaml, &out).unwrap();
        assert_eq!(written.len(), crds.len());

        let vm = out.join("virtualmachines.kubevirt.io.yaml");
        assert!(written.contains(&vm));
        let body = fs::read_to_string(vm).unwrap();
        assert!(body.starts_with("---\n"));
        let crd: CustomResourceDefinition =
            serde_yaml::from_str(body.trim_start_matches("---\n")).unwrap();
        assert_eq!(crd.spec.names.kind, "VirtualMachine");
    }

    #[test]
    fn saves_effective_config() {
        let dir = TempDir::new().unwrap();
        let saved = dir.path().join("saved.toml");
        let opt = opt(&["--kind", "virtualmachine", "--save-config", saved.to_str().unwrap()]);

        let config = opt.effective_config().unwrap();
        config.save_to(&saved).unwrap();
        assert_eq!(ManifestConfig::load_from(&saved).unwrap(), config);
    }
}
