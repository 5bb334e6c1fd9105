//! Manifest Configuration
//!
//! Optional TOML file read by `virt-crds manifest --config`.
//!
//! ```toml
//! kinds = ["virtualmachine", "virtualmachineinstance"]
//! output = "json"
//!
//! [extra_labels]
//! "app.kubernetes.io/managed-by" = "virt-operator"
//! ```

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs::{File, read_to_string};
use std::io::Error as IoError;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use virt_crd::manifest::ManifestFormat;
use virt_crd_schema::CrdKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IoError: {0}")]
    IoError(#[from] IoError),
    #[error("TomlError: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("could not encode config: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub trait SaveLoadConfig {
    fn save_to<T: AsRef<Path>>(&self, path: T) -> Result<(), ConfigError>;
    fn load_from<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError>
    where
        Self: Sized;
    fn load_str(config: &str) -> Result<Self, ConfigError>
    where
        Self: Sized;
}

impl<S> SaveLoadConfig for S
where
    S: Serialize + DeserializeOwned + Debug,
{
    fn save_to<T: AsRef<Path>>(&self, path: T) -> Result<(), ConfigError> {
        let path_ref = path.as_ref();
        debug!(?path_ref, "saving config");
        let toml = toml::to_string(self)?;

        let mut file = File::create(path_ref)?;
        file.write_all(toml.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    fn load_from<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        debug!(?path_ref, "loading config");

        let file_str = read_to_string(path_ref)?;
        Self::load_str(&file_str)
    }

    fn load_str(config: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(config)?;
        Ok(config)
    }
}

/// What `manifest` renders when no flag says otherwise
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// kinds to render; all CRDs when empty
    pub kinds: Vec<CrdKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ManifestFormat>,
    /// labels added to every rendered CRD
    pub extra_labels: BTreeMap<String, String>,
}
