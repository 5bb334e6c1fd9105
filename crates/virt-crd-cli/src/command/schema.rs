//! Schema Command
//!
//! Prints a stored validation document exactly as it is kept in the table.

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::debug;

use virt_crd_schema::CRDS_VALIDATION;

#[derive(Debug, Parser)]
pub struct SchemaOpt {
    /// Singular resource name, e.g. `virtualmachine`
    #[arg(value_name = "KIND")]
    pub kind: String,
}

impl SchemaOpt {
    pub fn process(&self) -> Result<()> {
        print!("{}", self.lookup()?);
        Ok(())
    }

    fn lookup(&self) -> Result<&'static str> {
        debug!(kind = %self.kind, "looking up schema");
        CRDS_VALIDATION.get(&self.kind).ok_or_else(|| {
            let valid: Vec<&str> = CRDS_VALIDATION.kinds().collect();
            anyhow!(
                "unknown kind \"{}\", expected one of: {}",
                self.kind,
                valid.join(", ")
            )
        })
    }
}
