use tracing::{debug, instrument};

use virt_crd_schema::{CRDS_VALIDATION, CustomResourceValidation};

use crate::CrdError;
use crate::types::{
    CustomResourceColumnDefinition, CustomResourceDefinition, CustomResourceDefinitionVersion,
    CustomResourceSubresources,
};

/// A field that can be set on a CRD version
#[derive(Debug, Clone, PartialEq)]
pub enum VersionField {
    PrinterColumns(Vec<CustomResourceColumnDefinition>),
    Subresources(CustomResourceSubresources),
    Validation(CustomResourceValidation),
}

impl VersionField {
    fn apply(self, version: &mut CustomResourceDefinitionVersion) {
        match self {
            Self::PrinterColumns(columns) => version.additional_printer_columns = columns,
            Self::Subresources(subresources) => version.subresources = Some(subresources),
            Self::Validation(validation) => version.schema = Some(validation),
        }
    }
}

impl From<Vec<CustomResourceColumnDefinition>> for VersionField {
    fn from(columns: Vec<CustomResourceColumnDefinition>) -> Self {
        Self::PrinterColumns(columns)
    }
}

impl From<CustomResourceSubresources> for VersionField {
    fn from(subresources: CustomResourceSubresources) -> Self {
        Self::Subresources(subresources)
    }
}

impl From<CustomResourceValidation> for VersionField {
    fn from(validation: CustomResourceValidation) -> Self {
        Self::Validation(validation)
    }
}

/// Set `fields` on a single version, replacing what was there.
pub fn add_fields_to_version<I>(version: &mut CustomResourceDefinitionVersion, fields: I)
where
    I: IntoIterator<Item = VersionField>,
{
    for field in fields {
        field.apply(version);
    }
}

impl CustomResourceDefinition {
    /// Set the same `fields` on every declared version.
    pub fn add_fields_to_all_versions<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = VersionField>,
    {
        let fields: Vec<VersionField> = fields.into_iter().collect();
        for version in &mut self.spec.versions {
            add_fields_to_version(version, fields.iter().cloned());
        }
    }

    /// Attach the stored validation for this CRD to `version`.
    ///
    /// The table is keyed by the singular resource name. A CRD without an
    /// entry keeps its version untouched; unknown fields are always pruned.
    #[instrument(skip(self), fields(crd = %self.metadata.name))]
    pub fn patch_validation(&mut self, version: &str) -> Result<(), CrdError> {
        self.spec.preserve_unknown_fields = Some(false);

        let singular = self.spec.names.singular.as_str();
        if !CRDS_VALIDATION.contains(singular) {
            debug!(singular, "no validation stored, leaving version as is");
            return Ok(());
        }

        let validation = CRDS_VALIDATION.parse(singular)?;
        let target = self.get_version_mut(version)?;
        add_fields_to_version(target, [VersionField::Validation(validation)]);
        Ok(())
    }

    pub fn patch_validation_for_all_versions(&mut self) -> Result<(), CrdError> {
        let versions: Vec<String> = self.spec.versions.iter().map(|v| v.name.clone()).collect();
        for version in versions {
            self.patch_validation(&version)?;
        }
        Ok(())
    }
}
