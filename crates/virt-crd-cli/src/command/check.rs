//! Check Command
//!
//! Decodes every stored document and builds every CRD, reporting each kind.

use anyhow::{Result, bail};
use clap::Parser;
use comfy_table::Row;
use serde::Serialize;
use tracing::{debug, error};

use virt_crd::crd_for_kind;
use virt_crd_schema::{CRDS_VALIDATION, CrdKind};

use crate::output::{OutputType, TableOutputHandler, render_list};

#[derive(Debug, Parser)]
pub struct CheckOpt {
    /// Output format of the report
    #[arg(short = 'O', long = "output", value_enum, default_value_t)]
    pub output: OutputType,
}

impl CheckOpt {
    pub fn process(&self) -> Result<()> {
        let report = CheckReport::run();
        println!("{}", render_list(&report, self.output)?);

        let failed = report.failures();
        if failed > 0 {
            bail!("{failed} of {} kinds failed validation", report.0.len());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "message")]
pub enum Status {
    Ok,
    Skipped,
    Failed(String),
}

impl Status {
    fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    fn label(&self) -> String {
        match self {
            Self::Ok => "ok".to_owned(),
            Self::Skipped => "-".to_owned(),
            Self::Failed(err) => format!("failed: {err}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KindCheck {
    pub kind: CrdKind,
    /// schema nodes in the decoded document
    pub nodes: usize,
    pub schema: Status,
    pub crd: Status,
}

impl KindCheck {
    fn run(kind: CrdKind) -> Self {
        let (nodes, schema) = match CRDS_VALIDATION.parse(kind.as_str()) {
            Ok(validation) => (validation.schema().node_count(), Status::Ok),
            Err(err) => {
                error!(%kind, %err, "schema does not decode");
                (0, Status::Failed(error_chain(&err)))
            }
        };

        let crd = match crd_for_kind(kind) {
            Ok(Some(_)) => Status::Ok,
            Ok(None) => Status::Skipped,
            Err(err) => {
                error!(%kind, %err, "CRD does not build");
                Status::Failed(error_chain(&err))
            }
        };

        debug!(%kind, nodes, "checked");
        Self {
            kind,
            nodes,
            schema,
            crd,
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckReport(Vec<KindCheck>);

impl CheckReport {
    pub fn run() -> Self {
        Self(CrdKind::ALL.into_iter().map(KindCheck::run).collect())
    }

    pub fn failures(&self) -> usize {
        self.0
            .iter()
            .filter(|check| check.schema.is_failed() || check.crd.is_failed())
            .count()
    }
}

impl TableOutputHandler for CheckReport {
    fn header(&self) -> Row {
        Row::from(["KIND", "NODES", "SCHEMA", "CRD"])
    }

    fn content(&self) -> Vec<Row> {
        self.0
            .iter()
            .map(|check| {
                Row::from([
                    check.kind.to_string(),
                    check.nodes.to_string(),
                    check.schema.label(),
                    check.crd.label(),
                ])
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shipped_table_passes() {
        let report = CheckReport::run();
        assert_eq!(report.0.len(), CrdKind::ALL.len());
        assert_eq!(report.failures(), 0);

        let template = &report.0[0];
        assert_eq!(template.kind, CrdKind::DataVolumeTemplateSpec);
        assert_eq!(template.crd, Status::Skipped);
        assert!(report.0.iter().all(|check| check.nodes > 1));
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_value(Status::Failed("boom".to_owned())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "failed", "message": "boom"}));
        assert_eq!(
            serde_json::to_value(Status::Ok).unwrap(),
            serde_json::json!({"status": "ok"})
        );
    }

    #[test]
    fn error_chain_includes_sources() {
        let err = CRDS_VALIDATION.parse("nope").unwrap_err();
        assert_eq!(error_chain(&err), "unknown CRD kind: nope");
    }
}
