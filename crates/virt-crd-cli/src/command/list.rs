//! List Command
//!
//! One row per entry of the validation table, with the CRD it validates.

use anyhow::Result;
use clap::Parser;
use comfy_table::Row;
use serde::Serialize;

use virt_crd::components::descriptor;
use virt_crd_schema::CrdKind;

use crate::output::{OutputType, TableOutputHandler, render_list};

#[derive(Debug, Parser)]
pub struct ListOpt {
    /// Output format
    #[arg(short = 'O', long = "output", value_enum, default_value_t)]
    pub output: OutputType,
}

impl ListOpt {
    pub fn process(&self) -> Result<()> {
        println!("{}", render_list(&KindList::collect(), self.output)?);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct KindEntry {
    pub kind: CrdKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
    pub short_names: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct KindList(Vec<KindEntry>);

impl KindList {
    pub fn collect() -> Self {
        let entries = CrdKind::ALL
            .into_iter()
            .map(|kind| {
                let descriptor = descriptor(kind);
                KindEntry {
                    kind,
                    crd: descriptor.map(|d| d.crd_name()),
                    group: descriptor.map(|d| d.group),
                    short_names: descriptor.map(|d| d.short_names.to_vec()).unwrap_or_default(),
                }
            })
            .collect();
        Self(entries)
    }
}

impl TableOutputHandler for KindList {
    fn header(&self) -> Row {
        Row::from(["KIND", "CRD", "GROUP", "SHORT NAMES"])
    }

    fn content(&self) -> Vec<Row> {
        self.0
            .iter()
            .map(|entry| {
                Row::from([
                    entry.kind.to_string(),
                    entry.crd.clone().unwrap_or_else(|| "-".to_owned()),
                    entry.group.unwrap_or("-").to_owned(),
                    entry.short_names.join(","),
                ])
            })
            .collect()
    }
}
