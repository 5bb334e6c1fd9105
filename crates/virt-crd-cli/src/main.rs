mod command;
mod config;
mod output;

use anyhow::Result;
use clap::{Args, Parser};
use tracing::debug;

use self::command::check::CheckOpt;
use self::command::list::ListOpt;
use self::command::manifest::ManifestOpt;
use self::command::schema::SchemaOpt;

fn main() -> Result<()> {
    let args = Cli::parse();
    if !args.global_opts.quiet {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    args.process()
}

#[derive(Debug, Args, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress log output
    #[clap(short = 'q', long, global = true, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Parser)]
#[command(
    about = "Inspect and render KubeVirt CustomResourceDefinitions",
    name = "virt-crds",
    max_term_width = 100
)]
pub struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOptions,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
pub enum Command {
    /// List the kinds of the validation table
    #[command(name = "list")]
    List(ListOpt),
    /// Print the stored validation document of a kind
    #[command(name = "schema")]
    Schema(SchemaOpt),
    /// Render CustomResourceDefinition manifests
    #[command(name = "manifest")]
    Manifest(ManifestOpt),
    /// Decode every schema and build every CRD
    #[command(name = "check")]
    Check(CheckOpt),
}

impl Cli {
    fn process(self) -> Result<()> {
        debug!(command = ?self.command, "running");
        match self.command {
            Command::List(cmd) => cmd.process(),
            Command::Schema(cmd) => cmd.process(),
            Command::Manifest(cmd) => cmd.process(),
            Command::Check(cmd) => cmd.process(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Command;
    use crate::output::OutputType;

    use super::Cli;

    fn parse(command: &str) -> Result<Cli, clap::error::Error> {
        Cli::try_parse_from(command.split_whitespace())
    }

    #[test]
    fn recognizes_quiet_top_level_arg() {
        let args = parse("virt-crds -q check").expect("Should parse command as valid");

        assert!(args.global_opts.quiet);
        assert!(matches!(args.command, Command::Check(_)));
    }

    #[test]
    fn list_defaults_to_table() {
        let args = parse("virt-crds list").expect("Should parse command as valid");
        let Command::List(list) = args.command else {
            panic!("expected list");
        };
        assert_eq!(list.output, OutputType::table);

        let args = parse("virt-crds list -O json").expect("Should parse command as valid");
        assert!(matches!(args.command, Command::List(ref l) if l.output == OutputType::json));
    }

    #[test]
    fn schema_requires_kind() {
        assert!(parse("virt-crds schema").is_err());
        let args = parse("virt-crds schema virtualmachine").expect("Should parse command as valid");
        assert!(matches!(args.command, Command::Schema(ref s) if s.kind == "virtualmachine"));
    }

    #[test]
    fn manifest_accepts_output_dir() {
        let args = parse("virt-crds manifest --kind kubevirt --output-dir /tmp/crds -O yaml")
            .expect("Should parse command as valid");
        let Command::Manifest(manifest) = args.command else {
            panic!("expected manifest");
        };
        assert_eq!(
            manifest.output_dir.as_deref(),
            Some(std::path::Path::new("/tmp/crds"))
        );
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(parse("virt-crds install").is_err());
    }
}
