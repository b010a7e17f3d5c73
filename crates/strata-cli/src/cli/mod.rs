use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{CheckArgs, Commands, RepositoriesArgs, SchemaArgs, SchemaType};

/// Top-level CLI parser for the `strata` binary.
#[derive(Debug, Parser)]
#[command(
    name = "strata",
    version,
    about = "Strata - repository catalog vs. blob store integrity auditor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging, including one line per asset)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Explicit config file, layered above project and user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat, SchemaType};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["strata", "--format", "raw", "--verbose", "check"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Check(ref args) if args.repository.is_none() && args.blob_store.is_none()
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["strata", "repositories", "--quiet", "--config", "a.toml"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(
            cli.global_flags().config.as_deref(),
            Some(std::path::Path::new("a.toml"))
        );
        assert!(matches!(cli.command, Commands::Repositories(_)));
    }

    #[test]
    fn check_takes_repository_or_blob_store() {
        let cli = Cli::try_parse_from(["strata", "check", "--repository", "maven-releases"])
            .expect("cli should parse");
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.repository.as_deref(), Some("maven-releases"));

        let cli = Cli::try_parse_from(["strata", "check", "--blob-store", "cold"])
            .expect("cli should parse");
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.blob_store.as_deref(), Some("cold"));
    }

    #[test]
    fn check_rejects_both_scopes() {
        let parsed = Cli::try_parse_from([
            "strata",
            "check",
            "--repository",
            "r",
            "--blob-store",
            "s",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["strata", "--format", "table", "repositories"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_takes_a_type() {
        let cli = Cli::try_parse_from(["strata", "schema", "task"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.type_name == SchemaType::Task
        ));
    }
}
