//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// benchspec - Resolve benchmark component specs from config documents
#[derive(Parser, Debug)]
#[command(name = "benchspec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (resolution trace on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the managed database component of a config document
    ///
    /// Examples:
    ///   benchspec resolve -c db.yaml
    ///   benchspec resolve -c benchmark.toml --component benchmark.managed_relational_db
    ///   benchspec resolve -c db.yaml --run-uri abc123 -f database=postgres -f cloud=AWS
    Resolve {
        /// Config document (.yaml, .yml, .json or .toml)
        #[arg(short, long, env = "BENCHSPEC_CONFIG")]
        config: PathBuf,

        /// Dotted path of the component inside the document
        #[arg(long)]
        component: Option<String>,

        /// Run identifier; generated when omitted
        #[arg(long, env = "BENCHSPEC_RUN_URI")]
        run_uri: Option<String>,

        /// Override as NAME=VALUE, repeatable
        #[arg(short, long = "flag", value_name = "NAME=VALUE")]
        flags: Vec<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List every option of the managed database spec
    Options,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_resolve_with_flags() {
        let cli = Cli::parse_from([
            "benchspec",
            "resolve",
            "-c",
            "db.yaml",
            "-f",
            "database=postgres",
            "--flag",
            "cloud=AWS",
            "--run-uri",
            "123",
        ]);

        match cli.command {
            Commands::Resolve {
                config,
                flags,
                run_uri,
                component,
                pretty,
            } => {
                assert_eq!(config, PathBuf::from("db.yaml"));
                assert_eq!(flags, vec!["database=postgres", "cloud=AWS"]);
                assert_eq!(run_uri.as_deref(), Some("123"));
                assert_eq!(component, None);
                assert!(!pretty);
            }
            other => panic!("Expected Resolve, got {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["benchspec", "options", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.command, Commands::Options);
    }
}
