//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::resolve::RefKind;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Resolve documentation cross-references against a declaration feed
#[derive(Parser, Debug)]
#[command(
    name = "doxref",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve documentation cross-references against a symbol index",
    long_about = "Build a symbol index from a JSON declaration feed and resolve \
                  class, namespace, typedef, enum and function references against it.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Examples:\n  \
                  $ doxref resolve feed.json gl::TextureRef\n  \
                  $ doxref resolve feed.json foo --kind function --args \"(1, 2)\"\n  \
                  $ doxref stats feed.json"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print single-line JSON instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one reference and print the result
    Resolve {
        /// JSON declaration feed to build the index from
        feed: PathBuf,

        /// Reference text as written in documentation, e.g. `ci::gl::TextureRef`
        reference: String,

        /// Kind hint: function, enum or any
        #[arg(short, long, default_value = "any")]
        kind: RefKind,

        /// Argument list for function references, e.g. "(int, int)"
        #[arg(short, long)]
        args: Option<String>,
    },

    /// Build the index and print registry counts and build diagnostics
    Stats {
        /// JSON declaration feed to build the index from
        feed: PathBuf,
    },

    /// Display active settings
    Config,

    /// Create .doxref/settings.toml with default settings
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "doxref", "resolve", "feed.json", "foo", "--kind", "function", "--args", "(1, 2)",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                reference,
                kind,
                args,
                ..
            } => {
                assert_eq!(reference, "foo");
                assert_eq!(kind, RefKind::Function);
                assert_eq!(args.as_deref(), Some("(1, 2)"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["doxref", "resolve", "feed.json", "x", "--kind", "macro"]).is_err());
    }
}
