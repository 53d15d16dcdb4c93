//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use oreganizer_core::ReportFormat;
use oreganizer_core::config::DEFAULT_CONFIG_FILE;

/// Plan what to craft and what to gather for a set of goals.
#[derive(Parser, Debug)]
#[command(name = "oreganizer", version, about)]
pub struct Cli {
    /// Recipe catalog (JSON, or YAML by `.yaml`/`.yml` extension).
    pub catalog: PathBuf,

    /// Goals: good -> quantity to end up holding.
    pub goals: PathBuf,

    /// Starting inventory: good -> quantity on hand.
    pub inventory: Option<PathBuf>,

    /// Configuration file. A missing file means defaults.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Report format. Overrides the configured format.
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print the resolver trace in the text report.
    #[arg(long)]
    pub trace: bool,

    /// Raise log verbosity (-v debug, -vv trace). Overrides `RUST_LOG`.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter forced by `-v` flags, if any.
    pub const fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Sectioned plain text.
    Text,
    /// The serialized plan.
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "oreganizer",
            "recipes.json",
            "goals.json",
            "inv.yaml",
            "--format",
            "json",
            "-vv",
        ])
        .ok();
        assert!(cli.as_ref().is_some_and(|c| c.inventory.is_some()));
        assert_eq!(cli.as_ref().and_then(|c| c.format), Some(FormatArg::Json));
        assert_eq!(cli.as_ref().and_then(Cli::verbosity_filter), Some("trace"));
        assert!(cli.is_some_and(|c| c.config == PathBuf::from(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn inventory_is_optional() {
        let cli = Cli::try_parse_from(["oreganizer", "recipes.json", "goals.json"]).ok();
        assert!(cli.as_ref().is_some_and(|c| c.inventory.is_none() && !c.trace));
        assert_eq!(cli.and_then(|c| c.verbosity_filter()), None);
    }
}
