//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, locations::LocationsArgs,
    register::RegisterArgs, schema::SchemaArgs, strength::StrengthArgs, template::TemplateArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "regform")]
#[command(author, version, about = "Registration form with cascading location selection")]
#[command(long_about = "Fill in, check and validate registration forms from the terminal: cascading country/state/city selection, password strength and per-field validation.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Location table to use instead of the configured one
    #[arg(long, global = true, env = "REGFORM_LOCATIONS")]
    pub locations: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in the registration form interactively
    Register(RegisterArgs),

    /// Validate submission files
    Validate(ValidateArgs),

    /// Browse the country/state/city table
    Locations(LocationsArgs),

    /// Estimate password strength
    Strength(StrengthArgs),

    /// Write a blank submission file
    Template(TemplateArgs),

    /// Print the JSON schemas for submission and location files
    Schema(SchemaArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl OutputFormat {
    /// Resolve `Auto` against the configured default format
    pub fn resolve(self, default_format: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        default_format
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or(OutputFormat::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(OutputFormat::Json.resolve(Some("yaml")), OutputFormat::Json);
        assert_eq!(OutputFormat::Auto.resolve(Some("yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Auto.resolve(Some("bogus")), OutputFormat::Auto);
        assert_eq!(OutputFormat::Auto.resolve(None), OutputFormat::Auto);
    }
}
