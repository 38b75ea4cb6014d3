//! Shared helper functions for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, FormContext, LocationTable, Rules};

/// Everything a command needs from configuration, loaded once
pub struct Session {
    pub config: Config,
    pub table: LocationTable,
    pub rules: Rules,
}

impl Session {
    /// Load config, honoring the `--locations` override
    pub fn load(global: &GlobalOpts) -> Result<Self> {
        let mut config = Config::load();
        if let Some(path) = &global.locations {
            config.locations = Some(path.clone());
        }
        let table = config.location_table()?;
        let rules = config.rules();
        Ok(Self {
            config,
            table,
            rules,
        })
    }

    pub fn ctx(&self) -> FormContext<'_> {
        FormContext {
            table: &self.table,
            rules: &self.rules,
        }
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Mask a secret for display
pub fn mask(s: &str) -> String {
    "*".repeat(s.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("New York, NY"), "\"New York, NY\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("Test@1234"), "*********");
        assert_eq!(mask(""), "");
    }
}
