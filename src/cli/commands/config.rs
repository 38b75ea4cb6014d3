//! `regform config` command - Configuration management
//!
//! Provides commands to view and modify regform configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., locations, disposable_domains)
    pub key: String,

    /// Value to set (comma-separated for lists)
    pub value: String,

    /// Set in global (user) config instead of the local .regform.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of the local .regform.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("locations", "Path to a location table replacing the built-in one"),
    (
        "disposable_domains",
        "Extra disposable email domains (comma-separated)",
    ),
    (
        "default_format",
        "Default output format (yaml, json, tsv, csv, md)",
    ),
    ("log_level", "Log filter (error, warn, info, debug, trace)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(&config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (REGFORM_LOCATIONS, REGFORM_LOG)");
    println!("  2. Local config (./{})", crate::core::config::LOCAL_CONFIG_FILE);
    println!("  3. Global config (~/.config/regform/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    let config_path = config_path(args.global)?;

    let mut config_map = read_mapping(&config_path)?;
    let value = parse_value(&args.key, &args.value);
    config_map.insert(serde_yml::Value::String(args.key.clone()), value);

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "local" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );

    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    let config_path = config_path(args.global)?;

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    let removed = config_map
        .remove(&serde_yml::Value::String(args.key.clone()))
        .is_some();

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "local" };
    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope
    );

    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!("  {} {}", style("Global:").cyan(), style("(unavailable)").dim()),
    }
    print_path("Local: ", &Config::local_config_path());

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'regform config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "Run 'regform config keys' to list valid keys",
            "Unknown configuration key: {}",
            key
        ))
    }
}

fn config_path(global: bool) -> Result<PathBuf> {
    if global {
        Config::global_config_path()
            .ok_or_else(|| miette::miette!("Could not determine global config directory"))
    } else {
        Ok(Config::local_config_path())
    }
}

/// Existing config file as a mapping; missing or empty files give an empty one
fn read_mapping(path: &Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content) {
        Ok(serde_yml::Value::Mapping(map)) => Ok(map),
        Ok(serde_yml::Value::Null) => Ok(serde_yml::Mapping::new()),
        Ok(_) => Err(miette::miette!(
            "{} does not contain a mapping",
            path.display()
        )),
        Err(e) => Err(miette::miette!("Failed to parse {}: {}", path.display(), e)),
    }
}

fn parse_value(key: &str, value: &str) -> serde_yml::Value {
    if key == "disposable_domains" {
        serde_yml::Value::Sequence(
            value
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| serde_yml::Value::String(d.to_string()))
                .collect(),
        )
    } else {
        serde_yml::Value::String(value.to_string())
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "locations" => config.locations.as_ref().map(|p| p.display().to_string()),
        "disposable_domains" if !config.disposable_domains.is_empty() => {
            Some(config.disposable_domains.join(", "))
        }
        "default_format" => config.default_format.clone(),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_list() {
        let value = parse_value("disposable_domains", "junk.io, trash.org,,");
        let list: Vec<String> = serde_yml::from_value(value).unwrap();
        assert_eq!(list, vec!["junk.io", "trash.org"]);
    }

    #[test]
    fn test_parse_scalar() {
        let value = parse_value("log_level", "debug");
        assert_eq!(value, serde_yml::Value::String("debug".to_string()));
    }

    #[test]
    fn test_check_key() {
        assert!(check_key("locations").is_ok());
        assert!(check_key("author").is_err());
    }

    #[test]
    fn test_written_mapping_loads_as_config() {
        let mut map = serde_yml::Mapping::new();
        map.insert(
            serde_yml::Value::String("disposable_domains".to_string()),
            parse_value("disposable_domains", "junk.io"),
        );
        map.insert(
            serde_yml::Value::String("default_format".to_string()),
            parse_value("default_format", "json"),
        );
        let yaml = serde_yml::to_string(&map).unwrap();
        let config: Config = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(config.disposable_domains, vec!["junk.io"]);
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }
}
