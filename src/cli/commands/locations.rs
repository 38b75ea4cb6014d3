//! `regform locations` command - Browse the location table
//!
//! Mirrors the cascading dropdowns: `states` and `cities` list exactly the
//! options the form offers after the parent selection.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, Session};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{LocationSelector, LocationTable};

#[derive(clap::Args, Debug)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: Option<LocationsCommands>,
}

#[derive(Subcommand, Debug)]
pub enum LocationsCommands {
    /// List countries
    Countries,

    /// List the states of a country
    States {
        /// Country name, as listed by `regform locations countries`
        country: String,
    },

    /// List the cities of a state
    Cities {
        country: String,
        state: String,
    },

    /// Show the whole table (default)
    Tree,
}

/// One row of the flattened table
#[derive(Debug)]
struct LocationRow<'a> {
    country: &'a str,
    state: &'a str,
    city: &'a str,
}

pub fn run(args: LocationsArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let format = global
        .format
        .resolve(session.config.default_format.as_deref());
    let table = &session.table;

    match args.command.unwrap_or(LocationsCommands::Tree) {
        LocationsCommands::Countries => {
            let selector = LocationSelector::new(table);
            print_list("country", &selector.country.options, format)
        }
        LocationsCommands::States { country } => {
            let mut selector = LocationSelector::new(table);
            selector.select_country(table, Some(&country));
            if !selector.state.enabled {
                return Err(unknown("country", &country, &selector.country.options));
            }
            print_list("state", &selector.state.options, format)
        }
        LocationsCommands::Cities { country, state } => {
            let mut selector = LocationSelector::new(table);
            selector.select_country(table, Some(&country));
            if !selector.state.enabled {
                return Err(unknown("country", &country, &selector.country.options));
            }
            selector.select_state(table, Some(&state));
            if !selector.city.enabled {
                return Err(unknown("state", &state, &selector.state.options));
            }
            print_list("city", &selector.city.options, format)
        }
        LocationsCommands::Tree => print_tree(table, format),
    }
}

fn unknown(kind: &str, value: &str, options: &[String]) -> miette::Report {
    miette::miette!(
        help = format!("Valid values: {}", options.join(", ")),
        "Unknown {}: {}",
        kind,
        value
    )
}

fn print_list(header: &str, items: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(items).into_diagnostic()?);
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record([header]);
            for item in items {
                builder.push_record([item.as_str()]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Csv => {
            println!("{}", header);
            for item in items {
                println!("{}", escape_csv(item));
            }
        }
        OutputFormat::Auto | OutputFormat::Tsv => {
            for item in items {
                println!("{}", item);
            }
        }
    }
    Ok(())
}

fn rows(table: &LocationTable) -> Vec<LocationRow<'_>> {
    let mut rows = Vec::new();
    for country in table.entries() {
        for state in &country.states {
            for city in &state.cities {
                rows.push(LocationRow {
                    country: &country.name,
                    state: &state.name,
                    city,
                });
            }
        }
    }
    rows
}

fn print_tree(table: &LocationTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(table).into_diagnostic()?);
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Country", "State", "City"]);
            for row in rows(table) {
                builder.push_record([row.country, row.state, row.city]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Csv => {
            println!("country,state,city");
            for row in rows(table) {
                println!(
                    "{},{},{}",
                    escape_csv(row.country),
                    escape_csv(row.state),
                    escape_csv(row.city)
                );
            }
        }
        OutputFormat::Tsv => {
            for row in rows(table) {
                println!("{}\t{}\t{}", row.country, row.state, row.city);
            }
        }
        OutputFormat::Auto => {
            for country in table.entries() {
                println!("{}", style(&country.name).bold());
                for state in &country.states {
                    println!("  {}", style(&state.name).cyan());
                    for city in &state.cities {
                        println!("    {}", city);
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_flatten_in_table_order() {
        let table = LocationTable::embedded().unwrap();
        let rows = rows(&table);
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].city, "Los Angeles");
        assert_eq!(rows[23].country, "UK");
        assert_eq!(rows[23].city, "Aberdeen");
    }
}
