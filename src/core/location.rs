//! Static country → state → city lookup table

use miette::Diagnostic;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::schema::{SchemaKind, ValidationError, Validator};

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

const DEFAULT_TABLE: &str = "locations.yaml";

#[derive(Debug, Error, Diagnostic)]
pub enum LocationError {
    #[error("Failed to read location table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] Box<ValidationError>),

    #[error("Failed to parse location table: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("Location table has an empty {0} name")]
    EmptyName(&'static str),

    #[error("Duplicate country in location table: {0}")]
    DuplicateCountry(String),

    #[error("Duplicate state '{state}' in country '{country}'")]
    DuplicateState { country: String, state: String },

    #[error("Embedded location table is missing")]
    MissingDefault,
}

/// A state and its cities, in table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub name: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// A country and its states, in table order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    #[serde(default)]
    pub states: Vec<StateEntry>,
}

/// Immutable three-level lookup table driving the cascading dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTable {
    countries: Vec<CountryEntry>,
}

impl LocationTable {
    /// Build a table from entries, rejecting empty or duplicate names
    pub fn new(countries: Vec<CountryEntry>) -> Result<Self, LocationError> {
        let mut seen_countries = HashSet::new();
        for country in &countries {
            if country.name.trim().is_empty() {
                return Err(LocationError::EmptyName("country"));
            }
            if !seen_countries.insert(country.name.as_str()) {
                return Err(LocationError::DuplicateCountry(country.name.clone()));
            }

            let mut seen_states = HashSet::new();
            for state in &country.states {
                if state.name.trim().is_empty() {
                    return Err(LocationError::EmptyName("state"));
                }
                if !seen_states.insert(state.name.as_str()) {
                    return Err(LocationError::DuplicateState {
                        country: country.name.clone(),
                        state: state.name.clone(),
                    });
                }
                if state.cities.iter().any(|c| c.trim().is_empty()) {
                    return Err(LocationError::EmptyName("city"));
                }
            }
        }

        Ok(Self { countries })
    }

    /// Parse a table from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, LocationError> {
        let raw: LocationTable = serde_yml::from_str(content)?;
        Self::new(raw.countries)
    }

    /// Load a table from a YAML file, schema-checked before parsing
    pub fn load(path: &Path) -> Result<Self, LocationError> {
        let content = std::fs::read_to_string(path).map_err(|source| LocationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Validator::default()
            .check(&content, &path.display().to_string(), SchemaKind::Locations)
            .map_err(Box::new)?;
        let table = Self::from_yaml(&content)?;
        log::debug!(
            "loaded {} countries from {}",
            table.countries.len(),
            path.display()
        );
        Ok(table)
    }

    /// The table shipped with the binary
    pub fn embedded() -> Result<Self, LocationError> {
        let file = EmbeddedData::get(DEFAULT_TABLE).ok_or(LocationError::MissingDefault)?;
        let content = String::from_utf8_lossy(&file.data);
        Self::from_yaml(&content)
    }

    /// Country names in table order
    pub fn countries(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.name.as_str()).collect()
    }

    /// State names of a country in table order; empty for unknown countries
    pub fn states(&self, country: &str) -> Vec<&str> {
        self.country(country)
            .map(|c| c.states.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// City names of a state in table order; empty for unknown keys
    pub fn cities(&self, country: &str, state: &str) -> Vec<&str> {
        self.country(country)
            .and_then(|c| c.states.iter().find(|s| s.name == state))
            .map(|s| s.cities.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.country(country).is_some()
    }

    pub fn has_state(&self, country: &str, state: &str) -> bool {
        self.states(country).contains(&state)
    }

    pub fn has_city(&self, country: &str, state: &str, city: &str) -> bool {
        self.cities(country, state).contains(&city)
    }

    /// Full entries, for listing the whole tree
    pub fn entries(&self) -> &[CountryEntry] {
        &self.countries
    }

    fn country(&self, name: &str) -> Option<&CountryEntry> {
        self.countries.iter().find(|c| c.name == name)
    }
}
