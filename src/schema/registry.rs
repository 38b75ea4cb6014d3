//! Embedded JSON schemas for the documents regform reads

use rust_embed::Embed;
use std::fmt;
use std::str::FromStr;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Kinds of document with a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SchemaKind {
    /// A registration submission file
    Submission,
    /// A location table file
    Locations,
}

impl SchemaKind {
    pub fn all() -> &'static [SchemaKind] {
        &[SchemaKind::Submission, SchemaKind::Locations]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Submission => "submission",
            SchemaKind::Locations => "locations",
        }
    }

    fn filename(&self) -> String {
        format!("{}.schema.json", self.as_str())
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown schema: {}. Use submission or locations", s))
    }
}

/// Registry of schema sources, keyed by kind
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Raw JSON text of a schema
    pub fn get(&self, kind: SchemaKind) -> Option<String> {
        EmbeddedSchemas::get(&kind.filename())
            .map(|file| String::from_utf8_lossy(&file.data).into_owned())
    }

    pub fn has_schema(&self, kind: SchemaKind) -> bool {
        EmbeddedSchemas::get(&kind.filename()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_embedded_and_parse() {
        let registry = SchemaRegistry::default();
        for kind in SchemaKind::all() {
            assert!(registry.has_schema(*kind), "missing schema {}", kind);
            let text = registry.get(*kind).unwrap();
            let json: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(json["type"], "object");
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Submission".parse::<SchemaKind>().unwrap(), SchemaKind::Submission);
        assert!("nope".parse::<SchemaKind>().is_err());
    }
}
