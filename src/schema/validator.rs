//! Schema validation with detailed error reporting

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::registry::{SchemaKind, SchemaRegistry};

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(regform::schema::validation_error))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Schema validator with compiled schemas
pub struct Validator {
    compiled: HashMap<SchemaKind, JsonValidator>,
}

impl Validator {
    /// Create a new validator with schemas from the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for kind in SchemaKind::all() {
            let Some(schema_str) = registry.get(*kind) else {
                continue;
            };
            match serde_json::from_str::<JsonValue>(&schema_str)
                .map_err(|e| e.to_string())
                .and_then(|json| validator_for(&json).map_err(|e| e.to_string()))
            {
                Ok(validator) => {
                    compiled.insert(*kind, validator);
                }
                Err(e) => log::warn!("schema '{}' failed to compile: {}", kind, e),
            }
        }

        Self { compiled }
    }

    /// Parse YAML (or JSON) content and check it against the schema for `kind`
    ///
    /// Returns the parsed document so callers can deserialize it without
    /// parsing twice. Every violation is collected, not just the first.
    pub fn check(
        &self,
        content: &str,
        filename: &str,
        kind: SchemaKind,
    ) -> Result<JsonValue, ValidationError> {
        // JSON is a subset of YAML, so one parser covers both formats
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let span = find_error_span(content, e.location());
                let violation = SchemaViolation::new(
                    format!("Parse error: {}", e),
                    "invalid YAML".to_string(),
                    span,
                    Some("Check YAML syntax - proper indentation, colons, quotes".to_string()),
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation::new(
                    format!("Failed to convert YAML to JSON: {}", e),
                    "conversion error".to_string(),
                    (0, content.len()).into(),
                    None,
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let Some(schema) = self.compiled.get(&kind) else {
            return Ok(json_value);
        };

        let violations: Vec<SchemaViolation> = schema
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(json_value)
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        let registry = SchemaRegistry::default();
        Self::new(&registry)
    }
}

/// Convert a JSON Schema validation error to our violation format
fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let help = generate_help_message(error);

    let span = find_path_span(content, &path);

    SchemaViolation::new(message, hint, span, help)
}

/// Format a JSON Schema error into a user-friendly message
fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            format!(
                "Invalid value at {}: must be one of: {}",
                path,
                format_enum_options(options)
            )
        }
        jsonschema::error::ValidationErrorKind::MinLength { limit } => {
            format!("Value at {} is too short: minimum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Minimum { limit } => {
            format!("Value at {} is too small: minimum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::Maximum { limit } => {
            format!("Value at {} is too large: maximum {}", path, limit)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

/// Format enum options as a string
fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Generate a short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    let hint = match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => "required field missing",
        jsonschema::error::ValidationErrorKind::Type { .. } => "wrong type",
        jsonschema::error::ValidationErrorKind::Enum { .. } => "invalid value",
        jsonschema::error::ValidationErrorKind::MinLength { .. } => "too short",
        jsonschema::error::ValidationErrorKind::Minimum { .. }
        | jsonschema::error::ValidationErrorKind::Maximum { .. } => "out of range",
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => "unknown field",
        _ => "validation error",
    };
    hint.to_string()
}

/// Generate a help message with suggestions for fixing the error
fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            Some(format!("Add the '{}' field to your file", prop_str))
        }
        jsonschema::error::ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            Some(format!("Expected value of type: {:?}", kind))
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Find the span (byte offset, length) for a parser error location
///
/// Lines are measured with their terminators so CRLF input lines up, and
/// the column is counted in chars so the offset stays on a char boundary.
fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    let Some(loc) = location else {
        return first_line_span(content);
    };

    let line = loc.line().saturating_sub(1);
    let column = loc.column().saturating_sub(1);

    let line_start: usize = content
        .split_inclusive('\n')
        .take(line)
        .map(str::len)
        .sum();
    let line_text = content[line_start..]
        .split_inclusive('\n')
        .next()
        .unwrap_or("");
    let line_body = line_text.trim_end_matches(['\r', '\n']);

    let offset = line_body
        .char_indices()
        .nth(column)
        .map(|(i, _)| line_start + i)
        .unwrap_or(line_start + line_body.len());

    let rest = &content[offset..];
    let len = rest
        .find(['\r', '\n'])
        .unwrap_or(rest.len())
        .max(1)
        .min(rest.len());

    (offset, len).into()
}

/// Find the span for a JSON path in YAML content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    // e.g. "/gender" or "/countries/0/states/1/name"
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    let Some(search_key) = parts.last() else {
        return first_line_span(content);
    };

    if search_key.parse::<usize>().is_ok() && parts.len() >= 2 {
        if let Some(span) = find_key_span(content, parts[parts.len() - 2]) {
            return span;
        }
    }

    find_key_span(content, search_key).unwrap_or_else(|| first_line_span(content))
}

/// Find the span of a key in YAML (or JSON) content
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let patterns = [format!("{}:", key), format!("\"{}\":", key)];

    let mut offset = 0;
    for raw in content.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start().trim_start_matches("- ");
        if patterns.iter().any(|p| trimmed.starts_with(p.as_str())) {
            let key_start = offset + (line.len() - trimmed.len());
            return Some((key_start, trimmed.len()).into());
        }
        offset += raw.len();
    }
    None
}

fn first_line_span(content: &str) -> SourceSpan {
    let len = content.find(['\r', '\n']).unwrap_or(content.len()).max(1);
    (0, len).into()
}
