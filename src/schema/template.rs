//! Template generation for blank submission files

use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::location::LocationTable;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SUBMISSION_TEMPLATE: &str = "submission.yaml.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),
}

/// Context for template generation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Name shown in the "validate with" hint
    pub filename: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl TemplateContext {
    /// Check that the prefilled location is a path through the table
    pub fn check_location(&self, table: &LocationTable) -> Result<(), TemplateError> {
        let country = self.country.as_deref().unwrap_or("");
        let state = self.state.as_deref().unwrap_or("");
        let city = self.city.as_deref().unwrap_or("");

        if (!state.is_empty() && country.is_empty()) || (!city.is_empty() && state.is_empty()) {
            return Err(TemplateError::UnknownLocation(
                "a state needs a country and a city needs a state".to_string(),
            ));
        }
        if !country.is_empty() && !table.has_country(country) {
            return Err(TemplateError::UnknownLocation(format!("country '{}'", country)));
        }
        if !state.is_empty() && !table.has_state(country, state) {
            return Err(TemplateError::UnknownLocation(format!(
                "state '{}' in {}",
                state, country
            )));
        }
        if !city.is_empty() && !table.has_city(country, state, city) {
            return Err(TemplateError::UnknownLocation(format!(
                "city '{}' in {}, {}",
                city, state, country
            )));
        }
        Ok(())
    }
}

/// Renders the embedded templates
pub struct TemplateGenerator {
    tera: Tera,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        // values are written into quoted YAML scalars, not HTML
        tera.autoescape_on(vec![]);

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Generate a blank submission, optionally with a location filled in
    pub fn generate_submission(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        if !self
            .tera
            .get_template_names()
            .any(|n| n == SUBMISSION_TEMPLATE)
        {
            return Err(TemplateError::NotFound(SUBMISSION_TEMPLATE.to_string()));
        }

        let mut context = tera::Context::new();
        let filename = if ctx.filename.is_empty() {
            "<file>"
        } else {
            ctx.filename.as_str()
        };
        context.insert("filename", filename);
        context.insert("country", &yaml_escape(ctx.country.as_deref()));
        context.insert("state", &yaml_escape(ctx.state.as_deref()));
        context.insert("city", &yaml_escape(ctx.city.as_deref()));

        self.tera
            .render(SUBMISSION_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

/// Escape a value for a double-quoted YAML scalar
fn yaml_escape(value: Option<&str>) -> String {
    value
        .unwrap_or("")
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}
