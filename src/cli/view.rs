//! Terminal rendering of the form state
//!
//! Pure string builders: nothing here prints, so commands decide where the
//! output goes and tests can inspect it.

use console::{style, StyledObject};

use crate::cli::helpers::mask;
use crate::core::strength::{Strength, Tier, MAX_SCORE};
use crate::core::{Field, FormState, ValidationReport};

/// Width of the strength meter at 100%, in cells
const METER_WIDTH: usize = 20;

fn tier_style<D>(tier: Tier, content: D) -> StyledObject<D> {
    match tier {
        Tier::None => style(content).dim(),
        Tier::Weak => style(content).red(),
        Tier::Medium => style(content).yellow(),
        Tier::Strong => style(content).green(),
    }
}

/// Strength meter: a bar filled to the tier width, then the label
pub fn strength_meter(strength: &Strength) -> String {
    let filled = METER_WIDTH * strength.tier.width() as usize / 100;
    let bar = format!(
        "{}{}",
        tier_style(strength.tier, "█".repeat(filled)),
        style("░".repeat(METER_WIDTH - filled)).dim()
    );
    format!(
        "{} {} ({}/{})",
        bar,
        tier_style(strength.tier, strength.text()),
        strength.score,
        MAX_SCORE
    )
}

/// Render the whole form with values and visible errors
pub fn render_form(form: &FormState) -> String {
    let mut out = String::new();

    for field in Field::all() {
        let value = match field {
            Field::Gender => form.gender.map(|g| g.to_string()).unwrap_or_default(),
            Field::Terms => (if form.terms { "accepted" } else { "not accepted" }).to_string(),
            Field::Country => select_value(form.location.country.value(), form.location.country.enabled),
            Field::State => select_value(form.location.state.value(), form.location.state.enabled),
            Field::City => select_value(form.location.city.value(), form.location.city.enabled),
            f if f.is_secret() => mask(form.text(*f)),
            f => form.text(*f).to_string(),
        };

        out.push_str(&format!("{:>18}: {}\n", field.label(), value));
        if *field == Field::Password {
            out.push_str(&format!("{:>18}  {}\n", "", strength_meter(&form.strength)));
        }
        if let Some(error) = form.error(*field) {
            out.push_str(&format!("{:>18}  {}\n", "", style(error).red()));
        }
    }

    out
}

fn select_value(value: &str, enabled: bool) -> String {
    if !enabled {
        style("(disabled)").dim().to_string()
    } else if value.is_empty() {
        style("(none)").dim().to_string()
    } else {
        value.to_string()
    }
}

/// Inline errors of a report, one per line
pub fn render_report(report: &ValidationReport) -> String {
    report
        .field_errors
        .iter()
        .map(|(field, message)| {
            format!(
                "  {} {}: {}\n",
                style("✗").red(),
                style(field.label()).bold(),
                message
            )
        })
        .collect()
}
