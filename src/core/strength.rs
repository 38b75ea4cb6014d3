//! Password strength estimation
//!
//! Strength is cosmetic: the score only drives the meter shown while typing
//! and never blocks a submission.

use serde::Serialize;
use std::fmt;

/// Highest possible score
pub const MAX_SCORE: u8 = 5;

/// Strength tier derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Nothing satisfied yet, meter hidden
    None,
    Weak,
    Medium,
    Strong,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Tier::None,
            1..=2 => Tier::Weak,
            3..=4 => Tier::Medium,
            _ => Tier::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::None => "",
            Tier::Weak => "Weak",
            Tier::Medium => "Medium",
            Tier::Strong => "Strong",
        }
    }

    /// Meter fill, in percent
    pub fn width(&self) -> u8 {
        match self {
            Tier::None => 0,
            Tier::Weak => 30,
            Tier::Medium => 70,
            Tier::Strong => 100,
        }
    }

    /// Meter color as a hex code
    pub fn color(&self) -> &'static str {
        match self {
            Tier::None => "#ddd",
            Tier::Weak => "#ff4757",
            Tier::Medium => "#ffa502",
            Tier::Strong => "#2ed573",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Count the satisfied strength predicates (0-5)
///
/// One point each for: more than 5 characters, more than 8 characters, an
/// uppercase letter, a digit, and a character outside `[A-Za-z0-9]`.
pub fn score(password: &str) -> u8 {
    let len = password.chars().count();
    let checks = [
        len > 5,
        len > 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|&&ok| ok).count() as u8
}

/// What the strength meter shows for the current password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strength {
    pub score: u8,
    pub tier: Tier,
}

impl Strength {
    pub fn of(password: &str) -> Self {
        let score = score(password);
        Self {
            score,
            tier: Tier::from_score(score),
        }
    }

    /// Text shown under the meter
    pub fn text(&self) -> String {
        format!("Strength: {}", self.tier.label())
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self {
            score: 0,
            tier: Tier::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_examples() {
        assert_eq!(score("abc"), 0);
        assert_eq!(score("abcdef"), 1);
        // eight characters is not more than eight
        assert_eq!(score("Abcdef1!"), 4);
        assert_eq!(score("Abcdefg1!"), 5);
        assert_eq!(score(""), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Strength::of("abc").tier.label(), "");
        assert_eq!(Strength::of("abcdef").tier, Tier::Weak);
        assert_eq!(Strength::of("Abcdef1").tier, Tier::Medium);
        assert_eq!(Strength::of("Test@1234").tier, Tier::Strong);
    }

    #[test]
    fn test_non_alphanumeric_includes_spaces_and_unicode() {
        assert_eq!(score(" "), 1);
        assert_eq!(score("é"), 1);
    }

    #[test]
    fn test_length_counts_characters() {
        // six two-byte characters
        assert_eq!(score("éééééé"), 2);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::from_score(0).width(), 0);
        assert_eq!(Tier::from_score(2).color(), "#ff4757");
        assert_eq!(Tier::from_score(4).width(), 70);
        assert_eq!(Tier::from_score(5).color(), "#2ed573");
        assert_eq!(Strength::of("Test@1234").text(), "Strength: Strong");
        assert_eq!(Strength::default().text(), "Strength: ");
    }
}
