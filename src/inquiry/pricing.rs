//! Lesson tiers and their published prices.

/// Price label for any lesson type not in [`PRICING`].
pub const CUSTOM_PRICING: &str = "Custom pricing";

/// Lesson type label → display price.
pub const PRICING: [(&str, &str); 4] = [
    ("Little Sprouts", "$30/30min"),
    ("Young Explorers", "$45/45min"),
    ("Rising Stars", "$60/hour"),
    ("Not sure yet", "To be determined"),
];

/// The lesson tier a parent asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonTier {
    LittleSprouts,
    YoungExplorers,
    RisingStars,
    /// The parent wants help choosing.
    NotSureYet,
    /// Anything the website did not offer as a choice.
    Custom(String),
}

impl LessonTier {
    /// Resolve a submitted label. Matching is exact after trimming.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Little Sprouts" => Self::LittleSprouts,
            "Young Explorers" => Self::YoungExplorers,
            "Rising Stars" => Self::RisingStars,
            "Not sure yet" => Self::NotSureYet,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::LittleSprouts => PRICING[0].0,
            Self::YoungExplorers => PRICING[1].0,
            Self::RisingStars => PRICING[2].0,
            Self::NotSureYet => PRICING[3].0,
            Self::Custom(label) => label,
        }
    }

    pub fn price(&self) -> &'static str {
        price_for(self.label())
    }

    /// Whether the studio should help the parent pick a tier.
    pub fn needs_guidance(&self) -> bool {
        matches!(self, Self::NotSureYet)
    }
}

/// Look up the display price for a lesson type label.
pub fn price_for(lesson_type: &str) -> &'static str {
    PRICING
        .iter()
        .find(|(label, _)| *label == lesson_type)
        .map(|(_, price)| *price)
        .unwrap_or(CUSTOM_PRICING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tiers_resolve_to_their_prices() {
        assert_eq!(price_for("Little Sprouts"), "$30/30min");
        assert_eq!(price_for("Young Explorers"), "$45/45min");
        assert_eq!(price_for("Rising Stars"), "$60/hour");
        assert_eq!(price_for("Not sure yet"), "To be determined");
    }

    #[test]
    fn unknown_tier_is_custom_pricing() {
        assert_eq!(price_for("Unknown Tier"), "Custom pricing");
        assert_eq!(price_for("rising stars"), "Custom pricing");
    }

    #[test]
    fn tier_from_label() {
        assert_eq!(LessonTier::from_label("Rising Stars"), LessonTier::RisingStars);
        assert_eq!(LessonTier::from_label(" Rising Stars "), LessonTier::RisingStars);
        assert_eq!(LessonTier::from_label("Rising Stars").price(), "$60/hour");

        let custom = LessonTier::from_label("Jazz Improv");
        assert_eq!(custom, LessonTier::Custom("Jazz Improv".into()));
        assert_eq!(custom.label(), "Jazz Improv");
        assert_eq!(custom.price(), CUSTOM_PRICING);
    }

    #[test]
    fn only_not_sure_yet_needs_guidance() {
        assert!(LessonTier::NotSureYet.needs_guidance());
        assert!(!LessonTier::LittleSprouts.needs_guidance());
        assert!(!LessonTier::Custom("Not sure".into()).needs_guidance());
    }
}
