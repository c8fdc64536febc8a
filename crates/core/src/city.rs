//! City-name heuristics. The whitelist short-circuits everything; after that
//! the first matching check wins.

use crate::classifier::FieldClassifier;
use crate::models::{CityFlag, Classification};
use crate::normalize::normalize;
use crate::patterns::{contains_any, is_repeated_char, ANY_NUMBER, DIGITS_ONLY, EMAIL, ONLY_SPECIAL};
use crate::rules::CityRules;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CityClassifier {
    rules: Arc<CityRules>,
}

impl Default for CityClassifier {
    fn default() -> Self {
        Self::new(Arc::new(CityRules::default()))
    }
}

impl CityClassifier {
    pub fn new(rules: Arc<CityRules>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CityRules {
        &self.rules
    }

    /// Whitelist lookup on the trimmed value, case preserved.
    pub fn is_whitelisted(&self, raw: &str) -> bool {
        self.rules.whitelist.contains(raw.trim())
    }
}

impl FieldClassifier for CityClassifier {
    type Flag = CityFlag;

    fn classify(&self, raw: &str) -> Classification<CityFlag> {
        if self.is_whitelisted(raw) {
            return Classification::Clean;
        }

        let city = normalize(raw);
        let rules = &self.rules;

        if rules.blank_terms.contains(&city) {
            return Classification::flagged(
                CityFlag::BlankPlaceholder,
                "Common placeholder or empty value",
            );
        }
        if DIGITS_ONLY.is_match(&city) {
            return Classification::flagged(CityFlag::NumericOnly, "City name contains only digits");
        }
        if city.chars().count() < rules.min_length {
            return Classification::flagged(CityFlag::TooShort, "City name is very short");
        }
        if EMAIL.is_match(&city) {
            return Classification::flagged(CityFlag::PossibleEmail, "Looks like an email address");
        }
        if ANY_NUMBER.is_match(&city) {
            return Classification::flagged(
                CityFlag::ContainsNumber,
                "Contains a number (possibly zip code)",
            );
        }
        if is_repeated_char(&city) {
            return Classification::flagged(
                CityFlag::RepeatedCharacters,
                "City name is repeated characters",
            );
        }
        if ONLY_SPECIAL.is_match(&city) {
            return Classification::flagged(
                CityFlag::OnlySpecialCharacters,
                "City name contains only punctuation or symbols",
            );
        }
        if contains_any(&city, &rules.generic_locations) {
            return Classification::flagged(
                CityFlag::GenericLocation,
                "Multi-word generic location, not a true city",
            );
        }

        Classification::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(raw: &str) -> Option<CityFlag> {
        CityClassifier::default().classify(raw).kind()
    }

    #[test]
    fn ordinary_cities_pass() {
        for raw in ["Boston", "Winston-Salem", "Coeur d'Alene", "São Paulo", "  Reno "] {
            assert_eq!(kind(raw), None, "{raw}");
        }
    }

    #[test]
    fn whitelist_is_case_sensitive() {
        let c = CityClassifier::default();
        assert!(c.is_whitelisted(" washington, d.c. "));
        assert!(!c.is_whitelisted("Washington, D.C."));
    }

    #[test]
    fn whitelist_beats_blank_terms() {
        let rules = CityRules {
            whitelist: ["Null".to_string()].into_iter().collect(),
            ..CityRules::default()
        };
        let c = CityClassifier::new(Arc::new(rules));
        assert_eq!(c.classify("Null").kind(), None);
        assert_eq!(c.classify("null").kind(), Some(CityFlag::BlankPlaceholder));
    }

    #[test]
    fn short_and_special() {
        assert_eq!(kind("LA"), Some(CityFlag::TooShort));
        assert_eq!(kind("?!#"), Some(CityFlag::OnlySpecialCharacters));
        assert_eq!(kind("----"), Some(CityFlag::RepeatedCharacters));
    }

    #[test]
    fn digits_anywhere_flag() {
        assert_eq!(kind("Ward 5"), Some(CityFlag::ContainsNumber));
        assert_eq!(kind("boston 02115"), Some(CityFlag::ContainsNumber));
        assert_eq!(kind("me@city.com"), Some(CityFlag::PossibleEmail));
    }

    #[test]
    fn generic_phrase_matches_inside_words() {
        // "area" is a plain substring probe
        assert_eq!(kind("Bay Area"), Some(CityFlag::GenericLocation));
        assert_eq!(kind("Corporate Office"), Some(CityFlag::GenericLocation));
    }
}
