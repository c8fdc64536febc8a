//! Industry-name heuristics. Checks run in a fixed order and the first match wins.

use crate::classifier::FieldClassifier;
use crate::models::{Classification, IndustryFlag};
use crate::normalize::{normalize, squash_whitespace};
use crate::patterns::{all_contained, contains_any, first_contained, EMAIL, LONG_NUMBER};
use crate::rules::IndustryRules;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct IndustryClassifier {
    rules: Arc<IndustryRules>,
}

impl Default for IndustryClassifier {
    fn default() -> Self {
        Self::new(Arc::new(IndustryRules::default()))
    }
}

impl IndustryClassifier {
    pub fn new(rules: Arc<IndustryRules>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &IndustryRules {
        &self.rules
    }

    /// Sub-checks of the "Suspicious phrase" rule. Returns the reason when one fires.
    fn suspicious_reason(&self, ind: &str) -> Option<String> {
        let rules = &self.rules;

        // "testing" contains "test", so one probe covers both.
        if ind.contains("test") && !contains_any(ind, &rules.test_context_terms) {
            return Some(format!(
                "Contains 'test' or 'testing' in suspicious context: '{ind}'"
            ));
        }

        let word_count = ind.split_whitespace().count();
        if word_count > rules.max_words {
            return Some(format!("Too verbose - contains {word_count} words"));
        }

        let hits = all_contained(ind, &rules.service_keywords);
        if hits.len() >= rules.service_keyword_threshold {
            return Some(format!(
                "Likely a service list - contains: {}",
                hits.join(", ")
            ));
        }

        if rules.suspicious_exact.contains(ind) {
            return Some(format!("Exact suspicious value: '{ind}'"));
        }

        None
    }
}

impl FieldClassifier for IndustryClassifier {
    type Flag = IndustryFlag;

    fn classify(&self, raw: &str) -> Classification<IndustryFlag> {
        let ind = normalize(raw);
        let rules = &self.rules;

        if rules.blank_terms.contains(&ind) {
            return Classification::flagged(
                IndustryFlag::BlankNoneOther,
                "Industry not provided or marked as missing",
            );
        }
        if EMAIL.is_match(&ind) {
            return Classification::flagged(
                IndustryFlag::PossiblyPersonalInfo,
                "Contains email address",
            );
        }
        if LONG_NUMBER.is_match(&ind) {
            return Classification::flagged(
                IndustryFlag::PossiblyPersonalInfo,
                "Contains long number or NAICS code",
            );
        }
        if ind.chars().count() < rules.min_length {
            return Classification::flagged(IndustryFlag::TooShort, "Industry name is very short");
        }
        if let Some(reason) = self.suspicious_reason(&ind) {
            return Classification::flagged(IndustryFlag::SuspiciousPhrase, reason);
        }
        if let Some(typo) = first_contained(&ind, &rules.typos) {
            return Classification::flagged(
                IndustryFlag::PossibleTypo,
                format!("Possible typo detected: '{typo}'"),
            );
        }
        if rules.generic_terms.contains(&squash_whitespace(&ind)) {
            return Classification::flagged(
                IndustryFlag::GenericUnspecific,
                format!("Generic term: '{ind}'"),
            );
        }

        Classification::Clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(raw: &str) -> Option<IndustryFlag> {
        IndustryClassifier::default().classify(raw).kind()
    }

    #[test]
    fn legit_industries_pass() {
        for raw in [
            "Software Development",
            "Commercial Real Estate",
            "Oral Health Testing Services",
            "Drug Testing Lab",
            "Accounting",
            "Information Technology",
        ] {
            assert_eq!(kind(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_context_whitelist() {
        assert_eq!(kind("Test Prep"), None);
        assert_eq!(kind("Product Testing"), Some(IndustryFlag::SuspiciousPhrase));
        let c = IndustryClassifier::default().classify("Contest Organizer");
        assert!(c.reason().contains("'contest organizer'"));
    }

    #[test]
    fn verbosity_checked_before_keyword_density() {
        let raw = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen";
        let c = IndustryClassifier::default().classify(raw);
        assert_eq!(c.kind(), Some(IndustryFlag::SuspiciousPhrase));
        assert_eq!(c.reason(), "Too verbose - contains 16 words");
    }

    #[test]
    fn exact_suspicious_values() {
        let c = IndustryClassifier::default().classify(" MISC ");
        assert_eq!(c.kind(), Some(IndustryFlag::SuspiciousPhrase));
        assert_eq!(c.reason(), "Exact suspicious value: 'misc'");
        // "test" is caught by the test-context sub-check first
        let c = IndustryClassifier::default().classify("test");
        assert!(c.reason().starts_with("Contains 'test'"));
    }

    #[test]
    fn generic_terms_ignore_internal_spaces() {
        assert_eq!(kind("B 2 B"), Some(IndustryFlag::GenericUnspecific));
        assert_eq!(kind("MSP"), Some(IndustryFlag::GenericUnspecific));
        // too short wins for two-letter generics
        assert_eq!(kind("IT"), Some(IndustryFlag::TooShort));
    }

    #[test]
    fn custom_rules_apply() {
        let rules = IndustryRules {
            typos: vec!["retial".into()],
            ..IndustryRules::default()
        };
        let c = IndustryClassifier::new(Arc::new(rules)).classify("Retial Stores");
        assert_eq!(c.reason(), "Possible typo detected: 'retial'");
    }
}
