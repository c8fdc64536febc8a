//! Static rule tables for both classifiers.
//!
//! The built-in tables are the defaults. A TOML rules file may replace any
//! individual table; keys it omits keep their default. Tables are loaded once
//! and then only read.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const INDUSTRY_BLANK_TERMS: &[&str] = &[
    "",
    "none",
    "n/a",
    "no industry specified.",
    "industry not identified yet.",
    "industry information missing.",
    "industry information missing",
    "not identified yet.",
    "no industry specified",
    "other",
];

const TEST_CONTEXT_TERMS: &[&str] = &[
    "software",
    "services",
    "qa",
    "test prep",
    "equipment",
    "drug",
    "lab",
    "food",
    "diagnostic",
    "bootcamp",
    "training",
    "e-learning",
    "education",
    "compliance",
    "oral health",
    "safety",
    "penetration",
    "utility",
    "calibration",
    "inspection",
    "certification",
    "regulatory",
    "accreditation",
];

const SERVICE_KEYWORDS: &[&str] = &[
    "staffing",
    "recruiting",
    "assessments",
    "consulting",
    "services",
    "solutions",
    "architecture",
    "penetration testing",
    "vulnerability",
    "managed",
    "cybersecurity",
    "network",
    "project",
    "advanced",
    "security services",
];

const SUSPICIOUS_EXACT: &[&str] = &[
    "test",
    "testing",
    "example",
    "sample",
    "unknown",
    "asdf",
    "123",
    "misc",
    "miscellaneous",
    "niche",
    "uncategorized",
    "tbd",
    "not listed",
    "not identified",
    "learning opportunity",
    "education unknown",
];

// Checked in this order; the first one found is reported.
const TYPOS: &[&str] = &[
    "acounting",
    "acountign",
    "accountign",
    "servicess",
    "serivces",
    "buisness",
    "adviosr",
    "comercial",
    "consctruction",
    "conscruction",
    "conscuction",
    "manufscturing",
    "manufactturing",
    "educaiton",
    "edutational",
    "managementt",
    "manafacturing",
];

const GENERIC_TERMS: &[&str] = &["b2b", "it", "msp", "cpa", "ivindustry"];

const CITY_WHITELIST: &[&str] = &[
    "st. louis",
    "washington, d.c.",
    "ålesund",
    "new york",
    "los angeles",
    "san francisco",
];

const CITY_BLANK_TERMS: &[&str] = &[
    "",
    "none",
    "n/a",
    "no city specified.",
    "city not identified yet.",
    "city information missing.",
    "not identified yet.",
    "no city specified",
    "unknown",
    "unkown",
    "null",
    "test",
    "asdf",
    "qwerty",
    "tbd",
    "123",
    "nocity",
];

const GENERIC_LOCATIONS: &[&str] = &[
    "city center",
    "corporate office",
    "downtown",
    "area",
    "business district",
    "general area",
    "region",
    "location",
];

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn set(terms: &[&str]) -> HashSet<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryRules {
    pub blank_terms: HashSet<String>,
    /// Terms that make a "test" mention legitimate (test prep, QA, labs).
    pub test_context_terms: Vec<String>,
    pub service_keywords: Vec<String>,
    pub suspicious_exact: HashSet<String>,
    pub typos: Vec<String>,
    pub generic_terms: HashSet<String>,
    pub min_length: usize,
    pub max_words: usize,
    pub service_keyword_threshold: usize,
}

impl Default for IndustryRules {
    fn default() -> Self {
        Self {
            blank_terms: set(INDUSTRY_BLANK_TERMS),
            test_context_terms: owned(TEST_CONTEXT_TERMS),
            service_keywords: owned(SERVICE_KEYWORDS),
            suspicious_exact: set(SUSPICIOUS_EXACT),
            typos: owned(TYPOS),
            generic_terms: set(GENERIC_TERMS),
            min_length: 3,
            max_words: 15,
            service_keyword_threshold: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityRules {
    /// Matched case-sensitively against the trimmed raw value.
    pub whitelist: HashSet<String>,
    pub blank_terms: HashSet<String>,
    pub generic_locations: Vec<String>,
    pub min_length: usize,
}

impl Default for CityRules {
    fn default() -> Self {
        Self {
            whitelist: set(CITY_WHITELIST),
            blank_terms: set(CITY_BLANK_TERMS),
            generic_locations: owned(GENERIC_LOCATIONS),
            min_length: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub industry: IndustryRules,
    pub city: CityRules,
}

impl RuleSet {
    /// Lowercases and trims every table compared against normalized values.
    /// The city whitelist is left as written.
    pub fn normalized(mut self) -> Self {
        let ind = &mut self.industry;
        ind.blank_terms = ind.blank_terms.iter().map(|t| normalize(t)).collect();
        ind.test_context_terms = normalize_all(&ind.test_context_terms);
        ind.service_keywords = normalize_all(&ind.service_keywords);
        ind.suspicious_exact = ind.suspicious_exact.iter().map(|t| normalize(t)).collect();
        ind.typos = normalize_all(&ind.typos);
        ind.generic_terms = ind.generic_terms.iter().map(|t| normalize(t)).collect();

        let city = &mut self.city;
        city.blank_terms = city.blank_terms.iter().map(|t| normalize(t)).collect();
        city.generic_locations = normalize_all(&city.generic_locations);
        self
    }
}

fn normalize_all(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn parse_rules(content: &str) -> anyhow::Result<RuleSet> {
    let rules: RuleSet = toml::from_str(content)?;
    Ok(rules.normalized())
}

/// Loads rule overrides from a TOML file; a missing file falls back to the built-in tables.
pub fn load_rules(path: Option<&Path>) -> anyhow::Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };
    if !path.exists() {
        warn!(path = %path.display(), "rules file not found, using built-in tables");
        return Ok(RuleSet::default());
    }
    let content = fs::read_to_string(path)?;
    let rules = parse_rules(&content)?;
    info!(path = %path.display(), "loaded rule tables");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_tables() {
        let rules = parse_rules(
            r#"
            [industry]
            typos = ["Bussiness", "  "]
            max_words = 10

            [city]
            whitelist = ["Washington, D.C."]
            "#,
        )
        .unwrap();
        assert_eq!(rules.industry.typos, vec!["bussiness"]);
        assert_eq!(rules.industry.max_words, 10);
        assert_eq!(rules.industry.service_keywords.len(), SERVICE_KEYWORDS.len());
        assert!(rules.industry.blank_terms.contains("n/a"));
        assert!(rules.city.whitelist.contains("Washington, D.C."));
        assert!(rules.city.blank_terms.contains("nocity"));
    }

    #[test]
    fn blank_tables_keep_empty_string() {
        let rules = RuleSet::default().normalized();
        assert!(rules.industry.blank_terms.contains(""));
        assert!(rules.city.blank_terms.contains(""));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let rules = load_rules(Some(Path::new("/definitely/not/here.toml"))).unwrap();
        assert_eq!(rules, RuleSet::default());
        assert_eq!(load_rules(None).unwrap(), RuleSet::default());
    }
}
