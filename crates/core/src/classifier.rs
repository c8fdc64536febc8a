use crate::city::CityClassifier;
use crate::industry::IndustryClassifier;
use crate::models::{Classification, FlagKind};
use crate::rules::RuleSet;
use std::sync::Arc;
use storage::Field;

/// A pure rule chain over one field: raw string in, classification out.
/// Implementations never fail and keep no state between calls.
pub trait FieldClassifier: Send + Sync {
    type Flag: FlagKind;

    fn classify(&self, raw: &str) -> Classification<Self::Flag>;
}

/// Both classifiers built from one loaded rule set.
#[derive(Debug, Clone, Default)]
pub struct Classifiers {
    pub industry: IndustryClassifier,
    pub city: CityClassifier,
}

impl Classifiers {
    pub fn from_rules(rules: RuleSet) -> Self {
        Self {
            industry: IndustryClassifier::new(Arc::new(rules.industry)),
            city: CityClassifier::new(Arc::new(rules.city)),
        }
    }

    /// Flag label and reason for `raw` under the classifier for `field`.
    pub fn classify_field(&self, field: Field, raw: &str) -> (&'static str, String) {
        match field {
            Field::Industry => label_and_reason(self.industry.classify(raw)),
            Field::City => label_and_reason(self.city.classify(raw)),
        }
    }
}

fn label_and_reason<K: FlagKind>(c: Classification<K>) -> (&'static str, String) {
    let label = c.label();
    match c {
        Classification::Clean => (label, String::new()),
        Classification::Flagged { reason, .. } => (label, reason),
    }
}
