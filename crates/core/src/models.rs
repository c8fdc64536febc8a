use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A categorical reason a value was judged suspicious.
pub trait FlagKind: Copy + fmt::Debug + PartialEq + Eq {
    /// Label written into the `flag` column.
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryFlag {
    #[serde(rename = "Blank/None/Other")]
    BlankNoneOther,
    #[serde(rename = "Possibly personal info")]
    PossiblyPersonalInfo,
    #[serde(rename = "Too short")]
    TooShort,
    #[serde(rename = "Suspicious phrase")]
    SuspiciousPhrase,
    #[serde(rename = "Possible typo")]
    PossibleTypo,
    #[serde(rename = "Generic/Unspecific")]
    GenericUnspecific,
}

impl FlagKind for IndustryFlag {
    fn label(&self) -> &'static str {
        match self {
            IndustryFlag::BlankNoneOther => "Blank/None/Other",
            IndustryFlag::PossiblyPersonalInfo => "Possibly personal info",
            IndustryFlag::TooShort => "Too short",
            IndustryFlag::SuspiciousPhrase => "Suspicious phrase",
            IndustryFlag::PossibleTypo => "Possible typo",
            IndustryFlag::GenericUnspecific => "Generic/Unspecific",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityFlag {
    #[serde(rename = "Blank/Placeholder")]
    BlankPlaceholder,
    #[serde(rename = "Numeric Only")]
    NumericOnly,
    #[serde(rename = "Too Short")]
    TooShort,
    #[serde(rename = "Possible Email")]
    PossibleEmail,
    #[serde(rename = "Contains Number")]
    ContainsNumber,
    #[serde(rename = "Repeated Characters")]
    RepeatedCharacters,
    #[serde(rename = "Only Special Characters")]
    OnlySpecialCharacters,
    #[serde(rename = "Generic Location")]
    GenericLocation,
}

impl FlagKind for CityFlag {
    fn label(&self) -> &'static str {
        match self {
            CityFlag::BlankPlaceholder => "Blank/Placeholder",
            CityFlag::NumericOnly => "Numeric Only",
            CityFlag::TooShort => "Too Short",
            CityFlag::PossibleEmail => "Possible Email",
            CityFlag::ContainsNumber => "Contains Number",
            CityFlag::RepeatedCharacters => "Repeated Characters",
            CityFlag::OnlySpecialCharacters => "Only Special Characters",
            CityFlag::GenericLocation => "Generic Location",
        }
    }
}

impl fmt::Display for IndustryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one value. A reason exists exactly when a flag does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<K> {
    Clean,
    Flagged { kind: K, reason: String },
}

impl<K: FlagKind> Classification<K> {
    pub fn flagged(kind: K, reason: impl Into<String>) -> Self {
        Classification::Flagged {
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Classification::Flagged { .. })
    }

    pub fn kind(&self) -> Option<K> {
        match self {
            Classification::Clean => None,
            Classification::Flagged { kind, .. } => Some(*kind),
        }
    }

    /// Flag label, empty when clean.
    pub fn label(&self) -> &'static str {
        self.kind().map(|k| k.label()).unwrap_or("")
    }

    /// Reason text, empty when clean.
    pub fn reason(&self) -> &str {
        match self {
            Classification::Clean => "",
            Classification::Flagged { reason, .. } => reason,
        }
    }
}

/// Occurrence count per flag label across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSummary {
    counts: BTreeMap<String, usize>,
}

impl FlagSummary {
    pub fn record(&mut self, label: &str) {
        if label.is_empty() {
            return;
        }
        *self.counts.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Combines two partial summaries; order of merging does not matter.
    pub fn merge(mut self, other: FlagSummary) -> Self {
        for (label, count) in other.counts {
            *self.counts.entry(label).or_insert(0) += count;
        }
        self
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<&'a str> for FlagSummary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut summary = FlagSummary::default();
        for label in iter {
            summary.record(label);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_has_no_label_or_reason() {
        let c: Classification<CityFlag> = Classification::Clean;
        assert!(!c.is_flagged());
        assert_eq!(c.label(), "");
        assert_eq!(c.reason(), "");
    }

    #[test]
    fn serde_names_match_labels() {
        for flag in [
            IndustryFlag::BlankNoneOther,
            IndustryFlag::PossiblyPersonalInfo,
            IndustryFlag::TooShort,
            IndustryFlag::SuspiciousPhrase,
            IndustryFlag::PossibleTypo,
            IndustryFlag::GenericUnspecific,
        ] {
            let json = serde_json::to_string(&flag).unwrap();
            assert_eq!(json, format!("\"{}\"", flag.label()));
        }
        let json = serde_json::to_string(&CityFlag::OnlySpecialCharacters).unwrap();
        assert_eq!(json, "\"Only Special Characters\"");
    }

    #[test]
    fn summary_counts_and_merges() {
        let a: FlagSummary = ["Too Short", "", "Numeric Only", "Too Short"]
            .into_iter()
            .collect();
        let b: FlagSummary = ["Numeric Only"].into_iter().collect();
        assert_eq!(a.get("Too Short"), 2);
        assert_eq!(a.total(), 3);

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.get("Numeric Only"), 2);
        assert_eq!(
            ab.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["Numeric Only", "Too Short"]
        );
    }
}
