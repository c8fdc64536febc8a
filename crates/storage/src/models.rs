use serde::{Deserialize, Serialize};
use std::fmt;

/// The lead column a batch is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Industry,
    City,
}

impl Field {
    /// Column name in the `leads` table and default CSV header.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Industry => "industry",
            Field::City => "city",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Field::Industry => "industries",
            Field::City => "cities",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One distinct value as read from a source, with the leads that carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawValue {
    pub value: String,
    #[serde(default)]
    pub lead_ids: Vec<String>,
}

impl RawValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lead_ids: Vec::new(),
        }
    }
}

/// One row of the annotated report. `flag` and `reason` are empty for clean values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub value: String,
    pub normalized: String,
    pub flag: String,
    pub reason: String,
    pub lead_ids: Vec<String>,
}

impl FlagRecord {
    pub fn is_flagged(&self) -> bool {
        !self.flag.is_empty()
    }
}
