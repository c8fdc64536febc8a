//! Core library: normalization, rule tables, the industry and city classifiers, and the batch pipeline.

pub mod city;
pub mod classifier;
pub mod config;
pub mod industry;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod rules;

pub use city::CityClassifier;
pub use classifier::{Classifiers, FieldClassifier};
pub use industry::IndustryClassifier;
pub use models::{CityFlag, Classification, FlagKind, FlagSummary, IndustryFlag};
pub use normalize::normalize;
