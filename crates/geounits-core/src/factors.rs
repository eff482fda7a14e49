//! Fixed table of scale factors between unit labels
//!
//! Only the pairs listed here are convertible. Factors are not derived from
//! each other, so `ft -> m` is not exactly the reciprocal of `m -> ft`.
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use crate::error::{ConversionError, Result};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static DEFAULT_TABLE: OnceLock<FactorTable> = OnceLock::new();

const FACTORS: [(&str, &str, f64); 4] = [
    ("m", "ft", 3.28084),
    ("ft", "m", 0.3048),
    ("fc", "lux", 10.7639),
    ("lux", "fc", 0.092903),
];

/// Mapping from `"<from> -> <to>"` to a multiplicative factor
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    factors: BTreeMap<String, f64>,
}

impl FactorTable {
    /// The built-in length and illuminance table
    pub fn standard() -> &'static FactorTable {
        DEFAULT_TABLE.get_or_init(|| FactorTable {
            factors: FACTORS
                .iter()
                .map(|(from, to, factor)| (Self::key(from, to), *factor))
                .collect(),
        })
    }

    /// Table key for a unit pair
    pub fn key(from: &str, to: &str) -> String {
        format!("{} -> {}", from, to)
    }

    /// Look up the factor converting `from` into `to`
    pub fn factor(&self, from: &str, to: &str) -> Result<f64> {
        self.factors
            .get(&Self::key(from, to))
            .copied()
            .ok_or_else(|| ConversionError::missing_factor(from, to))
    }

    /// Iterate entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Factor from the standard table
pub fn conversion_factor(from: &str, to: &str) -> Result<f64> {
    FactorTable::standard().factor(from, to)
}
