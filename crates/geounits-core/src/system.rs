//! Unit systems
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use crate::error::{ConversionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two unit systems a schema can annotate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Metric units, annotated as `si_units`
    #[serde(rename = "si_units")]
    Si,
    /// Imperial units, annotated as `ip_units`
    #[serde(rename = "ip_units")]
    Ip,
}

impl UnitSystem {
    /// Schema annotation key for this system
    pub fn key(self) -> &'static str {
        match self {
            UnitSystem::Si => "si_units",
            UnitSystem::Ip => "ip_units",
        }
    }

    /// Parse a system identifier, naming `param` in the error
    pub fn parse_param(param: &str, value: &str) -> Result<Self> {
        match value {
            "si_units" => Ok(UnitSystem::Si),
            "ip_units" => Ok(UnitSystem::Ip),
            other => Err(ConversionError::invalid_system(param, other)),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_param("system", s)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
