//! Building converters from the unit map
//!
//! Resolution at a path, in order:
//!
//! 1. nothing unit-bearing, or a scalar whose two labels match: identity
//! 2. a scalar: scale by the factor for its `from -> to` labels
//! 3. a reference: the converter of the referenced entry
//! 4. an array wrapper: the element converter mapped over the array
//! 5. a composite: one converter per declared field
//!
//! References and array wrappers go through a resolution stack so that a
//! schema which loops back on itself fails instead of recursing forever.
//!
//! Copyright (c) 2025 Geounits Team
//! Licensed under the Apache-2.0 license

use super::Converter;
use crate::error::{ConversionError, Result};
use crate::factors::FactorTable;
use crate::system::UnitSystem;
use crate::units::{ScalarUnits, UnitDescriptor, UnitMap};
use std::collections::BTreeMap;
use tracing::trace;

/// Build the converter for `path`
///
/// Identical systems short-circuit to [`Converter::Identity`] without
/// consulting the unit map.
pub fn build_converter(
    units: &UnitMap,
    path: &str,
    from: UnitSystem,
    to: UnitSystem,
) -> Result<Converter> {
    Synthesizer::new(units, FactorTable::standard()).build(path, from, to)
}

/// Build the converter for `path` from string system identifiers
///
/// Fails with [`ConversionError::InvalidSystem`] naming `fromSystem` or
/// `toSystem` when either is not `si_units` / `ip_units`.
pub fn get_converter(units: &UnitMap, path: &str, from: &str, to: &str) -> Result<Converter> {
    let from = UnitSystem::parse_param("fromSystem", from)?;
    let to = UnitSystem::parse_param("toSystem", to)?;
    build_converter(units, path, from, to)
}

/// Walks a unit map to synthesize converters
#[derive(Debug)]
pub struct Synthesizer<'a> {
    units: &'a UnitMap,
    factors: &'a FactorTable,
    /// Indirections currently being resolved
    resolution_stack: Vec<String>,
}

impl<'a> Synthesizer<'a> {
    pub fn new(units: &'a UnitMap, factors: &'a FactorTable) -> Self {
        Self {
            units,
            factors,
            resolution_stack: Vec::new(),
        }
    }

    /// Synthesize the converter for `path`
    pub fn build(&mut self, path: &str, from: UnitSystem, to: UnitSystem) -> Result<Converter> {
        if from == to {
            return Ok(Converter::Identity);
        }
        self.resolution_stack.clear();
        self.synthesize(path, from, to)
    }

    fn synthesize(&mut self, path: &str, from: UnitSystem, to: UnitSystem) -> Result<Converter> {
        let units = self.units;
        match units.lookup(path)? {
            Some(descriptor) => self.synthesize_descriptor(path, descriptor, from, to),
            None => {
                trace!(path, "No units at path");
                Ok(Converter::Identity)
            }
        }
    }

    /// Indirection targets name a top-level entry; a dotted target walks into one
    fn synthesize_target(
        &mut self,
        target: &str,
        from: UnitSystem,
        to: UnitSystem,
    ) -> Result<Converter> {
        let units = self.units;
        match units.get(target) {
            Some(descriptor) => self.synthesize_descriptor(target, descriptor, from, to),
            None => self.synthesize(target, from, to),
        }
    }

    /// `path` labels errors and the resolution stack; it is never split again
    fn synthesize_descriptor(
        &mut self,
        path: &str,
        descriptor: &'a UnitDescriptor,
        from: UnitSystem,
        to: UnitSystem,
    ) -> Result<Converter> {
        match descriptor {
            UnitDescriptor::Scalar(scalar) => self.scalar(path, scalar, from, to),
            UnitDescriptor::Ref { target } => {
                trace!(path, target = %target, "Following reference");
                self.push_path(path)?;
                let converter = self.synthesize_target(target, from, to);
                self.pop_path();
                converter
            }
            UnitDescriptor::ArrayOf { element } => {
                trace!(path, element = %element, "Mapping array elements");
                self.push_path(path)?;
                let converter = self.synthesize_target(element, from, to);
                self.pop_path();
                Ok(Converter::Each(Box::new(converter?)))
            }
            UnitDescriptor::Composite(fields) => {
                let converters = fields
                    .iter()
                    .map(|(key, child)| {
                        let field_path = format!("{}.{}", path, key);
                        self.synthesize_descriptor(&field_path, child, from, to)
                            .map(|converter| (key.clone(), converter))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                Ok(Converter::Fields(converters))
            }
        }
    }

    fn scalar(
        &self,
        path: &str,
        scalar: &ScalarUnits,
        from: UnitSystem,
        to: UnitSystem,
    ) -> Result<Converter> {
        if scalar.is_degenerate() {
            return Ok(Converter::Identity);
        }

        let label = |system: UnitSystem| {
            scalar
                .label(system)
                .ok_or_else(|| ConversionError::MissingUnitLabel {
                    path: path.to_string(),
                    system: system.key().to_string(),
                })
        };
        let (from_label, to_label) = (label(from)?, label(to)?);

        let factor = self.factors.factor(from_label, to_label)?;
        trace!(path, from = from_label, to = to_label, factor, "Scalar conversion");
        Ok(Converter::Scale(factor))
    }

    /// Push a path onto the resolution stack
    fn push_path(&mut self, path: &str) -> Result<()> {
        if self.resolution_stack.iter().any(|entry| entry == path) {
            let mut chain = self.resolution_stack.clone();
            chain.push(path.to_string());
            return Err(ConversionError::circular_reference(&chain));
        }
        self.resolution_stack.push(path.to_string());
        Ok(())
    }

    fn pop_path(&mut self) -> Option<String> {
        self.resolution_stack.pop()
    }
}
