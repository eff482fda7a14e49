//! Factors command handler

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::OutputWriter;
use geounits_core::FactorTable;
use std::collections::BTreeMap;

/// Handle the factors command
pub fn handle_factors(output: &mut OutputWriter) -> Result<()> {
    let table = FactorTable::standard();

    if output.format() == OutputFormat::Human {
        output.section(&format!("Conversion factors ({})", table.len()))?;
        let rows = table
            .entries()
            .map(|(key, factor)| {
                let (from, to) = key.split_once(" -> ").unwrap_or((key, ""));
                vec![from.to_string(), to.to_string(), factor.to_string()]
            })
            .collect();
        output.table(&["From", "To", "Factor"], rows)
    } else {
        let factors: BTreeMap<&str, f64> = table.entries().collect();
        output.data(&factors)
    }
}
