//! Units command handler

use super::utils::load_unit_map;
use crate::cli::{OutputFormat, UnitsArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::{summarize_descriptor, OutputWriter};

/// Handle the units command
pub fn handle_units(args: UnitsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let units = load_unit_map(&args.schema, config)?;

    match args.path {
        Some(path) => match units.lookup(&path)? {
            Some(descriptor) => {
                output.section(&path)?;
                output.descriptor(descriptor)?;
            }
            None => {
                output.warning(&format!("No unit information at '{}'", path))?;
                if output.format() != OutputFormat::Human {
                    output.data(&serde_json::Value::Null)?;
                }
            }
        },
        None if output.format() == OutputFormat::Human => {
            output.section(&format!("Unit map ({} entries)", units.len()))?;
            let rows = units
                .roots()
                .filter_map(|name| {
                    units
                        .get(name)
                        .map(|descriptor| vec![name.to_string(), summarize_descriptor(descriptor)])
                })
                .collect();
            output.table(&["Entry", "Units"], rows)?;
        }
        None => output.data(&units)?,
    }

    Ok(())
}
