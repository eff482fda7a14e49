//! Convert command handler

use super::utils::{load_document, load_unit_map, save_document};
use crate::cli::{ConvertArgs, DocumentRoot};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{format_value_compact, OutputWriter};
use geounits_core::UnitSystem;

/// Handle the convert command
pub fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let from = UnitSystem::from(args.from);
    let to = UnitSystem::from(args.to);

    output.info(&format!(
        "Converting {} from {} to {}",
        args.document.display(),
        from,
        to
    ))?;

    let units = load_unit_map(&args.schema, config)?;
    let document = load_document(&args.document)?;

    let timer = Timer::with_details("convert", &format!("{:?}", args.root));
    let converted = match args.root {
        DocumentRoot::Schema => units.convert_schema(&document, from, to)?,
        DocumentRoot::State => units.convert_state(&document, from, to)?,
        DocumentRoot::Library => units.convert_library(&document, from, to)?,
    };

    tracing::info!(
        root = ?args.root,
        %from,
        %to,
        elapsed_us = timer.elapsed().as_micros() as u64,
        "Document converted"
    );
    drop(timer);

    match args.output_file {
        Some(path) => {
            save_document(&path, &converted, config.output.pretty)?;
            output.success(&format!("✓ Converted document written to {}", path.display()))?;

            if let Some(fields) = converted.as_object() {
                output.section("Top-level fields")?;
                let rows = fields
                    .iter()
                    .map(|(key, value)| vec![key.clone(), format_value_compact(value)])
                    .collect();
                output.table(&["Field", "Value"], rows)?;
            }
        }
        None => output.data(&converted)?,
    }

    Ok(())
}
