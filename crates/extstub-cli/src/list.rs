//! Module listing for `extstub list`.

use anyhow::Result;
use extstub_core::ModuleMetadata;
use std::path::Path;

/// Print every module in a dump with its symbol counts.
pub fn list_modules(metadata: &Path) -> Result<()> {
    let dump = crate::load_metadata(metadata)?;

    if dump.modules().is_empty() {
        println!("No modules in '{}'", metadata.display());
        return Ok(());
    }

    for module in dump.modules() {
        println!("{}", summary_line(module));
    }

    Ok(())
}

fn summary_line(module: &ModuleMetadata) -> String {
    format!(
        "{:<24} {:>4} symbols: {} constants, {} functions, {} classes",
        module.name,
        module.symbol_count(),
        module.constants.len(),
        module.functions.len(),
        module.classes.len()
    )
}
