//! Stub generation for `extstub generate`.

use anyhow::{anyhow, bail, Result};
use extstub_core::StubGenerator;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of generated stub files.
pub const STUB_EXTENSION: &str = "stub.php";

/// Options for stub generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Modules to generate, in order.
    pub modules: Vec<String>,

    /// Metadata dump to read.
    pub metadata: PathBuf,

    /// Output file for a single module.
    pub output: Option<PathBuf>,

    /// Output directory for one or more modules.
    pub out_dir: Option<PathBuf>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Generate stubs for every requested module.
///
/// A module missing from the dump still produces an (empty) stub; its
/// diagnostic is printed to stderr.
pub fn generate_stubs(options: &GenerateOptions) -> Result<()> {
    if options.modules.len() > 1 && options.out_dir.is_none() {
        bail!(
            "Generating {} modules requires --out-dir",
            options.modules.len()
        );
    }

    let dump = crate::load_metadata(&options.metadata)?;
    let config = crate::load_config(options.config.as_deref())?;

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).map_err(|e| {
            anyhow!("Failed to create output directory '{}': {}", dir.display(), e)
        })?;
    }

    let mut diagnostics = 0;
    for module in &options.modules {
        let generator = StubGenerator::from_oracle(&dump, module, config.clone());
        crate::report_diagnostics(&generator);
        diagnostics += generator.diagnostics().len();

        let stub = generator.generate();
        let target = match (&options.out_dir, &options.output) {
            (Some(dir), _) => Some(stub_path(dir, generator.module_name())),
            (None, Some(path)) => Some(path.clone()),
            (None, None) => None,
        };

        match target {
            Some(path) => {
                fs::write(&path, &stub)
                    .map_err(|e| anyhow!("Failed to write '{}': {}", path.display(), e))?;
                eprintln!("Generated: {}", path.display());
            }
            None => print!("{stub}"),
        }
    }

    if diagnostics > 0 {
        eprintln!("{diagnostics} diagnostic(s) reported");
    }

    Ok(())
}

/// Path of a module's stub inside an output directory.
pub fn stub_path(dir: &Path, module: &str) -> PathBuf {
    dir.join(format!("{module}.{STUB_EXTENSION}"))
}
