//! extstub CLI - Command-line interface for generating PHP extension stubs

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use extstub_core::config::CONFIG_FILE;
use extstub_core::{MetadataDump, StubConfig, StubGenerator};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod check;
mod generate;
mod list;

#[derive(Parser)]
#[command(name = "extstub")]
#[command(version = extstub_core::VERSION)]
#[command(about = "Generate PHP stub files from native extension metadata", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate stub files for one or more modules
    Generate {
        /// Module names as reported by the runtime
        #[arg(required = true)]
        modules: Vec<String>,

        /// Metadata dump (.json, .yaml/.yml or .toml)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Output file for a single module (defaults to stdout)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory; each module is written to `<module>.stub.php`
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Configuration file (defaults to ./extstub.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check that a stored stub matches a fresh render
    Check {
        /// Module name
        module: String,

        /// Metadata dump (.json, .yaml/.yml or .toml)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Stub file to compare against
        #[arg(short, long)]
        stub: PathBuf,

        /// Configuration file (defaults to ./extstub.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the modules in a metadata dump
    List {
        /// Metadata dump (.json, .yaml/.yml or .toml)
        #[arg(short, long)]
        metadata: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            modules,
            metadata,
            output,
            out_dir,
            config,
        } => {
            let options = generate::GenerateOptions {
                modules,
                metadata,
                output,
                out_dir,
                config,
            };
            generate::generate_stubs(&options)?;
        }

        Commands::Check {
            module,
            metadata,
            stub,
            config,
        } => {
            check::check_stub(&module, &metadata, &stub, config.as_deref())?;
        }

        Commands::List { metadata } => {
            list::list_modules(&metadata)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber.
///
/// Without `-v`, `RUST_LOG` decides and the fallback level is `warn`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into())
    } else {
        level.into()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Load and validate a metadata dump
fn load_metadata(path: &Path) -> Result<MetadataDump> {
    MetadataDump::from_path(path)
        .map_err(|e| anyhow!("Failed to load metadata '{}': {}", path.display(), e))
}

/// Load the output configuration.
///
/// An explicit path must exist. Otherwise `extstub.toml` in the current
/// directory is used when present, and the defaults when not.
fn load_config(path: Option<&Path>) -> Result<StubConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if !local.is_file() {
                return Ok(StubConfig::default());
            }
            local
        }
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    StubConfig::from_path(&path)
        .map_err(|e| anyhow!("Failed to load config '{}': {}", path.display(), e))
}

/// Print a generator's diagnostics to stderr
fn report_diagnostics(generator: &StubGenerator) {
    for diagnostic in generator.diagnostics() {
        eprintln!("{}: {}", generator.module_name(), diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_many_modules() {
        let cli = Cli::try_parse_from([
            "extstub", "-vv", "generate", "redis", "apcu", "--metadata", "dump.json", "--out-dir",
            "stubs",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                modules, out_dir, output, ..
            } => {
                assert_eq!(modules, vec!["redis", "apcu"]);
                assert_eq!(out_dir, Some(PathBuf::from("stubs")));
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_requires_module_and_metadata() {
        assert!(Cli::try_parse_from(["extstub", "generate", "--metadata", "dump.json"]).is_err());
        assert!(Cli::try_parse_from(["extstub", "generate", "redis"]).is_err());
    }

    #[test]
    fn test_output_conflicts_with_out_dir() {
        let result = Cli::try_parse_from([
            "extstub", "generate", "redis", "-m", "dump.json", "-o", "redis.php", "--out-dir", "stubs",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_check_and_list() {
        let cli = Cli::try_parse_from([
            "extstub", "check", "redis", "-m", "dump.yaml", "-s", "redis.stub.php",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Check { ref module, .. } if module == "redis"));

        let cli = Cli::try_parse_from(["extstub", "list", "--metadata", "dump.toml", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::List { .. }));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config(Some(dir.path().join("missing.toml").as_path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
