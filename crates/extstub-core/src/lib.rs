//! extstub Core - Stub generation for native PHP extensions
//!
//! This crate turns the reflected metadata of a compiled extension into a
//! declaration-only PHP source file that editors and static analyzers can
//! index:
//! - Model: the reflected constants, functions and class-likes
//! - Oracle: where metadata comes from (a dump exported by a reflection shim)
//! - Render: per-construct declaration renderers
//! - Generator: namespace partitioning and document assembly
//! - Config: output settings loaded from `extstub.toml`

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reflected metadata model
pub mod model;

/// Metadata sources
pub mod oracle;

/// Declaration renderers
pub mod render;

/// Stub assembly
pub mod generator;

/// Output configuration
pub mod config;

/// Non-fatal diagnostics
pub mod diagnostics;

pub use config::{ConfigError, LineEnding, StubConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use generator::{NamespacePartitioner, StubGenerator};
pub use model::{MetadataError, ModuleMetadata};
pub use oracle::{MetadataDump, MetadataFormat, MetadataOracle, OracleError};
