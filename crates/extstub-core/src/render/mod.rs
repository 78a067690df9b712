//! Rendering of reflected metadata into stub declarations
//!
//! Each construct (constant, function, class) renders to a [`Fragment`]
//! tagged with the namespace it belongs to. Members, parameters, types and
//! literals render to plain strings spliced into their owner's fragment.

mod constructs;
mod literal;
mod members;
mod params;
mod types;

pub use literal::{quote_string, render_literal};
pub use types::{qualify, render_type};

use crate::config::StubConfig;
use crate::diagnostics::Diagnostic;

/// Namespace a fragment is emitted into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Namespace(String),
}

impl Scope {
    /// Scope for an entity given its namespace, if any
    pub fn of(namespace: Option<&str>) -> Self {
        match namespace {
            Some(ns) => Scope::Namespace(ns.to_string()),
            None => Scope::Global,
        }
    }
}

/// One rendered top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub scope: Scope,
    pub text: String,
}

/// Renders constructs according to a [`StubConfig`], collecting diagnostics
pub struct Renderer<'a> {
    config: &'a StubConfig,
    indent: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a StubConfig) -> Self {
        Self {
            config,
            indent: config.indent_str(),
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Write an optional doc comment followed by a fresh, indented line
    fn write_doc_comment(&self, out: &mut String, doc: Option<&str>, indent: &str) {
        if let Some(doc) = doc.filter(|d| !d.trim().is_empty()) {
            out.push_str(doc);
            out.push('\n');
            out.push_str(indent);
        }
    }
}
