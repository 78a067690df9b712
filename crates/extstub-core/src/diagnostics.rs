//! Non-fatal diagnostics recorded while generating a stub

use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The oracle could not reflect the requested module
    ModuleUnavailable { module: String, reason: String },
    /// An optional parameter's default could not be resolved
    UnresolvedDefault { symbol: String, parameter: String },
    /// A constant's value could not be resolved
    UnresolvedConstant { constant: String },
}

/// A diagnostic message; never aborts generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn module_unavailable(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ModuleUnavailable {
                module: module.into(),
                reason: reason.into(),
            },
        }
    }

    pub fn unresolved_default(symbol: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedDefault {
                symbol: symbol.into(),
                parameter: parameter.into(),
            },
        }
    }

    pub fn unresolved_constant(constant: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedConstant {
                constant: constant.into(),
            },
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::ModuleUnavailable { .. } => Severity::Error,
            DiagnosticKind::UnresolvedDefault { .. } | DiagnosticKind::UnresolvedConstant { .. } => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity())?;
        match &self.kind {
            DiagnosticKind::ModuleUnavailable { module, reason } => {
                write!(f, "module '{module}' is unavailable ({reason}), emitting an empty stub")
            }
            DiagnosticKind::UnresolvedDefault { symbol, parameter } => {
                write!(f, "default value of ${parameter} in {symbol} could not be resolved")
            }
            DiagnosticKind::UnresolvedConstant { constant } => {
                write!(f, "value of constant {constant} could not be resolved")
            }
        }
    }
}
