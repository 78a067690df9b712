//! Parameter lists, shared by free functions and methods

use crate::diagnostics::Diagnostic;
use crate::model::{ReflectedValue, ParameterMetadata};

use super::{render_literal, render_type, Renderer};

impl Renderer<'_> {
    /// Render one parameter, e.g. `?array &...$values` or `int $flags=0`.
    ///
    /// `owner` names the enclosing function or method for diagnostics.
    pub fn render_parameter(&mut self, param: &ParameterMetadata, owner: &str) -> String {
        let mut out = String::new();

        if let Some(ty) = &param.ty {
            out.push_str(&render_type(ty));
            out.push(' ');
        }
        if param.by_reference {
            out.push('&');
        }
        if param.variadic {
            out.push_str("...");
        }
        out.push('$');
        out.push_str(&param.name);

        // A variadic parameter is optional but may not declare a default
        if param.optional && !param.variadic {
            out.push('=');
            match &param.default {
                Some(ReflectedValue::Known(value)) => out.push_str(&render_literal(value)),
                Some(ReflectedValue::Unknown) | None => {
                    tracing::warn!(
                        symbol = owner,
                        parameter = %param.name,
                        "default value could not be resolved, emitting placeholder"
                    );
                    self.diagnostics
                        .push(Diagnostic::unresolved_default(owner, &param.name));
                    out.push_str(&self.config.unknown_default);
                }
            }
        }

        out
    }

    /// Render a comma-separated parameter list without the parentheses
    pub fn render_parameters(&mut self, params: &[ParameterMetadata], owner: &str) -> String {
        params
            .iter()
            .map(|p| self.render_parameter(p, owner))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
