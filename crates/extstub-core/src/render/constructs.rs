//! Top-level constructs: constants, free functions and class-likes

use crate::diagnostics::Diagnostic;
use crate::model::{
    split_qualified_name, ClassKind, ClassMetadata, ConstantMetadata, FunctionMetadata,
    ReflectedValue,
};

use super::{qualify, render_literal, render_type, Fragment, Renderer, Scope};

impl Renderer<'_> {
    /// Render `const NAME=value;` in the namespace encoded in the name
    pub fn render_constant(&mut self, constant: &ConstantMetadata) -> Fragment {
        let (namespace, name) = split_qualified_name(&constant.name);
        let value = self.constant_value(&constant.value, &constant.name);
        Fragment {
            scope: Scope::of(namespace),
            text: format!("const {name}={value};"),
        }
    }

    /// Literal for a constant, or the placeholder when it cannot be evaluated
    fn constant_value(&mut self, value: &ReflectedValue, symbol: &str) -> String {
        match value {
            ReflectedValue::Known(value) => render_literal(value),
            ReflectedValue::Unknown => {
                tracing::warn!(
                    constant = symbol,
                    "constant value could not be resolved, emitting placeholder"
                );
                self.diagnostics.push(Diagnostic::unresolved_constant(symbol));
                self.config.unknown_default.clone()
            }
        }
    }

    /// Render a free function with an empty body
    pub fn render_function(&mut self, function: &FunctionMetadata) -> Fragment {
        let mut text = String::new();
        self.write_doc_comment(&mut text, function.doc_comment.as_deref(), "");

        let params = self.render_parameters(&function.parameters, &function.name);
        text.push_str("function ");
        text.push_str(function.short_name());
        text.push('(');
        text.push_str(&params);
        text.push(')');

        if let Some(ret) = &function.return_type {
            text.push_str(": ");
            text.push_str(&render_type(ret));
        }
        text.push_str(" {}");

        Fragment {
            scope: Scope::of(function.namespace()),
            text,
        }
    }

    /// Render a class, interface or trait declaration with its members.
    ///
    /// Only methods declared by the class itself are emitted; inherited
    /// shape comes from the `extends`/`implements` clauses.
    pub fn render_class(&mut self, class: &ClassMetadata) -> Fragment {
        let mut text = class_header(class);
        text.push_str(" {\n");

        for name in &class.traits {
            text.push_str(&self.indent);
            text.push_str("use ");
            text.push_str(&qualify(name));
            text.push_str(";\n");
        }

        for constant in &class.constants {
            let symbol = format!("{}::{}", class.name, constant.name);
            let value = self.constant_value(&constant.value, &symbol);
            text.push_str(&self.indent);
            text.push_str("const ");
            text.push_str(&constant.name);
            text.push('=');
            text.push_str(&value);
            text.push_str(";\n");
        }

        for property in &class.properties {
            text.push_str(&self.render_property(property));
        }

        for method in class.own_methods() {
            text.push_str(&self.render_method(method, class));
        }

        text.push('}');

        Fragment {
            scope: Scope::of(class.namespace()),
            text,
        }
    }
}

/// `abstract class Name extends \Parent implements \A, \B`
fn class_header(class: &ClassMetadata) -> String {
    let mut header = String::new();

    if class.kind == ClassKind::Class {
        if class.is_abstract {
            header.push_str("abstract ");
        }
        if class.is_final {
            header.push_str("final ");
        }
    }
    header.push_str(class.kind.keyword());
    header.push(' ');
    header.push_str(class.short_name());

    if class.kind == ClassKind::Class {
        if let Some(parent) = &class.parent {
            header.push_str(" extends ");
            header.push_str(&qualify(parent));
        }
    }

    // Interfaces inherit other interfaces through `extends`
    let keyword = match class.kind {
        ClassKind::Class => Some("implements"),
        ClassKind::Interface => Some("extends"),
        ClassKind::Trait => None,
    };
    if let Some(keyword) = keyword.filter(|_| !class.interfaces.is_empty()) {
        let interfaces: Vec<_> = class.interfaces.iter().map(|i| qualify(i)).collect();
        header.push(' ');
        header.push_str(keyword);
        header.push(' ');
        header.push_str(&interfaces.join(", "));
    }

    header
}
