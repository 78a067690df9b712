//! Property and method declarations inside a class body

use crate::model::{ClassKind, ClassMetadata, MethodMetadata, PropertyMetadata};

use super::{render_type, Renderer};

impl Renderer<'_> {
    /// Render an indented property declaration, e.g. `    public static $count;`
    pub fn render_property(&self, property: &PropertyMetadata) -> String {
        let mut out = self.indent.clone();
        self.write_doc_comment(&mut out, property.doc_comment.as_deref(), &self.indent);

        out.push_str(property.visibility.keyword());
        out.push(' ');
        if property.is_static {
            out.push_str("static ");
        }
        out.push('$');
        out.push_str(&property.name);
        out.push_str(";\n");
        out
    }

    /// Render an indented method declaration.
    ///
    /// Abstract methods end with `;`, every other method gets an empty body.
    pub fn render_method(&mut self, method: &MethodMetadata, class: &ClassMetadata) -> String {
        let owner = format!("{}::{}", class.name, method.name);
        let mut out = self.indent.clone();
        self.write_doc_comment(&mut out, method.doc_comment.as_deref(), &self.indent);

        out.push_str(method.visibility.keyword());
        out.push(' ');
        // Interface methods are implicitly abstract and may not say so
        if method.is_abstract && class.kind != ClassKind::Interface {
            out.push_str("abstract ");
        }
        if method.is_static {
            out.push_str("static ");
        }
        if method.is_final {
            out.push_str("final ");
        }

        let params = self.render_parameters(&method.parameters, &owner);
        out.push_str("function ");
        out.push_str(&method.name);
        out.push_str(" (");
        out.push_str(&params);
        out.push(')');

        if let Some(ret) = &method.return_type {
            out.push_str(": ");
            out.push_str(&render_type(ret));
        }

        if method.is_abstract {
            out.push_str(";\n");
        } else {
            out.push_str(" {}\n");
        }
        out
    }
}
