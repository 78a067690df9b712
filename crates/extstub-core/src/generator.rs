//! Stub assembly: traversal, namespace partitioning and serialization

use std::collections::HashMap;

use crate::config::{LineEnding, StubConfig};
use crate::diagnostics::Diagnostic;
use crate::model::ModuleMetadata;
use crate::oracle::MetadataOracle;
use crate::render::{Fragment, Renderer, Scope};

/// Accumulates fragments per namespace, in the order they are discovered
#[derive(Debug, Clone, Default)]
pub struct NamespacePartitioner {
    /// Namespace groups in first-seen order
    namespaces: Vec<(String, Vec<String>)>,
    /// Namespace name -> position in `namespaces`
    index: HashMap<String, usize>,
    global: Vec<String>,
}

impl NamespacePartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to its scope
    pub fn push(&mut self, fragment: Fragment) {
        match fragment.scope {
            Scope::Global => self.global.push(fragment.text),
            Scope::Namespace(ns) => {
                let slot = match self.index.get(&ns) {
                    Some(&slot) => slot,
                    None => {
                        self.namespaces.push((ns.clone(), Vec::new()));
                        self.index.insert(ns, self.namespaces.len() - 1);
                        self.namespaces.len() - 1
                    }
                };
                self.namespaces[slot].1.push(fragment.text);
            }
        }
    }

    /// Namespace groups in first-seen order
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.namespaces
            .iter()
            .map(|(ns, fragments)| (ns.as_str(), fragments.as_slice()))
    }

    /// Global-scope fragments
    pub fn global(&self) -> &[String] {
        &self.global
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.global.is_empty()
    }
}

/// Generates the stub document for one module
///
/// The module is traversed once, at construction: constants, then functions,
/// then classes. [`StubGenerator::generate`] only serializes what was
/// collected.
#[derive(Debug, Clone)]
pub struct StubGenerator {
    module: String,
    config: StubConfig,
    partitioner: NamespacePartitioner,
    diagnostics: Vec<Diagnostic>,
}

impl StubGenerator {
    /// Create a generator for a module with the default configuration
    pub fn new(module: &ModuleMetadata) -> Self {
        Self::with_config(module, StubConfig::default())
    }

    /// Create a generator for a module with a custom configuration
    pub fn with_config(module: &ModuleMetadata, config: StubConfig) -> Self {
        let mut partitioner = NamespacePartitioner::new();
        let mut renderer = Renderer::new(&config);

        tracing::debug!(
            module = %module.name,
            constants = module.constants.len(),
            functions = module.functions.len(),
            classes = module.classes.len(),
            "rendering module"
        );

        for constant in &module.constants {
            partitioner.push(renderer.render_constant(constant));
        }
        for function in &module.functions {
            partitioner.push(renderer.render_function(function));
        }
        for class in &module.classes {
            partitioner.push(renderer.render_class(class));
        }

        let diagnostics = renderer.into_diagnostics();
        Self {
            module: module.name.clone(),
            config,
            partitioner,
            diagnostics,
        }
    }

    /// Look the module up through an oracle.
    ///
    /// An unavailable module is not fatal: the error is logged and recorded as
    /// a diagnostic, and the generator produces an empty but valid stub.
    pub fn from_oracle(oracle: &dyn MetadataOracle, module: &str, config: StubConfig) -> Self {
        match oracle.reflect(module) {
            Ok(metadata) => Self::with_config(metadata, config),
            Err(e) => {
                tracing::error!(module, error = %e, "cannot reflect module, emitting an empty stub");
                Self {
                    module: module.to_string(),
                    config,
                    partitioner: NamespacePartitioner::new(),
                    diagnostics: vec![Diagnostic::module_unavailable(module, e.to_string())],
                }
            }
        }
    }

    /// Name of the module this stub describes
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Diagnostics recorded while rendering
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Collected fragments
    pub fn partitioner(&self) -> &NamespacePartitioner {
        &self.partitioner
    }

    /// Serialize the stub document
    pub fn generate(&self) -> String {
        let mut out = String::from("<?php\n/**\n");
        for line in self.config.header.lines() {
            if line.trim().is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(" * ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(" */\n\n");

        let mut has_namespaces = false;
        for (ns, fragments) in self.partitioner.namespaces() {
            has_namespaces = true;
            out.push_str("namespace ");
            out.push_str(ns);
            out.push_str(" {\n");
            out.push_str(&fragments.join("\n\n"));
            out.push_str("\n}\n");
        }

        let global = self.partitioner.global();
        if !global.is_empty() {
            // Bracketed namespaces forbid code outside of a namespace block
            if has_namespaces {
                out.push_str("namespace {\n");
                out.push_str(&global.join("\n\n"));
                out.push_str("\n}\n");
            } else {
                out.push_str(&global.join("\n\n"));
            }
        }

        if self.config.trailing_newline && !out.ends_with('\n') {
            out.push('\n');
        }

        // Doc comments may carry their own line endings
        let out = out.replace("\r\n", "\n");
        match self.config.line_ending {
            LineEnding::Lf => out,
            ending => out.replace('\n', ending.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, ClassMetadata, ConstantMetadata, FunctionMetadata, Value};
    use crate::oracle::MetadataDump;

    fn fragment(scope: Scope, text: &str) -> Fragment {
        Fragment {
            scope,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_partitioner_keeps_insertion_order() {
        let mut partitioner = NamespacePartitioner::new();
        partitioner.push(fragment(Scope::Namespace("B".to_string()), "b1"));
        partitioner.push(fragment(Scope::Global, "g1"));
        partitioner.push(fragment(Scope::Namespace("A".to_string()), "a1"));
        partitioner.push(fragment(Scope::Namespace("B".to_string()), "b2"));
        partitioner.push(fragment(Scope::Global, "g1"));

        let groups: Vec<_> = partitioner.namespaces().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[0].1, ["b1".to_string(), "b2".to_string()]);
        assert_eq!(groups[1].0, "A");
        // No deduplication
        assert_eq!(partitioner.global(), ["g1".to_string(), "g1".to_string()]);
    }

    #[test]
    fn test_traversal_order() {
        let mut module = ModuleMetadata::new("demo");
        module.classes.push(ClassMetadata::new("Widget", ClassKind::Class));
        module.functions.push(FunctionMetadata::new("make_widget"));
        module.constants.push(ConstantMetadata::new("WIDGET_MAX", Value::Int(8)));

        let generator = StubGenerator::new(&module);
        assert_eq!(
            generator.partitioner().global(),
            [
                "const WIDGET_MAX=8;".to_string(),
                "function make_widget() {}".to_string(),
                "class Widget {\n}".to_string(),
            ]
        );
    }

    #[test]
    fn test_mixed_scopes_wrap_global_code() {
        let mut module = ModuleMetadata::new("demo");
        module.constants.push(ConstantMetadata::new("Demo\\A", Value::Int(1)));
        module.constants.push(ConstantMetadata::new("B", Value::Int(2)));

        let stub = StubGenerator::new(&module).generate();
        assert!(stub.ends_with("namespace Demo {\nconst A=1;\n}\nnamespace {\nconst B=2;\n}\n"));
    }

    #[test]
    fn test_empty_module_has_only_header() {
        let stub = StubGenerator::new(&ModuleMetadata::new("empty")).generate();
        assert_eq!(
            stub,
            "<?php\n/**\n * Generated stub file for code completion purposes\n */\n\n"
        );
    }

    #[test]
    fn test_missing_module_degrades() {
        let dump = MetadataDump::default();
        let generator = StubGenerator::from_oracle(&dump, "redis", StubConfig::default());
        assert_eq!(generator.module_name(), "redis");
        assert_eq!(generator.diagnostics().len(), 1);
        assert!(generator.partitioner().is_empty());
        assert!(generator.generate().starts_with("<?php\n"));
    }

    #[test]
    fn test_crlf_and_multiline_header() {
        let config = StubConfig {
            header: "IDE helper\n\nDo not edit".to_string(),
            line_ending: LineEnding::Crlf,
            ..StubConfig::default()
        };
        let mut module = ModuleMetadata::new("demo");
        module.constants.push(ConstantMetadata::new("ON", Value::Bool(true)));

        let stub = StubGenerator::with_config(&module, config).generate();
        assert_eq!(
            stub,
            "<?php\r\n/**\r\n * IDE helper\r\n *\r\n * Do not edit\r\n */\r\n\r\nconst ON=true;\r\n"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let config = StubConfig {
            trailing_newline: false,
            ..StubConfig::default()
        };
        let mut module = ModuleMetadata::new("demo");
        module.constants.push(ConstantMetadata::new("ON", Value::Bool(true)));
        let stub = StubGenerator::with_config(&module, config).generate();
        assert!(stub.ends_with("const ON=true;"));
    }
}
