//! Reflected metadata of a native extension module
//!
//! These types mirror what the runtime's reflection API reports about a loaded
//! extension. They are plain data: loaded once, never mutated while rendering.

mod error;
mod value;

pub use error::MetadataError;
pub use value::{ArrayKey, Value};

use serde::Deserialize;

/// Namespace separator used in qualified names
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Split a qualified name into its namespace and short name.
///
/// Leading separators are ignored, so `\App\User` and `App\User` both yield
/// `(Some("App"), "User")`. A name without a separator lives in the global
/// namespace.
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    let name = name.trim_start_matches(NAMESPACE_SEPARATOR);
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// An extension module under inspection
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleMetadata {
    /// Extension name as reported by the runtime
    pub name: String,
    /// Global and namespaced constants, in registration order
    #[serde(default)]
    pub constants: Vec<ConstantMetadata>,
    /// Free functions
    #[serde(default)]
    pub functions: Vec<FunctionMetadata>,
    /// Classes, interfaces and traits
    #[serde(default)]
    pub classes: Vec<ClassMetadata>,
}

impl ModuleMetadata {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Total number of top-level symbols
    pub fn symbol_count(&self) -> usize {
        self.constants.len() + self.functions.len() + self.classes.len()
    }

    /// Check the structural assumptions the renderers rely on.
    ///
    /// Every symbol needs a name, every qualified name non-empty namespace
    /// segments, and every named type a non-empty name.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name.trim().is_empty() {
            return Err(MetadataError::Invalid {
                module: self.name.clone(),
                reason: "module name cannot be empty".to_string(),
            });
        }

        let invalid = |reason: String| MetadataError::Invalid {
            module: self.name.clone(),
            reason,
        };

        for constant in &self.constants {
            check_qualified_name("constant", &constant.name).map_err(&invalid)?;
        }

        for function in &self.functions {
            check_qualified_name("function", &function.name).map_err(&invalid)?;
            validate_signature(&function.parameters, function.return_type.as_ref())
                .map_err(|reason| invalid(format!("function '{}': {}", function.name, reason)))?;
        }

        for class in &self.classes {
            check_qualified_name("class", &class.name).map_err(&invalid)?;
            let referenced = class
                .parent
                .iter()
                .chain(&class.interfaces)
                .chain(&class.traits);
            for name in referenced {
                check_qualified_name("referenced class", name)
                    .map_err(|reason| invalid(format!("class '{}': {}", class.name, reason)))?;
            }
            for constant in &class.constants {
                if constant.name.is_empty() || constant.name.contains(NAMESPACE_SEPARATOR) {
                    return Err(invalid(format!(
                        "class '{}': invalid class constant name '{}'",
                        class.name, constant.name
                    )));
                }
            }
            for property in &class.properties {
                if property.name.is_empty() {
                    return Err(invalid(format!("class '{}': property with an empty name", class.name)));
                }
            }
            for method in &class.methods {
                if method.name.is_empty() {
                    return Err(invalid(format!("class '{}': method with an empty name", class.name)));
                }
                validate_signature(&method.parameters, method.return_type.as_ref()).map_err(
                    |reason| invalid(format!("method '{}::{}': {}", class.name, method.name, reason)),
                )?;
            }
        }

        Ok(())
    }
}

/// Reject empty names and empty namespace segments such as `A\\B` or `A\`
fn check_qualified_name(what: &str, name: &str) -> Result<(), String> {
    let name = name.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(name);
    if name.is_empty() {
        return Err(format!("{what} with an empty name"));
    }
    if name.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
        return Err(format!("{what} '{name}' has an empty namespace segment"));
    }
    Ok(())
}

fn validate_signature(parameters: &[ParameterMetadata], return_type: Option<&TypeRef>) -> Result<(), String> {
    for param in parameters {
        if param.name.is_empty() {
            return Err("parameter with an empty name".to_string());
        }
        if let Some(ty) = &param.ty {
            check_type(ty).map_err(|reason| format!("parameter '${}': {}", param.name, reason))?;
        }
    }
    if let Some(ty) = return_type {
        check_type(ty).map_err(|reason| format!("return type: {reason}"))?;
    }
    Ok(())
}

fn check_type(ty: &TypeRef) -> Result<(), String> {
    match ty {
        TypeRef::Builtin { name, .. } if name.is_empty() => Err("empty type name".to_string()),
        TypeRef::Builtin { .. } => Ok(()),
        TypeRef::Named { name, .. } if name.is_empty() => Err("empty type name".to_string()),
        TypeRef::Named { name, .. } => check_qualified_name("type", name),
    }
}

/// A named constant and its value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantMetadata {
    /// Possibly namespace-qualified name
    pub name: String,
    /// Constant value; a dump omits `value` when the runtime could not
    /// evaluate it
    #[serde(default, deserialize_with = "known_value")]
    pub value: ReflectedValue,
}

impl ConstantMetadata {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: ReflectedValue::Known(value),
        }
    }

    /// A constant whose value cannot be evaluated
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ReflectedValue::Unknown,
        }
    }
}

// A present `value`, including `null`, is always a known value
fn known_value<'de, D>(deserializer: D) -> Result<ReflectedValue, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(ReflectedValue::Known)
}

/// Kind of class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

impl ClassKind {
    /// The declaration keyword
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Trait => "trait",
        }
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// A class, interface or trait
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassMetadata {
    /// Possibly namespace-qualified name
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// Fully-qualified parent class name
    #[serde(default)]
    pub parent: Option<String>,
    /// Fully-qualified names of implemented (or, for interfaces, extended) interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Fully-qualified names of used traits
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub constants: Vec<ConstantMetadata>,
    #[serde(default)]
    pub properties: Vec<PropertyMetadata>,
    /// Methods as reported by reflection, inherited ones included
    #[serde(default)]
    pub methods: Vec<MethodMetadata>,
}

impl ClassMetadata {
    /// Create an empty class of the given kind
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_abstract: false,
            is_final: false,
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Namespace the class lives in, if any
    pub fn namespace(&self) -> Option<&str> {
        split_qualified_name(&self.name).0
    }

    /// Name without the namespace
    pub fn short_name(&self) -> &str {
        split_qualified_name(&self.name).1
    }

    /// Methods declared by this class itself
    pub fn own_methods(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.iter().filter(|m| m.is_declared_by(&self.name))
    }
}

/// A free function
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionMetadata {
    /// Possibly namespace-qualified name
    pub name: String,
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc_comment: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        split_qualified_name(&self.name).0
    }

    pub fn short_name(&self) -> &str {
        split_qualified_name(&self.name).1
    }
}

/// A class method
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodMetadata {
    pub name: String,
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// Class that declares the method; `None` means the owning class
    #[serde(default)]
    pub declaring_class: Option<String>,
}

impl MethodMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc_comment: None,
            parameters: Vec::new(),
            return_type: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            declaring_class: None,
        }
    }

    /// Whether `class` is the declaring class of this method.
    ///
    /// Class names compare case-insensitively, as the runtime resolves them.
    pub fn is_declared_by(&self, class: &str) -> bool {
        match &self.declaring_class {
            None => true,
            Some(declaring) => {
                let declaring = declaring.trim_start_matches(NAMESPACE_SEPARATOR);
                let class = class.trim_start_matches(NAMESPACE_SEPARATOR);
                declaring.eq_ignore_ascii_case(class)
            }
        }
    }
}

/// A class property
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyMetadata {
    pub name: String,
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl PropertyMetadata {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            doc_comment: None,
            visibility,
            is_static: false,
        }
    }
}

/// A constant value or parameter default as reflection reports it
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectedValue {
    /// The value could be determined statically
    Known(Value),
    /// The value exists but cannot be evaluated
    #[default]
    Unknown,
}

/// A function or method parameter
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterMetadata {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub by_reference: bool,
    #[serde(default)]
    pub variadic: bool,
    #[serde(default)]
    pub optional: bool,
    /// Only meaningful when `optional` is set; absent is treated as unknown
    #[serde(default)]
    pub default: Option<ReflectedValue>,
}

impl ParameterMetadata {
    /// A required, untyped parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            by_reference: false,
            variadic: false,
            optional: false,
            default: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Mark the parameter optional with a known default
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.optional = true;
        self.default = Some(ReflectedValue::Known(value));
        self
    }

    /// Mark the parameter optional with a default that cannot be resolved
    #[must_use]
    pub fn with_unknown_default(mut self) -> Self {
        self.optional = true;
        self.default = Some(ReflectedValue::Unknown);
        self
    }
}

/// A reflected type reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeRef {
    /// A built-in type such as `int`, `string` or `array`
    Builtin {
        name: String,
        #[serde(default)]
        nullable: bool,
    },
    /// A user-defined class or interface, by qualified name
    Named {
        name: String,
        #[serde(default)]
        nullable: bool,
    },
}

impl TypeRef {
    pub fn builtin(name: impl Into<String>) -> Self {
        TypeRef::Builtin {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            nullable: false,
        }
    }

    /// The same type, made nullable
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            TypeRef::Builtin { name, .. } => TypeRef::Builtin { name, nullable: true },
            TypeRef::Named { name, .. } => TypeRef::Named { name, nullable: true },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeRef::Builtin { name, .. } | TypeRef::Named { name, .. } => name,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeRef::Builtin { nullable, .. } | TypeRef::Named { nullable, .. } => *nullable,
        }
    }
}
