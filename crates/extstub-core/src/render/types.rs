//! Type reference rendering

use crate::model::{TypeRef, NAMESPACE_SEPARATOR};

/// Render a type as it appears in a signature.
///
/// Named types are fully qualified so they resolve the same way inside any
/// namespace block.
pub fn render_type(ty: &TypeRef) -> String {
    let base = match ty {
        TypeRef::Builtin { name, .. } => name.clone(),
        TypeRef::Named { name, .. } => qualify(name),
    };

    if ty.is_nullable() && !accepts_null(ty) {
        format!("?{base}")
    } else {
        base
    }
}

/// Prefix a class-like name with the root namespace marker
pub fn qualify(name: &str) -> String {
    format!("{NAMESPACE_SEPARATOR}{}", name.trim_start_matches(NAMESPACE_SEPARATOR))
}

// `?mixed` and `?null` are compile errors
fn accepts_null(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Builtin { name, .. } => {
            name.eq_ignore_ascii_case("mixed") || name.eq_ignore_ascii_case("null")
        }
        TypeRef::Named { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_bare() {
        assert_eq!(render_type(&TypeRef::builtin("int")), "int");
        assert_eq!(render_type(&TypeRef::builtin("string").nullable()), "?string");
    }

    #[test]
    fn test_named_is_qualified() {
        assert_eq!(render_type(&TypeRef::named("App\\User")), "\\App\\User");
        assert_eq!(render_type(&TypeRef::named("\\Countable")), "\\Countable");
        assert_eq!(
            render_type(&TypeRef::named("App\\User").nullable()),
            "?\\App\\User"
        );
    }

    #[test]
    fn test_mixed_never_gets_question_mark() {
        assert_eq!(render_type(&TypeRef::builtin("mixed").nullable()), "mixed");
    }
}
