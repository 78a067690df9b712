//! Stub freshness check for `extstub check`.

use anyhow::{anyhow, bail, Result};
use extstub_core::StubGenerator;
use std::fs;
use std::path::Path;

/// Compare a stored stub with a fresh render of the module.
pub fn check_stub(module: &str, metadata: &Path, stub: &Path, config: Option<&Path>) -> Result<()> {
    let dump = crate::load_metadata(metadata)?;
    let config = crate::load_config(config)?;

    let generator = StubGenerator::from_oracle(&dump, module, config);
    crate::report_diagnostics(&generator);
    let expected = generator.generate();

    let actual = fs::read_to_string(stub)
        .map_err(|e| anyhow!("Failed to read '{}': {}", stub.display(), e))?;

    match first_difference(&actual, &expected) {
        None => {
            println!("{} is up to date", stub.display());
            Ok(())
        }
        Some(line) => bail!(
            "'{}' is out of date for module '{}' (first difference at line {})",
            stub.display(),
            module,
            line
        ),
    }
}

/// One-based line number of the first difference, if any.
fn first_difference(actual: &str, expected: &str) -> Option<usize> {
    if actual == expected {
        return None;
    }

    let mut actual_lines = actual.split('\n');
    let mut expected_lines = expected.split('\n');
    let mut line = 1;
    loop {
        match (actual_lines.next(), expected_lines.next()) {
            (Some(a), Some(e)) if a == e => line += 1,
            _ => return Some(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("a\nb\n", "a\nb\n"), None);
        assert_eq!(first_difference("a\nb\n", "a\nc\n"), Some(2));
        assert_eq!(first_difference("a\n", "a\nb\n"), Some(2));
        assert_eq!(first_difference("a\r\n", "a\n"), Some(1));
    }

    #[test]
    fn test_check_detects_stale_stub() {
        let tmp = TempDir::new().unwrap();
        let metadata = tmp.path().join("dump.yaml");
        fs::write(
            &metadata,
            "modules:\n  - name: demo\n    constants:\n      - {name: DEMO_ON, value: true}\n",
        )
        .unwrap();

        let stub = tmp.path().join("demo.stub.php");
        fs::write(
            &stub,
            "<?php\n/**\n * Generated stub file for code completion purposes\n */\n\nconst DEMO_ON=true;\n",
        )
        .unwrap();
        check_stub("demo", &metadata, &stub, None).unwrap();

        fs::write(
            &stub,
            "<?php\n/**\n * Generated stub file for code completion purposes\n */\n\nconst DEMO_ON=false;\n",
        )
        .unwrap();
        let err = check_stub("demo", &metadata, &stub, None).unwrap_err();
        assert!(err.to_string().contains("line 6"));
    }

    #[test]
    fn test_missing_stub_file() {
        let tmp = TempDir::new().unwrap();
        let metadata = tmp.path().join("dump.json");
        fs::write(&metadata, r#"{"modules": []}"#).unwrap();

        let err = check_stub("demo", &metadata, &tmp.path().join("absent.php"), None).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
