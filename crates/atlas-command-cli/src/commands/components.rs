//! Offline component checks. No network access.

use std::path::{Path, PathBuf};

use anyhow::Context;
use atlas_command::{components_to_record, validate_entity_components, AtlasError};
use clap::Subcommand;
use serde_json::{Map, Value};

use super::print_json;
use crate::exit_codes::SUCCESS;

#[derive(Subcommand, Debug)]
pub enum ComponentsCmd {
    /// Validate a component mapping and print the normalized record
    Check {
        /// JSON file holding an object of components
        file: PathBuf,
    },
}

pub fn run(cmd: ComponentsCmd) -> anyhow::Result<i32> {
    match cmd {
        ComponentsCmd::Check { file } => {
            let record = check_file(&file)?;
            print_json(&record)?;
            Ok(SUCCESS)
        }
    }
}

fn check_file(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let Value::Object(components) = value else {
        return Err(AtlasError::InvalidRequest {
            message: format!("{} must contain a JSON object", path.display()),
        }
        .into());
    };

    validate_entity_components(&components)?;
    Ok(components_to_record(Some(&components)).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("components.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_check_strips_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"{"telemetry":{"latitude":1.5,"longitude":null},"custom_color":"red","health":null}"#,
        );

        let record = check_file(&path).unwrap();
        assert_eq!(
            Value::Object(record),
            json!({ "telemetry": { "latitude": 1.5 }, "custom_color": "red" })
        );
    }

    #[test]
    fn test_check_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"telemetry":{},"bogus":1}"#);

        let err = check_file(&path).unwrap_err();
        match err.downcast_ref::<AtlasError>() {
            Some(AtlasError::UnknownComponentKey { key }) => assert_eq!(key, "bogus"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[1, 2]");
        let err = check_file(&path).unwrap_err();
        assert!(err.to_string().contains("must contain a JSON object"));
    }
}
