//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the project file inside a project directory.
pub const CONFIG_FILE: &str = "ferrum.toml";

/// Loads and validates a `ferrum.toml` configuration from a project directory.
///
/// Reads `<project_dir>/ferrum.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
        path: config_path.clone(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `ferrum.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and usable as RTLIL names.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.design.is_empty() {
        return Err(ConfigError::MissingField("project.design".to_string()));
    }
    if config.rtlil.top.is_empty() {
        return Err(ConfigError::MissingField("rtlil.top".to_string()));
    }
    validate_top(&config.rtlil.top)
}

/// Checks that `top` can name the outermost RTLIL module.
///
/// RTLIL identifiers end at whitespace, so an empty name or one containing
/// whitespace is rejected.
pub fn validate_top(top: &str) -> Result<(), ConfigError> {
    if top.is_empty() || top.chars().any(char::is_whitespace) {
        return Err(ConfigError::ValidationError(format!(
            "rtlil.top `{top}` is not a valid module name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "counter"
design = "build/counter.json"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "counter");
        assert_eq!(config.project.design, "build/counter.json");
        assert!(config.project.version.is_none());
        assert_eq!(config.rtlil.top, "top");
        assert_eq!(config.rtlil.generator, "Ferrum");
        assert!(config.rtlil.output.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "counter"
version = "0.2.0"
description = "4-bit counter"
design = "build/counter.json"

[rtlil]
top = "counter"
generator = "ferrum-ci"
output = "build/counter.il"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.version.as_deref(), Some("0.2.0"));
        assert_eq!(config.project.description, "4-bit counter");
        assert_eq!(config.rtlil.top, "counter");
        assert_eq!(config.rtlil.generator, "ferrum-ci");
        assert_eq!(config.rtlil.output.as_deref(), Some("build/counter.il"));
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
design = "d.json"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "project.name"));
    }

    #[test]
    fn missing_design_errors() {
        let toml = r#"
[project]
name = "x"
design = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "project.design"));
    }

    #[test]
    fn absent_design_key_is_parse_error() {
        let toml = r#"
[project]
name = "x"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn whitespace_in_top_rejected() {
        let toml = r#"
[project]
name = "x"
design = "d.json"

[rtlil]
top = "my top"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nname = \"t\"\ndesign = \"t.json\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name, "t");
    }

    #[test]
    fn top_names_are_checked() {
        assert!(validate_top("blinky").is_ok());
        assert!(validate_top("\\escaped$1").is_ok());
        assert!(matches!(validate_top("a b"), Err(ConfigError::ValidationError(_))));
        assert!(matches!(validate_top("a\tb"), Err(ConfigError::ValidationError(_))));
        assert!(matches!(validate_top(""), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
