//! Configuration types deserialized from `ferrum.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `ferrum.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// RTLIL backend settings.
    #[serde(default)]
    pub rtlil: RtlilConfig,
}

/// Core project metadata required in every `ferrum.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// The project version string.
    #[serde(default)]
    pub version: Option<String>,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
    /// Path to the serialized design graph (JSON), relative to the project
    /// directory.
    pub design: String,
}

/// Settings of the RTLIL backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RtlilConfig {
    /// Name of the outermost module.
    #[serde(default = "default_top")]
    pub top: String,
    /// Value of the `generator` attribute.
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Where to write the RTLIL text, relative to the project directory.
    /// Standard output when absent.
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for RtlilConfig {
    fn default() -> Self {
        Self {
            top: default_top(),
            generator: default_generator(),
            output: None,
        }
    }
}

fn default_top() -> String {
    "top".to_string()
}

fn default_generator() -> String {
    "Ferrum".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtlil_defaults() {
        let cfg = RtlilConfig::default();
        assert_eq!(cfg.top, "top");
        assert_eq!(cfg.generator, "Ferrum");
        assert!(cfg.output.is_none());
    }

    #[test]
    fn partial_rtlil_table_keeps_defaults() {
        let cfg: RtlilConfig = toml::from_str(r#"output = "build/top.il""#).unwrap();
        assert_eq!(cfg.top, "top");
        assert_eq!(cfg.output.as_deref(), Some("build/top.il"));
    }
}
