//! Path resolution relative to the project directory.

use crate::types::ProjectConfig;
use std::path::{Path, PathBuf};

/// Input and output locations of a project, anchored at its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// The serialized design graph.
    pub design: PathBuf,
    /// The RTLIL output file, if the project names one.
    pub output: Option<PathBuf>,
}

/// Resolves the project's relative paths against `project_dir`.
///
/// Absolute paths in the configuration are kept as they are.
pub fn resolve_paths(config: &ProjectConfig, project_dir: &Path) -> ResolvedPaths {
    ResolvedPaths {
        design: project_dir.join(&config.project.design),
        output: config.rtlil.output.as_ref().map(|out| project_dir.join(out)),
    }
}
