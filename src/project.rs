// per-project configuration
// stored at <project dir>/project.toml, one file per project

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, PersistenceError, ValidationError};

/// file name of the per-project config inside the project directory
pub const PROJECT_FILE: &str = "project.toml";

/// extension of the generated-output artifact (holds plain text, not a real pdf)
pub const ARTIFACT_EXTENSION: &str = "pdf";

/// one generated (or manually created) resume for a job description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub name: String,
    pub job_description: String,
    #[serde(rename = "output")]
    pub generated_text: String,
}

/// resume input, selected model and outputs of a single project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    /// credential name; may point at a model that no longer exists
    #[serde(rename = "model")]
    pub selected_model: String,
    pub resume_input: String,
    pub outputs: Vec<Output>,
}

impl ProjectConfig {
    /// empty config carrying only the project name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// true when a name could not be used as one file or directory name
pub(crate) fn is_path_like(name: &str) -> bool {
    name.contains(['/', '\\']) || name == "." || name == ".."
}

/// output names become artifact file names inside the project directory
pub fn validate_output_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyOutputName);
    }
    if is_path_like(name) {
        return Err(ValidationError::InvalidOutputName(name.to_string()));
    }
    Ok(())
}

/// load and save project configs and output artifacts
pub struct ProjectStore;

impl ProjectStore {
    /// path to the config file of a project
    pub fn config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_FILE)
    }

    /// path the artifact of an output is written to
    pub fn artifact_path(project_dir: &Path, output: &Output) -> PathBuf {
        project_dir.join(format!("{}.{}", output.name, ARTIFACT_EXTENSION))
    }

    /// read a project's config; missing or malformed files are errors
    pub fn load(project_dir: &Path) -> Result<ProjectConfig, PersistenceError> {
        let path = Self::config_path(project_dir);
        let content = fs::read_to_string(&path).map_err(|source| PersistenceError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| PersistenceError::Parse { path, source })
    }

    /// overwrite a project's config
    pub fn save(project_dir: &Path, config: &ProjectConfig) -> Result<(), PersistenceError> {
        let path = Self::config_path(project_dir);
        let content = toml::to_string_pretty(config)?;
        fs::write(&path, content).map_err(|source| PersistenceError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), outputs = config.outputs.len(), "saved project config");
        Ok(())
    }

    /// write the generated text of an output next to the project config
    pub fn write_artifact(project_dir: &Path, output: &Output) -> Result<PathBuf, AppError> {
        validate_output_name(&output.name)?;
        let path = Self::artifact_path(project_dir, output);
        fs::write(&path, &output.generated_text).map_err(|source| PersistenceError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
