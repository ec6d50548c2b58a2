// global configuration: projects and model credentials
// loaded from ~/.local/share/auto-resume/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::clock;
use crate::error::{AppError, PersistenceError, ValidationError};
use crate::project::{ProjectConfig, ProjectStore, is_path_like};

/// application directory name under the per-user data directory
pub const APP_DIR: &str = "auto-resume";

const CONFIG_FILE: &str = "config.toml";
const PROJECTS_DIR: &str = "projects";

/// a resume project registered in the global config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub last_opened: OffsetDateTime,
}

/// credentials for one language model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCredential {
    pub name: String,
    pub provider: String,
    pub model: String,
    pub api_key: String,
}

/// contents of config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// reserved, always empty
    pub user_config_path: String,
    pub projects: Vec<Project>,
    pub models: Vec<ModelCredential>,
}

/// owner of the global config and the project directory tree
#[derive(Debug)]
pub struct ConfigStore {
    data_dir: PathBuf,
    config_path: PathBuf,
    config: GlobalConfig,
}

impl ConfigStore {
    /// store rooted at `data_dir`; nothing is read until `load`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let config_path = data_dir.join(CONFIG_FILE);
        Self {
            data_dir,
            config_path,
            config: GlobalConfig::default(),
        }
    }

    /// create the store and load its config
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let mut store = Self::new(data_dir);
        store.load()?;
        Ok(store)
    }

    /// default data directory (~/.local/share/auto-resume)
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".local").join("share").join(APP_DIR))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// directory holding one subdirectory per project
    pub fn projects_dir(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_DIR)
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn projects(&self) -> &[Project] {
        &self.config.projects
    }

    /// read config.toml, writing an empty one first if absent
    pub fn load(&mut self) -> Result<&GlobalConfig, PersistenceError> {
        create_dir(&self.data_dir)?;

        if !self.config_path.exists() {
            write_config(&self.config_path, &GlobalConfig::default())?;
            info!(path = %self.config_path.display(), "created default config");
        }

        self.config = read_config(&self.config_path)?;
        debug!(
            projects = self.config.projects.len(),
            models = self.config.models.len(),
            "loaded config"
        );
        Ok(&self.config)
    }

    /// register a new project and create its directory and project.toml
    pub fn add_project(&mut self, name: &str) -> Result<Project, AppError> {
        validate_project_name(name)?;
        if self.config.projects.iter().any(|p| p.name == name) {
            return Err(ValidationError::DuplicateProjectName(name.to_string()).into());
        }

        let project_dir = self.projects_dir().join(name);
        let created = !project_dir.exists();
        let registered = self.register(name, &project_dir);
        let project = match registered {
            Ok(project) => project,
            Err(e) => {
                // only undo a directory this call created
                if created {
                    if let Err(cleanup) = fs::remove_dir_all(&project_dir) {
                        warn!(path = %project_dir.display(), error = %cleanup, "could not remove project directory");
                    }
                }
                return Err(e.into());
            }
        };

        info!(name, path = %project.path.display(), "created project");
        Ok(project)
    }

    /// write project.toml, then the global entry; memory follows the global write
    fn register(&mut self, name: &str, project_dir: &Path) -> Result<Project, PersistenceError> {
        create_dir(project_dir)?;
        ProjectStore::save(project_dir, &ProjectConfig::named(name))?;

        let now = clock::now();
        let project = Project {
            name: name.to_string(),
            path: project_dir.to_path_buf(),
            created_at: now,
            last_opened: now,
        };
        let mut projects = self.config.projects.clone();
        projects.push(project.clone());
        self.update(move |config| config.projects = projects)?;
        Ok(project)
    }

    /// refresh last_opened of a project
    pub fn mark_opened(&mut self, name: &str) -> Result<(), PersistenceError> {
        let now = clock::now();
        let mut projects = self.config.projects.clone();
        match projects.iter_mut().find(|p| p.name == name) {
            Some(project) => project.last_opened = now,
            None => return Ok(()),
        }
        self.update(move |config| config.projects = projects)
    }

    /// replace the model list wholesale; callers validate uniqueness
    pub fn save_models(&mut self, models: Vec<ModelCredential>) -> Result<(), PersistenceError> {
        let count = models.len();
        self.update(move |config| config.models = models)?;
        info!(models = count, "saved models");
        Ok(())
    }

    /// models as currently on disk; any failure reads as "no models yet"
    pub fn get_models(&self) -> Vec<ModelCredential> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                debug!(error = %e, "could not read models");
                return Vec::new();
            }
        };

        match toml::from_str::<GlobalConfig>(&content) {
            Ok(config) => config.models,
            Err(e) => {
                debug!(error = %e, "could not parse models");
                Vec::new()
            }
        }
    }

    /// read-modify-write of config.toml; memory follows only once the write succeeded
    fn update(&mut self, apply: impl FnOnce(&mut GlobalConfig)) -> Result<(), PersistenceError> {
        let mut config = if self.config_path.exists() {
            read_config(&self.config_path)?
        } else {
            GlobalConfig::default()
        };
        apply(&mut config);
        write_config(&self.config_path, &config)?;
        self.config = config;
        Ok(())
    }
}

fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyProjectName);
    }
    if is_path_like(name) {
        return Err(ValidationError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<(), PersistenceError> {
    fs::create_dir_all(path).map_err(|source| PersistenceError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn read_config(path: &Path) -> Result<GlobalConfig, PersistenceError> {
    let content = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_config(path: &Path, config: &GlobalConfig) -> Result<(), PersistenceError> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// timestamps are stored as native toml datetimes
mod timestamp {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;
    use toml::value::Datetime;

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = value.format(&Rfc3339).map_err(S::Error::custom)?;
        let datetime: Datetime = text.parse().map_err(S::Error::custom)?;
        datetime.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let datetime = Datetime::deserialize(deserializer)?;
        OffsetDateTime::parse(&datetime.to_string(), &Rfc3339).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::open(dir.path().join("data")).expect("open store");
        (dir, store)
    }

    fn credential(name: &str) -> ModelCredential {
        ModelCredential {
            name: name.to_string(),
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key: "sk-test".to_string(),
        }
    }

    #[test]
    fn test_fresh_install_writes_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().join("data");
        let mut store = ConfigStore::new(&data_dir);

        let config = store.load().expect("load").clone();
        assert!(config.projects.is_empty());
        assert!(config.models.is_empty());

        let path = data_dir.join("config.toml");
        assert!(path.exists());
        let on_disk: GlobalConfig =
            toml::from_str(&fs::read_to_string(path).expect("read")).expect("parse");
        assert_eq!(on_disk, GlobalConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("config.toml"), "projects = 3\n[[").expect("write");
        let err = ConfigStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { .. }));
    }

    #[test]
    fn test_add_project_creates_directory_and_project_file() {
        let (_dir, mut store) = store();
        let project = store.add_project("Resume A").expect("add");

        assert_eq!(project.path, store.projects_dir().join("Resume A"));
        assert!(project.path.is_dir());
        let config = ProjectStore::load(&project.path).expect("project config");
        assert_eq!(config, ProjectConfig::named("Resume A"));

        let reloaded = ConfigStore::open(store.data_dir()).expect("reopen");
        assert_eq!(reloaded.projects(), store.projects());
    }

    #[test]
    fn test_add_duplicate_project_is_rejected() {
        let (_dir, mut store) = store();
        store.add_project("Resume A").expect("first add");

        let err = store.add_project("Resume A").unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DuplicateProjectName(ref n)) if n == "Resume A"
        ));
        assert_eq!(store.projects().len(), 1);
    }

    #[test]
    fn test_project_names_are_case_sensitive() {
        let (_dir, mut store) = store();
        store.add_project("resume").expect("lower");
        store.add_project("Resume").expect("upper");
        assert_eq!(store.projects().len(), 2);
    }

    #[test]
    fn test_add_project_names_stay_distinct() {
        let (_dir, mut store) = store();
        for name in ["a", "b", "a", "c", "b", "a"] {
            let _ = store.add_project(name);
        }
        let names: Vec<&str> = store.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_project_rejects_empty_and_path_like_names() {
        let (_dir, mut store) = store();
        assert!(matches!(
            store.add_project(""),
            Err(AppError::Validation(ValidationError::EmptyProjectName))
        ));
        for name in ["a/b", "..", "c\\d"] {
            assert!(matches!(
                store.add_project(name),
                Err(AppError::Validation(ValidationError::InvalidProjectName(_)))
            ));
        }
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_add_project_keeps_models_on_disk() {
        let (_dir, mut store) = store();
        store.save_models(vec![credential("work")]).expect("save models");
        store.add_project("Resume A").expect("add");

        assert_eq!(store.get_models(), vec![credential("work")]);
    }

    #[test]
    fn test_add_project_leaves_memory_untouched_on_write_failure() {
        let (_dir, mut store) = store();
        fs::write(store.config_path(), "not = [valid").expect("corrupt");

        let err = store.add_project("Resume A").unwrap_err();
        assert!(matches!(err, AppError::Persistence(PersistenceError::Parse { .. })));
        assert!(store.projects().is_empty());
        // no orphan directory is left behind
        assert!(!store.projects_dir().join("Resume A").exists());
    }

    #[test]
    fn test_failed_add_keeps_existing_directory() {
        let (_dir, mut store) = store();
        let dir = store.projects_dir().join("Resume A");
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("notes.txt"), "keep me").expect("write");
        fs::write(store.config_path(), "not = [valid").expect("corrupt");

        assert!(store.add_project("Resume A").is_err());
        assert_eq!(fs::read_to_string(dir.join("notes.txt")).expect("read"), "keep me");
    }

    #[test]
    fn test_global_config_roundtrip() {
        let populated = GlobalConfig {
            user_config_path: String::new(),
            projects: vec![
                Project {
                    name: "Resume A".to_string(),
                    path: PathBuf::from("/tmp/auto-resume/projects/Resume A"),
                    created_at: datetime!(2025-01-02 03:04:05.123456789 +1),
                    last_opened: datetime!(2025-02-03 04:05:06 UTC),
                },
                Project {
                    name: "B".to_string(),
                    path: PathBuf::from("/p/B"),
                    created_at: datetime!(2024-12-31 23:59:59 -5),
                    last_opened: datetime!(2024-12-31 23:59:59 -5),
                },
            ],
            models: vec![credential("work"), ModelCredential::default()],
        };

        for config in [GlobalConfig::default(), populated] {
            let encoded = toml::to_string_pretty(&config).expect("encode");
            let decoded: GlobalConfig = toml::from_str(&encoded).expect("decode");
            assert_eq!(decoded, config);
        }
    }

    #[test]
    fn test_timestamps_are_native_datetimes() {
        let config = GlobalConfig {
            projects: vec![Project {
                name: "a".to_string(),
                path: PathBuf::from("/a"),
                created_at: datetime!(2025-01-02 03:04:05 UTC),
                last_opened: datetime!(2025-01-02 03:04:05 UTC),
            }],
            ..GlobalConfig::default()
        };
        let encoded = toml::to_string_pretty(&config).expect("encode");
        assert!(encoded.contains("created_at = 2025-01-02T03:04:05Z"));
    }

    #[test]
    fn test_save_models_is_idempotent() {
        let (_dir, mut store) = store();
        let models = vec![credential("a"), credential("b")];

        store.save_models(models.clone()).expect("first save");
        let first = fs::read(store.config_path()).expect("read");
        store.save_models(models).expect("second save");
        let second = fs::read(store.config_path()).expect("read");

        assert_eq!(first, second);
    }

    #[test]
    fn test_get_models_rereads_external_edits() {
        let (_dir, mut store) = store();
        store.save_models(vec![credential("a")]).expect("save");

        let edited = GlobalConfig {
            models: vec![credential("edited")],
            ..store.config().clone()
        };
        fs::write(store.config_path(), toml::to_string(&edited).expect("encode")).expect("write");

        assert_eq!(store.get_models(), vec![credential("edited")]);
    }

    #[test]
    fn test_get_models_degrades_to_empty() {
        let (_dir, store) = store();
        fs::write(store.config_path(), "models = \"nope\"").expect("write");
        assert!(store.get_models().is_empty());

        fs::remove_file(store.config_path()).expect("remove");
        assert!(store.get_models().is_empty());
    }

    #[test]
    fn test_mark_opened_updates_only_last_opened() {
        let (_dir, mut store) = store();
        let project = store.add_project("Resume A").expect("add");

        store.mark_opened("Resume A").expect("mark");
        let updated = &store.projects()[0];
        assert_eq!(updated.created_at, project.created_at);
        assert!(updated.last_opened >= project.last_opened);

        store.mark_opened("missing").expect("unknown names are ignored");
    }
}
