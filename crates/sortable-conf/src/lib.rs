use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_ASC_CLASS: &str = "sort-asc";
pub const DEFAULT_DESC_CLASS: &str = "sort-desc";
pub const DEFAULT_NONE_CLASS: &str = "sort-none";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
    #[error("Failed to read pyproject.toml")]
    PyprojectIo(#[from] std::io::Error),
    #[error("Failed to parse pyproject.toml TOML")]
    PyprojectParse(#[from] toml::de::Error),
    #[error("Failed to serialize extracted pyproject data")]
    PyprojectSerialize(#[from] toml::ser::Error),
}

/// CSS class names attached to sortable links and headers.
///
/// Each class is configured on its own; overriding `descending` never
/// changes what `unsorted` falls back to.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SortClasses {
    pub ascending: String,
    pub descending: String,
    pub unsorted: String,
}

impl Default for SortClasses {
    fn default() -> Self {
        Self {
            ascending: DEFAULT_ASC_CLASS.to_string(),
            descending: DEFAULT_DESC_CLASS.to_string(),
            unsorted: DEFAULT_NONE_CLASS.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub classes: SortClasses,
}

impl Settings {
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "sortable", "sortable")
            .map(|proj_dirs| proj_dirs.config_dir().join("sortable.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let pyproject_path = project_root.join("pyproject.toml");
        if pyproject_path.exists() {
            let content = fs::read_to_string(&pyproject_path)?;
            let full_toml_value: toml::Value = toml::from_str(&content)?;

            let sortable_table = ["tool", "sortable"]
                .iter()
                .try_fold(&full_toml_value, |current_val, &key| current_val.get(key))
                .and_then(|v| v.as_table());

            if let Some(table) = sortable_table {
                let table_string = toml::to_string(table)?;
                builder = builder.add_source(File::from_str(&table_string, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            File::from(project_root.join(".sortable.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("sortable.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            ascending = %settings.classes.ascending,
            descending = %settings.classes.descending,
            unsorted = %settings.classes.unsorted,
            "loaded settings"
        );
        Ok(settings)
    }
}
