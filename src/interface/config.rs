use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default file name of the standalone configuration
pub const CONFIG_FILE_NAME: &str = "scaffold.json";

/// Key of the configuration section inside `package.json`
pub const PACKAGE_JSON_SECTION: &str = "crudScaffold";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Root of the backend sources; interfaces are read from and artifacts written below it
    #[serde(default = "default_source_path")]
    pub source_path: String,

    /// Directory holding `{dto,controller,service,schema}.template.md`
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Folder below the source root that holds the interface declarations
    #[serde(default = "default_interfaces_dir")]
    pub interfaces_dir: String,

    /// Extension of source and generated files, without the dot
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Overwrite per-domain artifacts that already exist
    #[serde(default)]
    pub force: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: Option<bool>,
}

fn default_source_path() -> String {
    "./src".to_string()
}

fn default_template_dir() -> String {
    "./templates/node".to_string()
}

fn default_interfaces_dir() -> String {
    "interfaces".to_string()
}

fn default_file_extension() -> String {
    "ts".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            template_dir: default_template_dir(),
            interfaces_dir: default_interfaces_dir(),
            file_extension: default_file_extension(),
            force: false,
            verbose: Some(false),
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a standalone JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate_fields()?;
        Ok(config)
    }

    /// Load configuration from the `crudScaffold` section of a `package.json`
    pub fn from_package_json<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let content = fs::read_to_string(path)?;
        let package: serde_json::Value = serde_json::from_str(&content)?;

        match package.get(PACKAGE_JSON_SECTION) {
            Some(section) => {
                let config: Self = serde_json::from_value(section.clone())?;
                config.validate_fields()?;
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }

    /// Look for `scaffold.json`, then a `package.json` section, in `dir`
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Option<Self>, ConfigError> {
        let standalone = dir.as_ref().join(CONFIG_FILE_NAME);
        if standalone.exists() {
            return Self::from_file(standalone).map(Some);
        }
        let package_json = dir.as_ref().join("package.json");
        if package_json.exists() {
            return Self::from_package_json(package_json);
        }
        Ok(None)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks that need nothing but the values themselves
    fn validate_fields(&self) -> Result<(), ConfigError> {
        let extension = self.file_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "Invalid file extension: '{}'",
                self.file_extension
            )));
        }
        if self.interfaces_dir.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Interfaces directory must not be empty".to_string(),
            ));
        }
        if Path::new(&self.interfaces_dir).is_absolute() {
            return Err(ConfigError::InvalidConfig(format!(
                "Interfaces directory must be relative to the source path: {}",
                self.interfaces_dir
            )));
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_fields()?;

        let source_path = Path::new(&self.source_path);
        if !source_path.exists() {
            return Err(ConfigError::InvalidConfig(format!(
                "Source path does not exist: {}",
                self.source_path
            )));
        }

        Ok(())
    }

    /// Merge with another configuration, with other taking precedence
    pub fn merge(&mut self, other: &GenerateConfig) {
        if other.source_path != default_source_path() {
            self.source_path = other.source_path.clone();
        }
        if other.template_dir != default_template_dir() {
            self.template_dir = other.template_dir.clone();
        }
        if other.interfaces_dir != default_interfaces_dir() {
            self.interfaces_dir = other.interfaces_dir.clone();
        }
        if other.file_extension != default_file_extension() {
            self.file_extension = other.file_extension.clone();
        }
        if other.force {
            self.force = true;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Get effective verbose setting
    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}
