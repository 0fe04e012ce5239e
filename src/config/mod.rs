use crate::core::history::DEFAULT_CAPACITY;
use crate::core::state::{DEFAULT_SAR_TO_SDG_RATE, DEFAULT_SDG_TO_SAR_RATE, Defaults};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Keys written by `init`; `config --check` reports the ones a file lacks.
pub const CONFIG_FIELDS: [&str; 5] = [
    "database",
    "history_capacity",
    "default_sar_to_sdg_rate",
    "default_sdg_to_sar_rate",
    "export_dir",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_sar_to_sdg")]
    pub default_sar_to_sdg_rate: f64,
    #[serde(default = "default_sdg_to_sar")]
    pub default_sdg_to_sar_rate: f64,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
fn default_sar_to_sdg() -> f64 {
    DEFAULT_SAR_TO_SDG_RATE
}
fn default_sdg_to_sar() -> f64 {
    DEFAULT_SDG_TO_SAR_RATE
}
fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            history_capacity: default_capacity(),
            default_sar_to_sdg_rate: default_sar_to_sdg(),
            default_sdg_to_sar_rate: default_sdg_to_sar(),
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rconverter")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rconverter")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rconverter.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rconverter.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.history_capacity == 0 {
            return Err(AppError::Config("history_capacity must be at least 1".into()));
        }
        for (name, rate) in [
            ("default_sar_to_sdg_rate", self.default_sar_to_sdg_rate),
            ("default_sdg_to_sar_rate", self.default_sdg_to_sar_rate),
        ] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(AppError::Config(format!("{name} must be a positive number")));
            }
        }
        Ok(())
    }

    /// Values the converter state falls back to when storage is empty.
    pub fn defaults(&self) -> Defaults {
        Defaults {
            capacity: self.history_capacity,
            sar_to_sdg_rate: self.default_sar_to_sdg_rate,
            sdg_to_sar_rate: self.default_sdg_to_sar_rate,
        }
    }

    /// Fields missing from the YAML file at `path`.
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        let missing = CONFIG_FIELDS
            .iter()
            .copied()
            .filter(|k| value.get(*k).is_none())
            .collect();
        Ok(missing)
    }

    /// Initialize configuration directory and file; returns the database path.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            fs::write(Self::config_file(), yaml)?;
        }

        Ok(db_path)
    }
}
