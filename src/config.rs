use crate::core::pagination::PageSize;
use crate::core::query::{SortField, SortOrder};
use crate::core::state::ViewMode;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// JSON dataset to browse instead of the bundled one
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::utils::format::deserialize_option_path"
    )]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default, deserialize_with = "crate::utils::format::deserialize_sort_field")]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            page_size: PageSize::default(),
            sort_by: SortField::Name,
            sort_order: SortOrder::Asc,
            view: ViewMode::Grid,
            color: true,
            dark_mode: false,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    /// Load from `config_path`, writing the defaults there first if it is missing
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            tracing::info!(path = %config_path.display(), "created default config");
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %config_path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        PageSize::from_option(self.general.page_size.get())?;
        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        tracing::debug!(path = %config_path.display(), "config saved");

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("contactdeck")
            .join("config.toml")
    }
}
