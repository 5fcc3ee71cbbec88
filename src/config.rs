use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::advisor::DEFAULT_MODEL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the Gemini endpoint. CLI flag and GEMINI_API_KEY take
    /// precedence over this value.
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for `estimate` (text or json).
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
            },
            output: OutputConfig {
                format: "text".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .tfcost.toml in current dir, then ~/.config/tfcost/config.toml
            let local = PathBuf::from(".tfcost.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("tfcost").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".tfcost.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!(
                    "{}: {}\n  Tip: Run 'tfcost init' to create a fresh config file",
                    config_path.display(),
                    e
                ))
            })?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'tfcost init' to create one.");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
