use crate::constants::DEFAULT_RECIPEDB_CUISINES;
use crate::error::{PipelineError, Result};
use crate::types::SourceKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tasty: TastyConfig,
    pub recipedb: RecipeDbConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TastyConfig {
    pub url: String,
    pub host: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub max_recipes: usize,
    pub page_size: usize,
    pub timeout_seconds: u64,
}

impl Default for TastyConfig {
    fn default() -> Self {
        Self {
            url: "https://tasty.p.rapidapi.com/recipes/list".to_string(),
            host: "tasty.p.rapidapi.com".to_string(),
            api_key_env: "RAPIDAPI_KEY".to_string(),
            max_recipes: 280,
            page_size: 100,
            timeout_seconds: 30,
        }
    }
}

impl TastyConfig {
    pub fn api_key(&self) -> Result<String> {
        Ok(std::env::var(&self.api_key_env)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecipeDbConfig {
    pub base_url: String,
    pub cuisines: Vec<String>,
    pub page_limit: usize,
    /// Fixed wait after navigation for dynamic content to render
    pub settle_ms: u64,
    pub next_page_timeout_secs: u64,
    pub next_page_id: String,
    pub chrome_path: Option<PathBuf>,
}

impl Default for RecipeDbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://cosylab.iiitd.edu.in".to_string(),
            cuisines: DEFAULT_RECIPEDB_CUISINES.iter().map(|c| c.to_string()).collect(),
            page_limit: 2,
            settle_ms: 3000,
            next_page_timeout_secs: 10,
            next_page_id: "nextpage".to_string(),
            chrome_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub tasty_csv: String,
    pub recipedb_csv: String,
    pub reference_csv: PathBuf,
    pub reference_out_csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            tasty_csv: "tasty.csv".to_string(),
            recipedb_csv: "recipedb.csv".to_string(),
            reference_csv: PathBuf::from("food.csv"),
            reference_out_csv: "food_reference.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn table_path(&self, kind: SourceKind) -> PathBuf {
        match kind {
            SourceKind::Tasty => self.dir.join(&self.tasty_csv),
            SourceKind::RecipeDb => self.dir.join(&self.recipedb_csv),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Explicit path must exist; otherwise `config.toml` is used when present
    /// and built-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
