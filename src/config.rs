use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main scraper configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScraperConfig {
    /// Site layout: host and recipe URL shape
    #[serde(default)]
    pub site: SiteConfig,
    /// HTTP client behaviour
    #[serde(default)]
    pub http: HttpConfig,
    /// Where cached pages, the seen store and outputs live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Listing pages crawled by `discover` when no URLs are given
    #[serde(default)]
    pub listing_urls: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Host recipe links are matched against
    #[serde(default = "default_host")]
    pub host: String,
    /// Recipe page URL, with `{id}` replaced by the recipe id
    #[serde(default = "default_recipe_url_template")]
    pub recipe_url_template: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            recipe_url_template: default_recipe_url_template(),
        }
    }
}

impl SiteConfig {
    pub fn recipe_url(&self, id: u64) -> String {
        self.recipe_url_template.replace("{id}", &id.to_string())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Pause between two page downloads in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            request_delay_ms: default_request_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory of downloaded `{id}_recipe.html` pages
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// JSON file of discovered recipe ids
    #[serde(default = "default_seen_store")]
    pub seen_store: PathBuf,
    /// Directory receiving `recipes.json` and `ingredients.json`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            seen_store: default_seen_store(),
            output_dir: default_output_dir(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "www.allrecipes.com".to_string()
}

fn default_recipe_url_template() -> String {
    "https://www.allrecipes.com/recipe/{id}/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeNutritionBot/0.3)".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("allrecipe_recipe_htmls")
}

fn default_seen_store() -> PathBuf {
    PathBuf::from("allrecipes.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("all_data")
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_NUTRITION__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_NUTRITION__HTTP__REQUEST_DELAY_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ScraperConfig::load`] for the source priority.
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_NUTRITION__STORAGE__CACHE_DIR
        .add_source(
            Environment::with_prefix("RECIPE_NUTRITION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
