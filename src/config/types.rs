use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::navigation::{NavigationItem, sidebar_navigation, user_menu_items};

/// Environment variable naming the config file; defaults to `./config.yaml`.
pub const CONFIG_PATH_ENV: &str = "SESSIONGATE_CONFIG";
/// Prefix for environment overrides, e.g. `SESSIONGATE_API__BASE_URL`.
pub const ENV_PREFIX: &str = "SESSIONGATE_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Where the backend lives.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Prefix for gateway calls; endpoints are appended verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin serving `/api/v1/auth/*`.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            auth_base_url: default_auth_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_auth_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Client-side routes the session layer navigates to.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RoutesConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        RoutesConfig {
            login_path: default_login_path(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

/// Menus rendered around the app. Omitted menus fall back to the built-in ones.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct NavigationConfig {
    #[serde(default = "sidebar_navigation")]
    pub sidebar: Vec<NavigationItem>,
    #[serde(default = "user_menu_items")]
    pub user_menu: Vec<NavigationItem>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            sidebar: sidebar_navigation(),
            user_menu: user_menu_items(),
        }
    }
}

/// Extract a [`ConfigV1`] from any figment, migrating older versions here once they exist.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// The default figment: the YAML file, overridden by `SESSIONGATE_*` variables.
pub fn default_figment() -> Figment {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Load config, exiting the process when it is missing or invalid.
pub fn load_config() -> ConfigV1 {
    match extract_config(&default_figment()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error rendering schema: {}", e),
    }
}
