use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub shopify: ShopifyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShopifyConfig {
    /// Домен магазина, например "my-store.myshopify.com"
    #[serde(default)]
    pub store_url: String,
    /// Admin API token; в config.toml обычно пустой, берётся из окружения
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    "2024-07".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[shopify]
store_url = ""
access_token = ""
api_version = "2024-07"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// SHOPIFY_STORE_URL / SHOPIFY_ACCESS_TOKEN / SHOPIFY_API_VERSION
/// environment variables override whatever the file said.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(store_url) = std::env::var("SHOPIFY_STORE_URL") {
        config.shopify.store_url = store_url;
    }
    if let Ok(token) = std::env::var("SHOPIFY_ACCESS_TOKEN") {
        config.shopify.access_token = token;
    }
    if let Ok(version) = std::env::var("SHOPIFY_API_VERSION") {
        config.shopify.api_version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.shopify.api_version, "2024-07");
        assert!(config.shopify.store_url.is_empty());
    }

    #[test]
    fn test_api_version_defaults_when_missing() {
        let config: Config = toml::from_str(
            r#"
            [shopify]
            store_url = "demo.myshopify.com"
            access_token = "shpat_test"
            "#,
        )
        .unwrap();
        assert_eq!(config.shopify.api_version, "2024-07");
        assert_eq!(config.shopify.store_url, "demo.myshopify.com");
    }
}
