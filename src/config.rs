use std::path::{Path, PathBuf};

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub trends: TrendsConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    pub network: NetworkConfig,
    pub window: WindowConfig,
    pub documents: DocumentsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrendsConfig {
    pub base_url: String,
    pub path: String,
}

impl TrendsConfig {
    /// Full URL of the historical trends resource.
    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, &self.path)
    }
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5002".to_string(),
            path: "/api/historical_trends_data".to_string(),
        }
    }
}

/// The prediction service is opt-in. Without a `base_url` the predict panel
/// answers locally.
#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    pub path: String,
}

impl PredictionConfig {
    /// Full URL of the prediction resource, if a service is configured.
    pub fn endpoint(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map(|base| join_url(base, &self.path))
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            path: "/predict_parking".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub sidebar_width: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Melbourne Parking".to_string(),
            width: 1200.0,
            height: 850.0,
            sidebar_width: 250.0,
        }
    }
}

/// Where one externally generated document lives and how big its frame is.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DocumentConfig {
    pub title: String,
    pub path: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentsConfig {
    pub base_url: String,
    pub live_map: DocumentConfig,
    pub vehicle_chart: DocumentConfig,
    pub population_chart: DocumentConfig,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            live_map: DocumentConfig {
                title: "Live Parking Map".to_string(),
                path: "/Latest_parking_map_live.html".to_string(),
                width: 900.0,
                height: 500.0,
            },
            vehicle_chart: DocumentConfig {
                title: "Victoria Vehicle Trend".to_string(),
                path: "/victoria_car_animation.html".to_string(),
                width: 800.0,
                height: 450.0,
            },
            population_chart: DocumentConfig {
                title: "Melbourne Population Growth".to_string(),
                path: "/melbourne_population_animation.html".to_string(),
                width: 800.0,
                height: 450.0,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Load with an extra config file layered above the standard ones.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_with(Some(path))
    }

    fn load_with(extra: Option<&Path>) -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("melbourne-parking");

        let trends = TrendsConfig::default();
        let prediction = PredictionConfig::default();
        let network = NetworkConfig::default();
        let window = WindowConfig::default();
        let docs = DocumentsConfig::default();

        let mut builder = Config::builder()
            // 1. Load default values
            // Trends
            .set_default("trends.base_url", trends.base_url)?
            .set_default("trends.path", trends.path)?
            // Prediction (no base_url: the service is off unless configured)
            .set_default("prediction.path", prediction.path)?
            // Network
            .set_default("network.request_timeout_secs", network.request_timeout_secs)?
            .set_default("network.connect_timeout_secs", network.connect_timeout_secs)?
            // Window
            .set_default("window.title", window.title)?
            .set_default("window.width", window.width as f64)?
            .set_default("window.height", window.height as f64)?
            .set_default("window.sidebar_width", window.sidebar_width as f64)?
            // Documents
            .set_default("documents.base_url", docs.base_url)?;

        for (key, doc) in [
            ("live_map", docs.live_map),
            ("vehicle_chart", docs.vehicle_chart),
            ("population_chart", docs.population_chart),
        ] {
            builder = builder
                .set_default(format!("documents.{key}.title"), doc.title)?
                .set_default(format!("documents.{key}.path"), doc.path)?
                .set_default(format!("documents.{key}.width"), doc.width as f64)?
                .set_default(format!("documents.{key}.height"), doc.height as f64)?;
        }

        builder = builder
            // 2. Load from local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 3. Load from user config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // 4. Load from Environment variables (PARKING__TRENDS__BASE_URL=...)
        let builder = builder.add_source(Environment::with_prefix("PARKING").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default Value Tests ====================

    #[test]
    fn test_network_config_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Melbourne Parking");
        assert_eq!(config.width, 1200.0);
        assert_eq!(config.height, 850.0);
        assert_eq!(config.sidebar_width, 250.0);
    }

    #[test]
    fn test_trends_endpoint() {
        let config = TrendsConfig::default();
        assert_eq!(
            config.endpoint(),
            "http://localhost:5002/api/historical_trends_data"
        );
    }

    #[test]
    fn test_prediction_service_is_off_by_default() {
        let config = PredictionConfig::default();
        assert_eq!(config.endpoint(), None);
        assert_eq!(config.path, "/predict_parking");
    }

    #[test]
    fn test_prediction_endpoint_ignores_blank_base_url() {
        let mut config = PredictionConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), None);

        config.base_url = Some("http://localhost:5000/".to_string());
        assert_eq!(
            config.endpoint().as_deref(),
            Some("http://localhost:5000/predict_parking")
        );
    }

    #[test]
    fn test_document_defaults_use_fixed_paths() {
        let docs = DocumentsConfig::default();
        assert_eq!(docs.live_map.path, "/Latest_parking_map_live.html");
        assert_eq!(docs.vehicle_chart.path, "/victoria_car_animation.html");
        assert_eq!(
            docs.population_chart.path,
            "/melbourne_population_animation.html"
        );
    }

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(join_url("http://a", "/b"), "http://a/b");
        assert_eq!(join_url("http://a/", "/b"), "http://a/b");
        assert_eq!(join_url("http://a/", "b"), "http://a/b");
        assert_eq!(join_url("http://a", "b.html"), "http://a/b.html");
    }

    // ==================== Config Loading Tests ====================

    #[test]
    fn test_loaded_config_has_expected_structure() {
        let config = AppConfig::load().expect("Config should load");

        assert!(!config.trends.base_url.is_empty());
        assert!(config.trends.path.starts_with('/'));
        assert!(config.network.request_timeout_secs > 0);
        assert!(config.window.width > 0.0);
        assert!(config.documents.live_map.height > 0.0);
    }

    #[test]
    fn test_config_structs_are_debug() {
        let config = NetworkConfig::default();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("NetworkConfig"));
        assert!(debug_str.contains("request_timeout_secs"));
    }

    #[test]
    fn test_config_default_values_are_reasonable() {
        let network = NetworkConfig::default();
        assert!(
            network.request_timeout_secs >= network.connect_timeout_secs,
            "Request timeout should be >= connect timeout"
        );

        let window = WindowConfig::default();
        assert!(window.sidebar_width < window.width);
    }
}
