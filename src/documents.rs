//! Externally generated map and chart documents.
//!
//! Documents are opaque. The client only knows where each one lives and how
//! large its frame is, and hands the URL to the system browser on request.

use thiserror::Error;

use crate::config::{DocumentConfig, DocumentsConfig, join_url};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to launch {launcher}: {source}")]
    Launch {
        launcher: &'static str,
        source: std::io::Error,
    },
    #[error("Opening documents is not supported on this platform")]
    Unsupported,
}

/// A document to show inside a fixed-size frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedDocument {
    pub title: String,
    pub url: String,
    pub width: f32,
    pub height: f32,
}

impl EmbeddedDocument {
    pub fn from_config(base_url: &str, doc: &DocumentConfig) -> Self {
        Self {
            title: doc.title.clone(),
            url: join_url(base_url, &doc.path),
            width: doc.width,
            height: doc.height,
        }
    }
}

/// A chart card on the data insights page.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightCard {
    pub heading: &'static str,
    pub description: &'static str,
    pub badges: [&'static str; 2],
    pub document: EmbeddedDocument,
}

/// Resolved documents for every page.
#[derive(Debug, Clone)]
pub struct DocumentCatalog {
    pub live_map: EmbeddedDocument,
    pub insights: Vec<InsightCard>,
}

impl DocumentCatalog {
    pub fn new(config: &DocumentsConfig) -> Self {
        let base = config.base_url.as_str();
        Self {
            live_map: EmbeddedDocument::from_config(base, &config.live_map),
            insights: vec![
                InsightCard {
                    heading: "Vehicle Ownership Trends",
                    description: "Interactive chart showing car ownership growth over time. \
                                  Hover to view exact figures.",
                    badges: ["Source: VicRoads", "Update: Annually"],
                    document: EmbeddedDocument::from_config(base, &config.vehicle_chart),
                },
                InsightCard {
                    heading: "Population Growth (CBD)",
                    description: "Chart displaying population growth over the past decade. \
                                  Hover to see detailed values.",
                    badges: ["Source: ABS", "Update: Census/yearly estimates"],
                    document: EmbeddedDocument::from_config(base, &config.population_chart),
                },
            ],
        }
    }
}

/// Open a document URL in the desktop's default browser.
pub fn open_in_browser(url: &str) -> Result<(), DocumentError> {
    tracing::debug!("Opening {} in the system browser", url);

    #[cfg(target_os = "windows")]
    {
        spawn("explorer", url)
    }

    #[cfg(target_os = "macos")]
    {
        spawn("open", url)
    }

    #[cfg(target_os = "linux")]
    {
        spawn("xdg-open", url)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(DocumentError::Unsupported)
    }
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
fn spawn(launcher: &'static str, url: &str) -> Result<(), DocumentError> {
    std::process::Command::new(launcher)
        .arg(url)
        .spawn()
        .map(|_| ())
        .map_err(|source| DocumentError::Launch { launcher, source })
}
