//! Melbourne Parking Library
//!
//! This module exposes the core components of the Melbourne Parking client
//! for testing and potential reuse.

pub mod api;
pub mod config;
pub mod documents;
pub mod export;
pub mod pages;
pub mod prediction;
pub mod report;
pub mod tabs;
pub mod traits;
pub mod trends;

// GUI-only modules
#[cfg(feature = "gui")]
pub mod style;
#[cfg(feature = "gui")]
pub mod widgets;

// Re-export commonly used types
pub use api::{ApiError, ApiReply, AreaKey, PredictionApiClient, TrendsApiClient};
pub use config::AppConfig;
pub use documents::{DocumentCatalog, EmbeddedDocument, InsightCard};
pub use pages::Page;
pub use prediction::{
    AvailabilityClass, PredictionField, PredictionOutcome, PredictionPanel, PredictionQuery,
    PredictionRequest, ServicePrediction,
};
pub use report::TrendsReport;
pub use tabs::{Direction, Tab, TabController};
pub use traits::{
    Clock, MockClock, MockPredictionSource, MockTrendsSource, PredictionSource, SystemClock,
    TrendsSource,
};
pub use trends::{TrendCell, TrendsPanel, TrendsQuery, TrendsState, TrendsSummary};
