//! Abstractions for time and the trends service to enable testing.
//!
//! This module provides traits for:
//! - `Clock`: Abstracting time access for deterministic testing
//! - `TrendsSource`: Abstracting the historical trends endpoint
//! - `PredictionSource`: Abstracting the optional prediction endpoint

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, Utc};

use crate::api::{ApiError, ApiReply, AreaKey};
use crate::prediction::PredictionRequest;

// ==================== Clock Trait ====================

/// Trait for abstracting time access.
pub trait Clock: Send + Sync {
    /// Get the current time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Get the current time in the local timezone.
    fn now_local(&self) -> DateTime<Local>;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Mock clock for testing with controllable time.
#[derive(Debug, Clone)]
pub struct MockClock {
    utc_time: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            utc_time: Arc::new(Mutex::new(time)),
        }
    }

    pub fn set_time(&self, time: DateTime<Utc>) {
        *self.utc_time.lock().unwrap() = time;
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut time = self.utc_time.lock().unwrap();
        *time += duration;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.utc_time.lock().unwrap()
    }

    fn now_local(&self) -> DateTime<Local> {
        self.now_utc().with_timezone(&Local)
    }
}

// ==================== TrendsSource Trait ====================

/// The network collaborator behind the historical trends panel.
pub trait TrendsSource: Send + Sync {
    /// Issue one request for the given zone or street.
    fn fetch_trends(
        &self,
        area: &AreaKey,
    ) -> impl Future<Output = Result<ApiReply, ApiError>> + Send;
}

/// Canned trends service that records every area it was asked for.
#[derive(Debug, Clone)]
pub struct MockTrendsSource {
    reply: Result<ApiReply, ApiError>,
    calls: Arc<Mutex<Vec<AreaKey>>>,
}

impl MockTrendsSource {
    /// Answer every request with this status and body.
    pub fn replying(status: u16, body: serde_json::Value) -> Self {
        Self::with_result(Ok(ApiReply::new(status, body)))
    }

    /// Fail every request at the transport layer.
    pub fn failing(description: impl Into<String>) -> Self {
        Self::with_result(Err(ApiError::Transport(description.into())))
    }

    pub fn with_result(reply: Result<ApiReply, ApiError>) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Areas requested so far, in order.
    pub fn calls(&self) -> Vec<AreaKey> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn was_called(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }
}

impl TrendsSource for MockTrendsSource {
    async fn fetch_trends(&self, area: &AreaKey) -> Result<ApiReply, ApiError> {
        self.calls.lock().unwrap().push(area.clone());
        self.reply.clone()
    }
}

// ==================== PredictionSource Trait ====================

/// The network collaborator behind the predict panel when a service is configured.
pub trait PredictionSource: Send + Sync {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<ApiReply, ApiError>> + Send;
}

/// Canned prediction service that records every request.
#[derive(Debug, Clone)]
pub struct MockPredictionSource {
    reply: Result<ApiReply, ApiError>,
    requests: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockPredictionSource {
    pub fn replying(status: u16, body: serde_json::Value) -> Self {
        Self::with_result(Ok(ApiReply::new(status, body)))
    }

    pub fn failing(description: impl Into<String>) -> Self {
        Self::with_result(Err(ApiError::Transport(description.into())))
    }

    pub fn with_result(reply: Result<ApiReply, ApiError>) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn was_called(&self) -> bool {
        !self.requests.lock().unwrap().is_empty()
    }
}

impl PredictionSource for MockPredictionSource {
    async fn predict(&self, request: &PredictionRequest) -> Result<ApiReply, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}
