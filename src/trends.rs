//! Historical trends panel: the request state machine and the typed view of its payload.

use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, ApiReply, AreaKey};
use crate::traits::TrendsSource;

pub const INITIAL_STATUS: &str = "Enter a street name and press \"Load trends\".";
pub const EMPTY_AREA_STATUS: &str = "Please input a street name";
pub const LOADING_STATUS: &str = "Loading...";
pub const GENERIC_ERROR_STATUS: &str = "Error loading data";
pub const NETWORK_ERROR_PREFIX: &str = "Network error: ";
/// Used when a successful payload carries no `message`.
pub const LOADED_FALLBACK_STATUS: &str = "Historical trends loaded.";

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendsQuery {
    /// Street name.
    pub area: String,
    /// Optional zone number. Takes precedence over the street.
    pub zone: String,
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl TrendsQuery {
    pub fn new(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            zone: String::new(),
        }
    }

    /// The trimmed area, if there is anything left.
    pub fn street(&self) -> Option<&str> {
        non_blank(&self.area)
    }

    pub fn zone(&self) -> Option<&str> {
        non_blank(&self.zone)
    }

    /// What to ask the service for: the zone if one is given, else the street.
    pub fn target(&self) -> Option<AreaKey> {
        self.zone()
            .map(|z| AreaKey::Zone(z.to_string()))
            .or_else(|| self.street().map(|s| AreaKey::Street(s.to_string())))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrendsState {
    #[default]
    Idle,
    Loading,
    Loaded(Value),
    Failed(String),
}

/// Issued by [`TrendsPanel::begin_load`]; hand it back with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub area: AreaKey,
}

/// One cell of the 7x24 availability grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendCell {
    /// 0 = Monday.
    pub dow: u8,
    pub hour: u8,
    pub availability: Option<f64>,
    #[serde(default)]
    pub n: u64,
    #[serde(default)]
    pub restricted: bool,
}

/// Typed view over payloads shaped like the trends service's grid response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendsSummary {
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub has_hist: bool,
    #[serde(default)]
    pub samples_total: u64,
    pub matrix: Vec<TrendCell>,
}

impl TrendsSummary {
    /// Returns `None` when the payload does not carry a usable grid.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let summary: Self = serde_json::from_value(payload.clone()).ok()?;
        let in_range = summary
            .matrix
            .iter()
            .all(|c| (c.dow as usize) < WEEKDAYS.len() && c.hour < 24);
        (in_range && !summary.matrix.is_empty()).then_some(summary)
    }

    pub fn cell(&self, dow: u8, hour: u8) -> Option<&TrendCell> {
        self.matrix.iter().find(|c| c.dow == dow && c.hour == hour)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Zones: {} - Samples: {}",
            self.zones.join(", "),
            self.samples_total
        )
    }
}

/// State owned by one mounted historical trends panel.
#[derive(Debug, Clone)]
pub struct TrendsPanel {
    query: TrendsQuery,
    state: TrendsState,
    status: String,
    summary: Option<TrendsSummary>,
    latest_seq: u64,
}

impl Default for TrendsPanel {
    fn default() -> Self {
        Self {
            query: TrendsQuery::default(),
            state: TrendsState::Idle,
            status: INITIAL_STATUS.to_string(),
            summary: None,
            latest_seq: 0,
        }
    }
}

impl TrendsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &TrendsQuery {
        &self.query
    }

    pub fn state(&self) -> &TrendsState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TrendsState::Loading)
    }

    /// The payload, only while loaded.
    pub fn payload(&self) -> Option<&Value> {
        match &self.state {
            TrendsState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn pretty_payload(&self) -> Option<String> {
        self.payload()
            .and_then(|p| serde_json::to_string_pretty(p).ok())
    }

    pub fn summary(&self) -> Option<&TrendsSummary> {
        self.summary.as_ref()
    }

    /// Editing the area never issues a request.
    pub fn update_area(&mut self, value: impl Into<String>) {
        self.query.area = value.into();
    }

    pub fn update_zone(&mut self, value: impl Into<String>) {
        self.query.zone = value.into();
    }

    /// Start a submission for the current area.
    ///
    /// Returns the ticket for the request to make, or `None` when both the
    /// street and the zone are blank. Either way any request still in flight
    /// becomes stale.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.latest_seq += 1;
        self.summary = None;

        let Some(area) = self.query.target() else {
            self.state = TrendsState::Idle;
            self.status = EMPTY_AREA_STATUS.to_string();
            return None;
        };

        self.state = TrendsState::Loading;
        self.status = LOADING_STATUS.to_string();
        Some(LoadTicket {
            seq: self.latest_seq,
            area,
        })
    }

    /// Apply the outcome of the request identified by `seq`.
    ///
    /// Returns `false` if the result belonged to a superseded submission and was dropped.
    pub fn finish_load(&mut self, seq: u64, result: Result<ApiReply, ApiError>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                "Discarding stale trends response #{} (latest is #{})",
                seq,
                self.latest_seq
            );
            return false;
        }

        match result {
            Ok(reply) if reply.is_success() => {
                self.status = reply
                    .message()
                    .unwrap_or(LOADED_FALLBACK_STATUS)
                    .to_string();
                self.summary = TrendsSummary::from_payload(&reply.body);
                self.state = TrendsState::Loaded(reply.body);
            }
            Ok(reply) => {
                let message = reply.error().unwrap_or(GENERIC_ERROR_STATUS).to_string();
                tracing::warn!("Trends service returned {}: {}", reply.status, message);
                self.fail(message);
            }
            Err(e) => {
                self.fail(format!("{}{}", NETWORK_ERROR_PREFIX, e));
            }
        }
        true
    }

    fn fail(&mut self, message: String) {
        self.summary = None;
        self.status = message.clone();
        self.state = TrendsState::Failed(message);
    }

    /// Run one whole submission against `source`.
    pub async fn load_trends<S: TrendsSource>(&mut self, source: &S) {
        let Some(ticket) = self.begin_load() else {
            return;
        };
        let result = source.fetch_trends(&ticket.area).await;
        self.finish_load(ticket.seq, result);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn grid_payload() -> Value {
        json!({
            "message": "Historical availability by day-of-week and hour.",
            "zones": ["7539", "7540"],
            "has_hist": true,
            "samples_total": 12,
            "matrix": [
                { "dow": 0, "hour": 8, "availability": 0.25, "n": 8, "restricted": true },
                { "dow": 6, "hour": 23, "availability": null, "n": 0, "restricted": false },
                { "dow": 2, "hour": 14, "availability": 1.0, "n": 4, "restricted": false }
            ]
        })
    }

    #[test]
    fn test_initial_state_is_idle() {
        let panel = TrendsPanel::new();
        assert_eq!(panel.state(), &TrendsState::Idle);
        assert_eq!(panel.status(), INITIAL_STATUS);
        assert!(panel.payload().is_none());
    }

    #[test]
    fn test_blank_area_issues_no_ticket() {
        let mut panel = TrendsPanel::new();
        panel.update_area("   ");
        assert_eq!(panel.begin_load(), None);
        assert_eq!(panel.state(), &TrendsState::Idle);
        assert_eq!(panel.status(), EMPTY_AREA_STATUS);
    }

    #[test]
    fn test_begin_load_trims_and_enters_loading() {
        let mut panel = TrendsPanel::new();
        panel.update_area("  Swanston Street ");
        let ticket = panel.begin_load().unwrap();
        assert_eq!(ticket.area, AreaKey::Street("Swanston Street".into()));
        assert!(panel.is_loading());
        assert_eq!(panel.status(), LOADING_STATUS);
    }

    #[test]
    fn test_success_uses_server_message() {
        let mut panel = TrendsPanel::new();
        panel.update_area("Swanston Street");
        let ticket = panel.begin_load().unwrap();
        let body = json!({ "message": "OK", "data": [1, 2, 3] });
        assert!(panel.finish_load(ticket.seq, Ok(ApiReply::new(200, body.clone()))));
        assert_eq!(panel.status(), "OK");
        assert_eq!(panel.payload(), Some(&body));
        assert!(panel.summary().is_none());
    }

    #[test]
    fn test_success_without_message_uses_fallback() {
        let mut panel = TrendsPanel::new();
        panel.update_area("Swanston Street");
        let ticket = panel.begin_load().unwrap();
        panel.finish_load(ticket.seq, Ok(ApiReply::new(200, json!({ "data": [] }))));
        assert_eq!(panel.status(), LOADED_FALLBACK_STATUS);
        assert!(panel.payload().is_some());
    }

    #[test]
    fn test_failure_clears_previous_payload() {
        let mut panel = TrendsPanel::new();
        panel.update_area("Swanston Street");
        let first = panel.begin_load().unwrap();
        panel.finish_load(first.seq, Ok(ApiReply::new(200, grid_payload())));
        assert!(panel.summary().is_some());

        let second = panel.begin_load().unwrap();
        assert!(panel.payload().is_none());
        panel.finish_load(second.seq, Ok(ApiReply::new(500, json!({}))));
        assert_eq!(panel.status(), GENERIC_ERROR_STATUS);
        assert_eq!(
            panel.state(),
            &TrendsState::Failed(GENERIC_ERROR_STATUS.to_string())
        );
        assert!(panel.payload().is_none());
        assert!(panel.summary().is_none());
    }

    #[test]
    fn test_decode_error_reported_as_network_error() {
        let mut panel = TrendsPanel::new();
        panel.update_area("X");
        let ticket = panel.begin_load().unwrap();
        panel.finish_load(
            ticket.seq,
            Err(ApiError::Decode("expected value at line 1".into())),
        );
        assert!(panel.status().starts_with(NETWORK_ERROR_PREFIX));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut panel = TrendsPanel::new();
        panel.update_area("Collins Street");
        let stale = panel.begin_load().unwrap();
        panel.update_area("Swanston Street");
        let latest = panel.begin_load().unwrap();
        assert!(latest.seq > stale.seq);

        let latest_body = json!({ "message": "latest" });
        assert!(panel.finish_load(latest.seq, Ok(ApiReply::new(200, latest_body.clone()))));
        assert!(!panel.finish_load(
            stale.seq,
            Ok(ApiReply::new(404, json!({ "error": "Not found" })))
        ));
        assert_eq!(panel.status(), "latest");
        assert_eq!(panel.payload(), Some(&latest_body));
    }

    #[test]
    fn test_blank_submission_supersedes_in_flight_request() {
        let mut panel = TrendsPanel::new();
        panel.update_area("Collins Street");
        let pending = panel.begin_load().unwrap();
        panel.update_area("");
        assert!(panel.begin_load().is_none());

        assert!(!panel.finish_load(pending.seq, Ok(ApiReply::new(200, grid_payload()))));
        assert_eq!(panel.status(), EMPTY_AREA_STATUS);
        assert_eq!(panel.state(), &TrendsState::Idle);
    }

    #[test]
    fn test_pretty_payload_only_when_loaded() {
        let mut panel = TrendsPanel::new();
        assert!(panel.pretty_payload().is_none());
        panel.update_area("X");
        let ticket = panel.begin_load().unwrap();
        panel.finish_load(ticket.seq, Ok(ApiReply::new(200, json!({ "message": "OK" }))));
        let pretty = panel.pretty_payload().unwrap();
        assert!(pretty.contains("\"message\": \"OK\""));
    }

    #[test]
    fn test_summary_parses_grid_payload() {
        let summary = TrendsSummary::from_payload(&grid_payload()).unwrap();
        assert_eq!(summary.zones, vec!["7539", "7540"]);
        assert!(summary.has_hist);
        assert_eq!(summary.samples_total, 12);
        assert_eq!(summary.summary_line(), "Zones: 7539, 7540 - Samples: 12");

        let cell = summary.cell(0, 8).unwrap();
        assert_eq!(cell.availability, Some(0.25));
        assert!(cell.restricted);
        assert_eq!(summary.cell(6, 23).unwrap().availability, None);
        assert!(summary.cell(3, 3).is_none());
    }

    #[test]
    fn test_summary_rejects_other_shapes() {
        assert!(TrendsSummary::from_payload(&json!({ "message": "OK" })).is_none());
        assert!(TrendsSummary::from_payload(&json!({ "matrix": [] })).is_none());
        assert!(
            TrendsSummary::from_payload(&json!({
                "matrix": [{ "dow": 7, "hour": 0, "availability": 0.5 }]
            }))
            .is_none()
        );
        assert!(
            TrendsSummary::from_payload(&json!({
                "matrix": [{ "dow": 0, "hour": 24, "availability": 0.5 }]
            }))
            .is_none()
        );
    }

    #[test]
    fn test_query_street_trims() {
        assert_eq!(TrendsQuery::new(" a b ").street(), Some("a b"));
        assert_eq!(TrendsQuery::new("\t\n").street(), None);
    }

    #[test]
    fn test_zone_takes_precedence_over_street() {
        let mut query = TrendsQuery::new("Swanston Street");
        assert_eq!(
            query.target(),
            Some(AreaKey::Street("Swanston Street".into()))
        );

        query.zone = " 7539 ".into();
        assert_eq!(query.target(), Some(AreaKey::Zone("7539".into())));

        query.area.clear();
        assert_eq!(query.target(), Some(AreaKey::Zone("7539".into())));
    }

    #[test]
    fn test_zone_alone_starts_a_load() {
        let mut panel = TrendsPanel::new();
        panel.update_zone("7539");
        let ticket = panel.begin_load().unwrap();
        assert_eq!(ticket.area, AreaKey::Zone("7539".into()));
        assert_eq!(panel.status(), LOADING_STATUS);
    }
}
