//! Predictive availability form.
//!
//! Without a prediction service a complete query always yields the "most
//! likely available" recommendation, and an incomplete query yields the
//! prompt. With a service configured the recommendation comes from the
//! service and its failures become [`PredictionOutcome::Failed`], never the
//! local sentence.

use std::fmt;

use serde::Deserialize;

use crate::api::{ApiError, ApiReply, AreaKey};
use crate::traits::PredictionSource;
use crate::trends::NETWORK_ERROR_PREFIX;

/// Shown whenever any of the three fields is blank.
pub const INCOMPLETE_PROMPT: &str = "Please fill in the location, date and time.";
/// Shown when the service rejects a query without saying why.
pub const SERVICE_ERROR_FALLBACK: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionField {
    Location,
    Date,
    Time,
}

impl fmt::Display for PredictionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PredictionField::Location => "location",
            PredictionField::Date => "date",
            PredictionField::Time => "time",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionQuery {
    pub location: String,
    pub date: String,
    pub time: String,
}

impl PredictionQuery {
    pub fn new(
        location: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Replaces a single field. Other fields are not validated.
    pub fn update_field(&mut self, field: PredictionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PredictionField::Location => self.location = value,
            PredictionField::Date => self.date = value,
            PredictionField::Time => self.time = value,
        }
    }

    pub fn field(&self, field: PredictionField) -> &str {
        match field {
            PredictionField::Location => &self.location,
            PredictionField::Date => &self.date,
            PredictionField::Time => &self.time,
        }
    }

    /// Fields that are empty after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<PredictionField> {
        [
            PredictionField::Location,
            PredictionField::Date,
            PredictionField::Time,
        ]
        .into_iter()
        .filter(|f| self.field(*f).trim().is_empty())
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// What is sent to the prediction service for a complete query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    /// `YYYY-MM-DD HH:MM`, joined from the date and time fields.
    pub time: String,
    pub area: AreaKey,
}

impl PredictionRequest {
    /// `None` while any field is blank.
    pub fn from_query(query: &PredictionQuery) -> Option<Self> {
        query.is_complete().then(|| Self {
            time: format!("{} {}", query.date.trim(), query.time.trim()),
            area: AreaKey::Street(query.location.trim().to_string()),
        })
    }
}

/// Success body of the prediction service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServicePrediction {
    pub zone: Option<String>,
    pub time: Option<String>,
    /// Fraction of free bays, `None` when the service cannot estimate it.
    pub availability: Option<f64>,
    pub confidence: Option<String>,
    pub model: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl ServicePrediction {
    /// A zero estimate is what the service returns for restricted times.
    /// An unknown estimate only comes back once no restriction applies.
    pub fn class(&self) -> AvailabilityClass {
        match self.availability {
            Some(a) if a <= 0.0 => AvailabilityClass::NotPossible,
            _ => AvailabilityClass::MostLikelyAvailable,
        }
    }

    pub fn availability_label(&self) -> String {
        match self.availability {
            Some(a) => format!("{:.1}%", a * 100.0),
            None => "Unknown".to_string(),
        }
    }

    pub fn headline(&self) -> String {
        match &self.message {
            Some(message) if !message.trim().is_empty() => message.clone(),
            _ => format!("Availability: {}", self.availability_label()),
        }
    }

    /// e.g. `Zone: 7539 | Model: historical | Reason: Based on 12 samples.`
    pub fn details(&self) -> String {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "Zone: {} | Model: {} | Reason: {}",
            or_dash(&self.zone),
            or_dash(&self.model),
            or_dash(&self.reason)
        )
    }
}

/// How confident a recommendation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityClass {
    MostLikelyAvailable,
    NotPossible,
}

impl AvailabilityClass {
    pub fn phrase(self) -> &'static str {
        match self {
            AvailabilityClass::MostLikelyAvailable => "most likely available",
            AvailabilityClass::NotPossible => "not possible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    Recommendation {
        class: AvailabilityClass,
        message: String,
        /// Zone, model and reason line from the prediction service.
        details: Option<String>,
    },
    Incomplete {
        missing: Vec<PredictionField>,
    },
    /// The prediction service could not answer.
    Failed {
        message: String,
    },
}

impl PredictionOutcome {
    fn recommend(query: &PredictionQuery, class: AvailabilityClass) -> Self {
        let message = format!(
            "Parking near \"{}\" at {} on {} is {}.",
            query.location.trim(),
            query.time.trim(),
            query.date.trim(),
            class.phrase()
        );
        PredictionOutcome::Recommendation {
            class,
            message,
            details: None,
        }
    }

    /// Map a prediction service exchange onto an outcome.
    pub fn from_service(result: Result<ApiReply, ApiError>) -> Self {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                return PredictionOutcome::Failed {
                    message: format!("{}{}", NETWORK_ERROR_PREFIX, e),
                };
            }
        };

        if !reply.is_success() {
            tracing::warn!("Prediction service returned {}", reply.status);
            return PredictionOutcome::Failed {
                message: reply.error().unwrap_or(SERVICE_ERROR_FALLBACK).to_string(),
            };
        }

        match serde_json::from_value::<ServicePrediction>(reply.body) {
            Ok(prediction) => PredictionOutcome::Recommendation {
                class: prediction.class(),
                message: prediction.headline(),
                details: Some(prediction.details()),
            },
            Err(e) => {
                tracing::warn!("Unexpected prediction body: {}", e);
                PredictionOutcome::Failed {
                    message: SERVICE_ERROR_FALLBACK.to_string(),
                }
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PredictionOutcome::Recommendation { message, .. } => message,
            PredictionOutcome::Incomplete { .. } => INCOMPLETE_PROMPT,
            PredictionOutcome::Failed { message } => message,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            PredictionOutcome::Recommendation { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<AvailabilityClass> {
        match self {
            PredictionOutcome::Recommendation { class, .. } => Some(*class),
            PredictionOutcome::Incomplete { .. } | PredictionOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PredictionOutcome::Failed { .. })
    }
}

/// Evaluates a query. Never fails and performs no I/O.
pub fn submit(query: &PredictionQuery) -> PredictionOutcome {
    let missing = query.missing_fields();
    if !missing.is_empty() {
        return PredictionOutcome::Incomplete { missing };
    }
    PredictionOutcome::recommend(query, AvailabilityClass::MostLikelyAvailable)
}

/// Issued by [`PredictionPanel::begin_request`]; hand it back with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTicket {
    pub seq: u64,
    pub request: PredictionRequest,
}

/// Form state plus the outcome of the latest submission.
#[derive(Debug, Clone, Default)]
pub struct PredictionPanel {
    query: PredictionQuery,
    outcome: Option<PredictionOutcome>,
    pending: bool,
    latest_seq: u64,
}

impl PredictionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &PredictionQuery {
        &self.query
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    pub fn update_field(&mut self, field: PredictionField, value: impl Into<String>) {
        self.query.update_field(field, value);
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Replaces the previous outcome with the local result for the current query.
    pub fn submit(&mut self) -> &PredictionOutcome {
        self.latest_seq += 1;
        self.pending = false;
        self.outcome.insert(submit(&self.query))
    }

    /// Start a service-backed submission.
    ///
    /// An incomplete query gets the prompt straight away and no ticket. Any
    /// request still in flight becomes stale either way.
    pub fn begin_request(&mut self) -> Option<PredictionTicket> {
        self.latest_seq += 1;
        let Some(request) = PredictionRequest::from_query(&self.query) else {
            self.pending = false;
            self.outcome = Some(submit(&self.query));
            return None;
        };
        self.pending = true;
        self.outcome = None;
        Some(PredictionTicket {
            seq: self.latest_seq,
            request,
        })
    }

    /// Returns `false` if the result belonged to a superseded submission and was dropped.
    pub fn finish_request(&mut self, seq: u64, result: Result<ApiReply, ApiError>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!("Discarding stale prediction response #{}", seq);
            return false;
        }
        self.pending = false;
        self.outcome = Some(PredictionOutcome::from_service(result));
        true
    }

    /// Run one whole service-backed submission against `source`.
    pub async fn request_prediction<S: PredictionSource>(&mut self, source: &S) {
        let Some(ticket) = self.begin_request() else {
            return;
        };
        let result = source.predict(&ticket.request).await;
        self.finish_request(ticket.seq, result);
    }

    /// Whether a field should be flagged after the last submission.
    pub fn is_flagged(&self, field: PredictionField) -> bool {
        matches!(&self.outcome, Some(PredictionOutcome::Incomplete { missing }) if missing.contains(&field))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_complete_query_produces_recommendation() {
        let query = PredictionQuery::new("Collins St", "2024-05-01", "14:00");
        let outcome = submit(&query);
        assert_eq!(
            outcome.message(),
            "Parking near \"Collins St\" at 14:00 on 2024-05-01 is most likely available."
        );
        assert_eq!(outcome.class(), Some(AvailabilityClass::MostLikelyAvailable));
    }

    #[test]
    fn test_empty_query_produces_prompt() {
        let outcome = submit(&PredictionQuery::default());
        assert_eq!(outcome.message(), INCOMPLETE_PROMPT);
        assert_eq!(outcome.class(), None);
        assert_eq!(
            outcome,
            PredictionOutcome::Incomplete {
                missing: vec![
                    PredictionField::Location,
                    PredictionField::Date,
                    PredictionField::Time
                ]
            }
        );
    }

    #[test]
    fn test_whitespace_only_field_counts_as_missing() {
        let query = PredictionQuery::new("Collins St", "   ", "14:00");
        let outcome = submit(&query);
        assert_eq!(
            outcome,
            PredictionOutcome::Incomplete {
                missing: vec![PredictionField::Date]
            }
        );
    }

    #[test]
    fn test_recommendation_trims_surrounding_whitespace() {
        let query = PredictionQuery::new("  Lonsdale St ", "2024-06-02", " 09:30");
        assert_eq!(
            submit(&query).message(),
            "Parking near \"Lonsdale St\" at 09:30 on 2024-06-02 is most likely available."
        );
    }

    #[test]
    fn test_not_possible_phrase() {
        let query = PredictionQuery::new("Collins St", "2024-05-01", "14:00");
        let outcome = PredictionOutcome::recommend(&query, AvailabilityClass::NotPossible);
        assert_eq!(
            outcome.message(),
            "Parking near \"Collins St\" at 14:00 on 2024-05-01 is not possible."
        );
    }

    #[test]
    fn test_update_field_touches_only_that_field() {
        let mut query = PredictionQuery::new("a", "b", "c");
        query.update_field(PredictionField::Time, "");
        assert_eq!(query, PredictionQuery::new("a", "b", ""));
    }

    #[test]
    fn test_request_joins_date_and_time() {
        let query = PredictionQuery::new(" Swanston Street ", "2025-08-08", "10:00 ");
        assert_eq!(
            PredictionRequest::from_query(&query),
            Some(PredictionRequest {
                time: "2025-08-08 10:00".into(),
                area: AreaKey::Street("Swanston Street".into()),
            })
        );
        assert_eq!(
            PredictionRequest::from_query(&PredictionQuery::new("a", "", "b")),
            None
        );
    }

    #[test]
    fn test_service_success_uses_message_and_details() {
        let outcome = PredictionOutcome::from_service(Ok(ApiReply::new(
            200,
            json!({
                "zone": "7539",
                "time": "2025-08-08 10:00",
                "availability": 0.42,
                "confidence": "Medium",
                "model": "historical",
                "reason": "Based on 40 historical samples in this bucket.",
                "message": "Medium confidence - availability: 42.0% at 10:00"
            }),
        )));
        assert_eq!(outcome.message(), "Medium confidence - availability: 42.0% at 10:00");
        assert_eq!(
            outcome.details(),
            Some("Zone: 7539 | Model: historical | Reason: Based on 40 historical samples in this bucket.")
        );
        assert_eq!(outcome.class(), Some(AvailabilityClass::MostLikelyAvailable));
    }

    #[test]
    fn test_service_zero_availability_is_not_possible() {
        let outcome = PredictionOutcome::from_service(Ok(ApiReply::new(
            200,
            json!({ "availability": 0.0, "model": "rules-only" }),
        )));
        assert_eq!(outcome.class(), Some(AvailabilityClass::NotPossible));
        assert_eq!(outcome.message(), "Availability: 0.0%");
    }

    #[test]
    fn test_service_unknown_availability() {
        let prediction = ServicePrediction::default();
        assert_eq!(prediction.availability_label(), "Unknown");
        assert_eq!(prediction.class(), AvailabilityClass::MostLikelyAvailable);
        assert_eq!(prediction.details(), "Zone: - | Model: - | Reason: -");
    }

    #[test]
    fn test_service_failures_never_use_local_sentence() {
        let rejected = PredictionOutcome::from_service(Ok(ApiReply::new(
            404,
            json!({ "error": "No zone mapping found for street 'Nowhere'." }),
        )));
        assert!(rejected.is_failure());
        assert_eq!(rejected.message(), "No zone mapping found for street 'Nowhere'.");

        let bare = PredictionOutcome::from_service(Ok(ApiReply::new(500, json!({}))));
        assert_eq!(bare.message(), SERVICE_ERROR_FALLBACK);

        let network = PredictionOutcome::from_service(Err(ApiError::Transport("refused".into())));
        assert_eq!(network.message(), "Network error: refused");
        assert_eq!(network.class(), None);

        let odd = PredictionOutcome::from_service(Ok(ApiReply::new(200, json!([1, 2]))));
        assert!(odd.is_failure());
    }

    #[test]
    fn test_incomplete_service_request_prompts_without_ticket() {
        let mut panel = PredictionPanel::new();
        panel.update_field(PredictionField::Location, "Collins St");
        assert!(panel.begin_request().is_none());
        assert!(!panel.is_pending());
        assert!(panel.is_flagged(PredictionField::Date));
        assert_eq!(panel.outcome().map(|o| o.message()), Some(INCOMPLETE_PROMPT));
    }

    #[test]
    fn test_stale_prediction_response_is_discarded() {
        let mut panel = PredictionPanel::new();
        panel.update_field(PredictionField::Location, "Collins St");
        panel.update_field(PredictionField::Date, "2024-05-01");
        panel.update_field(PredictionField::Time, "14:00");

        let first = panel.begin_request().unwrap();
        assert!(panel.is_pending());
        assert!(panel.outcome().is_none());
        let second = panel.begin_request().unwrap();

        assert!(!panel.finish_request(
            first.seq,
            Ok(ApiReply::new(200, json!({ "message": "old" })))
        ));
        assert!(panel.is_pending());
        assert!(panel.finish_request(
            second.seq,
            Ok(ApiReply::new(200, json!({ "message": "new" })))
        ));
        assert!(!panel.is_pending());
        assert_eq!(panel.outcome().map(|o| o.message()), Some("new"));
    }

    #[test]
    fn test_panel_submission_supersedes_previous_outcome() {
        let mut panel = PredictionPanel::new();
        assert!(panel.outcome().is_none());

        panel.submit();
        assert!(panel.is_flagged(PredictionField::Location));

        panel.update_field(PredictionField::Location, "Flinders St");
        panel.update_field(PredictionField::Date, "2024-05-01");
        panel.update_field(PredictionField::Time, "08:00");
        let outcome = panel.submit().clone();
        assert_eq!(outcome.class(), Some(AvailabilityClass::MostLikelyAvailable));
        assert!(!panel.is_flagged(PredictionField::Location));
        assert_eq!(panel.outcome(), Some(&outcome));
    }
}
