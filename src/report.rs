//! Plain-text rendering of a finished trends lookup for the headless mode.

use std::process::ExitCode;

use crate::trends::{TrendsPanel, TrendsState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsReport {
    /// Status line, then the summary line and pretty payload when loaded.
    pub lines: Vec<String>,
    pub loaded: bool,
}

impl TrendsReport {
    pub fn from_panel(panel: &TrendsPanel) -> Self {
        let mut lines = vec![panel.status().to_string()];
        if let Some(summary) = panel.summary() {
            lines.push(summary.summary_line());
        }
        if let Some(pretty) = panel.pretty_payload() {
            lines.push(pretty);
        }
        Self {
            lines,
            loaded: matches!(panel.state(), TrendsState::Loaded(_)),
        }
    }

    /// Success only for a loaded payload.
    pub fn exit_code(&self) -> ExitCode {
        if self.loaded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::{ApiError, ApiReply};

    fn finished(result: Result<ApiReply, ApiError>) -> TrendsPanel {
        let mut panel = TrendsPanel::new();
        panel.update_area("Swanston Street");
        let ticket = panel.begin_load().unwrap();
        panel.finish_load(ticket.seq, result);
        panel
    }

    #[test]
    fn test_loaded_grid_prints_status_summary_and_payload() {
        let panel = finished(Ok(ApiReply::new(
            200,
            json!({
                "message": "OK",
                "zones": ["7539"],
                "samples_total": 3,
                "matrix": [{ "dow": 0, "hour": 8, "availability": 0.5, "n": 3 }]
            }),
        )));
        let report = TrendsReport::from_panel(&panel);

        assert!(report.loaded);
        assert_eq!(report.lines.len(), 3);
        assert_eq!(report.lines[0], "OK");
        assert_eq!(report.lines[1], "Zones: 7539 - Samples: 3");
        assert!(report.lines[2].contains("\"matrix\""));
        assert_eq!(report.exit_code(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_loaded_without_grid_prints_status_and_payload() {
        let panel = finished(Ok(ApiReply::new(200, json!({ "message": "OK" }))));
        let report = TrendsReport::from_panel(&panel);
        assert!(report.loaded);
        assert_eq!(report.lines.len(), 2);
        assert!(report.render().starts_with("OK\n{"));
    }

    #[test]
    fn test_failed_lookup_exits_with_failure() {
        let panel = finished(Ok(ApiReply::new(404, json!({ "error": "Not found" }))));
        let report = TrendsReport::from_panel(&panel);
        assert!(!report.loaded);
        assert_eq!(report.render(), "Not found");
        assert_eq!(report.exit_code(), ExitCode::FAILURE);

        let panel = finished(Err(ApiError::Transport("refused".into())));
        assert_eq!(
            TrendsReport::from_panel(&panel).exit_code(),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn test_blank_lookup_exits_with_failure() {
        let mut panel = TrendsPanel::new();
        assert!(panel.begin_load().is_none());
        let report = TrendsReport::from_panel(&panel);
        assert_eq!(report.render(), "Please input a street name");
        assert_eq!(report.exit_code(), ExitCode::FAILURE);
    }
}
