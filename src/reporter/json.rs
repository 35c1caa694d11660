//! JSON reporter for machine-readable output

use crate::{BatchSummary, CandidateReport};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single scored candidate as JSON
    pub fn report(&self, report: &CandidateReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report multiple candidates as a JSON array
    pub fn report_many(&self, reports: &[CandidateReport]) -> String {
        self.to_json(&reports, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[CandidateReport], summary: &BatchSummary) -> String {
        let output = JsonOutput {
            results: reports,
            summary,
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let out = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        out.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [CandidateReport],
    summary: &'a BatchSummary,
}
