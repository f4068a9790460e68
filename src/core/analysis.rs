//! Wire types for the `/analyze` endpoint
//!
//! The backend answers with a flat JSON object whose fields are all optional.
//! Failures carry a `detail` field and a non-2xx status.

use serde::{Deserialize, Serialize};

/// Endpoint the browser posts queries to
pub const ANALYZE_ENDPOINT: &str = "/analyze";

pub const NO_CHANGES: &str = "(no changes)";
pub const NO_RATIONALE: &str = "(optimizer did not provide a rationale)";
pub const NO_VALIDATION_REPORT: &str = "No validation report.";
pub const NO_COST_ESTIMATION: &str = "No cost estimation.";
pub const NO_SCHEMA_SUGGESTIONS: &str = "No schema suggestions.";

/// Request body sent to the analysis backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub sql_query: String,
}

impl AnalyzeRequest {
    pub fn new(sql_query: impl Into<String>) -> Self {
        Self {
            sql_query: sql_query.into(),
        }
    }
}

/// Result of one analysis pass
///
/// Lives for the duration of a single render and is then dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub original_query: Option<String>,
    #[serde(default)]
    pub optimized_query: Option<String>,
    #[serde(default)]
    pub optimization_rationale: Option<String>,
    #[serde(default)]
    pub validation_report: Option<String>,
    #[serde(default)]
    pub cost_estimation: Option<String>,
    #[serde(default)]
    pub schema_suggestions: Option<String>,
}

impl AnalysisResult {
    pub fn original_query(&self) -> &str {
        non_empty(&self.original_query).unwrap_or("")
    }

    pub fn optimized_query(&self) -> &str {
        non_empty(&self.optimized_query).unwrap_or("")
    }

    pub fn optimization_rationale(&self) -> Option<&str> {
        non_empty(&self.optimization_rationale)
    }

    pub fn validation_report(&self) -> &str {
        non_empty(&self.validation_report).unwrap_or(NO_VALIDATION_REPORT)
    }

    pub fn cost_estimation(&self) -> &str {
        non_empty(&self.cost_estimation).unwrap_or(NO_COST_ESTIMATION)
    }

    pub fn schema_suggestions(&self) -> &str {
        non_empty(&self.schema_suggestions).unwrap_or(NO_SCHEMA_SUGGESTIONS)
    }
}

/// Error body returned alongside a non-2xx status
///
/// `detail` is usually a string, but validation failures may send a list of
/// objects instead.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human readable detail, if the body carried a usable one
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Empty strings are treated the same as missing fields
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_sql_query_field() {
        let body = serde_json::to_value(AnalyzeRequest::new("SELECT 1")).unwrap();
        assert_eq!(body, serde_json::json!({ "sql_query": "SELECT 1" }));
    }

    #[test]
    fn test_result_accepts_missing_and_null_fields() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"original_query":"SELECT 1","cost_estimation":null}"#)
                .unwrap();

        assert_eq!(result.original_query(), "SELECT 1");
        assert_eq!(result.optimized_query(), "");
        assert_eq!(result.cost_estimation(), NO_COST_ESTIMATION);
        assert_eq!(result.validation_report(), NO_VALIDATION_REPORT);
        assert_eq!(result.schema_suggestions(), NO_SCHEMA_SUGGESTIONS);
        assert!(result.optimization_rationale().is_none());
    }

    #[test]
    fn test_empty_strings_use_placeholders() {
        let result = AnalysisResult {
            validation_report: Some(String::new()),
            optimization_rationale: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(result.validation_report(), NO_VALIDATION_REPORT);
        assert!(result.optimization_rationale().is_none());
    }

    #[test]
    fn test_error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"invalid query"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("invalid query"));
    }

    #[test]
    fn test_error_body_structured_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","sql_query"],"msg":"field required"}]}"#)
                .unwrap();
        let message = body.message().unwrap();
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(body.message().is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert!(body.message().is_none());
    }
}
