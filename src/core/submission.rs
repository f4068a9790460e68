//! Query submission flow
//!
//! Posts a query through an [`AnalyzeTransport`] and turns whatever comes back
//! into a [`ResultView`]. The browser plugs in a fetch-based transport; tests
//! plug in canned responses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::analysis::{AnalysisResult, AnalyzeRequest, ErrorBody};
use crate::core::report;

/// Errors that abort a submission before a response can be rendered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    #[error("Element #{0} not found")]
    MissingElement(&'static str),
}

/// Raw HTTP response as seen by the submission flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can deliver an [`AnalyzeRequest`] to `/analyze`
#[allow(async_fn_in_trait)]
pub trait AnalyzeTransport {
    async fn post_analyze(&self, request: &AnalyzeRequest) -> Result<TransportResponse, SubmitError>;
}

/// What the result container should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Loading,
    /// Fully rendered report HTML
    Report(String),
    /// Non-2xx response with the server detail or status text
    Error(String),
    /// Anything thrown along the way
    Exception(String),
}

impl ResultView {
    pub fn is_report(&self) -> bool {
        matches!(self, ResultView::Report(_))
    }

    pub fn to_html(&self) -> String {
        match self {
            ResultView::Loading => report::render_loading(),
            ResultView::Report(html) => html.clone(),
            ResultView::Error(message) => report::render_error(message),
            ResultView::Exception(message) => report::render_exception(message),
        }
    }
}

impl From<SubmitError> for ResultView {
    fn from(err: SubmitError) -> Self {
        ResultView::Exception(err.to_string())
    }
}

/// Submit one query and build the view for its outcome
pub async fn submit_query<T: AnalyzeTransport>(transport: &T, query: &str) -> ResultView {
    let request = AnalyzeRequest::new(query);

    let response = match transport.post_analyze(&request).await {
        Ok(response) => response,
        Err(err) => return err.into(),
    };

    if !response.is_success() {
        return ResultView::Error(error_message(&response));
    }

    match serde_json::from_str::<AnalysisResult>(&response.body) {
        Ok(result) => ResultView::Report(report::render_report(&result)),
        Err(err) => SubmitError::Decode(err.to_string()).into(),
    }
}

/// Server detail if present, else the status text
fn error_message(response: &TransportResponse) -> String {
    if let Some(detail) = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message())
    {
        return detail;
    }

    if !response.status_text.is_empty() {
        return response.status_text.clone();
    }

    canonical_reason(response.status)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}

fn canonical_reason(status: u16) -> Option<&'static str> {
    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    };
    Some(reason)
}

/// Ticket identifying one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// Monotonic submission counter used to drop stale responses
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, superseding every earlier ticket
    pub fn begin(&self) -> SubmissionTicket {
        SubmissionTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer submission has started since `ticket`
    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
