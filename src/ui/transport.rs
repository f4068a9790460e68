//! Fetch-based transport for `/analyze`

use crate::core::analysis::{ANALYZE_ENDPOINT, AnalyzeRequest};
use crate::core::submission::{AnalyzeTransport, SubmitError, TransportResponse};

/// Posts to the page origin's `/analyze` through `fetch`
///
/// No timeout is set; the browser default applies.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl AnalyzeTransport for BrowserTransport {
    async fn post_analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<TransportResponse, SubmitError> {
        use gloo_net::http::Request;

        let response = Request::post(ANALYZE_ENDPOINT)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| SubmitError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))?;

        Ok(TransportResponse {
            status,
            status_text,
            body,
        })
    }
}
