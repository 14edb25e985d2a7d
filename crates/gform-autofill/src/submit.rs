//! Single submission: POST a payload to a `formResponse` endpoint.

use tracing::{debug, info, warn};

use crate::config::FillerConfig;
use crate::http_client::HttpClient;
use crate::payload::SubmissionPayload;
use crate::types::{FormError, FormResult, SubmissionOutcome, SubmissionResult};

pub const ACCEPT_HEADER: &str = "application/json, text/javascript, */*; q=0.01";

/// Posts payloads with the headers the forms endpoint expects.
#[derive(Clone)]
pub struct Submitter {
    client: HttpClient,
    origin: String,
}

impl Submitter {
    pub fn new(config: &FillerConfig) -> FormResult<Self> {
        Ok(Self::with_client(HttpClient::new(config)?, config))
    }

    pub fn with_client(client: HttpClient, config: &FillerConfig) -> Self {
        Self {
            client,
            origin: config.forms_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Submit once and classify the outcome. Never fails: transport errors
    /// and rejections are recorded in the result.
    pub async fn submit_once(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
        attempt_index: u32,
    ) -> SubmissionResult {
        info!("submitting to {endpoint}");
        debug!("payload ({} keys): {}", payload.len(), payload.encode());

        let headers = [("Accept", ACCEPT_HEADER), ("Origin", self.origin.as_str())];
        let response = self
            .client
            .post_form(endpoint, &payload.to_form_pairs(), &headers)
            .await;

        match response {
            Ok(resp) => classify_status(resp.status, attempt_index),
            Err(e) => {
                warn!("submission {attempt_index}: no response from server: {e}");
                SubmissionResult {
                    attempt_index,
                    succeeded: false,
                    outcome: SubmissionOutcome::NetworkError,
                    http_status: None,
                    error_message: Some(e.to_string()),
                }
            }
        }
    }
}

/// Map an HTTP status to a submission result. Anything below 400 succeeds.
pub fn classify_status(status: u16, attempt_index: u32) -> SubmissionResult {
    let (outcome, error_message) = match status {
        200..=299 => {
            info!("submission {attempt_index}: accepted (HTTP {status})");
            (SubmissionOutcome::Accepted, None)
        }
        0..=399 => {
            warn!("submission {attempt_index}: unexpected response status {status}");
            (SubmissionOutcome::Redirected, None)
        }
        _ => {
            let err = FormError::SubmissionRejected { status };
            warn!("submission {attempt_index}: {err}");
            (SubmissionOutcome::Rejected, Some(err.to_string()))
        }
    };

    SubmissionResult {
        attempt_index,
        succeeded: status < 400,
        outcome,
        http_status: Some(status),
        error_message,
    }
}
