//! Campaigns: repeated fetch, fill, and submit against one form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::FillerConfig;
use crate::endpoint::{resolve_endpoint_with_base, view_url_with_base};
use crate::fill::{FillStrategy, RandomFill};
use crate::interpret::interpret_schema;
use crate::payload::{build_payload, FormIdentity, SubmissionPayload};
use crate::progress::{self, ProgressEvent, ProgressSender};
use crate::report::{build_report, ReportEntry};
use crate::schema::{fetch_schema, RawFormPayload};
use crate::submit::Submitter;
use crate::types::{
    CampaignResult, FieldDescriptor, FormError, FormResult, SubmissionOutcome,
    SubmissionResult,
};

/// Cooperative abort flag, checked before every attempt.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    flag: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Everything one campaign needs: configuration, HTTP, and the fill policy.
///
/// Holds no per-campaign state, so one filler can drive several campaigns.
#[derive(Clone)]
pub struct FormFiller {
    config: FillerConfig,
    submitter: Submitter,
    strategy: Arc<dyn FillStrategy>,
}

impl FormFiller {
    /// Filler with the randomized default strategy.
    pub fn new(config: FillerConfig) -> FormResult<Self> {
        let submitter = Submitter::new(&config)?;
        let strategy = Arc::new(RandomFill::new(&config));
        Ok(Self {
            config,
            submitter,
            strategy,
        })
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn FillStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &FillerConfig {
        &self.config
    }

    /// Endpoint submissions for `form_url` are posted to.
    pub fn endpoint_for(&self, form_url: &str) -> String {
        resolve_endpoint_with_base(form_url, &self.config.forms_base)
    }

    /// Page the schema of `form_url` is fetched from.
    pub fn view_url_for(&self, form_url: &str) -> String {
        view_url_with_base(form_url, &self.config.forms_base)
    }

    async fn load_schema(&self, form_url: &str) -> FormResult<RawFormPayload> {
        if form_url.trim().is_empty() {
            return Err(FormError::InvalidInput("form URL is empty".into()));
        }
        fetch_schema(self.submitter.client(), &self.view_url_for(form_url)).await
    }

    /// Fetch the form and return its fields and identity.
    pub async fn fetch_fields(
        &self,
        form_url: &str,
        only_required: bool,
    ) -> FormResult<(Vec<FieldDescriptor>, FormIdentity)> {
        let raw = self.load_schema(form_url).await?;
        let fields = interpret_schema(&raw, only_required);
        Ok((fields, FormIdentity::from_schema(&raw)))
    }

    /// Fetch the form and build its inspection report.
    pub async fn inspect(
        &self,
        form_url: &str,
        only_required: bool,
    ) -> FormResult<Vec<ReportEntry>> {
        let raw = self.load_schema(form_url).await?;
        Ok(build_report(&raw, only_required))
    }

    /// Fetch the form and synthesize one fresh payload.
    pub async fn generate_request_body(
        &self,
        form_url: &str,
        only_required: bool,
    ) -> FormResult<SubmissionPayload> {
        let (fields, identity) = self.fetch_fields(form_url, only_required).await?;
        Ok(build_payload(&fields, &identity, self.strategy.as_ref()))
    }

    /// Submit a payload once to the endpoint derived from `form_url`.
    pub async fn submit(
        &self,
        form_url: &str,
        payload: &SubmissionPayload,
        attempt_index: u32,
    ) -> SubmissionResult {
        let endpoint = self.endpoint_for(form_url);
        self.submitter
            .submit_once(&endpoint, payload, attempt_index)
            .await
    }

    /// Run `times` sequential attempts against `form_url`.
    ///
    /// Every attempt refetches the schema and regenerates its payload. One
    /// progress event follows each attempt. A schema error on the first
    /// attempt is returned as `Err`; on a later attempt it is recorded as a
    /// failed attempt and ends the campaign. Submission failures are recorded
    /// and the campaign moves on.
    pub async fn run_campaign(
        &self,
        form_url: &str,
        only_required: bool,
        times: u32,
        progress: Option<ProgressSender>,
        abort: Option<&AbortSignal>,
    ) -> FormResult<CampaignResult> {
        info!("processing form: {form_url} ({times} submissions)");

        let endpoint = self.endpoint_for(form_url);
        let mut result = CampaignResult {
            total: times,
            ..CampaignResult::default()
        };

        for attempt in 1..=times {
            if abort.is_some_and(AbortSignal::is_aborted) {
                warn!("campaign aborted before attempt {attempt}");
                result.stopped_early = Some("aborted".to_string());
                break;
            }

            info!("submission {attempt}/{times}");
            let outcome = match self.generate_request_body(form_url, only_required).await {
                Ok(payload) => {
                    self.submitter
                        .submit_once(&endpoint, &payload, attempt)
                        .await
                }
                Err(e) if attempt == 1 || !e.is_schema_error() => return Err(e),
                Err(e) => {
                    warn!("submission {attempt}: {e}");
                    result.stopped_early = Some(e.to_string());
                    SubmissionResult {
                        attempt_index: attempt,
                        succeeded: false,
                        outcome: SubmissionOutcome::SchemaError,
                        http_status: None,
                        error_message: Some(e.to_string()),
                    }
                }
            };

            if outcome.succeeded {
                result.successful += 1;
            } else {
                result.failed += 1;
            }
            result.attempts.push(outcome);

            progress::emit(
                &progress,
                ProgressEvent {
                    current: attempt,
                    total: times,
                    successful: result.successful,
                    failed: result.failed,
                },
            );

            if result.stopped_early.is_some() {
                break;
            }

            if times > 1 && attempt < times && !self.config.delay().is_zero() {
                tokio::time::sleep(self.config.delay()).await;
            }
        }

        info!(
            "completed {} submissions. success: {}, failed: {}",
            result.attempts.len(),
            result.successful,
            result.failed
        );
        Ok(result)
    }
}
