//! CLI subcommand implementations.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use gform_autofill::endpoint::looks_like_form_url;
use gform_autofill::{FillerConfig, FirstOptionFill, FormFiller};

pub mod inspect_cmd;
pub mod payload_cmd;
pub mod submit_cmd;

/// Options shared by every command that generates answers.
#[derive(Args, Debug, Clone)]
pub struct FillArgs {
    /// Only include required fields
    #[arg(long, short)]
    pub required: bool,

    /// Always pick the first option instead of a random one
    #[arg(long)]
    pub first_option: bool,

    /// Answer for email-collecting forms (env GFORM_EMAIL)
    #[arg(long)]
    pub email: Option<String>,

    /// Request timeout in milliseconds (default 8000, env GFORM_TIMEOUT_MS)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Forms host used for submissions (env GFORM_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl FillArgs {
    /// Environment configuration with explicit flags layered on top.
    pub fn config(&self) -> FillerConfig {
        let mut config = FillerConfig::from_env();
        if let Some(email) = &self.email {
            config = config.with_email(email.clone());
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout_ms(ms);
        }
        if let Some(base) = &self.base_url {
            config = config.with_forms_base(base.clone());
        }
        config
    }

    pub fn filler(&self, config: FillerConfig) -> Result<FormFiller> {
        let filler = FormFiller::new(config.clone()).context("failed to build HTTP client")?;
        Ok(if self.first_option {
            filler.with_strategy(Arc::new(FirstOptionFill::new(&config)))
        } else {
            filler
        })
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn print_json(&self, value: &serde_json::Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{value}"),
        }
    }
}

/// Warn when the URL is not on the forms host; the run still proceeds.
pub fn check_form_url(url: &str) {
    if url.contains('/') && !looks_like_form_url(url) {
        tracing::warn!("{url} does not look like a Google Form URL");
    }
}
