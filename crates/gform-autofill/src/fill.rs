//! Fill strategies: synthesize an answer for a field descriptor.
//!
//! Strategies are pure apart from randomness and the clock; they never do
//! I/O. An empty [`GeneratedValue`] means "leave this question unanswered".

use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FillerConfig;
use crate::types::{FieldDescriptor, FieldType, GeneratedValue, EMAIL_FIELD_ID};

/// Label that triggers the per-question override answer.
pub const SHORT_ANSWER_LABEL: &str = "Short answer";

/// Policy that converts a field into an answer.
pub trait FillStrategy: Send + Sync {
    fn generate(&self, field: &FieldDescriptor) -> GeneratedValue;
}

/// Default strategy: random valid choices, placeholder text, today's date and time.
#[derive(Debug, Clone)]
pub struct RandomFill {
    email: String,
    text_answer: String,
    short_answer_override: String,
}

/// Deterministic strategy: always the first option, like clicking the first
/// radio, checkbox, and dropdown entry on the page.
#[derive(Debug, Clone)]
pub struct FirstOptionFill {
    inner: RandomFill,
}

impl RandomFill {
    pub fn new(config: &FillerConfig) -> Self {
        Self {
            email: config.email.clone(),
            text_answer: config.text_answer.clone(),
            short_answer_override: config.short_answer_override.clone(),
        }
    }

    /// Answers that do not depend on option selection, or `None` for choice types.
    fn fixed_answer(&self, field: &FieldDescriptor) -> Option<GeneratedValue> {
        if field.id == EMAIL_FIELD_ID || field.field_type == FieldType::EmailAddress {
            return Some(self.email.as_str().into());
        }
        if field.label == SHORT_ANSWER_LABEL {
            return Some(self.short_answer_override.as_str().into());
        }

        match field.field_type {
            ft if ft.is_text() => Some(if field.required {
                self.text_answer.as_str().into()
            } else {
                GeneratedValue::empty()
            }),
            FieldType::Date => Some(today().into()),
            FieldType::Time => Some(now_hhmm().into()),
            ft if ft.has_options() => None,
            _ => Some(GeneratedValue::empty()),
        }
    }
}

impl Default for RandomFill {
    fn default() -> Self {
        Self::new(&FillerConfig::default())
    }
}

impl FillStrategy for RandomFill {
    fn generate(&self, field: &FieldDescriptor) -> GeneratedValue {
        if let Some(value) = self.fixed_answer(field) {
            return value;
        }

        let mut rng = rand::thread_rng();
        if field.field_type.is_single_choice() {
            field.options.choose(&mut rng).into()
        } else {
            pick_some(&field.options, &mut rng)
        }
    }
}

impl FirstOptionFill {
    pub fn new(config: &FillerConfig) -> Self {
        Self {
            inner: RandomFill::new(config),
        }
    }
}

impl Default for FirstOptionFill {
    fn default() -> Self {
        Self::new(&FillerConfig::default())
    }
}

impl FillStrategy for FirstOptionFill {
    fn generate(&self, field: &FieldDescriptor) -> GeneratedValue {
        if let Some(value) = self.inner.fixed_answer(field) {
            return value;
        }

        match (field.field_type, field.options.first()) {
            (FieldType::Checkboxes, Some(first)) => GeneratedValue::Multiple(vec![first.clone()]),
            (_, first) => first.into(),
        }
    }
}

/// Between 1 and `options.len()` distinct options, shuffled.
fn pick_some<R: Rng + ?Sized>(options: &[String], rng: &mut R) -> GeneratedValue {
    if options.is_empty() {
        return GeneratedValue::Multiple(Vec::new());
    }
    let count = rng.gen_range(1..=options.len());
    let mut shuffled = options.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    GeneratedValue::Multiple(shuffled)
}

/// Current local date as `YYYY-MM-DD`.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Current local time as zero-padded 24-hour `HH:MM`.
fn now_hhmm() -> String {
    Local::now().format("%H:%M").to_string()
}
