//! Core data types for form fields, generated answers, and submission results.

use serde::{Deserialize, Serialize};

/// Prefix carried by public form identifiers (`/forms/d/e/<ID>/...`).
pub const PUBLIC_FORM_ID_PREFIX: &str = "1FAIpQL";

/// Descriptor id used for the synthesized email-collection field.
pub const EMAIL_FIELD_ID: &str = "emailAddress";

/// Kind of a form question, decoded from the numeric type code in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    ShortAnswer,
    Paragraph,
    MultipleChoice,
    Dropdown,
    Checkboxes,
    LinearScale,
    Grid,
    /// Section separator. Only used to count pages, never answered.
    PageBreak,
    Date,
    Time,
    /// Synthesized for forms that collect the respondent's email.
    EmailAddress,
    /// Any code not listed above. Fills to an empty value.
    Unknown(i64),
}

impl FieldType {
    /// Decode a raw schema type code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::ShortAnswer,
            1 => Self::Paragraph,
            2 => Self::MultipleChoice,
            3 => Self::Dropdown,
            4 => Self::Checkboxes,
            5 => Self::LinearScale,
            7 => Self::Grid,
            8 => Self::PageBreak,
            9 => Self::Date,
            10 => Self::Time,
            other => Self::Unknown(other),
        }
    }

    /// Whether the schema carries an option list for this type.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::Dropdown | Self::Checkboxes | Self::LinearScale | Self::Grid
        )
    }

    /// Whether exactly one option is submitted for this type.
    pub fn is_single_choice(&self) -> bool {
        matches!(
            self,
            Self::MultipleChoice | Self::Dropdown | Self::LinearScale | Self::Grid
        )
    }

    /// Free-text types answered with the placeholder text.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::ShortAnswer | Self::Paragraph)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShortAnswer => write!(f, "short answer"),
            Self::Paragraph => write!(f, "paragraph"),
            Self::MultipleChoice => write!(f, "multiple choice"),
            Self::Dropdown => write!(f, "dropdown"),
            Self::Checkboxes => write!(f, "checkboxes"),
            Self::LinearScale => write!(f, "linear scale"),
            Self::Grid => write!(f, "grid"),
            Self::PageBreak => write!(f, "page break"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::EmailAddress => write!(f, "required"),
            Self::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

/// A normalized, answerable form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Entry id, submitted as `entry.<id>`.
    pub id: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Question text of the containing question.
    pub label: String,
    /// Row name for grid questions, `None` otherwise.
    pub row: Option<String>,
    /// Option texts in schema order. Empty for free-form types.
    pub options: Vec<String>,
    /// The question offers a free-text "Other" choice.
    pub accepts_other: bool,
}

impl FieldDescriptor {
    /// The wire key this field is submitted under. The synthesized email
    /// field goes out as bare `emailAddress`, not `entry.emailAddress`.
    pub fn entry_key(&self) -> String {
        if self.id == EMAIL_FIELD_ID {
            return EMAIL_FIELD_ID.to_string();
        }
        format!("entry.{}", self.id)
    }
}

/// An answer produced by a fill strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    Single(String),
    Multiple(Vec<String>),
}

impl GeneratedValue {
    /// The empty answer. Empty answers are omitted from the submission.
    pub fn empty() -> Self {
        Self::Single(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multiple(v) => v.is_empty(),
        }
    }

    /// Flatten into the list of values submitted under one key.
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Multiple(v) => v,
        }
    }
}

impl From<&str> for GeneratedValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for GeneratedValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Option<&String>> for GeneratedValue {
    fn from(s: Option<&String>) -> Self {
        s.map(|s| Self::Single(s.clone())).unwrap_or_else(Self::empty)
    }
}

/// How a single submission attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// 2xx response.
    Accepted,
    /// 3xx response that was not followed. Reported as a warning.
    Redirected,
    /// Status 400 or above.
    Rejected,
    /// No response reached us.
    NetworkError,
    /// The form schema could not be fetched or decoded for this attempt.
    SchemaError,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// 1-based attempt number within the campaign.
    pub attempt_index: u32,
    pub succeeded: bool,
    pub outcome: SubmissionOutcome,
    pub http_status: Option<u16>,
    pub error_message: Option<String>,
}

/// Aggregate result of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResult {
    /// Requested number of attempts.
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    pub attempts: Vec<SubmissionResult>,
    /// Set when the campaign ended before `total` attempts ran.
    pub stopped_early: Option<String>,
}

/// Errors that can occur while filling or submitting a form.
#[derive(thiserror::Error, Debug)]
pub enum FormError {
    #[error("Schema fetch error: {0}")]
    SchemaFetch(String),

    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    #[error("Submission network error: {0}")]
    SubmissionNetwork(String),

    #[error("Submission rejected with HTTP {status}")]
    SubmissionRejected { status: u16 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FormError {
    /// Failure to fetch or decode the form schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::SchemaFetch(_) | Self::SchemaParse(_))
    }
}

/// Convenience result type.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_codes() {
        assert_eq!(FieldType::from_code(0), FieldType::ShortAnswer);
        assert_eq!(FieldType::from_code(4), FieldType::Checkboxes);
        assert_eq!(FieldType::from_code(7), FieldType::Grid);
        assert_eq!(FieldType::from_code(8), FieldType::PageBreak);
        assert_eq!(FieldType::from_code(10), FieldType::Time);
        assert_eq!(FieldType::from_code(6), FieldType::Unknown(6));
        assert_eq!(FieldType::from_code(42), FieldType::Unknown(42));
    }

    #[test]
    fn test_option_bearing_types() {
        let with: Vec<i64> = (0..12)
            .filter(|c| FieldType::from_code(*c).has_options())
            .collect();
        assert_eq!(with, vec![2, 3, 4, 5, 7]);
        assert!(!FieldType::Checkboxes.is_single_choice());
        assert!(FieldType::Grid.is_single_choice());
    }

    #[test]
    fn test_generated_value_emptiness() {
        assert!(GeneratedValue::empty().is_empty());
        assert!(GeneratedValue::Multiple(vec![]).is_empty());
        assert!(!GeneratedValue::from("x").is_empty());
        assert!(GeneratedValue::from(None).is_empty());
    }

    #[test]
    fn test_generated_value_serializes_untagged() {
        let single = serde_json::to_string(&GeneratedValue::from("a")).unwrap();
        assert_eq!(single, "\"a\"");
        let multi =
            serde_json::to_string(&GeneratedValue::Multiple(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(multi, "[\"a\",\"b\"]");
    }

    #[test]
    fn test_entry_key() {
        let mut field = FieldDescriptor {
            id: "12345".into(),
            field_type: FieldType::ShortAnswer,
            required: true,
            label: "Name".into(),
            row: None,
            options: vec![],
            accepts_other: false,
        };
        assert_eq!(field.entry_key(), "entry.12345");
        field.id = EMAIL_FIELD_ID.into();
        assert_eq!(field.entry_key(), "emailAddress");
    }

    #[test]
    fn test_schema_error_classification() {
        assert!(FormError::SchemaParse("x".into()).is_schema_error());
        assert!(FormError::SchemaFetch("x".into()).is_schema_error());
        assert!(!FormError::SubmissionRejected { status: 400 }.is_schema_error());
    }
}
