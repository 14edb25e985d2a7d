//! Form schema extraction from a form's viewing page.
//!
//! The page embeds its whole question list as a JSON array literal assigned
//! to a global in an inline script. That array is positional and
//! unversioned, so every index into it lives in this module; the rest of the
//! crate goes through [`RawFormPayload`], [`RawQuestion`] and [`RawSubEntry`].

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::http_client::HttpClient;
use crate::types::{FormError, FormResult};

/// Variable assignment that introduces the schema literal.
pub const SCHEMA_MARKER: &str = "var FB_PUBLIC_LOAD_DATA_";

fn schema_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)var FB_PUBLIC_LOAD_DATA_\s*=\s*(.*?);\s*$").expect("valid regex")
    })
}

fn script_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("script").expect("valid selector"))
}

/// Decoded schema blob of one form page.
#[derive(Debug, Clone)]
pub struct RawFormPayload {
    value: Value,
}

/// One question record from the schema's field list.
#[derive(Debug, Clone, Copy)]
pub struct RawQuestion<'a> {
    value: &'a Value,
}

/// One answerable slot inside a question (grids have one per row).
#[derive(Debug, Clone, Copy)]
pub struct RawSubEntry<'a> {
    value: &'a Value,
}

/// Fetch a form page and decode its embedded schema.
pub async fn fetch_schema(client: &HttpClient, url: &str) -> FormResult<RawFormPayload> {
    debug!("fetching form page {url}");
    let resp = client.get(url).await?;
    if resp.final_url != resp.url {
        debug!("form page redirected to {}", resp.final_url);
    }
    if resp.status >= 400 {
        return Err(FormError::SchemaFetch(format!(
            "GET {url} returned HTTP {}",
            resp.status
        )));
    }
    extract_schema(&resp.body)
}

/// Locate the schema script in `html` and parse its literal.
pub fn extract_schema(html: &str) -> FormResult<RawFormPayload> {
    let document = Html::parse_document(html);

    let script = document
        .select(script_selector())
        .map(|el| el.inner_html())
        .find(|text| text.contains(SCHEMA_MARKER))
        .ok_or_else(|| {
            FormError::SchemaParse("form data not found in page (login may be required)".into())
        })?;

    let literal = schema_regex()
        .captures(&script)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| FormError::SchemaParse("could not extract form data literal".into()))?;

    let value: Value = serde_json::from_str(literal)
        .map_err(|e| FormError::SchemaParse(format!("invalid form data: {e}")))?;

    RawFormPayload::from_value(value)
}

impl RawFormPayload {
    /// Wrap an already-decoded schema, checking the field list is present.
    pub fn from_value(value: Value) -> FormResult<Self> {
        if !value.is_array() {
            return Err(FormError::SchemaParse("form data is not an array".into()));
        }
        let fields = value.get(1).and_then(|c| c.get(1));
        match fields {
            Some(Value::Array(_)) => Ok(Self { value }),
            _ => Err(FormError::SchemaParse(
                "form entries missing (login may be required)".into(),
            )),
        }
    }

    /// Question records in form order. Null slots are skipped.
    pub fn questions(&self) -> impl Iterator<Item = RawQuestion<'_>> {
        self.value
            .get(1)
            .and_then(|c| c.get(1))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|q| q.is_array())
            .map(|value| RawQuestion { value })
    }

    /// Primary form identifier: slot 14, else the container's slot 7.
    pub fn form_identifier(&self) -> Option<String> {
        truthy_scalar(self.value.get(14))
            .or_else(|| truthy_scalar(self.value.get(1).and_then(|c| c.get(7))))
    }

    /// Long-lived session token: slot 19, else slot 14.
    pub fn session_token(&self) -> Option<String> {
        truthy_scalar(self.value.get(19)).or_else(|| truthy_scalar(self.value.get(14)))
    }

    /// Whether the form collects respondent email addresses.
    pub fn collects_email(&self) -> bool {
        self.value
            .get(1)
            .and_then(|c| c.get(10))
            .and_then(|s| s.get(6))
            .and_then(Value::as_f64)
            .map(|n| n > 1.0)
            .unwrap_or(false)
    }
}

impl<'a> RawQuestion<'a> {
    /// Question text. Empty when the schema has none.
    pub fn label(&self) -> &'a str {
        let value: &'a Value = self.value;
        value.get(1).and_then(Value::as_str).unwrap_or("")
    }

    /// Numeric type code, if present.
    pub fn type_code(&self) -> Option<i64> {
        self.value.get(3).and_then(Value::as_i64)
    }

    /// Answerable slots. Empty for decorative items and page breaks.
    pub fn sub_entries(&self) -> impl Iterator<Item = RawSubEntry<'a>> {
        let value: &'a Value = self.value;
        value
            .get(4)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|s| s.is_array())
            .map(|value| RawSubEntry { value })
    }
}

impl<'a> RawSubEntry<'a> {
    /// Entry id as submitted in `entry.<id>`.
    pub fn id(&self) -> Option<String> {
        truthy_scalar(self.value.get(0))
    }

    pub fn required(&self) -> bool {
        self.value.get(2).and_then(Value::as_i64) == Some(1)
    }

    /// Option texts from each option's first slot; `None` marks a blank
    /// ("Other") option. `None` overall when the slot carries no option list.
    pub fn options(&self) -> Option<Vec<Option<String>>> {
        let list = self.value.get(1)?.as_array()?;
        Some(
            list.iter()
                .map(|opt| {
                    opt.get(0)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .collect(),
        )
    }

    /// Row name for grid questions, joined with " - ".
    pub fn row_name(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .value
            .get(3)?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" - "))
        }
    }
}

/// Non-empty strings and non-zero numbers, rendered as strings.
fn truthy_scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
