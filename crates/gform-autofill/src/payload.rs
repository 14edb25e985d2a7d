//! Submission payload assembly and url-encoding.

use serde_json::{Map, Value};

use crate::fill::FillStrategy;
use crate::schema::RawFormPayload;
use crate::types::{FieldDescriptor, PUBLIC_FORM_ID_PREFIX};

pub const KEY_FBZX: &str = "fbzx";
pub const KEY_FVV: &str = "fvv";
pub const KEY_DRAFT_RESPONSE: &str = "draftResponse";
pub const KEY_PAGE_HISTORY: &str = "pageHistory";

/// Protocol metadata the endpoint requires on every submission.
pub const FIXED_METADATA: [(&str, &str); 3] = [
    (KEY_FVV, "1"),
    (KEY_DRAFT_RESPONSE, "[]"),
    (KEY_PAGE_HISTORY, "0"),
];

/// Identifiers of a form used to pick the `fbzx` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormIdentity {
    /// Form identifier found in the schema.
    pub primary: Option<String>,
    /// Long-lived session token found in the schema.
    pub session_token: Option<String>,
}

impl FormIdentity {
    pub fn from_schema(raw: &RawFormPayload) -> Self {
        Self {
            primary: raw.form_identifier(),
            session_token: raw.session_token(),
        }
    }

    /// Value for the `fbzx` key.
    ///
    /// Public identifiers are sent as-is; otherwise the session token, falling
    /// back to the primary identifier. `None` when the schema has neither.
    pub fn fbzx(&self) -> Option<&str> {
        let primary = self.primary.as_deref()?;
        if primary.starts_with(PUBLIC_FORM_ID_PREFIX) {
            return Some(primary);
        }
        Some(self.session_token.as_deref().unwrap_or(primary))
    }
}

/// Ordered key/values for one submission. A key holding several values is
/// sent as repeated pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    entries: Vec<(String, Vec<String>)>,
}

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, after any values already there.
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key.to_string(), vec![value])),
        }
    }

    /// Replace every value under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.retain(|(k, _)| k != key);
        self.entries.push((key.to_string(), vec![value.into()]));
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `(key, value)` pair per value; empty values are dropped.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| {
                values
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(move |v| (k.clone(), v.clone()))
            })
            .collect()
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.to_form_pairs() {
            serializer.append_pair(&k, &v);
        }
        serializer.finish()
    }

    /// JSON view: single values as strings, repeated keys as arrays.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, values)| {
                let v = match values.as_slice() {
                    [single] => Value::String(single.clone()),
                    many => Value::Array(many.iter().cloned().map(Value::String).collect()),
                };
                (k.clone(), v)
            })
            .collect();
        Value::Object(map)
    }
}

/// Fill every field and assemble the submission payload.
///
/// Empty answers are skipped. Multi-value answers accumulate under the same
/// entry key. The fixed metadata keys are always appended last.
pub fn build_payload(
    fields: &[FieldDescriptor],
    identity: &FormIdentity,
    strategy: &dyn FillStrategy,
) -> SubmissionPayload {
    let mut payload = SubmissionPayload::new();

    for field in fields {
        let value = strategy.generate(field);
        if value.is_empty() {
            continue;
        }
        let key = field.entry_key();
        for v in value.into_values() {
            payload.append(&key, v);
        }
    }

    if let Some(fbzx) = identity.fbzx() {
        payload.set(KEY_FBZX, fbzx);
    }

    for (key, value) in FIXED_METADATA {
        payload.set(key, value);
    }

    payload
}
