//! Human-readable inspection report of a form's entries.
//!
//! This is a display contract, separate from the wire payload: the report
//! lists a `pageHistory` entry whose default covers every page, while
//! submissions always send `pageHistory=0`.

use serde::Serialize;

use crate::interpret::{interpret_schema, page_count};
use crate::payload::KEY_PAGE_HISTORY;
use crate::schema::RawFormPayload;
use crate::types::{FieldDescriptor, FieldType};

/// Placeholder shown for a free-text "Other" option.
pub const ANY_TEXT_OPTION: &str = "ANY TEXT!!";

/// How the options of a report entry are described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionHint {
    List(Vec<String>),
    Note(String),
}

/// One line item of the inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Wire key, e.g. `entry.123`.
    pub key: String,
    /// Question label the entry belongs to.
    pub container: String,
    pub field_type: String,
    pub required: bool,
    pub options: Option<OptionHint>,
    pub default_value: Option<String>,
}

/// Build the report entries for a decoded form.
pub fn build_report(raw: &RawFormPayload, only_required: bool) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = interpret_schema(raw, only_required)
        .iter()
        .map(report_entry)
        .collect();

    let pages = page_count(raw);
    if pages > 0 {
        entries.push(ReportEntry {
            key: KEY_PAGE_HISTORY.to_string(),
            container: "Page History".to_string(),
            field_type: "required".to_string(),
            required: false,
            options: Some(OptionHint::Note(
                "from 0 to (number of page - 1)".to_string(),
            )),
            default_value: Some(page_history_default(pages)),
        });
    }

    entries
}

/// `"0,1,…,pages"`: every page index a full walk through the form visits.
pub fn page_history_default(pages: usize) -> String {
    (0..=pages)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn report_entry(field: &FieldDescriptor) -> ReportEntry {
    let container = match &field.row {
        Some(row) => format!("{} [{row}]", field.label),
        None => field.label.clone(),
    };

    let options = match field.field_type {
        FieldType::EmailAddress => Some(OptionHint::Note("email address".to_string())),
        ft if ft.has_options() => {
            let mut list = field.options.clone();
            if field.accepts_other {
                list.push(ANY_TEXT_OPTION.to_string());
            }
            Some(OptionHint::List(list))
        }
        _ => None,
    };

    ReportEntry {
        key: field.entry_key(),
        container,
        field_type: field.field_type.to_string(),
        required: field.required,
        options,
        default_value: None,
    }
}

/// Render entries as a commented key template ready to fill in.
pub fn format_for_autofill(entries: &[ReportEntry]) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }

    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!("    # {}", entry.container));
        match &entry.options {
            Some(OptionHint::List(list)) => {
                let json = serde_json::to_string(list).unwrap_or_default();
                lines.push(format!("    #   Options: {json}"));
            }
            Some(OptionHint::Note(note)) => lines.push(format!("    #   Options: {note}")),
            None => {}
        }
        let value = entry.default_value.as_deref().unwrap_or("");
        lines.push(format!("    \"{}\": \"{value}\",", entry.key));
    }

    if let Some(last) = lines.last_mut() {
        last.pop();
    }
    format!("{{\n{}\n}}", lines.join("\n"))
}
