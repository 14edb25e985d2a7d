//! Field interpretation: raw schema records to [`FieldDescriptor`]s.

use std::collections::HashSet;

use tracing::debug;

use crate::schema::{RawFormPayload, RawQuestion};
use crate::types::{FieldDescriptor, FieldType, EMAIL_FIELD_ID};

/// Label given to the synthesized email field.
pub const EMAIL_FIELD_LABEL: &str = "Email Address";

/// Normalize every answerable slot of the form.
///
/// Each sub-entry of a question becomes its own descriptor sharing the
/// question label. Page breaks and items without sub-entries produce
/// nothing. Duplicate ids keep their first occurrence. The `only_required`
/// filter runs after normalization, and a form that collects email gets a
/// trailing required `emailAddress` descriptor.
pub fn interpret_schema(raw: &RawFormPayload, only_required: bool) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();
    let mut fields: Vec<FieldDescriptor> = raw
        .questions()
        .filter(|q| field_type(q) != FieldType::PageBreak)
        .flat_map(|q| describe_question(&q))
        .filter(|f| seen.insert(f.id.clone()))
        .collect();

    if raw.collects_email() && seen.insert(EMAIL_FIELD_ID.to_string()) {
        fields.push(email_descriptor());
    }

    if only_required {
        fields.retain(|f| f.required);
    }

    debug!(
        "interpreted {} field(s) across {} page(s)",
        fields.len(),
        page_count(raw) + 1
    );
    fields
}

/// Number of page breaks in the form.
pub fn page_count(raw: &RawFormPayload) -> usize {
    raw.questions()
        .filter(|q| field_type(q) == FieldType::PageBreak)
        .count()
}

pub fn email_descriptor() -> FieldDescriptor {
    FieldDescriptor {
        id: EMAIL_FIELD_ID.to_string(),
        field_type: FieldType::EmailAddress,
        required: true,
        label: EMAIL_FIELD_LABEL.to_string(),
        row: None,
        options: Vec::new(),
        accepts_other: false,
    }
}

fn field_type(q: &RawQuestion<'_>) -> FieldType {
    q.type_code()
        .map(FieldType::from_code)
        .unwrap_or(FieldType::Unknown(-1))
}

fn describe_question(q: &RawQuestion<'_>) -> Vec<FieldDescriptor> {
    let field_type = field_type(q);
    let label = q.label();

    q.sub_entries()
        .filter_map(|sub| {
            let id = sub.id()?;
            let raw_options = if field_type.has_options() {
                sub.options().unwrap_or_default()
            } else {
                Vec::new()
            };
            let accepts_other = raw_options.iter().any(Option::is_none);
            let options = raw_options.into_iter().flatten().collect();

            Some(FieldDescriptor {
                id,
                field_type,
                required: sub.required(),
                label: label.to_string(),
                row: sub.row_name(),
                options,
                accepts_other,
            })
        })
        .collect()
}
