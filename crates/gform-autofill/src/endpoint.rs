//! Submission endpoint resolution from form URLs.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::DEFAULT_FORMS_BASE;
use crate::types::PUBLIC_FORM_ID_PREFIX;

fn public_view_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/forms/d/e/([^/]+)/viewform").expect("valid regex"))
}

fn direct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/forms/d/([^/]+)/(?:viewform|formResponse)").expect("valid regex")
    })
}

/// Resolve the `formResponse` endpoint on the public forms host.
pub fn resolve_endpoint(form_url: &str) -> String {
    resolve_endpoint_with_base(form_url, DEFAULT_FORMS_BASE)
}

/// Resolve the `formResponse` endpoint for a viewing URL or bare form id.
///
/// The id is taken from `/forms/d/e/<ID>/viewform`, then
/// `/forms/d/<ID>/(viewform|formResponse)`, then the whole input when it has
/// no `/`. Public ids (`1FAIpQL…`) map to `/forms/d/e/<ID>/formResponse`, the
/// rest to `/forms/d/<ID>/formResponse`. With no id, `/viewform` is replaced
/// textually.
pub fn resolve_endpoint_with_base(form_url: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');

    match extract_form_id(form_url) {
        Some(id) if id.starts_with(PUBLIC_FORM_ID_PREFIX) => {
            format!("{base}/forms/d/e/{id}/formResponse")
        }
        Some(id) => format!("{base}/forms/d/{id}/formResponse"),
        None => form_url
            .replacen("/viewform", "/formResponse", 1)
            .replacen("/formResponse/formResponse", "/formResponse", 1),
    }
}

/// Page to fetch the schema from. Full URLs pass through; a bare id is
/// expanded to its `viewform` page on `base`.
pub fn view_url_with_base(form_url: &str, base: &str) -> String {
    let trimmed = form_url.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return form_url.to_string();
    }
    let base = base.trim_end_matches('/');
    if trimmed.starts_with(PUBLIC_FORM_ID_PREFIX) {
        format!("{base}/forms/d/e/{trimmed}/viewform")
    } else {
        format!("{base}/forms/d/{trimmed}/viewform")
    }
}

/// Form id embedded in `form_url`, if any.
pub fn extract_form_id(form_url: &str) -> Option<&str> {
    let from_path = public_view_regex()
        .captures(form_url)
        .or_else(|| direct_regex().captures(form_url))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str());

    from_path.or_else(|| {
        let trimmed = form_url.trim();
        (!trimmed.is_empty() && !trimmed.contains('/')).then_some(trimmed)
    })
}

/// Whether `url` points at a form on the public forms host.
pub fn looks_like_form_url(url: &str) -> bool {
    url.contains("docs.google.com/forms")
}
