//! `gform-autofill inspect <url>`: list a form's entries.

use anyhow::{Context, Result};
use gform_autofill::report::format_for_autofill;
use gform_autofill::{FillerConfig, FormFiller};

use super::{check_form_url, Output};

/// Run the inspect command.
pub async fn run(url: &str, required: bool, out: Output) -> Result<()> {
    check_form_url(url);

    let filler = FormFiller::new(FillerConfig::from_env())
        .context("failed to build HTTP client")?;
    let entries = filler
        .inspect(url, required)
        .await
        .with_context(|| format!("failed to read form at {url}"))?;

    if out.json {
        out.print_json(&serde_json::to_value(&entries)?);
    } else {
        println!("Form response URL: {}", filler.endpoint_for(url));
        println!("{}", format_for_autofill(&entries));
    }
    Ok(())
}
