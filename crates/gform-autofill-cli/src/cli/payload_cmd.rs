//! `gform-autofill payload <url>`: print one generated payload without sending it.

use anyhow::{Context, Result};

use super::{check_form_url, FillArgs, Output};

/// Run the payload command.
pub async fn run(url: &str, fill: &FillArgs, out: Output) -> Result<()> {
    check_form_url(url);

    let filler = fill.filler(fill.config())?;
    let endpoint = filler.endpoint_for(url);
    let payload = filler
        .generate_request_body(url, fill.required)
        .await
        .with_context(|| format!("failed to read form at {url}"))?;

    if out.json {
        out.print_json(&serde_json::json!({
            "endpoint": endpoint,
            "payload": payload.to_json(),
        }));
    } else {
        println!("Endpoint: {endpoint}");
        out.print_json(&payload.to_json());
    }
    Ok(())
}
