//! `gform-autofill submit <url>`: fill and submit a form repeatedly.

use anyhow::{Context, Result};
use gform_autofill::progress::{self, ProgressReceiver};
use gform_autofill::AbortSignal;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use super::{check_form_url, FillArgs, Output};

/// Run the submit command.
pub async fn run(
    url: &str,
    count: u32,
    fill: &FillArgs,
    delay_ms: Option<u64>,
    out: Output,
) -> Result<()> {
    check_form_url(url);

    let mut config = fill.config();
    if let Some(ms) = delay_ms {
        config = config.with_delay_ms(ms);
    }
    let filler = fill.filler(config)?;
    info!(
        "{count} submission(s), {} ms apart",
        filler.config().delay_ms
    );

    let abort = AbortSignal::new();
    let abort_on_signal = abort.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received interrupt, stopping after the current submission");
        abort_on_signal.abort();
    });

    let (tx, rx) = progress::channel();
    let bar = if out.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(u64::from(count))
    };
    bar.set_style(
        ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    let bar_task = tokio::spawn(drive_bar(bar, rx));

    let result = filler
        .run_campaign(url, fill.required, count, Some(tx), Some(&abort))
        .await
        .with_context(|| format!("failed to process {url}"));
    // The sender is dropped with the campaign, which closes the bar.
    let _ = bar_task.await;
    let result = result?;

    if out.json {
        out.print_json(&serde_json::to_value(&result)?);
    } else {
        println!(
            "Completed {} submission(s). Success: {}, Failed: {}",
            result.attempts.len(),
            result.successful,
            result.failed
        );
        if let Some(reason) = &result.stopped_early {
            println!("  Stopped early: {reason}");
        }
    }
    Ok(())
}

async fn drive_bar(bar: ProgressBar, mut rx: ProgressReceiver) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                bar.set_position(u64::from(event.current));
                bar.set_message(format!(
                    "{:>3.0}%  ok {} / failed {}",
                    event.fraction() * 100.0,
                    event.successful,
                    event.failed
                ));
            }
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
    bar.finish_and_clear();
}
