//! Queue entry commands
//!
//! - `list`: show active entries
//! - `void` / `end` / `undo-transition`: run an entry action through the
//!   confirm flow

use owo_colors::OwoColorize;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use super::interactive::{self, is_stdin_tty};
use crate::api::QueueClient;
use crate::config::Config;
use crate::confirm::{ConfirmActionFlow, ConfirmOutcome, FlowServices, ModalParams, SubmitAction};
use crate::error::{CareQueueError, Result};
use crate::i18n::FallbackTranslator;
use crate::notify::ConsoleNotifier;
use crate::store::QueueStore;
use crate::types::{QueueActionKind, QueueEntry};

/// List active queue entries
pub async fn cmd_list(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let client = QueueClient::from_config(&config)?;
    let entries = client.list_active().await?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No active queue entries".dimmed());
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_entry_line(entry));
    }
    Ok(())
}

/// Run one of the queue actions against an entry
///
/// # Arguments
/// * `kind` - Which action to submit
/// * `entry_uuid` - The queue entry to act on
/// * `yes` - Confirm once without prompting
pub async fn cmd_queue_action(kind: QueueActionKind, entry_uuid: &str, yes: bool) -> Result<()> {
    if !yes && !is_stdin_tty() {
        return Err(CareQueueError::ConfirmationRequired(format!(
            "'{kind}' requires confirmation in non-interactive contexts. Use --yes to confirm."
        )));
    }

    let config = Config::load()?;
    let client = Arc::new(QueueClient::from_config(&config)?);
    let store = Arc::new(QueueStore::new(client.clone()));
    let entry = store.find(entry_uuid).await?;

    let translator = FallbackTranslator;
    let params = ModalParams::preset(kind, &translator, &entry, client.action(kind));
    let services = FlowServices {
        notifier: Arc::new(ConsoleNotifier),
        refresher: store.clone(),
        translator: Arc::new(translator),
    };
    let flow = ConfirmActionFlow::open(&entry, params, services);

    if yes {
        return match flow.confirm().await {
            ConfirmOutcome::Failed(error) => Err(error.into()),
            _ => Ok(()),
        };
    }

    run_interactive(&flow, &mut BufReader::new(io::stdin())).await
}

/// Prompt on `input` until the action succeeds or the user declines
async fn run_interactive<A: SubmitAction>(
    flow: &ConfirmActionFlow<'_, A>,
    input: &mut impl BufRead,
) -> Result<()> {
    println!("{}", flow.title().bold());
    for line in flow.body_lines() {
        println!("  {line}");
    }

    if !interactive::confirm_from(flow.confirm_label(), input)? {
        flow.cancel();
        println!("Cancelled");
        return Ok(());
    }

    loop {
        match flow.confirm().await {
            ConfirmOutcome::Failed(error) => {
                if !interactive::confirm_from("Retry", input)? {
                    flow.cancel();
                    return Err(error.into());
                }
            }
            ConfirmOutcome::Succeeded(_) | ConfirmOutcome::Ignored => return Ok(()),
        }
    }
}

/// Format an entry for single-line display
pub fn format_entry_line(entry: &QueueEntry) -> String {
    let mut line = format!("{} {}", entry.uuid.cyan(), entry.display);

    let details: Vec<&str> = [&entry.queue, &entry.status, &entry.priority]
        .into_iter()
        .filter_map(|d| d.as_deref())
        .collect();
    if !details.is_empty() {
        line.push_str(&format!(" [{}]", details.join(" / ")).dimmed().to_string());
    }
    line
}
