//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use parley_api_models::{DeliveryReceipt, TranslationRecord};
use parley_core::StatusFilter;
use parley_core::logic::{flow_label, pretty_time, translated_or_placeholder};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const PREVIEW_CHARS: usize = 48;

pub(crate) fn render_history(
    records: &[TranslationRecord],
    filter: StatusFilter,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(records)?),
        OutputFormat::Table => print!("{}", format_history_table(records, filter)),
    }
    Ok(())
}

pub(crate) fn render_record(record: &TranslationRecord, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(record)?),
        OutputFormat::Table => print!("{}", format_record_detail(record)),
    }
    Ok(())
}

pub(crate) fn render_translation(
    record: &TranslationRecord,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(record)?),
        OutputFormat::Table => {
            println!("{}", translated_or_placeholder(record));
            println!("ticket #{} ({}, {})", record.id, flow_label(record), record.status);
        }
    }
    Ok(())
}

pub(crate) fn render_delivery(receipt: &DeliveryReceipt, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", receipt.pretty()),
        OutputFormat::Table => print!("{}", format_delivery(receipt)),
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

#[must_use]
pub(crate) fn format_history_table(records: &[TranslationRecord], filter: StatusFilter) -> String {
    if records.is_empty() {
        return match filter {
            StatusFilter::All => "No tickets yet.\n".to_string(),
            other => format!("No {} tickets.\n", other.label().to_ascii_lowercase()),
        };
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:<10} {:<9} {:<19} TEXT",
        "ID", "STATUS", "FLOW", "CREATED"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:>6} {:<10} {:<9} {:<19} {}",
            record.id,
            record.status.as_str(),
            flow_label(record),
            pretty_time(&record.created_at),
            preview(&record.original_text)
        );
    }
    out
}

#[must_use]
pub(crate) fn format_record_detail(record: &TranslationRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", record.id);
    let _ = writeln!(out, "status: {}", record.status);
    let _ = writeln!(out, "flow: {}", flow_label(record));
    let _ = writeln!(out, "created: {}", pretty_time(&record.created_at));
    if let Some(translated_at) = &record.translated_at {
        let _ = writeln!(out, "translated: {}", pretty_time(translated_at));
    }
    let _ = writeln!(out, "original: {}", record.original_text);
    let _ = writeln!(out, "translation: {}", translated_or_placeholder(record));
    out
}

/// Typed summary when the document has the usual shape, pretty JSON otherwise.
#[must_use]
pub(crate) fn format_delivery(receipt: &DeliveryReceipt) -> String {
    let Some(typed) = receipt.typed() else {
        return format!("{}\n", receipt.pretty());
    };

    let mut out = String::new();
    let _ = writeln!(out, "delivered: {}", typed.delivered);
    if let Some(ticket_id) = typed.ticket_id {
        let _ = writeln!(out, "ticket: {ticket_id}");
    }
    if let Some(delivered_at) = &typed.delivered_at {
        let _ = writeln!(out, "delivered at: {}", pretty_time(delivered_at));
    }
    if let Some(payload) = &typed.payload {
        if let (Some(source), Some(target)) = (&payload.source_lang, &payload.target_lang) {
            let _ = writeln!(out, "flow: {source} → {target}");
        }
        if let Some(original) = &payload.original_text {
            let _ = writeln!(out, "original: {original}");
        }
        if let Some(translated) = &payload.translated_text {
            let _ = writeln!(out, "translation: {translated}");
        }
    }
    out
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        single_line
    } else {
        let cut: String = single_line.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{cut}…")
    }
}
