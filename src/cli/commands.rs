// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

use super::display::{field, format_size, section_bot, section_top, themed, GREEN, YELLOW};
use anyhow::{Context, Result};
use sifter::{
    render_results, safelist, EscapePolicy, IndexDocument, IndexSummary, ResultItem, WidgetConfig,
};
use std::fs;
use tracing::{debug, info};

pub fn inspect(path: &str) -> Result<()> {
    let body = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let document = IndexDocument::parse(path, &body)?;
    let summary = document.summary();
    debug!(path, docs = summary.doc_count, "parsed index document");

    print_summary(path, body.len(), &summary, &document.unknown_boosted_fields());
    Ok(())
}

fn print_summary(path: &str, size: usize, summary: &IndexSummary, missing: &[&str]) {
    section_top("INDEX");
    field("file", path);
    field("size", &format_size(size));
    field("version", summary.version.as_deref().unwrap_or("-"));
    field("language", summary.lang.as_deref().unwrap_or("-"));
    field("ref", &summary.ref_field);
    field("documents", &summary.doc_count.to_string());
    field("fields", &summary.fields.join(", "));
    field("pipeline", &summary.pipeline.join(" → "));
    let status = if missing.is_empty() {
        themed(GREEN, &[], "all boosted fields indexed")
    } else {
        themed(YELLOW, &[], &format!("not indexed: {}", missing.join(", ")))
    };
    field("boosts", &status);
    section_bot();
}

/// Render the fragment for the hit list stored at `results_path`.
pub fn render(results_path: &str, keyword: &str, escape: bool) -> Result<String> {
    let json = fs::read_to_string(results_path)
        .with_context(|| format!("failed to read {}", results_path))?;
    let items: Vec<ResultItem> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of hits", results_path))?;

    let policy = if escape {
        EscapePolicy::Escape
    } else {
        EscapePolicy::Trusted
    };
    info!(hits = items.len(), keyword, ?policy, "rendering results");
    Ok(render_results(keyword, &items, policy))
}

pub fn safelist_text() -> String {
    let mut text = safelist().join("\n");
    text.push('\n');
    text
}

/// Resolve a partial configuration file against the defaults.
pub fn effective_config(path: Option<&str>) -> Result<String> {
    let config = match path {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
            WidgetConfig::from_json(&json).with_context(|| format!("invalid config in {}", path))?
        }
        None => WidgetConfig::default(),
    };
    Ok(serde_json::to_string_pretty(&config)?)
}

/// Write `content` to `output`, or stdout when no path is given.
pub fn emit(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path))?;
            info!(path, bytes = content.len(), "wrote output");
        }
        None => print!("{}", content),
    }
    Ok(())
}
