//! Command implementations for the CLI.
//!
//! Each command returns the [`ExitCode`] the process should end with;
//! `main` only parses arguments, loads settings and dispatches.

pub mod init;
pub mod resolve;
pub mod stats;

use serde::Serialize;
use std::path::Path;

use crate::config::Settings;
use crate::error::FeedError;
use crate::feed::load_feed;
use crate::index::{IndexBuilder, SymbolIndex};
use crate::io::{Envelope, ErrorDetails, ExitCode, ResultCode};
use crate::log_event;

/// Read a feed file and build a frozen index from it.
pub fn build_index(settings: &Settings, feed: &Path) -> Result<SymbolIndex, FeedError> {
    let records = load_feed(feed)?;
    let record_count = records.len();

    let mut builder = IndexBuilder::new(settings.resolver.clone());
    builder.ingest(records);
    let index = builder.link();

    log_event!(
        "cli",
        "index built",
        "{record_count} records, {} classes, {} functions, {} issues",
        index.stats().classes,
        index.function_count(),
        index.diagnostics().len()
    );
    Ok(index)
}

/// Print an envelope to stdout and hand back its exit code.
pub fn emit<T: Serialize>(envelope: &Envelope<T>, compact: bool) -> anyhow::Result<ExitCode> {
    let json = if compact {
        envelope.to_json_compact()?
    } else {
        envelope.to_json()?
    };
    println!("{json}");
    Ok(envelope.exit_code())
}

/// Envelope for a feed that could not be read.
pub fn feed_error_envelope(error: &FeedError) -> Envelope<()> {
    Envelope::error(ResultCode::FeedError, error.to_string()).with_error_details(ErrorDetails {
        suggestions: vec!["The feed must be a JSON array of declaration records".to_string()],
        context: None,
    })
}
