//! Stats command.

use serde::Serialize;
use std::path::Path;

use super::{build_index, emit, feed_error_envelope};
use crate::config::Settings;
use crate::error::BuildIssue;
use crate::index::IndexStats;
use crate::io::{EntityType, Envelope, ExitCode};

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    stats: IndexStats,
    diagnostics: &'a [BuildIssue],
}

/// Run stats command.
pub fn run(settings: &Settings, feed: &Path, compact: bool) -> anyhow::Result<ExitCode> {
    let index = match build_index(settings, feed) {
        Ok(index) => index,
        Err(e) => return emit(&feed_error_envelope(&e), compact),
    };

    let stats = index.stats();
    let report = StatsReport {
        stats,
        diagnostics: index.diagnostics(),
    };
    let message = format!(
        "{} classes, {} namespaces, {} functions, {} build issues",
        stats.classes, stats.namespaces, stats.functions, stats.issues
    );

    emit(
        &Envelope::success(report)
            .with_message(message)
            .with_entity_type(EntityType::IndexStats)
            .with_count(stats.issues),
        compact,
    )
}
