//! Resolve command.

use std::path::Path;
use std::time::Instant;

use super::{build_index, emit, feed_error_envelope};
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::resolve::{RefKind, Resolver};

/// Reference text with `args` appended when the reference has no argument
/// list of its own.
fn query_text(reference: &str, args: Option<&str>) -> String {
    match args.map(str::trim).filter(|a| !a.is_empty()) {
        Some(args) if !reference.contains('(') => {
            if args.starts_with('(') {
                format!("{reference}{args}")
            } else {
                format!("{reference}({args})")
            }
        }
        _ => reference.to_string(),
    }
}

/// Run resolve command.
pub fn run(
    settings: &Settings,
    feed: &Path,
    reference: &str,
    kind: RefKind,
    args: Option<&str>,
    compact: bool,
) -> anyhow::Result<ExitCode> {
    let index = match build_index(settings, feed) {
        Ok(index) => index,
        Err(e) => return emit(&feed_error_envelope(&e), compact),
    };

    let started = Instant::now();
    let text = query_text(reference, args);
    let result = Resolver::new(&index).resolve_to_result(&text, kind, None);
    let elapsed = started.elapsed().as_millis() as u64;

    let envelope = if result.found {
        let name = result.target_qualified_name.clone().unwrap_or_default();
        Envelope::success(result)
            .with_message(format!("Resolved '{text}' to {name}"))
            .with_count(1)
    } else {
        Envelope::not_found(format!("'{text}' did not resolve"), Some(result))
            .with_hint("Qualify the name, or pass --kind function for bare function names")
            .with_count(0)
    };

    emit(
        &envelope
            .with_entity_type(EntityType::Resolution)
            .with_query(text)
            .with_duration_ms(elapsed),
        compact,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_appends_args() {
        assert_eq!(query_text("foo", Some("(1, 2)")), "foo(1, 2)");
        assert_eq!(query_text("foo", Some("int x")), "foo(int x)");
        assert_eq!(query_text("foo(1)", Some("(1, 2)")), "foo(1)");
        assert_eq!(query_text("foo", Some("  ")), "foo");
        assert_eq!(query_text("foo", None), "foo");
    }
}
