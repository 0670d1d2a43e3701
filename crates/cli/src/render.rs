//! Terminal and JSON rendering for the CLI.
//!
//! Job-file syntax errors are rendered with ariadne, pointing at the
//! offending line and column. Everything else is a one-line message, or a
//! JSON envelope on stdout when `--output json` is selected.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Raw TSPL on stdout, messages on stderr.
    Pretty,
    /// Machine-readable JSON on stdout.
    Json,
}

impl Format {
    /// Resolve the `--output` flag. Defaults to `Pretty`: encoded TSPL is
    /// meant to be piped straight to a printer or file.
    pub(crate) fn resolve(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            _ => Format::Pretty,
        }
    }
}

// ── Job-file errors ─────────────────────────────────────────────────────

/// Byte offset of a 1-based line/column position, clamped to `source`.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// Render a job-file parse error to stderr.
///
/// Errors with a position (`serde_json` reports line 0 when it has none)
/// get a source excerpt; others a plain `error:` line.
pub(crate) fn render_job_error(source: &str, filename: &str, err: &serde_json::Error) {
    if err.line() == 0 {
        eprintln!("error: invalid job file {filename}: {err}");
        return;
    }

    let start = offset_of(source, err.line(), err.column());
    let end = (start + 1).min(source.len()).max(start);
    let mut cache = (filename, Source::from(source));

    Report::build(ReportKind::Error, (filename, start..end))
        .with_message("invalid job file")
        .with_config(Config::default().with_compact(false))
        .with_label(
            Label::new((filename, start..end))
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint(&mut cache)
        .ok();
}

// ── JSON envelopes ──────────────────────────────────────────────────────

/// JSON error envelope printed on stdout when `--output json` is active.
pub(crate) fn error_envelope(err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": "command_failed",
        "message": format!("{err:#}"),
    })
}
