//! Terminal output for CLI commands.
//!
//! Human mode prints colored, aligned text. JSON mode prints one
//! `{"type", "payload"}` object per line so results can be piped into `jq`.
//! Quiet mode keeps only warnings and errors.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
    Quiet,
}

impl OutputMode {
    /// `--json` wins over `--quiet`: scripts still need the payload.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: RwLock<OutputMode> = RwLock::new(OutputMode::Human);

pub fn configure(mode: OutputMode) {
    *MODE.write() = mode;
}

fn mode() -> OutputMode {
    *MODE.read()
}

#[must_use]
pub fn is_json() -> bool {
    mode() == OutputMode::Json
}

fn json_line(kind: &str, payload: Value) -> String {
    json!({ "type": kind, "payload": payload }).to_string()
}

/// Route one line: `payload` in JSON mode, `human` otherwise unless quiet.
fn emit(kind: &str, payload: impl FnOnce() -> Value, human: impl FnOnce()) {
    match mode() {
        OutputMode::Json => println!("{}", json_line(kind, payload())),
        OutputMode::Human => human(),
        OutputMode::Quiet => {}
    }
}

/// Print `value` as a JSON line. Returns false outside JSON mode so the
/// caller can fall through to its human rendering.
pub fn json_value(kind: &str, value: &impl Serialize) -> bool {
    if !is_json() {
        return false;
    }
    match serde_json::to_value(value) {
        Ok(payload) => println!("{}", json_line(kind, payload)),
        Err(e) => error(&format!("failed to encode {kind}: {e}")),
    }
    true
}

pub fn section(title: &str) {
    if mode() == OutputMode::Human {
        println!("\n{}", title.bold());
    }
}

/// Labeled value, e.g. `count  4`.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        || json!({ "label": label, "value": value }),
        || println!("  {:<12} {value}", label.dimmed()),
    );
}

/// Pre-rendered text such as a table. Human mode only.
pub fn block(text: &str) {
    if mode() == OutputMode::Human {
        println!("{text}");
    }
}

pub fn success(message: &str) {
    emit(
        "success",
        || json!({ "message": message }),
        || println!("  {} {message}", "✓".green()),
    );
}

pub fn warning(message: &str) {
    if is_json() {
        println!("{}", json_line("warning", json!({ "message": message })));
    } else {
        println!("  {} {message}", "!".yellow());
    }
}

/// Errors always go to stderr, whatever the mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json_line("error", json!({ "message": message })));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

fn styled(value: impl Display, paint: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        paint(&value)
    }
}

pub fn highlight(value: impl Display) -> String {
    styled(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    styled(value, |v| v.dimmed().to_string())
}

/// Color a human stack status: green when settled, red on failure,
/// yellow while anything is in progress.
pub fn status(value: &str) -> String {
    styled(value, |v| match v {
        "running" => v.green().to_string(),
        "failed" | "error" => v.red().to_string(),
        "unknown" => v.dimmed().to_string(),
        _ => v.yellow().to_string(),
    })
}
