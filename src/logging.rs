//! tracing subscriber wiring.
//!
//! Events are formatted by `tracing-subscriber`'s fmt layer and handed to
//! [`ConsoleWriter`], which sends each completed line to the browser console
//! (or stderr when not running in a browser).

use std::io;

use tracing::level_filters::LevelFilter;

/// Parse a level name, falling back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Install the global subscriber. Returns the level in effect, or `None`
/// if a subscriber was already installed.
pub fn init(level: &str) -> Option<LevelFilter> {
    let filter = parse_level(level);
    tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .without_time()
        .with_ansi(false)
        .with_max_level(filter)
        .try_init()
        .ok()
        .map(|()| filter)
}

/// Splits written bytes into complete lines.
#[derive(Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&raw).trim_end().to_string());
        }
        lines
    }

    fn take_rest(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = String::from_utf8_lossy(&self.pending).trim_end().to_string();
        self.pending.clear();
        Some(rest)
    }
}

/// Line-buffered writer targeting the console.
#[derive(Default)]
pub struct ConsoleWriter {
    buffer: LineBuffer,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        for line in self.buffer.push(bytes) {
            emit(&line);
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(rest) = self.buffer.take_rest() {
            emit(&rest);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Other,
}

/// The fmt layer puts the right-aligned level first when time is off.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn severity(line: &str) -> Severity {
    let head = line.trim_start();
    if head.starts_with("ERROR") {
        Severity::Error
    } else if head.starts_with("WARN") {
        Severity::Warn
    } else {
        Severity::Other
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    if line.is_empty() {
        return;
    }
    let value = js_sys::JsString::from(line);
    match severity(line) {
        Severity::Error => web_sys::console::error_1(&value),
        Severity::Warn => web_sys::console::warn_1(&value),
        Severity::Other => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    if line.is_empty() {
        return;
    }
    eprintln!("{}", line);
}
