//! Terminal logging with colored module prefixes.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `WatchStatus` for the one-line rebuild status shown in watch mode
//!
//! # Example
//!
//! ```ignore
//! log!("index"; "{} notes accepted", count);
//! log!("error"; "{}: {}", file, message);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width; multiline
/// messages (aggregated diagnostics) are printed in full.
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let width = get_terminal_width() as usize;

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();

    if message.contains('\n') {
        writeln!(stdout, "{prefix} {message}").ok();
    } else {
        let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
        writeln!(stdout, "{prefix} {}", truncate_str(message, max_msg_len)).ok();
    }

    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "watch" => prefix.bright_green().bold(),
        "search" | "related" => prefix.bright_blue().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Watch Status
// ============================================================================

/// Single-line status display for watch mode.
///
/// Each rebuild prints one timestamped line; the previous status line is
/// overwritten so a long watch session stays readable.
pub struct WatchStatus {
    has_line: bool,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { has_line: false }
    }

    /// Display success message (✓ prefix, green).
    pub fn success(&mut self, message: &str) {
        self.display("✓".green().to_string(), message);
    }

    /// Display error message (✗ prefix, red) with detail on following lines.
    pub fn error(&mut self, summary: &str, detail: &str) {
        self.display("✗".red().to_string(), summary);
        // Keep errors on screen; the next status must not overwrite them.
        eprintln!("{detail}");
        self.has_line = false;
    }

    fn display(&mut self, mark: String, message: &str) {
        let mut stdout = stdout().lock();
        if self.has_line {
            execute!(stdout, crossterm::cursor::MoveToPreviousLine(1)).ok();
            execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        }
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        writeln!(stdout, "{} {mark} {message}", time.dimmed()).ok();
        stdout.flush().ok();
        self.has_line = true;
    }
}

impl Default for WatchStatus {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
