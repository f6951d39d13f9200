//! User-facing notifications.
//!
//! Plain messages go to stdout, errors and alerts to stderr. Diagnostics that
//! are not meant for the user go through `tracing` instead.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_ALERT: &str = "🔔";

fn line<T: fmt::Display>(colour: Colour, icon: &str, msg: T) -> String {
    format!("{} {}", colour.bold().paint(icon), msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Blue, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Green, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Colour::Yellow, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Colour::Red, ICON_ERR, msg));
}

/// Framed notification that stands out from the running readout.
pub fn alert<T: fmt::Display>(msg: T) {
    let text = msg.to_string();
    let bar = "─".repeat(unicode_width::UnicodeWidthStr::width(text.as_str()) + 4);
    let frame = Style::new().bold();

    eprintln!("\n{}", frame.paint(format!("┌{bar}┐")));
    eprintln!("{}  {}  {}", frame.paint("│"), text, frame.paint("│"));
    eprintln!("{} {}", frame.paint(format!("└{bar}┘")), ICON_ALERT);
}
