//! Terminal rendering of the stopwatch panel.

use crate::core::StopwatchState;
use crate::utils::time::{format_created_at, format_time};
use ansi_term::{Colour, Style};
use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

const PANEL_WIDTH: usize = 40;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI escape pattern"))
}

/// Remove ANSI escapes, leaving only what the terminal shows.
pub fn strip_ansi(s: &str) -> String {
    ansi_re().replace_all(s, "").into_owned()
}

fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

fn center(s: &str) -> String {
    let pad = PANEL_WIDTH.saturating_sub(visible_width(s)) / 2;
    format!("{}{}", " ".repeat(pad), s)
}

fn button(label: &str, style: Style) -> String {
    style.paint(format!("[ {:^8} ]", label)).to_string()
}

/// Start/Stop button: green "Start" while stopped, red "Stop" while running.
pub fn start_stop_button(state: &StopwatchState) -> String {
    if state.is_running {
        button("Stop", Colour::White.on(Colour::Red).bold())
    } else {
        button("Start", Colour::White.on(Colour::Green).bold())
    }
}

/// Save button: greyed out while loading or running.
pub fn save_button(state: &StopwatchState) -> String {
    let label = if state.is_loading { "Saving..." } else { "Save" };
    let style = if save_enabled(state) {
        Colour::White.on(Colour::Blue).bold()
    } else {
        Colour::Fixed(245).dimmed()
    };
    button(label, style)
}

pub fn save_enabled(state: &StopwatchState) -> bool {
    !(state.is_loading || state.is_running)
}

/// The saved times section.
pub fn render_saved_times(state: &StopwatchState) -> String {
    let mut out = String::new();
    out.push_str(&Style::new().bold().paint("Saved Times").to_string());
    out.push('\n');
    out.push_str(&"─".repeat(PANEL_WIDTH));
    out.push('\n');

    if state.is_loading {
        out.push_str("Loading...\n");
        return out;
    }

    if state.saved_times.is_empty() {
        out.push_str(&Colour::Fixed(245).paint("No saved times yet.").to_string());
        out.push('\n');
        return out;
    }

    for record in &state.saved_times {
        let when = format_created_at(record);
        let gap = PANEL_WIDTH.saturating_sub(record.time_record.width() + when.width());
        out.push_str(&format!(
            "{}{}{}\n",
            record.time_record,
            " ".repeat(gap.max(1)),
            Colour::Fixed(245).paint(when)
        ));
    }
    out
}

/// Full panel: title, readout, buttons and the saved times list.
pub fn render(state: &StopwatchState) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&center(&Style::new().bold().paint("Stopwatch").to_string()));
    out.push_str("\n\n");
    out.push_str(&center(
        &Style::new()
            .bold()
            .paint(format_time(state.elapsed_seconds))
            .to_string(),
    ));
    out.push_str("\n\n");
    out.push_str(&center(&format!(
        "{}  {}",
        start_stop_button(state),
        save_button(state)
    )));
    out.push_str("\n\n");
    out.push_str(&render_saved_times(state));
    out
}

/// Single-line readout refreshed on every tick.
pub fn readout_line(state: &StopwatchState) -> String {
    let marker = if state.is_running {
        Colour::Red.paint("● running")
    } else {
        Colour::Fixed(245).paint("■ stopped")
    };
    format!(
        "\r⏱  {}  {}   ",
        Style::new().bold().paint(format_time(state.elapsed_seconds)),
        marker
    )
}

pub fn help() -> String {
    [
        "Commands:",
        "  s | <Enter>   start / stop",
        "  v             save and reset",
        "  r             reload saved times",
        "  l             show the panel",
        "  h             this help",
        "  q             quit",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SavedTimeRecord;

    fn state() -> StopwatchState {
        StopwatchState::default()
    }

    #[test]
    fn start_stop_label_follows_running_flag() {
        let mut s = state();
        assert!(strip_ansi(&start_stop_button(&s)).contains("Start"));
        s.is_running = true;
        assert!(strip_ansi(&start_stop_button(&s)).contains("Stop"));
    }

    #[test]
    fn save_disabled_while_running_or_loading() {
        let mut s = state();
        assert!(save_enabled(&s));
        s.is_running = true;
        assert!(!save_enabled(&s));
        s.is_running = false;
        s.is_loading = true;
        assert!(!save_enabled(&s));
        assert!(strip_ansi(&save_button(&s)).contains("Saving..."));
    }

    #[test]
    fn panel_shows_readout_and_rows() {
        let mut s = state();
        s.elapsed_seconds = 3661;
        s.saved_times = vec![SavedTimeRecord {
            id: 1,
            time_record: "00:10:00".into(),
            created_at: "garbled".into(),
        }];

        let panel = strip_ansi(&render(&s));
        assert!(panel.contains("01:01:01"));
        assert!(panel.contains("Saved Times"));
        assert!(panel.contains("00:10:00"));
        assert!(panel.contains("garbled"));
    }

    #[test]
    fn loading_hides_the_list() {
        let mut s = state();
        s.is_loading = true;
        s.saved_times = vec![SavedTimeRecord {
            id: 1,
            time_record: "00:10:00".into(),
            created_at: "x".into(),
        }];
        let list = strip_ansi(&render_saved_times(&s));
        assert!(list.contains("Loading..."));
        assert!(!list.contains("00:10:00"));
    }

    #[test]
    fn empty_list_has_a_hint() {
        assert!(strip_ansi(&render_saved_times(&state())).contains("No saved times yet."));
    }
}
