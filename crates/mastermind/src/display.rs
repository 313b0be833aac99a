//! Rendering of codes and feedback for the terminal

use colored::{Color as TermColor, ColoredString, Colorize};
use mastermind_core::{Code, HistoryEntry, Palette};

const PEG: &str = "●";
const EMPTY_SLOT: &str = "○";

/// Terminal colors for the names that `colored` does not know
const DISPLAY_COLORS: &[(&str, TermColor)] = &[
    ("orange", TermColor::TrueColor { r: 255, g: 165, b: 0 }),
    ("purple", TermColor::Magenta),
    ("pink", TermColor::TrueColor { r: 255, g: 105, b: 180 }),
    ("brown", TermColor::TrueColor { r: 139, g: 69, b: 19 }),
];

fn terminal_color(name: &str) -> Option<TermColor> {
    DISPLAY_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, color)| color)
        .or_else(|| name.to_ascii_lowercase().parse().ok())
}

fn paint(text: &str, name: &str) -> ColoredString {
    match terminal_color(name) {
        Some(color) => text.color(color),
        None => text.normal(),
    }
}

/// A color name in its own color
pub fn color_name(name: &str) -> ColoredString {
    paint(name, name)
}

/// A row of pegs, missing positions are shown as empty slots
pub fn pegs(palette: &Palette, code: &Code, code_length: usize) -> String {
    let mut slots = code
        .iter()
        .map(|&color| paint(PEG, palette.name(color)).to_string())
        .collect::<Vec<_>>();
    slots.resize(code_length.max(slots.len()), String::from(EMPTY_SLOT));
    slots.join(" ")
}

/// The code as pegs followed by the color names
pub fn code(palette: &Palette, code: &Code) -> String {
    let names = code
        .iter()
        .map(|&color| color_name(palette.name(color)).to_string())
        .collect::<Vec<_>>();
    format!("{}  {}", pegs(palette, code, code.len()), names.join(", "))
}

/// One row in the list of previous guesses
pub fn history_row(palette: &Palette, attempt: usize, entry: &HistoryEntry) -> String {
    format!(
        "{attempt:>3}. {}  Black: {}  White: {}",
        pegs(palette, &entry.guess, entry.guess.len()),
        entry.feedback.exact,
        entry.feedback.colors
    )
}
