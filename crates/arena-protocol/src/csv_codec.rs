//! Terse text codec, for netcat and manual play.
//!
//! Input format (lines → `InputMessage`):
//!
//! - Join:
//!   `J`
//!
//! - Move:
//!   `M, index(int)`
//!
//! Output format (`OutputMessage` → line):
//!
//! - Start:  `S, symbol(X/O), turn(1/0)`
//! - Update: `U, board(9 chars of X/O/-), turn(1/0)`
//! - Win:    `W, symbol(X/O)`
//! - Tie:    `T`
//! - Status: `I, text`

use arena_core::{InputMessage, OutputMessage};

/// Parse a single text line into an `InputMessage`.
///
/// Returns `None` for blank lines, comments (starting with `#`) and
/// anything malformed.
pub fn parse_input_line(line: &str) -> Option<InputMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');

    match tokens[0].as_str() {
        "J" | "j" if tokens.len() == 1 => Some(InputMessage::Join),
        "M" | "m" if tokens.len() == 2 => {
            let index = tokens[1].parse::<usize>().ok()?;
            Some(InputMessage::move_to(index))
        }
        _ => None,
    }
}

/// Format an `InputMessage` as a text line. `Disconnect` has no text form.
pub fn format_input(msg: &InputMessage) -> Option<String> {
    match msg {
        InputMessage::Join => Some("J".to_string()),
        InputMessage::Move(m) => Some(format!("M, {}", m.index)),
        InputMessage::Disconnect => None,
    }
}

/// Format an `OutputMessage` as a text line.
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::Start(s) => format!("S, {}, {}", s.symbol, flag(s.turn)),
        OutputMessage::Update(u) => {
            let board: String = u
                .board
                .cells()
                .iter()
                .map(|cell| match cell {
                    Some(symbol) => symbol.as_char(),
                    None => '-',
                })
                .collect();
            format!("U, {}, {}", board, flag(u.turn))
        }
        OutputMessage::Win(s) => format!("W, {}", s),
        OutputMessage::Tie => "T".to_string(),
        OutputMessage::Status(text) => format!("I, {}", text),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn flag(b: bool) -> u8 {
    if b {
        1
    } else {
        0
    }
}

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}
