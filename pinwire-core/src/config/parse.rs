//! Minimal TOML parser for board configuration
//!
//! Handles only the subset `board.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - `[board]`, `[serial]` and `[pins]` section headers
//! - Key = value pairs (string, integer)
//! - Arrays of strings, optionally spread over several lines
//! - Comments (# ...)
//!
//! NOT supported:
//! - Escapes inside strings
//! - Inline tables
//! - Dotted keys

use heapless::Vec;

use crate::board::find_board;
use crate::table::MAX_PINS;

use super::types::{bounded, BoardConfig, InputPull, PinSlot, MAX_LABEL_LEN};
use super::ParseError;

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Board,
    Serial,
    Pins,
}

/// Parse `board.toml` into a [`BoardConfig`]
///
/// If `[pins] slots` is absent the table comes from the built-in board
/// named by `[board] name`.
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;
    let mut explicit_pins = false;
    // Inside a `slots = [` array that has not been closed yet
    let mut in_slots = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if in_slots {
            in_slots = !push_slots(line, &mut config.pins)?;
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = split_key_value(line)?;
        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Board => match key {
                "name" => config.name = bounded(parse_string(value)?)?,
                "startup_delay_ms" => config.startup_delay_ms = parse_u32(value)?,
                "input_pull" => config.input_pull = parse_pull(parse_string(value)?)?,
                _ => return Err(ParseError::UnknownKey),
            },
            Section::Serial => match key {
                "baudrate" => config.serial.baudrate = parse_u32(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
            Section::Pins => match key {
                "slots" => {
                    let items = value.strip_prefix('[').ok_or(ParseError::InvalidValue)?;
                    config.pins.clear();
                    explicit_pins = true;
                    in_slots = !push_slots(items, &mut config.pins)?;
                }
                _ => return Err(ParseError::UnknownKey),
            },
        }
    }

    if in_slots {
        // Unterminated array
        return Err(ParseError::InvalidValue);
    }

    if !explicit_pins {
        if config.name.is_empty() {
            return Err(ParseError::MissingPins);
        }
        let board = find_board(&config.name).ok_or(ParseError::UnknownBoard)?;
        config.load_descriptor_pins(board)?;
    }

    Ok(config)
}

/// Parse a pin designator
///
/// Supports formats:
/// - "gpio11" -> port 0, pin 11
/// - "p1_8" -> port 1, pin 8
pub fn parse_pin(label: &str) -> Result<PinSlot, ParseError> {
    let label = label.trim();
    let lower_prefix = |prefix: &str| {
        label.len() > prefix.len()
            && label
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    let (port, pin) = if lower_prefix("gpio") {
        (0, parse_u8(&label[4..]).ok_or(ParseError::InvalidPin)?)
    } else if lower_prefix("p") {
        let (port, pin) = label[1..].split_once('_').ok_or(ParseError::InvalidPin)?;
        (
            parse_u8(port).ok_or(ParseError::InvalidPin)?,
            parse_u8(pin).ok_or(ParseError::InvalidPin)?,
        )
    } else {
        return Err(ParseError::InvalidPin);
    };

    Ok(PinSlot {
        label: bounded::<MAX_LABEL_LEN>(label).map_err(|_| ParseError::InvalidPin)?,
        port,
        pin,
    })
}

/// Push the quoted items of an array fragment
///
/// Returns true once the closing `]` has been consumed.
fn push_slots(fragment: &str, pins: &mut Vec<PinSlot, MAX_PINS>) -> Result<bool, ParseError> {
    let (items, closed) = match fragment.find(']') {
        Some(end) => {
            if !fragment[end + 1..].trim().is_empty() {
                return Err(ParseError::InvalidValue);
            }
            (&fragment[..end], true)
        }
        None => (fragment, false),
    };

    for item in items.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let slot = parse_pin(parse_string(item)?)?;
        pins.push(slot).map_err(|_| ParseError::TooManyPins)?;
    }

    Ok(closed)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name.trim() {
        "board" => Ok(Section::Board),
        "serial" => Ok(Section::Serial),
        "pins" => Ok(Section::Pins),
        _ => Err(ParseError::InvalidSection),
    }
}

fn split_key_value(line: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = line.split_once('=').ok_or(ParseError::InvalidValue)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::InvalidValue);
    }
    Ok((key, value.trim()))
}

/// Cut a trailing comment, ignoring `#` inside strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(d))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

fn parse_u8(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_pull(value: &str) -> Result<InputPull, ParseError> {
    match value {
        "none" => Ok(InputPull::None),
        "up" => Ok(InputPull::Up),
        "down" => Ok(InputPull::Down),
        _ => Err(ParseError::InvalidValue),
    }
}
