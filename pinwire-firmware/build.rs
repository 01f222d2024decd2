//! Build script for pinwire-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Built-in descriptors whose pins exist on the RP2040 (see pinwire_core::board)
const RP2040_BOARDS: &[&str] = &["rpi-pico"];

/// Pin table capacity (5-bit pin index)
const MAX_PINS: usize = 32;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware compiles its pin table from board.toml.            ║\n\
            ║  Please create one in the pinwire-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_board(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_pins(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board.toml                                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [board], [serial] and [pins] are understood by the on-device parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !matches!(name.as_str(), "board" | "serial" | "pins") {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn validate_board(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(board) = config.get("board").and_then(|b| b.as_table()) else {
        errors.push("Missing [board] section".to_string());
        return;
    };

    for key in board.keys() {
        if !matches!(key.as_str(), "name" | "startup_delay_ms" | "input_pull") {
            errors.push(format!("[board] unknown key '{}'", key));
        }
    }

    let has_slots = config.get("pins").and_then(|p| p.get("slots")).is_some();
    match board.get("name") {
        Some(toml::Value::String(name)) => {
            if !has_slots && !RP2040_BOARDS.contains(&name.as_str()) {
                errors.push(format!(
                    "[board] '{}' has no RP2040 pin table; list [pins] slots",
                    name
                ));
            }
        }
        Some(_) => errors.push("[board] name must be a string".to_string()),
        None if !has_slots => {
            errors.push("[board] name or [pins] slots is required".to_string())
        }
        None => {}
    }

    match board.get("startup_delay_ms") {
        Some(toml::Value::Integer(ms)) if *ms >= 0 && *ms <= u32::MAX as i64 => {}
        Some(_) => errors.push("[board] startup_delay_ms must be a positive integer".to_string()),
        None => {}
    }

    match board.get("input_pull") {
        Some(toml::Value::String(pull)) if matches!(pull.as_str(), "none" | "up" | "down") => {}
        Some(_) => errors.push("[board] input_pull must be \"none\", \"up\" or \"down\"".to_string()),
        None => {}
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial").and_then(|s| s.as_table()) else {
        return;
    };

    for key in serial.keys() {
        if key != "baudrate" {
            errors.push(format!("[serial] unknown key '{}'", key));
        }
    }

    match serial.get("baudrate") {
        Some(toml::Value::Integer(baud)) if *baud > 0 && *baud <= u32::MAX as i64 => {}
        Some(_) => errors.push("[serial] baudrate must be a positive integer".to_string()),
        None => {}
    }
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = config.get("pins").and_then(|p| p.as_table()) else {
        return;
    };

    for key in pins.keys() {
        if key != "slots" {
            errors.push(format!("[pins] unknown key '{}'", key));
        }
    }

    let Some(slots) = pins.get("slots") else {
        return;
    };
    let Some(slots) = slots.as_array() else {
        errors.push("[pins] slots must be an array of strings".to_string());
        return;
    };

    if slots.len() > MAX_PINS {
        errors.push(format!(
            "[pins] slots has {} entries, at most {} are addressable",
            slots.len(),
            MAX_PINS
        ));
    }

    let mut seen = Vec::new();
    for (index, slot) in slots.iter().enumerate() {
        let Some(label) = slot.as_str() else {
            errors.push(format!("[pins] slot {} must be a string", index));
            continue;
        };
        match rp2040_gpio(label) {
            Some(gpio) if seen.contains(&gpio) => {
                errors.push(format!("[pins] slot {} reuses gpio{}", index, gpio))
            }
            Some(gpio) => seen.push(gpio),
            None => errors.push(format!(
                "[pins] slot {} '{}' is not gpio2..gpio29",
                index, label
            )),
        }
    }
}

/// GPIO number of a usable RP2040 pin designator (gpio0/1 carry UART0)
fn rp2040_gpio(label: &str) -> Option<u8> {
    let lower = label.trim().to_ascii_lowercase();
    let gpio: u8 = lower.strip_prefix("gpio")?.parse().ok()?;
    (2..30).contains(&gpio).then_some(gpio)
}
