//! Build script for tickring-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watch.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware understands, with their known keys
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "animation",
        &[
            "tick_interval_ms",
            "progress_ms",
            "progress_jump_threshold",
            "bounce_ms",
            "bounce_px",
            "reset_ms",
            "reset_delay_ms",
        ],
    ),
    (
        "buttons",
        &[
            "poll_ms",
            "debounce_ms",
            "repeat_delay_ms",
            "repeat_ms",
            "long_press_ms",
        ],
    ),
    ("alarm", &["enabled", "window_ms"]),
    ("display", &["contrast", "inverted"]),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate watch.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watch.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds watch.toml as its default configuration.    ║\n\
            ║  Please create one in the tickring-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read watch.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in watch.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = collect_errors(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid watch.toml                                       ║\n\
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

    println!("cargo:warning=watch.toml validated successfully");
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

/// Check section names, key names, value types and ranges
fn collect_errors(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (name, value) in root {
        if name == "version" {
            if value.as_integer() != Some(1) {
                errors.push("version must be 1".to_string());
            }
            continue;
        }

        let Some(keys) = SECTIONS.iter().find(|(s, _)| s == name).map(|(_, k)| *k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
                continue;
            }
            match (key.as_str(), value) {
                ("enabled" | "inverted", toml::Value::Boolean(_)) => {}
                ("enabled" | "inverted", _) => {
                    errors.push(format!("[{}] {} must be true or false", name, key));
                }
                ("contrast" | "bounce_px", toml::Value::Integer(v)) if !(0..=255).contains(v) => {
                    errors.push(format!("[{}] {} must be 0-255", name, key));
                }
                ("progress_jump_threshold", toml::Value::Integer(v))
                    if !(0..=65535).contains(v) =>
                {
                    errors.push(format!("[{}] {} must be 0-65535", name, key));
                }
                (_, toml::Value::Integer(v)) if *v < 0 || *v > u32::MAX as i64 => {
                    errors.push(format!("[{}] {} out of range", name, key));
                }
                (_, toml::Value::Integer(_)) => {}
                _ => errors.push(format!("[{}] {} must be an integer", name, key)),
            }
        }
    }

    let int = |section: &str, key: &str, default: i64| {
        config
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };
    if int("animation", "tick_interval_ms", 30) == 0 {
        errors.push("[animation] tick_interval_ms must be non-zero".to_string());
    }
    if int("buttons", "poll_ms", 10) == 0 || int("buttons", "repeat_ms", 100) == 0 {
        errors.push("[buttons] poll_ms and repeat_ms must be non-zero".to_string());
    }
    if int("buttons", "long_press_ms", 750) <= int("buttons", "debounce_ms", 20) {
        errors.push("[buttons] long_press_ms must exceed debounce_ms".to_string());
    }

    errors
}
