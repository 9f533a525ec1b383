//! Build script for breakbuddy-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates breakbuddy.toml at compile time
//! - Records the build time, used to seed the clock when the config leaves
//!   `epoch_at_boot_s` at 0

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Known sections and their keys
const SCHEMA: &[(&str, &[&str])] = &[
    ("schedule", &["interval_minutes", "start_hour", "end_hour"]),
    (
        "breathing",
        &[
            "cycles",
            "total_minutes",
            "steps",
            "min_size",
            "max_size",
            "inhale_color",
            "exhale_color",
            "pause_ms",
            "background",
            "label",
            "text_color",
        ],
    ),
    (
        "idle",
        &["label", "text_color", "color_a", "color_b", "steps", "delay_ms"],
    ),
    ("chime", &["note_ms", "vibrato_rate_hz", "vibrato_depth_hz"]),
    ("button", &["debounce_ms"]),
    ("clock", &["utc_offset_minutes", "epoch_at_boot_s"]),
];

const COLOR_KEYS: &[&str] = &[
    "inhale_color",
    "exhale_color",
    "background",
    "text_color",
    "color_a",
    "color_b",
];

fn main() {
    setup_linker();
    validate_config();
    record_build_time();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Export the build time as BREAKBUDDY_BUILD_EPOCH_S
///
/// SOURCE_DATE_EPOCH wins when set, for reproducible builds.
fn record_build_time() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let epoch_s = match env::var("SOURCE_DATE_EPOCH") {
        Ok(value) => value.trim().parse::<u64>().unwrap_or_else(|_| {
            panic!("SOURCE_DATE_EPOCH must be seconds since the Unix epoch, got '{}'", value)
        }),
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    println!("cargo:rustc-env=BREAKBUDDY_BUILD_EPOCH_S={}", epoch_s);
}

/// Validate breakbuddy.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=breakbuddy.toml");

    let config_path = Path::new("breakbuddy.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: breakbuddy.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds breakbuddy.toml from the firmware crate     ║\n\
            ║  directory. An empty file selects all defaults.                  ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read breakbuddy.toml                           ║\n\
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
                ║  ERROR: Invalid TOML syntax in breakbuddy.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    validate_schedule(&config, &mut errors);
    validate_breathing(&config, &mut errors);
    validate_idle(&config, &mut errors);
    validate_chime(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in breakbuddy.toml                 ║\n\
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

    println!("cargo:warning=breakbuddy.toml validated successfully");
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

/// Unknown sections and keys are errors; the firmware parser rejects them too
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = SCHEMA.iter().find(|(s, _)| s == name).map(|(_, k)| k) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            } else if COLOR_KEYS.contains(&key.as_str()) && !is_color(value) {
                errors.push(format!("[{}] {} must be \"#RRGGBB\"", name, key));
            }
        }
    }
}

fn is_color(value: &toml::Value) -> bool {
    match value {
        toml::Value::String(s) => s
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())),
        toml::Value::Integer(v) => (0..=0xFF_FFFF).contains(v),
        _ => false,
    }
}

fn get_int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_schedule(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(interval) = get_int(config, "schedule", "interval_minutes") {
        if interval <= 0 {
            errors.push("[schedule] interval_minutes must be positive".to_string());
        }
    }
    for key in ["start_hour", "end_hour"] {
        if let Some(hour) = get_int(config, "schedule", key) {
            if !(0..=23).contains(&hour) {
                errors.push(format!("[schedule] {} must be 0-23", key));
            }
        }
    }
}

fn validate_breathing(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(steps) = get_int(config, "breathing", "steps") {
        if steps < 2 {
            errors.push("[breathing] steps must be at least 2".to_string());
        }
    }
    if let Some(cycles) = get_int(config, "breathing", "cycles") {
        if !(1..=255).contains(&cycles) {
            errors.push("[breathing] cycles must be 1-255".to_string());
        }
    }
    if let (Some(min), Some(max)) = (
        get_int(config, "breathing", "min_size"),
        get_int(config, "breathing", "max_size"),
    ) {
        if min > max {
            errors.push("[breathing] min_size must not exceed max_size".to_string());
        }
    }
    if let Some(label) = config.get("breathing").and_then(|b| b.get("label")) {
        if label.as_str().is_none() {
            errors.push("[breathing] label must be a string".to_string());
        }
    }
}

fn validate_idle(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(steps) = get_int(config, "idle", "steps") {
        if steps < 2 {
            errors.push("[idle] steps must be at least 2".to_string());
        }
    }
    if let Some(label) = config.get("idle").and_then(|b| b.get("label")) {
        if label.as_str().is_none() {
            errors.push("[idle] label must be a string".to_string());
        }
    }
}

fn validate_chime(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(note_ms) = get_int(config, "chime", "note_ms") {
        if !(1..=10_000).contains(&note_ms) {
            errors.push("[chime] note_ms must be 1-10000".to_string());
        }
    }
}
