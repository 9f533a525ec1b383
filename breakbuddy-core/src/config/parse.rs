//! Parser for the device configuration file
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `breakbuddy.toml`. It does NOT support the full TOML spec, and it needs
//! no allocator. The firmware build script checks the same file with the
//! real `toml` crate, so syntax mistakes are caught at compile time and
//! this parser only has to be strict about values.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//! - `\n`, `\"` and `\\` escapes inside strings
//! - Colors as `"#RRGGBB"`, `"0xRRGGBB"` or a bare `0xRRGGBB` integer
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys

use core::fmt;

use super::types::{
    BreathingConfig, ButtonConfig, ChimeConfig, ClockConfig, ConfigError, CycleParameters,
    DeviceConfig, IdleConfig, PulseGeometry, ScheduleConfig, WorkWindow,
};
use crate::color::Color;
use crate::traits::LabelText;

/// What went wrong while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognized in this section
    UnknownKey,
    /// Value has the wrong type or format
    InvalidValue,
    /// Line is neither a header, a key/value pair, nor a comment
    MalformedLine,
    /// Values parsed but do not form a valid configuration
    Config(ConfigError),
}

/// Parse error with the 1-based line it occurred on (0 = whole file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    /// Line number
    pub line: usize,
    /// Error kind
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        Self::at(0, ParseErrorKind::Config(e))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line;
        match self.kind {
            ParseErrorKind::InvalidSection => write!(f, "line {}: invalid section header", line),
            ParseErrorKind::UnknownKey => write!(f, "line {}: unknown key", line),
            ParseErrorKind::InvalidValue => write!(f, "line {}: invalid value", line),
            ParseErrorKind::MalformedLine => write!(f, "line {}: expected `key = value`", line),
            ParseErrorKind::Config(e) if line == 0 => write!(f, "invalid configuration: {}", e),
            ParseErrorKind::Config(e) => write!(f, "line {}: {}", line, e),
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Schedule,
    Breathing,
    Idle,
    Chime,
    Button,
    Clock,
}

/// Raw values collected before validation
///
/// Starts out holding the defaults, so every key is optional.
struct Draft {
    interval_minutes: u16,
    start_hour: u8,
    end_hour: u8,
    cycles: u8,
    total_minutes: f32,
    steps: u16,
    min_size: u16,
    max_size: u16,
    inhale_color: Color,
    exhale_color: Color,
    pause_ms: u32,
    breathing_background: Color,
    breathe_label: LabelText,
    breathe_text_color: Color,
    idle_label: LabelText,
    idle_text_color: Color,
    color_a: Color,
    color_b: Color,
    idle_steps: u16,
    idle_delay_ms: u32,
    note_ms: u32,
    vibrato_rate_hz: f32,
    vibrato_depth_hz: f32,
    debounce_ms: u32,
    utc_offset_minutes: i16,
    epoch_at_boot_s: u64,
}

impl Draft {
    fn from_defaults(d: DeviceConfig) -> Self {
        Self {
            interval_minutes: d.schedule.interval_minutes(),
            start_hour: d.schedule.window.start_hour(),
            end_hour: d.schedule.window.end_hour(),
            cycles: d.breathing.cycles.cycle_count(),
            total_minutes: d.breathing.cycles.total_minutes(),
            steps: d.breathing.cycles.step_count(),
            min_size: d.breathing.geometry.min_size_px(),
            max_size: d.breathing.geometry.max_size_px(),
            inhale_color: d.breathing.inhale_color,
            exhale_color: d.breathing.exhale_color,
            pause_ms: d.breathing.pause_ms,
            breathing_background: d.breathing.background,
            breathe_label: d.breathing.label,
            breathe_text_color: d.breathing.text_color,
            idle_steps: d.idle.steps(),
            idle_delay_ms: d.idle.delay_ms(),
            idle_label: d.idle.label,
            idle_text_color: d.idle.text_color,
            color_a: d.idle.color_a,
            color_b: d.idle.color_b,
            note_ms: d.chime.note_ms(),
            vibrato_rate_hz: d.chime.vibrato_rate_hz(),
            vibrato_depth_hz: d.chime.vibrato_depth_hz(),
            debounce_ms: d.button.debounce_ms,
            utc_offset_minutes: d.clock.utc_offset_minutes(),
            epoch_at_boot_s: d.clock.epoch_at_boot_s,
        }
    }

    fn build(self) -> Result<DeviceConfig, ConfigError> {
        let window = WorkWindow::new(self.start_hour, self.end_hour)?;
        let config = DeviceConfig {
            schedule: ScheduleConfig::new(self.interval_minutes, window)?,
            breathing: BreathingConfig {
                cycles: CycleParameters::new(self.cycles, self.total_minutes, self.steps)?,
                geometry: PulseGeometry::new(self.min_size, self.max_size)?,
                inhale_color: self.inhale_color,
                exhale_color: self.exhale_color,
                pause_ms: self.pause_ms,
                background: self.breathing_background,
                label: self.breathe_label,
                text_color: self.breathe_text_color,
            },
            idle: IdleConfig::new(
                self.idle_label,
                self.idle_text_color,
                self.color_a,
                self.color_b,
                self.idle_steps,
                self.idle_delay_ms,
            )?,
            chime: ChimeConfig::new(self.note_ms, self.vibrato_rate_hz, self.vibrato_depth_hz)?,
            button: ButtonConfig {
                debounce_ms: self.debounce_ms,
            },
            clock: ClockConfig::new(self.utc_offset_minutes, self.epoch_at_boot_s)?,
        };
        config.check_run_length()?;
        Ok(config)
    }
}

/// Parse configuration text into a validated [`DeviceConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut draft = Draft::from_defaults(DeviceConfig::default());
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::at(line_no, ParseErrorKind::InvalidSection));
            }
            section = parse_section_header(&header[1..header.len() - 1])
                .ok_or(ParseError::at(line_no, ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line)
            .ok_or(ParseError::at(line_no, ParseErrorKind::MalformedLine))?;
        apply_value(section, key, value, &mut draft).map_err(|kind| ParseError::at(line_no, kind))?;
    }

    Ok(draft.build()?)
}

/// Parse section header like "schedule"
fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "schedule" => Some(Section::Schedule),
        "breathing" => Some(Section::Breathing),
        "idle" => Some(Section::Idle),
        "chime" => Some(Section::Chime),
        "button" => Some(Section::Button),
        "clock" => Some(Section::Clock),
        _ => None,
    }
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value.trim()
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseErrorKind> {
    value.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

/// Parse a float value (integers are accepted)
fn parse_float(value: &str) -> Result<f32, ParseErrorKind> {
    let v: f32 = value.parse().map_err(|_| ParseErrorKind::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseErrorKind::InvalidValue)
    }
}

/// Parse a quoted string into a label, resolving escapes
fn parse_label(value: &str) -> Result<LabelText, ParseErrorKind> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let mut out = LabelText::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some('n') => '\n',
                Some('"') => '"',
                Some('\\') => '\\',
                _ => return Err(ParseErrorKind::InvalidValue),
            }
        } else {
            c
        };
        out.push(c)
            .map_err(|_| ParseErrorKind::Config(ConfigError::LabelTooLong))?;
    }
    Ok(out)
}

/// Parse a color: "#RRGGBB", "0xRRGGBB" (quoted or bare)
fn parse_color(value: &str) -> Result<Color, ParseErrorKind> {
    let v = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    let hex = v
        .strip_prefix('#')
        .or_else(|| v.strip_prefix("0x"))
        .or_else(|| v.strip_prefix("0X"))
        .ok_or(ParseErrorKind::InvalidValue)?;
    if hex.len() != 6 {
        return Err(ParseErrorKind::InvalidValue);
    }
    u32::from_str_radix(hex, 16)
        .map(Color::from_hex)
        .map_err(|_| ParseErrorKind::InvalidValue)
}

/// Apply a key/value pair to the draft
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    draft: &mut Draft,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Schedule, "interval_minutes") => draft.interval_minutes = parse_int(value)?,
        (Section::Schedule, "start_hour") => draft.start_hour = parse_int(value)?,
        (Section::Schedule, "end_hour") => draft.end_hour = parse_int(value)?,

        (Section::Breathing, "cycles") => draft.cycles = parse_int(value)?,
        (Section::Breathing, "total_minutes") => draft.total_minutes = parse_float(value)?,
        (Section::Breathing, "steps") => draft.steps = parse_int(value)?,
        (Section::Breathing, "min_size") => draft.min_size = parse_int(value)?,
        (Section::Breathing, "max_size") => draft.max_size = parse_int(value)?,
        (Section::Breathing, "inhale_color") => draft.inhale_color = parse_color(value)?,
        (Section::Breathing, "exhale_color") => draft.exhale_color = parse_color(value)?,
        (Section::Breathing, "pause_ms") => draft.pause_ms = parse_int(value)?,
        (Section::Breathing, "background") => draft.breathing_background = parse_color(value)?,
        (Section::Breathing, "label") => draft.breathe_label = parse_label(value)?,
        (Section::Breathing, "text_color") => draft.breathe_text_color = parse_color(value)?,

        (Section::Idle, "label") => draft.idle_label = parse_label(value)?,
        (Section::Idle, "text_color") => draft.idle_text_color = parse_color(value)?,
        (Section::Idle, "color_a") => draft.color_a = parse_color(value)?,
        (Section::Idle, "color_b") => draft.color_b = parse_color(value)?,
        (Section::Idle, "steps") => draft.idle_steps = parse_int(value)?,
        (Section::Idle, "delay_ms") => draft.idle_delay_ms = parse_int(value)?,

        (Section::Chime, "note_ms") => draft.note_ms = parse_int(value)?,
        (Section::Chime, "vibrato_rate_hz") => draft.vibrato_rate_hz = parse_float(value)?,
        (Section::Chime, "vibrato_depth_hz") => draft.vibrato_depth_hz = parse_float(value)?,

        (Section::Button, "debounce_ms") => draft.debounce_ms = parse_int(value)?,

        (Section::Clock, "utc_offset_minutes") => draft.utc_offset_minutes = parse_int(value)?,
        (Section::Clock, "epoch_at_boot_s") => draft.epoch_at_boot_s = parse_int(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{LAVENDER, MIDNIGHT_BLUE};

    #[test]
    fn test_empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), DeviceConfig::default());
        assert_eq!(parse_config("# just a comment\n\n").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r##"
# Break Buddy settings
[schedule]
interval_minutes = 30   # every half hour
start_hour = 8
end_hour = 18

[breathing]
cycles = 4
total_minutes = 2.0
steps = 11
min_size = 10
max_size = 110
inhale_color = "#9575CD"
exhale_color = 0x102840
pause_ms = 300
label = "Breathe\nwith me"

[idle]
label = "hi # not a comment"
color_a = "0x000000"
color_b = "#FFFFFF"
steps = 10
delay_ms = 40

[chime]
note_ms = 400
vibrato_rate_hz = 5
vibrato_depth_hz = 2.5

[button]
debounce_ms = 500

[clock]
utc_offset_minutes = -300
epoch_at_boot_s = 1700000000
"##;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.schedule.interval_minutes(), 30);
        assert!(config.schedule.window.contains(8));
        assert!(!config.schedule.window.contains(18));
        assert_eq!(config.breathing.cycles.cycle_count(), 4);
        assert_eq!(config.breathing.cycles.total_minutes(), 2.0);
        assert_eq!(config.breathing.cycles.step_count(), 11);
        assert_eq!(config.breathing.geometry.size_at(10, 11), 110);
        assert_eq!(config.breathing.inhale_color, LAVENDER);
        assert_eq!(config.breathing.exhale_color, MIDNIGHT_BLUE);
        assert_eq!(config.breathing.pause_ms, 300);
        assert_eq!(config.breathing.label.as_str(), "Breathe\nwith me");
        assert_eq!(config.idle.label.as_str(), "hi # not a comment");
        assert_eq!(config.idle.color_a, Color::from_hex(0));
        assert_eq!(config.idle.color_b, Color::from_hex(0xFFFFFF));
        assert_eq!(config.idle.steps(), 10);
        assert_eq!(config.idle.delay_ms(), 40);
        assert_eq!(config.chime.note_ms(), 400);
        assert_eq!(config.chime.vibrato_rate_hz(), 5.0);
        assert_eq!(config.chime.vibrato_depth_hz(), 2.5);
        assert_eq!(config.button.debounce_ms, 500);
        assert_eq!(config.clock.utc_offset_minutes(), -300);
        assert_eq!(config.clock.epoch_at_boot_s, 1_700_000_000);
    }

    #[test]
    fn test_unknown_section_reports_line() {
        let err = parse_config("\n[wifi]\n").unwrap_err();
        assert_eq!(err, ParseError::at(2, ParseErrorKind::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[idle]\nsparkle = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_key_outside_section_is_unknown() {
        let err = parse_config("steps = 3\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_config("[idle]\nsteps\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedLine);
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[breathing]\nsteps = many\n").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_config("[breathing]\ninhale_color = \"#12345\"\n").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_config("[idle]\nlabel = unquoted\n").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
        assert_eq!(
            parse_config("[chime]\nvibrato_rate_hz = inf\n").unwrap_err().kind,
            ParseErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_config("[breathing]\nsteps = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::StepCountTooSmall));
        assert_eq!(err.line, 0);

        let err = parse_config("[schedule]\nend_hour = 24\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::InvalidHour));

        let err = parse_config("[idle]\nsteps = 1\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::StepCountTooSmall));
    }

    #[test]
    fn test_overlong_runs_rejected() {
        let err = parse_config("[breathing]\ntotal_minutes = 100000\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::RunTooLong));
        assert_eq!(err.line, 0);

        let err = parse_config("[breathing]\npause_ms = 3000000000\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::RunTooLong));

        let err = parse_config("[chime]\nnote_ms = 4294967295\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::InvalidDuration));

        // an hour-long run is fine
        let config = parse_config("[breathing]\ntotal_minutes = 60\n").unwrap();
        assert!(config.run_duration_ms() > 3_600_000);
    }

    #[test]
    fn test_label_too_long() {
        let mut text = std::string::String::from("[idle]\nlabel = \"");
        text.push_str(&"a".repeat(crate::traits::MAX_LABEL_TEXT + 1));
        text.push_str("\"\n");
        let err = parse_config(&text).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Config(ConfigError::LabelTooLong));
    }

    #[test]
    fn test_label_escapes() {
        assert_eq!(parse_label(r#""a\"b\\c""#).unwrap().as_str(), "a\"b\\c");
        assert_eq!(parse_label(r#""bad\t""#), Err(ParseErrorKind::InvalidValue));
    }

    #[test]
    fn test_strip_comment_respects_strings() {
        assert_eq!(strip_comment("5 # five"), "5");
        assert_eq!(strip_comment("\"#9575CD\""), "\"#9575CD\"");
        assert_eq!(strip_comment("\"a\\\"#b\" # c"), "\"a\\\"#b\"");
    }

    #[test]
    fn test_error_display() {
        use std::string::ToString;
        let err = ParseError::at(3, ParseErrorKind::UnknownKey);
        assert_eq!(err.to_string(), "line 3: unknown key");
        let err = ParseError::from(ConfigError::ZeroCycles);
        assert_eq!(err.to_string(), "invalid configuration: cycle count must be at least 1");
    }
}
