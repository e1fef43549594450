//! Simple TOML parser for the watch configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `watch.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - [section] headers
//! - Comments (# ...), including after a value
//!
//! NOT supported:
//! - Strings, arrays and tables as values
//! - Dotted keys and nested sections
//!
//! Unknown keys inside known sections are skipped so an older firmware
//! still boots with a newer file.

use tickring_core::config::WatchConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Invalid value type or out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Animation,
    Buttons,
    Alarm,
    Display,
}

/// Parse TOML configuration into a WatchConfig
///
/// Keys that are not present keep their default values.
pub fn parse_config(input: &str) -> Result<WatchConfig, ParseError> {
    let mut config = WatchConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "animation" => Ok(Section::Animation),
        "buttons" => Ok(Section::Buttons),
        "alarm" => Ok(Section::Alarm),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let value = value.replace_underscores()?;
    value.as_str().parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_u16(value: &str) -> Result<u16, ParseError> {
    u16::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Integers may use `_` separators (`20_000`)
trait ReplaceUnderscores {
    fn replace_underscores(&self) -> Result<heapless::String<16>, ParseError>;
}

impl ReplaceUnderscores for str {
    fn replace_underscores(&self) -> Result<heapless::String<16>, ParseError> {
        let mut out = heapless::String::new();
        for ch in self.chars().filter(|&c| c != '_') {
            out.push(ch).map_err(|_| ParseError::InvalidValue)?;
        }
        Ok(out)
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut WatchConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "version" {
                config.version = parse_u8(value)?;
            }
        }
        Section::Animation => {
            let anim = &mut config.animation;
            match key {
                "tick_interval_ms" => anim.tick_interval_ms = parse_u32(value)?,
                "progress_ms" => anim.progress_ms = parse_u32(value)?,
                "progress_jump_threshold" => anim.progress_jump_threshold = parse_u16(value)?,
                "bounce_ms" => anim.bounce_ms = parse_u32(value)?,
                "bounce_px" => anim.bounce_px = parse_u8(value)?,
                "reset_ms" => anim.reset_ms = parse_u32(value)?,
                "reset_delay_ms" => anim.reset_delay_ms = parse_u32(value)?,
                _ => {}
            }
        }
        Section::Buttons => {
            let buttons = &mut config.buttons;
            match key {
                "poll_ms" => buttons.poll_ms = parse_u32(value)?,
                "debounce_ms" => buttons.debounce_ms = parse_u32(value)?,
                "repeat_delay_ms" => buttons.repeat_delay_ms = parse_u32(value)?,
                "repeat_ms" => buttons.repeat_ms = parse_u32(value)?,
                "long_press_ms" => buttons.long_press_ms = parse_u32(value)?,
                _ => {}
            }
        }
        Section::Alarm => match key {
            "enabled" => config.alarm.enabled = parse_bool(value)?,
            "window_ms" => config.alarm.window_ms = parse_u32(value)?,
            _ => {}
        },
        Section::Display => match key {
            "contrast" => config.display.contrast = parse_u8(value)?,
            "inverted" => config.display.inverted = parse_bool(value)?,
            _ => {}
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBEDDED: &str = include_str!("../../watch.toml");

    #[test]
    fn test_embedded_config_parses_to_defaults() {
        let config = parse_config(EMBEDDED).unwrap();
        assert_eq!(config, WatchConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), WatchConfig::default());
    }

    #[test]
    fn test_overrides_and_comments() {
        let input = "\
            # quick animations\n\
            [animation]\n\
            tick_interval_ms = 20   # faster\n\
            bounce_px = 6\n\
            \n\
            [alarm]\n\
            enabled = false\n\
            window_ms = 10_000\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.animation.tick_interval_ms, 20);
        assert_eq!(config.animation.bounce_px, 6);
        assert!(!config.alarm.enabled);
        assert_eq!(config.alarm.window_ms, 10_000);
        assert_eq!(config.buttons, WatchConfig::default().buttons);
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let config = parse_config("[buttons]\nturbo = 1\nrepeat_ms = 50\n").unwrap();
        assert_eq!(config.buttons.repeat_ms, 50);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[speaker]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[alarm\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[alarm]\nenabled\n"), Err(ParseError::InvalidLine));
        assert_eq!(parse_config("[alarm]\nenabled = 1\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[display]\ncontrast = 300\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[buttons]\npoll_ms = -5\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_overlong_integer_is_rejected() {
        assert_eq!(
            parse_config("[animation]\ntick_interval_ms = 00000000000000000030\n"),
            Err(ParseError::InvalidValue)
        );
        let config = parse_config("[animation]\ntick_interval_ms = 0_000_000_000_030\n").unwrap();
        assert_eq!(config.animation.tick_interval_ms, 30);
    }
}
