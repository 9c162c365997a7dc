//! Colour theme for rendered lines.
//!
//! Themes are TOML files mapping each [`Tag`] to a colour name. The default
//! theme is embedded in the binary via [`include_str!`]; a user theme file is
//! layered on top of it, so it only needs to name the tags it changes.

use std::path::Path;

use config::{Config, File, FileFormat};
use crossterm::style::{style, Color, Stylize};
use serde::Deserialize;
use thiserror::Error;

use crate::style::{Paint, Tag};

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("could not read theme: {0}")]
    Source(#[from] config::ConfigError),
    #[error("theme entry {key} has unknown colour {value:?}")]
    UnknownColor { key: String, value: String },
}

// ---------------------------------------------------------------------------
// Raw serde types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawTags {
    timestamp: String,
    highlight: String,
    accent: String,
    success: String,
    label: String,
    danger: String,
    alert: String,
    notice: String,
    link: String,
}

#[derive(Debug, Deserialize)]
struct RawLevels {
    debug: String,
    warn: String,
    error: String,
    fatal: String,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    tags: RawTags,
    levels: RawLevels,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved terminal colours for every [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub timestamp: Color,
    pub level_debug: Color,
    pub level_warn: Color,
    pub level_error: Color,
    pub level_fatal: Color,
    pub highlight: Color,
    pub accent: Color,
    pub success: Color,
    pub label: Color,
    pub danger: Color,
    pub alert: Color,
    pub notice: Color,
    pub link: Color,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a complete theme from a TOML string.
    pub fn from_toml_str(src: &str) -> Result<Self, ThemeError> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::resolve(raw)
    }

    /// Load a user theme file layered over the embedded default.
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(DEFAULT_THEME_SRC, FileFormat::Toml))
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::resolve(raw)
    }

    fn resolve(raw: RawTheme) -> Result<Self, ThemeError> {
        let color = |key: &str, value: &str| {
            parse_color(value).ok_or_else(|| ThemeError::UnknownColor {
                key: key.to_string(),
                value: value.to_string(),
            })
        };
        Ok(Self {
            timestamp: color("tags.timestamp", &raw.tags.timestamp)?,
            level_debug: color("levels.debug", &raw.levels.debug)?,
            level_warn: color("levels.warn", &raw.levels.warn)?,
            level_error: color("levels.error", &raw.levels.error)?,
            level_fatal: color("levels.fatal", &raw.levels.fatal)?,
            highlight: color("tags.highlight", &raw.tags.highlight)?,
            accent: color("tags.accent", &raw.tags.accent)?,
            success: color("tags.success", &raw.tags.success)?,
            label: color("tags.label", &raw.tags.label)?,
            danger: color("tags.danger", &raw.tags.danger)?,
            alert: color("tags.alert", &raw.tags.alert)?,
            notice: color("tags.notice", &raw.tags.notice)?,
            link: color("tags.link", &raw.tags.link)?,
        })
    }

    pub fn color(&self, tag: Tag) -> Color {
        match tag {
            Tag::Timestamp => self.timestamp,
            Tag::LevelDebug => self.level_debug,
            Tag::LevelWarn => self.level_warn,
            Tag::LevelError => self.level_error,
            Tag::LevelFatal => self.level_fatal,
            Tag::Highlight => self.highlight,
            Tag::Accent => self.accent,
            Tag::Success => self.success,
            Tag::Label => self.label,
            Tag::Danger => self.danger,
            Tag::Alert => self.alert,
            Tag::Notice => self.notice,
            Tag::Link => self.link,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

impl Paint for Theme {
    fn paint(&self, tag: Tag, text: &str) -> String {
        style(text).with(self.color(tag)).to_string()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a crossterm [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `light_red`, `dark_gray`, …
///   Plain names are the normal-intensity colour, `light_` names the bright one.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::DarkRed),
        "green" => Some(Color::DarkGreen),
        "yellow" => Some(Color::DarkYellow),
        "blue" => Some(Color::DarkBlue),
        "magenta" => Some(Color::DarkMagenta),
        "cyan" => Some(Color::DarkCyan),
        "gray" | "grey" => Some(Color::Grey),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGrey),
        "light_red" => Some(Color::Red),
        "light_green" => Some(Color::Green),
        "light_yellow" => Some(Color::Yellow),
        "light_blue" => Some(Color::Blue),
        "light_magenta" => Some(Color::Magenta),
        "light_cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 && s.is_ascii() => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb { r, g, b })
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::AnsiValue(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_eq!(theme.timestamp, Color::DarkCyan);
        assert_eq!(theme.highlight, Color::Magenta);
        assert_eq!(theme.level_error, Color::Red);
        assert_eq!(theme.level_fatal, Color::DarkRed);
    }

    #[test]
    fn painted_text_is_wrapped_in_escape_codes() {
        let theme = Theme::load_default();
        let painted = theme.paint(Tag::Success, "done");
        assert!(painted.contains("done"));
        assert!(painted.starts_with("\u{1b}["));
        assert_ne!(painted, "done");
    }

    #[test]
    fn user_theme_overrides_only_named_tags() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tags]\nhighlight = \"#ff0080\"").unwrap();
        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.highlight, Color::Rgb { r: 255, g: 0, b: 128 });
        assert_eq!(theme.success, Color::DarkGreen);
    }

    #[test]
    fn unknown_colour_is_reported() {
        let src = include_str!("themes/default.toml").replace("\"green\"", "\"chartreuse\"");
        let err = Theme::from_toml_str(&src).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownColor { ref key, .. } if key == "tags.success"));
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb { r: 255, g: 0, b: 128 }));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::AnsiValue(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
