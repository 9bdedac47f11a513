//! Colour theme for keytally output.
//!
//! Themes are defined as TOML files. The default theme is embedded in the
//! binary via [`include_str!`] so rendering works without any files on disk.
//! [`Theme::plain`] carries no styling at all and is used when colour is off
//! or stdout is not a terminal.

use crate::heat::HeatLevel;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawHeat {
    hot: RawStyle,
    warm: RawStyle,
    cool: RawStyle,
    cold: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawList {
    header: RawStyle,
    rank: RawStyle,
    bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    heat: RawHeat,
    list: RawList,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved styles for the stats views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub heat_hot: Style,
    pub heat_warm: Style,
    pub heat_cool: Style,
    pub heat_cold: Style,

    /// Column header row of the ranked list.
    pub list_header: Style,
    /// Rank number column.
    pub list_rank: Style,
    /// Proportional bar column.
    pub list_bar: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule out.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// A theme with no styling.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            heat_hot: raw.heat.hot.into_style(),
            heat_warm: raw.heat.warm.into_style(),
            heat_cool: raw.heat.cool.into_style(),
            heat_cold: raw.heat.cold.into_style(),
            list_header: raw.list.header.into_style(),
            list_rank: raw.list.rank.into_style(),
            list_bar: raw.list.bar.into_style(),
        })
    }

    pub fn heat_style(&self, level: HeatLevel) -> Style {
        match level {
            HeatLevel::Hot => self.heat_hot,
            HeatLevel::Warm => self.heat_warm,
            HeatLevel::Cool => self.heat_cool,
            HeatLevel::Cold => self.heat_cold,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive), `#rrggbb`, and
/// `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(s.get(range)?, 16).ok();
            Some(Color::Rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s.get("indexed:".len()..)?.parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
