//! Color configuration for terminal and HTML output.

use console::Color;
use serde::{de, Deserialize, Deserializer};

/// Terminal colors for plain output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub date: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub alert: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub ok: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            date: Color::Blue,
            alert: Color::Red,
            ok: Color::Green,
        }
    }
}

/// CSS color names for HTML output. Written into the markup as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmlColorConfig {
    pub date: String,
    pub alert: String,
    pub ok: String,
}

impl Default for HtmlColorConfig {
    fn default() -> Self {
        Self {
            date: "black".into(),
            alert: "red".into(),
            ok: "green".into(),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a terminal [`Color`].
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta",
///   "Cyan", "White", each also as "Bright<Name>"
/// - Palette indices: "0" through "255"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Ok(index) = s.parse::<u8>() {
        return Ok(Color::Color256(index));
    }

    let lower = s.to_lowercase();
    let (name, bright) = match lower.strip_prefix("bright") {
        Some(rest) => (rest, true),
        None => (lower.as_str(), false),
    };

    let base: u8 = match name {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" => 5,
        "cyan" => 6,
        "white" => 7,
        _ => return Err(format!("Unknown color: {}", s)),
    };

    if bright {
        return Ok(Color::Color256(base + 8));
    }

    Ok(match base {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    })
}
