//! Color specifications for terminal output
//!
//! A color spec is a short string like `"bold bright blue"`: optional `bold`,
//! optional `bright`, then a base color name. Specs come from user
//! configuration and are converted to 4-bit ANSI escape sequences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("Unknown color spec: '{0}'")]
    Unknown(String),
}

/// Base terminal colors with their normal and bright ANSI codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseColor {
    Black,
    White,
    Gray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl BaseColor {
    /// Returns the (normal, bright) ANSI foreground codes
    fn codes(&self) -> (&'static str, &'static str) {
        match self {
            BaseColor::Black => ("30", "30"),
            BaseColor::White => ("97", "97"),
            BaseColor::Gray => ("90", "37"),
            BaseColor::Red => ("31", "91"),
            BaseColor::Green => ("32", "92"),
            BaseColor::Yellow => ("33", "93"),
            BaseColor::Blue => ("34", "94"),
            BaseColor::Magenta => ("35", "95"),
            BaseColor::Cyan => ("36", "96"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BaseColor::Black => "black",
            BaseColor::White => "white",
            BaseColor::Gray => "gray",
            BaseColor::Red => "red",
            BaseColor::Green => "green",
            BaseColor::Yellow => "yellow",
            BaseColor::Blue => "blue",
            BaseColor::Magenta => "magenta",
            BaseColor::Cyan => "cyan",
        }
    }
}

impl FromStr for BaseColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(BaseColor::Black),
            "white" => Ok(BaseColor::White),
            "gray" | "grey" => Ok(BaseColor::Gray),
            "red" => Ok(BaseColor::Red),
            "green" => Ok(BaseColor::Green),
            "yellow" => Ok(BaseColor::Yellow),
            "blue" => Ok(BaseColor::Blue),
            "magenta" => Ok(BaseColor::Magenta),
            "cyan" => Ok(BaseColor::Cyan),
            _ => Err(ColorError::Unknown(s.to_string())),
        }
    }
}

/// A parsed color preference for one segment kind
///
/// `ColorSpec::default()` is the terminal default color (no escapes emitted),
/// used as the fallback when a configured spec fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorSpec {
    pub bold: bool,
    pub bright: bool,
    pub base: Option<BaseColor>,
}

impl ColorSpec {
    pub fn new(base: BaseColor) -> Self {
        Self {
            bold: false,
            bright: false,
            base: Some(base),
        }
    }

    /// Returns the ANSI prefix for this color, or an empty string for the
    /// terminal default
    pub fn prefix(&self) -> String {
        let base = match self.base {
            Some(base) => base,
            None => return String::new(),
        };

        let (normal, bright) = base.codes();
        let code = if self.bright { bright } else { normal };

        if self.bold {
            format!("\x1b[1m\x1b[{}m", code)
        } else {
            format!("\x1b[{}m", code)
        }
    }

    /// Wraps text in this color, resetting at the end of every line
    ///
    /// The per-line reset keeps unterminated escapes from bleeding into
    /// whatever is printed next (subordinate process output, the line
    /// editor's prompt).
    pub fn paint(&self, text: &str) -> String {
        let prefix = self.prefix();
        if prefix.is_empty() {
            return text.to_string();
        }

        text.split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}{}", prefix, line, RESET)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromStr for ColorSpec {
    type Err = ColorError;

    /// Parses a spec like `"bold bright blue"`
    ///
    /// Word order is not significant; unknown words make the whole spec
    /// invalid so typos surface as a warning instead of silently dropping
    /// modifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = ColorSpec::default();

        for word in s.split_whitespace() {
            match word {
                "bold" => spec.bold = true,
                "bright" => spec.bright = true,
                other => {
                    let base = other
                        .parse::<BaseColor>()
                        .map_err(|_| ColorError::Unknown(s.to_string()))?;
                    if spec.base.is_some() {
                        return Err(ColorError::Unknown(s.to_string()));
                    }
                    spec.base = Some(base);
                }
            }
        }

        if spec.base.is_none() {
            return Err(ColorError::Unknown(s.to_string()));
        }

        Ok(spec)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        if self.bold {
            words.push("bold");
        }
        if self.bright {
            words.push("bright");
        }
        match self.base {
            Some(base) => words.push(base.name()),
            None => words.push("default"),
        }
        write!(f, "{}", words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_color() {
        let spec: ColorSpec = "blue".parse().unwrap();
        assert_eq!(spec.base, Some(BaseColor::Blue));
        assert!(!spec.bold);
        assert!(!spec.bright);
    }

    #[test]
    fn parse_full_spec() {
        let spec: ColorSpec = "bold bright blue".parse().unwrap();
        assert!(spec.bold);
        assert!(spec.bright);
        assert_eq!(spec.base, Some(BaseColor::Blue));
    }

    #[test]
    fn parse_modifier_order_is_free() {
        let a: ColorSpec = "bright bold gray".parse().unwrap();
        let b: ColorSpec = "bold bright gray".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_unknown_color_fails() {
        assert!("bold chartreuse".parse::<ColorSpec>().is_err());
        assert!("".parse::<ColorSpec>().is_err());
        assert!("bold bright".parse::<ColorSpec>().is_err());
        assert!("blue red".parse::<ColorSpec>().is_err());
    }

    #[test]
    fn paint_resets_per_line() {
        let spec: ColorSpec = "red".parse().unwrap();
        let painted = spec.paint("one\ntwo");
        assert_eq!(painted, "\x1b[31mone\x1b[0m\n\x1b[31mtwo\x1b[0m");
    }

    #[test]
    fn paint_skips_empty_lines() {
        let spec: ColorSpec = "green".parse().unwrap();
        assert_eq!(spec.paint("a\n\nb"), "\x1b[32ma\x1b[0m\n\n\x1b[32mb\x1b[0m");
    }

    #[test]
    fn default_spec_emits_no_escapes() {
        let spec = ColorSpec::default();
        assert_eq!(spec.paint("hello"), "hello");
        assert_eq!(spec.prefix(), "");
    }

    #[test]
    fn bright_and_bold_codes() {
        let spec: ColorSpec = "bold bright blue".parse().unwrap();
        assert_eq!(spec.prefix(), "\x1b[1m\x1b[94m");

        let spec: ColorSpec = "bright gray".parse().unwrap();
        assert_eq!(spec.prefix(), "\x1b[37m");
    }

    #[test]
    fn display_round_trips() {
        for s in ["blue", "bold red", "bright gray", "bold bright cyan"] {
            let spec: ColorSpec = s.parse().unwrap();
            assert_eq!(spec.to_string(), s);
        }
    }
}
