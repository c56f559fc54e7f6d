//! Terminal themes: class name to `console::Style`.
//!
//! Fragments carry presentation class names (`calendar-left-content`, ...).
//! For terminal output those names are looked up in a [`Theme`]; text inside
//! an element is styled with every matching class of its ancestors.
//!
//! # From YAML
//!
//! ```rust
//! use daybook::Theme;
//!
//! let theme = Theme::from_yaml(r#"
//! calendar-left-content:
//!   fg: cyan
//!   bold: true
//! calendar-weekday-grid-more-events:
//!   fg: 244
//!   italic: true
//! calendar-more-title-day: calendar-left-content
//! "#).unwrap();
//!
//! assert_eq!(theme.len(), 3);
//! assert!(theme.get_style("calendar-more-title-day").is_some());
//! ```
//!
//! A string value is an alias for another entry.
//!
//! # Colors
//!
//! `fg` and `bg` accept a named color (`red`, `cyan`, `gray`), a bright
//! variant (`bright_red`), a palette index (`0` through `255`) or a hex code
//! (`"#03bd9e"`, `"#fff"`), which is mapped to the nearest palette entry.

use std::collections::HashMap;

use console::{Color, Style};
use daybook_markup::UnknownTagBehavior;

use crate::error::RenderError;

const MAX_ALIAS_DEPTH: usize = 16;

/// A collection of terminal styles keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
    aliases: HashMap<String, String>,
    unknown: UnknownTagBehavior,
    forced: bool,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a concrete style.
    pub fn add(mut self, class: &str, style: Style) -> Self {
        self.aliases.remove(class);
        self.styles.insert(class.to_string(), style);
        self
    }

    /// Makes `class` resolve to whatever `target` resolves to.
    pub fn alias(mut self, class: &str, target: &str) -> Self {
        self.styles.remove(class);
        self.aliases.insert(class.to_string(), target.to_string());
        self
    }

    /// What to do with classes that have no style.
    pub fn with_unknown(mut self, unknown: UnknownTagBehavior) -> Self {
        self.unknown = unknown;
        self
    }

    /// Emit escape codes even when stdout is not a terminal.
    pub fn force_styling(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    /// Parses a theme from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// Builds a theme from an already-parsed YAML mapping.
    ///
    /// `null` yields an empty theme.
    pub fn from_value(value: &serde_yaml::Value) -> Result<Self, RenderError> {
        let mapping = match value {
            serde_yaml::Value::Null => return Ok(Self::new()),
            serde_yaml::Value::Mapping(mapping) => mapping,
            other => {
                return Err(RenderError::Style(format!(
                    "theme must be a mapping, got {:?}",
                    other
                )))
            }
        };

        let mut theme = Self::new();
        for (key, def) in mapping {
            let class = key
                .as_str()
                .ok_or_else(|| RenderError::Style(format!("invalid class name: {:?}", key)))?;
            theme = match def {
                serde_yaml::Value::String(target) => theme.alias(class, target),
                serde_yaml::Value::Mapping(attributes) => {
                    let style = parse_style(class, attributes)?;
                    theme.add(class, style)
                }
                other => {
                    return Err(RenderError::Style(format!(
                        "invalid definition for '{}': {:?}",
                        class, other
                    )))
                }
            };
        }

        theme.validate()?;
        Ok(theme)
    }

    /// Checks that every alias ends at a concrete style.
    pub fn validate(&self) -> Result<(), RenderError> {
        for class in self.aliases.keys() {
            if self.get_style(class).is_none() {
                return Err(RenderError::Style(format!(
                    "alias '{}' does not resolve to a style",
                    class
                )));
            }
        }
        Ok(())
    }

    /// Looks up a class, following aliases.
    pub fn get_style(&self, class: &str) -> Option<Style> {
        let mut current = class;
        for _ in 0..MAX_ALIAS_DEPTH {
            if let Some(style) = self.styles.get(current) {
                return Some(self.finish(style.clone()));
            }
            current = self.aliases.get(current)?;
        }
        None
    }

    /// Every class with its resolved style, ready for
    /// [`Fragment::render`](daybook_markup::Fragment::render).
    pub fn styles(&self) -> HashMap<String, Style> {
        self.styles
            .keys()
            .chain(self.aliases.keys())
            .filter_map(|class| Some((class.clone(), self.get_style(class)?)))
            .collect()
    }

    pub fn unknown(&self) -> &UnknownTagBehavior {
        &self.unknown
    }

    pub fn len(&self) -> usize {
        self.styles.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combines two themes; entries of `other` win.
    pub fn merge(mut self, other: Theme) -> Self {
        for (class, style) in other.styles {
            self = self.add(&class, style);
        }
        for (class, target) in other.aliases {
            self = self.alias(&class, &target);
        }
        self
    }

    fn finish(&self, style: Style) -> Style {
        if self.forced {
            style.force_styling(true)
        } else {
            style
        }
    }
}

fn parse_style(class: &str, attributes: &serde_yaml::Mapping) -> Result<Style, RenderError> {
    let mut style = Style::new();
    for (key, value) in attributes {
        let attribute = key.as_str().unwrap_or_default();
        style = match attribute {
            "fg" => style.fg(parse_color(value).map_err(|e| attr_error(class, attribute, e))?),
            "bg" => style.bg(parse_color(value).map_err(|e| attr_error(class, attribute, e))?),
            "bold" | "dim" | "italic" | "underline" | "blink" | "reverse" => {
                let enabled = value.as_bool().ok_or_else(|| {
                    attr_error(class, attribute, format!("expected a boolean, got {:?}", value))
                })?;
                if enabled {
                    apply_attribute(style, attribute)
                } else {
                    style
                }
            }
            _ => {
                return Err(RenderError::Style(format!(
                    "unknown attribute '{:?}' in '{}'",
                    key, class
                )))
            }
        };
    }
    Ok(style)
}

fn apply_attribute(style: Style, attribute: &str) -> Style {
    match attribute {
        "bold" => style.bold(),
        "dim" => style.dim(),
        "italic" => style.italic(),
        "underline" => style.underlined(),
        "blink" => style.blink(),
        "reverse" => style.reverse(),
        _ => style,
    }
}

fn attr_error(class: &str, attribute: &str, message: String) -> RenderError {
    RenderError::Style(format!("{}.{}: {}", class, attribute, message))
}

/// Parses a color value (see the module docs for accepted forms).
pub fn parse_color(value: &serde_yaml::Value) -> Result<Color, String> {
    match value {
        serde_yaml::Value::Number(n) => {
            let index = n
                .as_u64()
                .ok_or_else(|| format!("invalid color palette index: {}", n))?;
            u8::try_from(index)
                .map(Color::Color256)
                .map_err(|_| format!("color palette index {} out of range (0-255)", index))
        }
        serde_yaml::Value::String(s) => parse_color_name(s.trim()),
        other => Err(format!("invalid color value: {:?}", other)),
    }
}

fn parse_color_name(name: &str) -> Result<Color, String> {
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex).map(|rgb| Color::Color256(rgb_to_ansi256(rgb)));
    }

    let lower = name.to_lowercase();
    if let Some(base) = lower.strip_prefix("bright_") {
        let index = match base {
            "black" => 8,
            "red" => 9,
            "green" => 10,
            "yellow" => 11,
            "blue" => 12,
            "magenta" => 13,
            "cyan" => 14,
            "white" => 15,
            _ => return Err(format!("unknown bright color: {}", name)),
        };
        return Ok(Color::Color256(index));
    }

    match lower.as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "white" | "gray" | "grey" => Ok(Color::White),
        _ => Err(format!("unknown color name: {}", name)),
    }
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8), String> {
    let digit = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| format!("invalid hex color: #{}", hex))
    };
    match hex.len() {
        3 => Ok((digit(0..1)? * 17, digit(1..2)? * 17, digit(2..3)? * 17)),
        6 => Ok((digit(0..2)?, digit(2..4)?, digit(4..6)?)),
        _ => Err(format!("invalid hex color: #{} (must be 3 or 6 digits)", hex)),
    }
}

/// Nearest xterm-256 palette index for an RGB triple.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((u16::from(r) - 8) * 24 / 247) as u8
        }
    } else {
        let scale = |c: u8| (u16::from(c) * 5 / 255) as u8;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }
}
