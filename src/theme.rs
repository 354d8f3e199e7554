//! Theme system for the token field
//!
//! Provides YAML-based theming with compile-time embedded themes and
//! user-defined themes from the config directory. A theme resolves every
//! [`StyleClass`] the field paints into a concrete [`TextStyle`].
//!
//! Theme loading priority:
//! 1. User config: `~/.config/chipfield/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

use crate::field::StyleClass;

// Embed theme YAML files at compile time
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/default-light.yaml");
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/default-dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RRGGBB"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("{}: {}", s, e))
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// ANSI 24-bit foreground escape
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// ANSI 24-bit background escape
    pub fn ansi_bg(&self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub field: FieldThemeData,
    #[serde(default)]
    pub matches: MatchesThemeData,
}

/// Token field colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct FieldThemeData {
    pub background: String,
    pub foreground: String,
    pub prefix: String,
    pub token: String,
    pub separator: String,
    pub highlight_background: String,
    pub highlight_foreground: String,
}

/// Match list colors (all optional, falling back to field colors)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchesThemeData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Foreground plus optional background for one styled run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Option<Color>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub field: FieldTheme,
    pub matches: MatchesTheme,
}

#[derive(Debug, Clone)]
pub struct FieldTheme {
    pub background: Color,
    pub foreground: Color,
    pub prefix: Color,
    /// Title color of unselected tokens
    pub token: Color,
    pub separator: Color,
    /// Background of the selected token
    pub highlight_background: Color,
    /// Title color of the selected token
    pub highlight_foreground: Color,
}

#[derive(Debug, Clone)]
pub struct MatchesTheme {
    pub title: Color,
    pub subtitle: Color,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let raw = &data.ui.field;
        let field = FieldTheme {
            background: Color::from_hex(&raw.background)?,
            foreground: Color::from_hex(&raw.foreground)?,
            prefix: Color::from_hex(&raw.prefix)?,
            token: Color::from_hex(&raw.token)?,
            separator: Color::from_hex(&raw.separator)?,
            highlight_background: Color::from_hex(&raw.highlight_background)?,
            highlight_foreground: Color::from_hex(&raw.highlight_foreground)?,
        };

        let matches = MatchesTheme {
            title: match &data.ui.matches.title {
                Some(hex) => Color::from_hex(hex)?,
                None => field.foreground,
            },
            subtitle: match &data.ui.matches.subtitle {
                Some(hex) => Color::from_hex(hex)?,
                None => field.prefix,
            },
        };

        Ok(Theme {
            name: data.name,
            field,
            matches,
        })
    }

    /// Style painted for a class
    pub fn style(&self, class: StyleClass) -> TextStyle {
        let f = &self.field;
        let (fg, bg) = match class {
            StyleClass::Plain => (f.foreground, None),
            StyleClass::Prefix => (f.prefix, None),
            StyleClass::Title => (f.token, None),
            StyleClass::Separator => (f.separator, None),
            StyleClass::SelectedMarker => (f.highlight_foreground, Some(f.highlight_background)),
            StyleClass::SelectedTitle => (f.highlight_foreground, Some(f.highlight_background)),
            // The trailing marker blends into the highlight
            StyleClass::SelectedSeparator => (f.highlight_background, Some(f.highlight_background)),
        };
        TextStyle { fg, bg }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Default Light".to_string(),
            field: FieldTheme {
                background: Color::rgb(0xFF, 0xFF, 0xFF),
                foreground: Color::rgb(0x00, 0x00, 0x00),
                prefix: Color::rgb(0x8E, 0x8E, 0x93),
                token: Color::rgb(0x00, 0x7A, 0xFF),
                separator: Color::rgb(0x80, 0x80, 0x80),
                highlight_background: Color::rgb(0x14, 0x6A, 0xFF),
                highlight_foreground: Color::rgb(0xFF, 0xFF, 0xFF),
            },
            matches: MatchesTheme {
                title: Color::rgb(0x00, 0x00, 0x00),
                subtitle: Color::rgb(0x8E, 0x8E, 0x93),
            },
        }
    }
}
