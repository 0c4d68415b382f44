//! Read-only reference data: fonts, presets and color themes.

use serde::Serialize;

use crate::settings::{DEFAULT_FONT_FAMILY, StyleSettings, StylePatch};

/// Text shown on first load.
pub const DEFAULT_TEXT: &str = "# TypoFlow
## Intelligent Text Styler

Welcome to TypoFlow. Paste your text here or upload a file to get started. 

TypoFlow uses advanced AI to analyze the sentiment and structure of your content, automatically suggesting the best typographic settings for readability and aesthetics. It supports both English and Chinese content perfectly.

### Features
- **Auto Mode**: Let AI decide the best look.
- **Manual Mode**: Fine-tune every detail.
- **Bilingual**: Optimized for mixed language content.

Try pasting a poem, a technical article, or a novel excerpt!";

/// Broad typeface classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCategory {
    Sans,
    Serif,
    Mono,
    Display,
}

/// Script a font is primarily designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontLang {
    En,
    Zh,
    Both,
}

impl FontLang {
    /// Parse the short tag used by the host page (`en`, `zh`, `both`).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// A selectable font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontOption {
    /// Display name, also what the suggestion service is asked to pick from.
    pub name: &'static str,
    /// CSS font-family value stored in `StyleSettings`.
    pub value: &'static str,
    pub category: FontCategory,
    pub lang: FontLang,
}

const fn font(
    name: &'static str,
    value: &'static str,
    category: FontCategory,
    lang: FontLang,
) -> FontOption {
    FontOption {
        name,
        value,
        category,
        lang,
    }
}

pub static FONT_OPTIONS: [FontOption; 9] = [
    font("Inter (Sans)", DEFAULT_FONT_FAMILY, FontCategory::Sans, FontLang::En),
    font(
        "Merriweather (Serif)",
        r#""Merriweather", "Noto Serif SC", serif"#,
        FontCategory::Serif,
        FontLang::En,
    ),
    font(
        "Playfair Display (Display)",
        r#""Playfair Display", "Noto Serif SC", serif"#,
        FontCategory::Display,
        FontLang::En,
    ),
    font(
        "Fira Code (Mono)",
        r#""Fira Code", monospace"#,
        FontCategory::Mono,
        FontLang::En,
    ),
    font(
        "Dancing Script (Hand)",
        r#""Dancing Script", cursive"#,
        FontCategory::Display,
        FontLang::En,
    ),
    font(
        "Noto Sans SC (Sans)",
        r#""Noto Sans SC", sans-serif"#,
        FontCategory::Sans,
        FontLang::Zh,
    ),
    font(
        "Noto Serif SC (Serif)",
        r#""Noto Serif SC", serif"#,
        FontCategory::Serif,
        FontLang::Zh,
    ),
    font(
        "Ma Shan Zheng (Calligraphy)",
        r#""Ma Shan Zheng", cursive"#,
        FontCategory::Display,
        FontLang::Zh,
    ),
    font(
        "ZCOOL XiaoWei (Serif)",
        r#""ZCOOL XiaoWei", serif"#,
        FontCategory::Display,
        FontLang::Zh,
    ),
];

/// Fonts with affinity for `lang`. `Both` on either side matches.
pub fn fonts_for_lang(lang: FontLang) -> impl Iterator<Item = &'static FontOption> {
    FONT_OPTIONS
        .iter()
        .filter(move |f| lang == FontLang::Both || f.lang == lang || f.lang == FontLang::Both)
}

/// Font whose CSS value is exactly `value`.
pub fn font_by_value(value: &str) -> Option<&'static FontOption> {
    FONT_OPTIONS.iter().find(|f| f.value == value)
}

/// A named, fixed settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub settings: StyleSettings,
}

/// All presets, in panel order.
pub fn presets() -> Vec<Preset> {
    let base = StyleSettings::default();
    vec![
        Preset {
            name: "Clean Reading",
            settings: base.clone(),
        },
        Preset {
            name: "Night Mode",
            settings: StyleSettings {
                color: "#e2e8f0".into(),
                background_color: "#1e293b".into(),
                font_family: DEFAULT_FONT_FAMILY.into(),
                ..base.clone()
            },
        },
        Preset {
            name: "Paperback",
            settings: StyleSettings {
                color: "#2e2e2e".into(),
                background_color: "#fdf6e3".into(),
                font_family: FONT_OPTIONS[1].value.into(),
                line_height: 1.8,
                ..base.clone()
            },
        },
        Preset {
            name: "Typewriter",
            settings: StyleSettings {
                color: "#1a1a1a".into(),
                background_color: "#f5f5f5".into(),
                font_family: FONT_OPTIONS[3].value.into(),
                font_size: 16,
                letter_spacing: 0.5,
                padding_horizontal: 60,
                padding_vertical: 80,
                ..base
            },
        },
    ]
}

/// Look a preset up by name, ignoring case and surrounding whitespace.
pub fn preset_by_name(name: &str) -> Option<Preset> {
    let name = name.trim();
    presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// A text/background color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTheme {
    pub name: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
}

impl ColorTheme {
    /// Patch that sets only the two colors.
    pub fn to_patch(&self) -> StylePatch {
        StylePatch {
            color: Some(self.color.to_string()),
            background_color: Some(self.background_color.to_string()),
            ..Default::default()
        }
    }
}

pub static COLOR_THEMES: [ColorTheme; 6] = [
    theme("Classic", "#334155", "#ffffff"),
    theme("Dark", "#e2e8f0", "#0f172a"),
    theme("Sepia", "#433422", "#f4ecd8"),
    theme("Navy", "#cbd5e1", "#1e293b"),
    theme("Hacker", "#22c55e", "#0f0f0f"),
    theme("Slate", "#f8fafc", "#475569"),
];

const fn theme(
    name: &'static str,
    color: &'static str,
    background_color: &'static str,
) -> ColorTheme {
    ColorTheme {
        name,
        color,
        background_color,
    }
}

pub fn theme_by_name(name: &str) -> Option<&'static ColorTheme> {
    let name = name.trim();
    COLOR_THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}
