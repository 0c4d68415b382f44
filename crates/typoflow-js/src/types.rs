//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use typoflow_core::{
    ColorTheme, FontOption, Preset, StylePatch, StyleSettings, SuggestConfig,
};

/// Complete style settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsStyleSettings {
    pub font_family: String,
    pub font_size: u32,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub paragraph_spacing: f64,
    pub color: String,
    pub background_color: String,
    pub max_width: u32,
    pub font_weight: String,
    pub padding_horizontal: u32,
    pub padding_vertical: u32,
}

impl From<StyleSettings> for JsStyleSettings {
    fn from(s: StyleSettings) -> Self {
        Self {
            font_family: s.font_family,
            font_size: s.font_size,
            line_height: s.line_height,
            letter_spacing: s.letter_spacing,
            paragraph_spacing: s.paragraph_spacing,
            color: s.color,
            background_color: s.background_color,
            max_width: s.max_width,
            font_weight: s.font_weight,
            padding_horizontal: s.padding_horizontal,
            padding_vertical: s.padding_vertical,
        }
    }
}

impl From<JsStyleSettings> for StyleSettings {
    fn from(s: JsStyleSettings) -> Self {
        Self {
            font_family: s.font_family,
            font_size: s.font_size,
            line_height: s.line_height,
            letter_spacing: s.letter_spacing,
            paragraph_spacing: s.paragraph_spacing,
            color: s.color,
            background_color: s.background_color,
            max_width: s.max_width,
            font_weight: s.font_weight,
            padding_horizontal: s.padding_horizontal,
            padding_vertical: s.padding_vertical,
        }
    }
}

/// Partial settings; omitted fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsStylePatch {
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_horizontal: Option<u32>,
    #[tsify(optional)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_vertical: Option<u32>,
}

impl From<StylePatch> for JsStylePatch {
    fn from(p: StylePatch) -> Self {
        Self {
            font_family: p.font_family,
            font_size: p.font_size,
            line_height: p.line_height,
            letter_spacing: p.letter_spacing,
            paragraph_spacing: p.paragraph_spacing,
            color: p.color,
            background_color: p.background_color,
            max_width: p.max_width,
            font_weight: p.font_weight,
            padding_horizontal: p.padding_horizontal,
            padding_vertical: p.padding_vertical,
        }
    }
}

impl From<JsStylePatch> for StylePatch {
    fn from(p: JsStylePatch) -> Self {
        Self {
            font_family: p.font_family,
            font_size: p.font_size,
            line_height: p.line_height,
            letter_spacing: p.letter_spacing,
            paragraph_spacing: p.paragraph_spacing,
            color: p.color,
            background_color: p.background_color,
            max_width: p.max_width,
            font_weight: p.font_weight,
            padding_horizontal: p.padding_horizontal,
            padding_vertical: p.padding_vertical,
        }
    }
}

/// A selectable font.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsFontOption {
    pub name: String,
    /// CSS font-family value.
    pub value: String,
    #[tsify(type = "\"sans\" | \"serif\" | \"mono\" | \"display\"")]
    pub category: String,
    #[tsify(type = "\"en\" | \"zh\" | \"both\"")]
    pub lang: String,
}

impl From<&FontOption> for JsFontOption {
    fn from(f: &FontOption) -> Self {
        use typoflow_core::{FontCategory, FontLang};

        let category = match f.category {
            FontCategory::Sans => "sans",
            FontCategory::Serif => "serif",
            FontCategory::Mono => "mono",
            FontCategory::Display => "display",
        };
        let lang = match f.lang {
            FontLang::En => "en",
            FontLang::Zh => "zh",
            FontLang::Both => "both",
        };
        Self {
            name: f.name.to_string(),
            value: f.value.to_string(),
            category: category.to_string(),
            lang: lang.to_string(),
        }
    }
}

/// A named settings snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsPreset {
    pub name: String,
    pub settings: JsStyleSettings,
}

impl From<Preset> for JsPreset {
    fn from(p: Preset) -> Self {
        Self {
            name: p.name.to_string(),
            settings: p.settings.into(),
        }
    }
}

/// A text/background color pair.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsColorTheme {
    pub name: String,
    pub color: String,
    pub background_color: String,
}

impl From<&ColorTheme> for JsColorTheme {
    fn from(t: &ColorTheme) -> Self {
        Self {
            name: t.name.to_string(),
            color: t.color.to_string(),
            background_color: t.background_color.to_string(),
        }
    }
}

/// Suggestion service settings supplied by the host page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct JsStylerConfig {
    #[tsify(optional)]
    pub api_key: Option<String>,
    #[tsify(optional)]
    pub model: Option<String>,
    #[tsify(optional)]
    pub endpoint: Option<String>,
    #[tsify(optional)]
    pub sample_chars: Option<usize>,
}

impl From<JsStylerConfig> for SuggestConfig {
    fn from(c: JsStylerConfig) -> Self {
        let defaults = SuggestConfig::default();
        Self {
            api_key: c.api_key.unwrap_or(defaults.api_key),
            model: c.model.unwrap_or(defaults.model),
            endpoint: c.endpoint.unwrap_or(defaults.endpoint),
            sample_chars: c.sample_chars.unwrap_or(defaults.sample_chars),
        }
    }
}
