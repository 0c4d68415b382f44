//! Read-only reference data for the host page.

use wasm_bindgen::prelude::*;

use typoflow_core::{
    COLOR_THEMES, DEFAULT_TEXT, FONT_OPTIONS, FONT_WEIGHTS, FontLang, StyleSettings,
    fonts_for_lang, presets,
};

use crate::types::{JsColorTheme, JsFontOption, JsPreset, JsStyleSettings};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// All presets as `JsPreset[]`, in panel order.
#[wasm_bindgen(js_name = getPresets)]
pub fn get_presets() -> Result<JsValue, JsError> {
    let presets: Vec<JsPreset> = presets().into_iter().map(JsPreset::from).collect();
    to_js(&presets)
}

/// Fonts as `JsFontOption[]`, optionally filtered by `"en"`, `"zh"` or `"both"`.
#[wasm_bindgen(js_name = getFonts)]
pub fn get_fonts(lang: Option<String>) -> Result<JsValue, JsError> {
    let fonts: Vec<JsFontOption> = match lang {
        Some(tag) => {
            let lang = FontLang::parse(&tag)
                .ok_or_else(|| JsError::new(&format!("Unknown font language: {}", tag)))?;
            fonts_for_lang(lang).map(JsFontOption::from).collect()
        }
        None => FONT_OPTIONS.iter().map(JsFontOption::from).collect(),
    };
    to_js(&fonts)
}

/// Color themes as `JsColorTheme[]`.
#[wasm_bindgen(js_name = getColorThemes)]
pub fn get_color_themes() -> Result<JsValue, JsError> {
    let themes: Vec<JsColorTheme> = COLOR_THEMES.iter().map(JsColorTheme::from).collect();
    to_js(&themes)
}

#[wasm_bindgen(js_name = getDefaultSettings)]
pub fn get_default_settings() -> JsStyleSettings {
    StyleSettings::default().into()
}

#[wasm_bindgen(js_name = getFontWeights)]
pub fn get_font_weights() -> Vec<String> {
    FONT_WEIGHTS.iter().map(|w| w.to_string()).collect()
}

/// Welcome text shown before the user supplies their own.
#[wasm_bindgen(js_name = getDefaultText)]
pub fn get_default_text() -> String {
    DEFAULT_TEXT.to_string()
}
