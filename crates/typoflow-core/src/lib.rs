//! typoflow-core: framework-free logic for the typoflow text styler.
//!
//! This crate provides:
//! - `StyleSettings` / `StylePatch` and the `StyleStore` that owns them
//! - Font, preset and color theme catalogs
//! - The block model and `SurfaceSync` state machine behind the editable surface
//! - CSS generation for the surface container and paragraph spacing
//! - Style suggestions through an injected `StyleSuggester` (Gemini by default)

pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini;
pub mod presentation;
pub mod settings;
pub mod store;
pub mod suggest;
pub mod surface;

pub use catalog::{
    COLOR_THEMES, ColorTheme, DEFAULT_TEXT, FONT_OPTIONS, FontCategory, FontLang, FontOption,
    Preset, font_by_value, fonts_for_lang, preset_by_name, presets, theme_by_name,
};
pub use config::SuggestConfig;
pub use error::{ConfigError, SuggestError};
pub use gemini::GeminiClient;
pub use presentation::{
    block_spacing_rule, container_declarations, container_style, render_document_html,
};
pub use settings::{DEFAULT_FONT_FAMILY, FONT_WEIGHTS, StylePatch, StyleSettings};
pub use smol_str::SmolStr;
pub use store::StyleStore;
pub use suggest::{
    StyleSuggester, SuggestionRequest, match_font, parse_suggestion, suggest_styles,
};
pub use surface::{
    BlockRender, CaretPosition, SurfaceSync, SyncDecision, join_blocks, render_blocks,
};
