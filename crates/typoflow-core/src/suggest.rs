//! Style suggestions from an external text-analysis service.
//!
//! The service is reached through [`StyleSuggester`], an explicitly passed
//! client handle. [`suggest_styles`] builds the request, calls the client
//! once and turns the returned JSON into a [`StylePatch`]. Every field of the
//! response is optional; a missing field leaves the current setting alone.

use std::future::Future;

use serde_json::{Map, Value, json};
use web_time::Instant;

use crate::catalog::FontOption;
use crate::error::SuggestError;
use crate::settings::{FONT_WEIGHTS, StylePatch};

/// Produces the raw JSON text of a suggestion.
///
/// Implemented by [`GeminiClient`](crate::gemini::GeminiClient); tests
/// substitute their own.
pub trait StyleSuggester {
    fn complete(
        &self,
        request: &SuggestionRequest,
    ) -> impl Future<Output = Result<String, SuggestError>>;
}

/// Prompt plus the structured-output schema sent to the service.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub prompt: String,
    pub schema: Value,
}

impl SuggestionRequest {
    pub fn new(text: &str, fonts: &[FontOption], sample_chars: usize) -> Self {
        let font_names = fonts.iter().map(|f| f.name).collect::<Vec<_>>().join(", ");
        let weights = FONT_WEIGHTS
            .iter()
            .map(|w| format!("\"{w}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let sample = sample_text(text, sample_chars);

        let prompt = format!(
            "Analyze the following text sample (which may be English, Chinese, or mixed).
Determine the sentiment, genre (e.g., technical, poetic, novel, news), and language dominance.

Based on this analysis, suggest the optimal CSS typography settings to maximize readability and aesthetic appeal matching the content's mood.

Available Fonts: {font_names}.

Return a JSON object matching the following schema rules:
- fontFamily: Must be one of the Available Fonts names provided.
- color: A hex color string for the text (ensure high contrast with background).
- backgroundColor: A hex color string for the background.
- fontSize: Number (14 to 24).
- lineHeight: Number (1.4 to 2.2).
- letterSpacing: Number (-1 to 3).
- paragraphSpacing: Number (1 to 3, represents em).
- paddingHorizontal: Number (20 to 120).
- paddingVertical: Number (40 to 150).
- fontWeight: String ({weights}).

Text Sample:
\"{sample}...\"
"
        );

        Self {
            prompt,
            schema: response_schema(),
        }
    }
}

/// Structured-output schema: an object whose properties are all optional.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fontFamily": { "type": "STRING" },
            "color": { "type": "STRING" },
            "backgroundColor": { "type": "STRING" },
            "fontSize": { "type": "NUMBER" },
            "lineHeight": { "type": "NUMBER" },
            "letterSpacing": { "type": "NUMBER" },
            "paragraphSpacing": { "type": "NUMBER" },
            "paddingHorizontal": { "type": "NUMBER" },
            "paddingVertical": { "type": "NUMBER" },
            "fontWeight": { "type": "STRING" },
        }
    })
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn sample_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Map a font name from the service back to a known font.
///
/// Order: exact display name (case-insensitive), exact CSS value, then
/// containment in either direction. Among containment hits the longest
/// display name wins, so "Noto Serif SC" prefers "Noto Serif SC (Serif)"
/// over anything merely sharing "Noto".
pub fn match_font<'a>(fonts: &'a [FontOption], suggested: &str) -> Option<&'a FontOption> {
    let wanted = suggested.trim();
    if wanted.is_empty() {
        return None;
    }
    let wanted_lower = wanted.to_lowercase();

    if let Some(font) = fonts.iter().find(|f| f.name.to_lowercase() == wanted_lower) {
        return Some(font);
    }
    if let Some(font) = fonts.iter().find(|f| f.value == wanted) {
        return Some(font);
    }

    fonts
        .iter()
        .filter(|f| {
            let name = f.name.to_lowercase();
            name.contains(&wanted_lower) || wanted_lower.contains(&name)
        })
        .max_by_key(|f| f.name.len())
}

/// Turn the service's JSON text into a patch.
///
/// Fields with an unusable JSON type are dropped; values are not range
/// checked. A named but unknown font falls back to `default_font`.
pub fn parse_suggestion(
    raw: &str,
    fonts: &[FontOption],
    default_font: &str,
) -> Result<StylePatch, SuggestError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    let Value::Object(fields) = value else {
        return Err(SuggestError::NotAnObject(value.to_string()));
    };

    let font_family = string_field(&fields, "fontFamily").map(|name| {
        match match_font(fonts, &name) {
            Some(font) => font.value.to_string(),
            None => {
                tracing::debug!(font = %name, "unrecognized suggested font, using default");
                default_font.to_string()
            }
        }
    });

    Ok(StylePatch {
        font_family,
        font_size: pixel_field(&fields, "fontSize"),
        line_height: number_field(&fields, "lineHeight"),
        letter_spacing: number_field(&fields, "letterSpacing"),
        paragraph_spacing: number_field(&fields, "paragraphSpacing"),
        color: string_field(&fields, "color"),
        background_color: string_field(&fields, "backgroundColor"),
        max_width: pixel_field(&fields, "maxWidth"),
        font_weight: weight_field(&fields, "fontWeight"),
        padding_horizontal: pixel_field(&fields, "paddingHorizontal"),
        padding_vertical: pixel_field(&fields, "paddingVertical"),
    })
}

/// Ask the service for a patch matching `text`.
///
/// Empty or whitespace-only text returns an empty patch without calling the
/// client. Failures are returned as-is; callers decide how to report them.
pub async fn suggest_styles<S: StyleSuggester>(
    client: &S,
    text: &str,
    fonts: &[FontOption],
    default_font: &str,
    sample_chars: usize,
) -> Result<StylePatch, SuggestError> {
    if text.trim().is_empty() {
        tracing::debug!("empty document, skipping suggestion request");
        return Ok(StylePatch::default());
    }

    let request = SuggestionRequest::new(text, fonts, sample_chars);
    let start = Instant::now();
    let raw = client.complete(&request).await.inspect_err(|e| {
        tracing::warn!(error = %e, "style suggestion request failed");
    })?;
    let patch = parse_suggestion(&raw, fonts, default_font)?;

    tracing::info!(
        text_len = text.len(),
        fields = patch.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "style suggestion received"
    );
    Ok(patch)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::debug!(field = key, value = %other, "dropping non-string field");
            None
        }
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let n = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            tracing::debug!(field = key, "dropping non-numeric field");
            None
        }
    }
}

fn pixel_field(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    // Float to int `as` saturates, so negatives land on 0.
    number_field(fields, key).map(|n| n.round() as u32)
}

fn weight_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => {
            tracing::debug!(field = key, value = %other, "dropping font weight");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FONT_OPTIONS;
    use crate::settings::{DEFAULT_FONT_FAMILY, StyleSettings};
    use std::cell::{Cell, RefCell};

    /// Canned responder that records how often it was called.
    struct FakeSuggester {
        response: Result<String, ()>,
        calls: Cell<usize>,
        last_prompt: RefCell<Option<String>>,
    }

    impl FakeSuggester {
        fn ok(json: &str) -> Self {
            Self {
                response: Ok(json.to_string()),
                calls: Cell::new(0),
                last_prompt: RefCell::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: Cell::new(0),
                last_prompt: RefCell::new(None),
            }
        }
    }

    impl StyleSuggester for FakeSuggester {
        async fn complete(&self, request: &SuggestionRequest) -> Result<String, SuggestError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = Some(request.prompt.clone());
            self.response.clone().map_err(|_| SuggestError::EmptyResponse)
        }
    }

    async fn run(client: &FakeSuggester, text: &str) -> Result<StylePatch, SuggestError> {
        suggest_styles(client, text, &FONT_OPTIONS, DEFAULT_FONT_FAMILY, 1000).await
    }

    #[tokio::test]
    async fn test_blank_text_makes_no_call() {
        let client = FakeSuggester::ok(r#"{"fontSize": 20}"#);
        for text in ["", "   ", "\n\t \n"] {
            let patch = run(&client, text).await.unwrap();
            assert!(patch.is_empty());
        }
        assert_eq!(client.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_single_field_changes_only_that_field() {
        let client = FakeSuggester::ok(r#"{"fontSize": 20}"#);
        let patch = run(&client, "Some prose.").await.unwrap();
        assert_eq!(client.calls.get(), 1);
        assert_eq!(patch.len(), 1);

        let before = StyleSettings::default();
        let after = before.merged(&patch);
        let mut expected = before.clone();
        expected.font_size = 20;
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn test_unknown_font_falls_back_to_default() {
        let client = FakeSuggester::ok(r#"{"fontFamily": "Comic Sans MS"}"#);
        let patch = run(&client, "hello").await.unwrap();
        assert_eq!(patch.font_family.as_deref(), Some(DEFAULT_FONT_FAMILY));
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let client = FakeSuggester::failing();
        let err = run(&client, "hello").await.unwrap_err();
        assert!(matches!(err, SuggestError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_full_response() {
        let client = FakeSuggester::ok(
            r##"{
                "fontFamily": "Merriweather (Serif)",
                "color": "#2e2e2e",
                "backgroundColor": "#fdf6e3",
                "fontSize": 19.6,
                "lineHeight": 1.9,
                "letterSpacing": -0.5,
                "paragraphSpacing": 2,
                "paddingHorizontal": 80,
                "paddingVertical": 100,
                "fontWeight": "300"
            }"##,
        );
        let patch = run(&client, "A quiet autumn poem.").await.unwrap();
        assert_eq!(
            patch.font_family.as_deref(),
            Some(r#""Merriweather", "Noto Serif SC", serif"#)
        );
        assert_eq!(patch.font_size, Some(20));
        assert_eq!(patch.line_height, Some(1.9));
        assert_eq!(patch.letter_spacing, Some(-0.5));
        assert_eq!(patch.paragraph_spacing, Some(2.0));
        assert_eq!(patch.padding_horizontal, Some(80));
        assert_eq!(patch.padding_vertical, Some(100));
        assert_eq!(patch.font_weight.as_deref(), Some("300"));
        assert_eq!(patch.max_width, None);
        assert_eq!(patch.len(), 10);
    }

    #[tokio::test]
    async fn test_prompt_is_truncated() {
        let client = FakeSuggester::ok("{}");
        let text = "字".repeat(1500);
        run(&client, &text).await.unwrap();
        let prompt = client.last_prompt.borrow().clone().unwrap();
        let expected = format!("\"{}...\"", "字".repeat(1000));
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&"字".repeat(1001)));
        assert!(prompt.contains("Ma Shan Zheng (Calligraphy)"));
    }

    #[test]
    fn test_malformed_fields_are_dropped() {
        let patch = parse_suggestion(
            r#"{"fontSize": "big", "lineHeight": "1.7", "color": 12, "fontWeight": 600, "extra": true}"#,
            &FONT_OPTIONS,
            DEFAULT_FONT_FAMILY,
        )
        .unwrap();
        assert_eq!(patch.font_size, None);
        assert_eq!(patch.line_height, Some(1.7));
        assert_eq!(patch.color, None);
        assert_eq!(patch.font_weight.as_deref(), Some("600"));
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let patch = parse_suggestion(
            r#"{"fontSize": 99, "paddingVertical": -10, "letterSpacing": 12}"#,
            &FONT_OPTIONS,
            DEFAULT_FONT_FAMILY,
        )
        .unwrap();
        assert_eq!(patch.font_size, Some(99));
        assert_eq!(patch.padding_vertical, Some(0));
        assert_eq!(patch.letter_spacing, Some(12.0));
    }

    #[test]
    fn test_absent_font_leaves_family_alone() {
        let patch =
            parse_suggestion(r#"{"lineHeight": 2}"#, &FONT_OPTIONS, DEFAULT_FONT_FAMILY).unwrap();
        assert_eq!(patch.font_family, None);
    }

    #[test]
    fn test_non_object_is_error() {
        let err = parse_suggestion("[1, 2]", &FONT_OPTIONS, DEFAULT_FONT_FAMILY).unwrap_err();
        assert!(matches!(err, SuggestError::NotAnObject(_)));
        let err = parse_suggestion("not json", &FONT_OPTIONS, DEFAULT_FONT_FAMILY).unwrap_err();
        assert!(matches!(err, SuggestError::Json(_)));
    }

    #[test]
    fn test_code_fence_is_tolerated() {
        let patch = parse_suggestion(
            "```json\n{\"fontSize\": 16}\n```",
            &FONT_OPTIONS,
            DEFAULT_FONT_FAMILY,
        )
        .unwrap();
        assert_eq!(patch.font_size, Some(16));
    }

    #[test]
    fn test_match_font_order() {
        let name = |s: &str| match_font(&FONT_OPTIONS, s).map(|f| f.name);

        assert_eq!(name("inter (sans)"), Some("Inter (Sans)"));
        assert_eq!(name("Fira Code"), Some("Fira Code (Mono)"));
        assert_eq!(name(r#""Fira Code", monospace"#), Some("Fira Code (Mono)"));
        // The model sometimes appends extra words around the display name.
        assert_eq!(
            name("Noto Serif SC (Serif) font"),
            Some("Noto Serif SC (Serif)")
        );
        // Shared substring: longest containing name wins.
        assert_eq!(name("Noto"), Some("Noto Serif SC (Serif)"));
        assert_eq!(name("Sans"), Some("Noto Sans SC (Sans)"));
        assert_eq!(name("Papyrus"), None);
        assert_eq!(name("  "), None);
    }

    #[test]
    fn test_sample_text_char_boundary() {
        assert_eq!(sample_text("héllo", 2), "hé");
        assert_eq!(sample_text("abc", 10), "abc");
        assert_eq!(sample_text("abc", 0), "");
    }

    #[test]
    fn test_schema_lists_every_field() {
        let schema = response_schema();
        let props = schema["properties"].as_object().unwrap();
        assert_eq!(props.len(), 10);
        assert_eq!(props["fontSize"]["type"], "NUMBER");
        assert_eq!(props["fontWeight"]["type"], "STRING");
    }
}
