//! Typography settings and partial patches.
//!
//! `StyleSettings` is always a complete record. Every change goes through a
//! `StylePatch`, a mirror of the record with each field optional, and is
//! merged shallowly: fields the patch leaves as `None` keep their value.

use serde::{Deserialize, Serialize};

/// Font weights offered by the settings panel and accepted from suggestions.
pub const FONT_WEIGHTS: [&str; 4] = ["300", "400", "600", "700"];

/// CSS font-family value of the default font (Inter with a CJK fallback).
pub const DEFAULT_FONT_FAMILY: &str = r#""Inter", "Noto Sans SC", sans-serif"#;

/// The complete set of presentation parameters applied to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    /// CSS font-family value (not the display name).
    pub font_family: String,
    /// Pixels.
    pub font_size: u32,
    pub line_height: f64,
    /// Pixels, may be negative.
    pub letter_spacing: f64,
    /// Em units between consecutive blocks.
    pub paragraph_spacing: f64,
    pub color: String,
    pub background_color: String,
    /// Pixels.
    pub max_width: u32,
    pub font_weight: String,
    pub padding_horizontal: u32,
    pub padding_vertical: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 18,
            line_height: 1.6,
            letter_spacing: 0.0,
            paragraph_spacing: 1.5,
            color: "#334155".to_string(),
            background_color: "#ffffff".to_string(),
            max_width: 800,
            font_weight: "400".to_string(),
            padding_horizontal: 40,
            padding_vertical: 60,
        }
    }
}

impl StyleSettings {
    /// Return a copy with the patch merged in.
    pub fn merged(&self, patch: &StylePatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    /// Merge a patch in place. Values are taken as given, without range checks.
    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(v) = &patch.font_family {
            self.font_family = v.clone();
        }
        if let Some(v) = patch.font_size {
            self.font_size = v;
        }
        if let Some(v) = patch.line_height {
            self.line_height = v;
        }
        if let Some(v) = patch.letter_spacing {
            self.letter_spacing = v;
        }
        if let Some(v) = patch.paragraph_spacing {
            self.paragraph_spacing = v;
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = patch.max_width {
            self.max_width = v;
        }
        if let Some(v) = &patch.font_weight {
            self.font_weight = v.clone();
        }
        if let Some(v) = patch.padding_horizontal {
            self.padding_horizontal = v;
        }
        if let Some(v) = patch.padding_vertical {
            self.padding_vertical = v;
        }
    }
}

/// A partial `StyleSettings`. `None` means "no change for this field".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_horizontal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_vertical: Option<u32>,
}

impl StylePatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of fields the patch sets.
    pub fn len(&self) -> usize {
        [
            self.font_family.is_some(),
            self.font_size.is_some(),
            self.line_height.is_some(),
            self.letter_spacing.is_some(),
            self.paragraph_spacing.is_some(),
            self.color.is_some(),
            self.background_color.is_some(),
            self.max_width.is_some(),
            self.font_weight.is_some(),
            self.padding_horizontal.is_some(),
            self.padding_vertical.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl From<StyleSettings> for StylePatch {
    fn from(s: StyleSettings) -> Self {
        Self {
            font_family: Some(s.font_family),
            font_size: Some(s.font_size),
            line_height: Some(s.line_height),
            letter_spacing: Some(s.letter_spacing),
            paragraph_spacing: Some(s.paragraph_spacing),
            color: Some(s.color),
            background_color: Some(s.background_color),
            max_width: Some(s.max_width),
            font_weight: Some(s.font_weight),
            padding_horizontal: Some(s.padding_horizontal),
            padding_vertical: Some(s.padding_vertical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_single_field() {
        let base = StyleSettings::default();
        let patch = StylePatch {
            font_size: Some(20),
            ..Default::default()
        };
        let merged = base.merged(&patch);

        assert_eq!(merged.font_size, 20);
        let mut expected = base.clone();
        expected.font_size = 20;
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let base = StyleSettings::default();
        assert!(StylePatch::default().is_empty());
        assert_eq!(base.merged(&StylePatch::default()), base);
    }

    #[test]
    fn test_patch_sequence_keeps_record_complete() {
        let patches = vec![
            StylePatch {
                color: Some("#000000".into()),
                ..Default::default()
            },
            StylePatch {
                font_size: Some(0),
                line_height: Some(-3.0),
                ..Default::default()
            },
            StylePatch {
                font_weight: Some("bogus".into()),
                font_family: Some(String::new()),
                ..Default::default()
            },
            StylePatch::from(StyleSettings::default()),
            StylePatch {
                padding_vertical: Some(999),
                ..Default::default()
            },
        ];

        let mut settings = StyleSettings::default();
        for patch in &patches {
            settings.apply(patch);
            // Every field must survive a serialize round without going missing.
            let value = serde_json::to_value(&settings).unwrap();
            assert_eq!(value.as_object().unwrap().len(), 11);
        }
        assert_eq!(settings.padding_vertical, 999);
        assert_eq!(settings.font_size, 18);
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let settings = StyleSettings::default().merged(&StylePatch {
            letter_spacing: Some(-40.0),
            max_width: Some(1),
            ..Default::default()
        });
        assert_eq!(settings.letter_spacing, -40.0);
        assert_eq!(settings.max_width, 1);
    }

    #[test]
    fn test_patch_deserializes_partial_camel_case() {
        let patch: StylePatch =
            serde_json::from_str(r##"{"fontSize": 20, "backgroundColor": "#111111"}"##).unwrap();
        assert_eq!(patch.font_size, Some(20));
        assert_eq!(patch.background_color.as_deref(), Some("#111111"));
        assert_eq!(patch.len(), 2);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = StylePatch {
            line_height: Some(1.8),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"lineHeight":1.8}"#
        );
    }

    #[test]
    fn test_full_patch_round_trips_settings() {
        let settings = StyleSettings {
            font_size: 22,
            color: "#abcdef".into(),
            ..Default::default()
        };
        let patch = StylePatch::from(settings.clone());
        assert_eq!(patch.len(), 11);
        assert_eq!(StyleSettings::default().merged(&patch), settings);
    }
}
