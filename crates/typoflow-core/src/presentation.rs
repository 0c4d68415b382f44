//! CSS generated from `StyleSettings`.
//!
//! Everything except paragraph spacing is a declaration on the surface
//! container. Paragraph spacing is a separate rule targeting consecutive
//! blocks, because the editable element has no notion of paragraph margins
//! and the spacing must never leak into the text.

use std::fmt::Write;

use markdown_weaver_escape::{FmtWriter, escape_html};

use crate::settings::StyleSettings;
use crate::surface::render_blocks;

/// Element id used by [`render_document_html`].
pub const DOCUMENT_ID: &str = "typoflow-document";

/// Container declarations in application order.
pub fn container_declarations(settings: &StyleSettings) -> Vec<(&'static str, String)> {
    vec![
        ("font-family", settings.font_family.clone()),
        ("font-size", format!("{}px", settings.font_size)),
        ("line-height", settings.line_height.to_string()),
        ("letter-spacing", format!("{}px", settings.letter_spacing)),
        ("font-weight", settings.font_weight.clone()),
        ("color", settings.color.clone()),
        ("background-color", settings.background_color.clone()),
        ("max-width", format!("{}px", settings.max_width)),
        ("width", "100%".to_string()),
        ("margin", "0 auto".to_string()),
        ("box-sizing", "border-box".to_string()),
        (
            "padding",
            format!(
                "{}px {}px",
                settings.padding_vertical, settings.padding_horizontal
            ),
        ),
        ("white-space", "pre-wrap".to_string()),
        ("overflow-wrap", "break-word".to_string()),
    ]
}

/// Inline `style` attribute value for the container.
pub fn container_style(settings: &StyleSettings) -> String {
    let mut style = String::new();
    for (i, (property, value)) in container_declarations(settings).iter().enumerate() {
        if i > 0 {
            style.push(' ');
        }
        let _ = write!(style, "{property}: {value};");
    }
    style
}

/// Stylesheet rules spacing consecutive blocks under `selector`.
pub fn block_spacing_rule(selector: &str, paragraph_spacing: f64) -> String {
    format!(
        "{selector} > * {{ margin: 0; }} {selector} > * + * {{ margin-top: {paragraph_spacing}em; }}"
    )
}

/// Standalone HTML fragment: spacing rules, styled container and blocks.
pub fn render_document_html(text: &str, settings: &StyleSettings) -> String {
    let mut html = String::new();
    let selector = format!("#{DOCUMENT_ID}");
    let _ = writeln!(
        html,
        "<style>{}</style>",
        block_spacing_rule(&selector, settings.paragraph_spacing)
    );
    html.push_str("<div id=\"");
    html.push_str(DOCUMENT_ID);
    html.push_str("\" style=\"");
    let _ = escape_html(FmtWriter(&mut html), &container_style(settings));
    html.push_str("\">\n");
    for block in render_blocks(text) {
        let _ = writeln!(html, "<div>{}</div>", block.html);
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StylePatch;

    #[test]
    fn test_container_declarations_follow_settings() {
        let settings = StyleSettings::default().merged(&StylePatch {
            font_size: Some(20),
            letter_spacing: Some(-0.5),
            padding_horizontal: Some(12),
            padding_vertical: Some(34),
            ..Default::default()
        });
        let decls = container_declarations(&settings);
        let get = |name: &str| {
            decls
                .iter()
                .find(|(p, _)| *p == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("font-size"), Some("20px"));
        assert_eq!(get("letter-spacing"), Some("-0.5px"));
        assert_eq!(get("line-height"), Some("1.6"));
        assert_eq!(get("padding"), Some("34px 12px"));
        assert_eq!(get("max-width"), Some("800px"));
        assert_eq!(get("white-space"), Some("pre-wrap"));
        // Paragraph spacing is never a container declaration.
        assert!(decls.iter().all(|(_, v)| !v.contains("em")));
    }

    #[test]
    fn test_spacing_rule() {
        insta::assert_snapshot!(
            block_spacing_rule("#ed", 1.5),
            @"#ed > * { margin: 0; } #ed > * + * { margin-top: 1.5em; }"
        );
        insta::assert_snapshot!(
            block_spacing_rule("#ed", 2.0),
            @"#ed > * { margin: 0; } #ed > * + * { margin-top: 2em; }"
        );
    }

    #[test]
    fn test_document_html() {
        let settings = StyleSettings {
            font_family: "serif".into(),
            ..Default::default()
        };
        let expected = concat!(
            "<style>#typoflow-document > * { margin: 0; } ",
            "#typoflow-document > * + * { margin-top: 1.5em; }</style>\n",
            "<div id=\"typoflow-document\" style=\"font-family: serif; font-size: 18px; ",
            "line-height: 1.6; letter-spacing: 0px; font-weight: 400; color: #334155; ",
            "background-color: #ffffff; max-width: 800px; width: 100%; margin: 0 auto; ",
            "box-sizing: border-box; padding: 60px 40px; white-space: pre-wrap; ",
            "overflow-wrap: break-word;\">\n",
            "<div>a &lt; b</div>\n",
            "<div><br></div>\n",
            "<div>c</div>\n",
            "</div>\n",
        );
        assert_eq!(render_document_html("a < b\n\nc", &settings), expected);
    }

    #[test]
    fn test_quoted_font_family_is_attribute_escaped() {
        let html = render_document_html("x", &StyleSettings::default());
        assert!(html.contains("font-family: &quot;Inter&quot;"));
    }
}
