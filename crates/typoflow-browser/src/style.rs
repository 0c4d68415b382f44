//! Applying `StyleSettings` to the live surface.
//!
//! Container declarations go inline on the editor element. Paragraph spacing
//! needs a child selector, so it lives in a `<style>` element in the document
//! head, keyed by the editor id.

use web_sys::HtmlElement;

use typoflow_core::{StyleSettings, block_spacing_rule, container_declarations};

use crate::error::DomError;

/// Id of the `<style>` element carrying rules for `editor_id`.
pub fn rules_element_id(editor_id: &str) -> String {
    format!("{editor_id}-rules")
}

/// Set every container declaration on `editor` and refresh its spacing rule.
pub fn apply_settings(editor: &HtmlElement, settings: &StyleSettings) -> Result<(), DomError> {
    let style = editor.style();
    for (property, value) in container_declarations(settings) {
        style.set_property(property, &value)?;
    }

    let editor_id = editor.id();
    if editor_id.is_empty() {
        tracing::warn!("apply_settings: editor has no id, skipping spacing rule");
        return Ok(());
    }

    let document = editor.owner_document().ok_or(DomError::NoDocument)?;
    let rules_id = rules_element_id(&editor_id);
    let rules = match document.get_element_by_id(&rules_id) {
        Some(existing) => existing,
        None => {
            let created = document.create_element("style")?;
            created.set_id(&rules_id);
            let head = document.head().ok_or(DomError::ElementNotFound("head".into()))?;
            head.append_child(&created)?;
            created
        }
    };
    rules.set_text_content(Some(&block_spacing_rule(
        &format!("#{editor_id}"),
        settings.paragraph_spacing,
    )));

    tracing::debug!(
        editor_id = %editor_id,
        font_size = settings.font_size,
        "apply_settings: styles applied"
    );
    Ok(())
}

/// Remove the spacing rule element for `editor_id`, if present.
pub fn remove_rules(editor_id: &str) -> Result<(), DomError> {
    let document = crate::error::document()?;
    if let Some(rules) = document.get_element_by_id(&rules_element_id(editor_id)) {
        rules.remove();
    }
    Ok(())
}
