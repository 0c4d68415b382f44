//! The controlled editable surface bound to one DOM element.

use web_sys::HtmlElement;

use typoflow_core::{StyleStore, SurfaceSync, SyncDecision};

use crate::cursor::{caret_position, is_focused, restore_caret};
use crate::dom_sync::{extract_element_text, update_block_dom};
use crate::error::{DomError, html_element_by_id};

/// Glue between `SurfaceSync` decisions and the editor element.
///
/// Text flows in through [`set_text`](Self::set_text) and out through
/// [`handle_input`](Self::handle_input). An edit the user just made is
/// echoed back without touching the DOM, so the browser's caret survives.
#[derive(Debug)]
pub struct BrowserSurface {
    editor_id: String,
    sync: SurfaceSync,
    applied_revision: Option<u64>,
}

impl BrowserSurface {
    pub fn new(editor_id: impl Into<String>) -> Self {
        Self {
            editor_id: editor_id.into(),
            sync: SurfaceSync::new(),
            applied_revision: None,
        }
    }

    pub fn editor_id(&self) -> &str {
        &self.editor_id
    }

    pub fn element(&self) -> Result<HtmlElement, DomError> {
        html_element_by_id(&self.editor_id)
    }

    /// Text the DOM is known to display.
    pub fn rendered(&self) -> Option<&str> {
        self.sync.rendered()
    }

    /// Show `text`. Returns whether the DOM was rebuilt.
    ///
    /// When focus is inside the editor the caret is carried across the
    /// rebuild by line and offset. On failure the surface forgets what it
    /// shows, so the next call tries again.
    pub fn set_text(&mut self, text: &str) -> Result<bool, DomError> {
        let SyncDecision::Resync(blocks) = self.sync.on_external_text(text) else {
            return Ok(false);
        };

        let result = self.element().and_then(|editor| {
            let caret = if is_focused(&editor) {
                caret_position(&editor)
            } else {
                None
            };
            update_block_dom(&editor, &blocks, false)?;
            if let Some(caret) = caret {
                if let Err(e) = restore_caret(&editor, caret.clamp_to(&blocks)) {
                    tracing::warn!("set_text: caret restore failed: {e}");
                }
            }
            Ok(())
        });

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::error!(editor_id = %self.editor_id, "set_text: resync failed: {e}");
                self.sync.invalidate();
                Err(e)
            }
        }
    }

    /// Read the DOM after a user edit and return its text.
    pub fn handle_input(&mut self) -> Result<String, DomError> {
        let editor = self.element()?;
        let text = extract_element_text(&editor);
        Ok(self.sync.on_local_edit(text))
    }

    /// Push the store's settings to the element unless they are already shown.
    ///
    /// Returns whether anything was applied.
    pub fn apply_settings(&mut self, store: &StyleStore) -> Result<bool, DomError> {
        if self.applied_revision == Some(store.revision()) {
            return Ok(false);
        }
        let editor = self.element()?;
        crate::style::apply_settings(&editor, store.settings())?;
        self.applied_revision = Some(store.revision());
        Ok(true)
    }

    /// Forget all rendered state; the next text and settings always apply.
    pub fn invalidate(&mut self) {
        self.sync.invalidate();
        self.applied_revision = None;
    }
}
