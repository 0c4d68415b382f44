//! JsStyler - the styler wrapper for JavaScript.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use typoflow_browser::file::read_file_text;
use typoflow_browser::style::remove_rules;
use typoflow_browser::{BrowserSurface, InputBinding};
use typoflow_core::{
    DEFAULT_FONT_FAMILY, DEFAULT_TEXT, FONT_OPTIONS, GeminiClient, StyleStore, SuggestConfig,
    preset_by_name, suggest_styles, theme_by_name,
};

use crate::types::{JsStylePatch, JsStyleSettings, JsStylerConfig};

/// State shared with input listeners and in-flight promises.
struct StylerState {
    store: StyleStore,
    text: String,
    surface: Option<BrowserSurface>,
    on_change: Option<js_sys::Function>,
    suggesting: bool,
}

impl StylerState {
    /// Push current text and settings to the mounted surface, if any.
    fn sync_surface(&mut self) -> Result<(), JsError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface
            .set_text(&self.text)
            .map_err(|e| JsError::new(&format!("Failed to update surface: {}", e)))?;
        surface
            .apply_settings(&self.store)
            .map_err(|e| JsError::new(&format!("Failed to apply settings: {}", e)))?;
        Ok(())
    }

    /// Style-only refresh; the text is untouched.
    fn sync_styles(&mut self) -> Result<(), JsError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface
            .apply_settings(&self.store)
            .map_err(|e| JsError::new(&format!("Failed to apply settings: {}", e)))?;
        Ok(())
    }
}

/// Call the host's onChange callback outside any state borrow, so the host
/// may call back into the styler.
fn notify_change(state: &Rc<RefCell<StylerState>>) {
    let (callback, text) = {
        let state = state.borrow();
        (state.on_change.clone(), state.text.clone())
    };
    if let Some(callback) = callback {
        let _ = callback.call1(&JsValue::null(), &JsValue::from_str(&text));
    }
}

/// The text styler exposed to JavaScript.
///
/// Owns the document text and the style store, and drives an editable
/// surface once mounted.
#[wasm_bindgen]
pub struct JsStyler {
    state: Rc<RefCell<StylerState>>,
    client: Rc<GeminiClient>,
    binding: Option<InputBinding>,
}

#[wasm_bindgen]
impl JsStyler {
    /// Create a styler holding the welcome text and default settings.
    ///
    /// `config` configures the suggestion service; without an API key,
    /// `suggest()` rejects.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsStylerConfig>) -> Self {
        let config: SuggestConfig = config.unwrap_or_default().into();
        tracing::debug!(?config, "creating styler");

        Self {
            state: Rc::new(RefCell::new(StylerState {
                store: StyleStore::default(),
                text: DEFAULT_TEXT.to_string(),
                surface: None,
                on_change: None,
                suggesting: false,
            })),
            client: Rc::new(GeminiClient::new(config)),
            binding: None,
        }
    }

    // === Text ===

    /// Get the document text.
    #[wasm_bindgen(js_name = getText)]
    pub fn get_text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// Replace the document text. Does not fire onChange.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&self, text: &str) -> Result<(), JsError> {
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.sync_surface()
    }

    /// Replace the document with the contents of a text file.
    ///
    /// Resolves with the new text and fires onChange.
    #[wasm_bindgen(js_name = importFile)]
    pub fn import_file(&self, file: web_sys::File) -> js_sys::Promise {
        let state = self.state.clone();
        future_to_promise(async move {
            let text = read_file_text(&file)
                .await
                .map_err(|e| JsError::new(&format!("Failed to read file: {}", e)))?;
            tracing::info!(name = %file.name(), bytes = text.len(), "imported file");
            {
                let mut state = state.borrow_mut();
                state.text = text.clone();
                state.sync_surface()?;
            }
            notify_change(&state);
            Ok::<JsValue, JsValue>(JsValue::from_str(&text))
        })
    }

    // === Settings ===

    /// Get the current settings.
    #[wasm_bindgen(js_name = getSettings)]
    pub fn get_settings(&self) -> JsStyleSettings {
        self.state.borrow().store.settings().clone().into()
    }

    /// Merge a partial update and return the merged settings.
    #[wasm_bindgen(js_name = patchSettings)]
    pub fn patch_settings(&self, patch: JsStylePatch) -> Result<JsStyleSettings, JsError> {
        let mut state = self.state.borrow_mut();
        let merged = state.store.patch(patch.into()).clone();
        state.sync_styles()?;
        Ok(merged.into())
    }

    /// Replace every setting at once.
    #[wasm_bindgen(js_name = replaceSettings)]
    pub fn replace_settings(&self, settings: JsStyleSettings) -> Result<(), JsError> {
        let mut state = self.state.borrow_mut();
        state.store.replace(settings.into());
        state.sync_styles()
    }

    /// Apply a preset by name (case-insensitive).
    #[wasm_bindgen(js_name = applyPreset)]
    pub fn apply_preset(&self, name: &str) -> Result<JsStyleSettings, JsError> {
        let preset =
            preset_by_name(name).ok_or_else(|| JsError::new(&format!("Unknown preset: {}", name)))?;
        let mut state = self.state.borrow_mut();
        state.store.apply_preset(&preset);
        state.sync_styles()?;
        Ok(state.store.settings().clone().into())
    }

    /// Apply a color theme by name (case-insensitive).
    #[wasm_bindgen(js_name = applyTheme)]
    pub fn apply_theme(&self, name: &str) -> Result<JsStyleSettings, JsError> {
        let theme =
            theme_by_name(name).ok_or_else(|| JsError::new(&format!("Unknown theme: {}", name)))?;
        let mut state = self.state.borrow_mut();
        state.store.apply_theme(theme);
        state.sync_styles()?;
        Ok(state.store.settings().clone().into())
    }

    // === Suggestions ===

    /// Ask the suggestion service for settings matching the current text.
    ///
    /// Resolves with the applied patch (empty for an empty document). Rejects
    /// when a suggestion is already in flight or the request fails; settings
    /// are unchanged on failure.
    #[wasm_bindgen]
    pub fn suggest(&self) -> js_sys::Promise {
        let text = {
            let mut state = self.state.borrow_mut();
            if state.suggesting {
                return js_sys::Promise::reject(
                    &JsError::new("suggestion already in progress").into(),
                );
            }
            state.suggesting = true;
            state.text.clone()
        };

        let state = self.state.clone();
        let client = self.client.clone();
        future_to_promise(async move {
            let result = suggest_styles(
                &*client,
                &text,
                &FONT_OPTIONS,
                DEFAULT_FONT_FAMILY,
                client.config().sample_chars,
            )
            .await;

            let mut state = state.borrow_mut();
            state.suggesting = false;
            let patch = result.map_err(|e| JsError::new(&e.to_string()))?;
            state.store.patch(patch.clone());
            if let Err(e) = state.sync_styles() {
                tracing::warn!("suggestion applied but surface not updated: {:?}", JsValue::from(e));
            }
            let value = serde_wasm_bindgen::to_value(&JsStylePatch::from(patch))
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))?;
            Ok::<JsValue, JsValue>(value)
        })
    }

    /// Whether a suggestion request is in flight.
    #[wasm_bindgen(js_name = isSuggesting)]
    pub fn is_suggesting(&self) -> bool {
        self.state.borrow().suggesting
    }

    // === Mounting ===

    /// Mount the styler into a container element.
    ///
    /// Creates a contenteditable div inside the container and listens for
    /// edits. The onChange callback receives the new text after each edit.
    #[wasm_bindgen]
    pub fn mount(
        &mut self,
        container: &HtmlElement,
        on_change: Option<js_sys::Function>,
    ) -> Result<(), JsError> {
        if self.is_mounted() {
            self.unmount();
        }

        let window = web_sys::window().ok_or_else(|| JsError::new("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("No document"))?;

        // Generate unique ID for the editor element
        let editor_id = format!("typoflow-editor-{}", js_sys::Math::random().to_bits());

        let editor_el: HtmlElement = document
            .create_element("div")
            .map_err(|e| JsError::new(&format!("Failed to create element: {:?}", e)))?
            .dyn_into()
            .map_err(|_| JsError::new("Created element is not an HtmlElement"))?;

        editor_el.set_id(&editor_id);
        for (name, value) in [
            ("contenteditable", "true"),
            ("class", "typoflow-surface"),
            ("spellcheck", "false"),
        ] {
            editor_el
                .set_attribute(name, value)
                .map_err(|e| JsError::new(&format!("Failed to set {}: {:?}", name, e)))?;
        }

        container
            .append_child(&editor_el)
            .map_err(|e| JsError::new(&format!("Failed to append child: {:?}", e)))?;

        {
            let mut state = self.state.borrow_mut();
            state.surface = Some(BrowserSurface::new(editor_id.clone()));
            state.on_change = on_change;
            state.sync_surface()?;
        }

        let weak = Rc::downgrade(&self.state);
        self.binding = Some(InputBinding::attach(
            &editor_el,
            Rc::new(move || handle_input(&weak)),
        ));

        tracing::debug!(%editor_id, "styler mounted");
        Ok(())
    }

    /// Check if the styler is mounted.
    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().surface.is_some()
    }

    /// Unmount and remove the editor element.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.binding = None;
        let mut state = self.state.borrow_mut();
        if let Some(surface) = state.surface.take() {
            if let Ok(element) = surface.element() {
                element.remove();
            }
            if let Err(e) = remove_rules(surface.editor_id()) {
                tracing::warn!("failed to remove style rules: {e}");
            }
        }
        state.on_change = None;
    }

    /// Focus the editor.
    #[wasm_bindgen]
    pub fn focus(&self) {
        let state = self.state.borrow();
        if let Some(element) = state.surface.as_ref().and_then(|s| s.element().ok()) {
            let _ = element.focus();
        }
    }
}

/// Input listener body: read the edit back and report it.
fn handle_input(weak: &Weak<RefCell<StylerState>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    {
        let mut guard = state.borrow_mut();
        let state = &mut *guard;
        let Some(surface) = state.surface.as_mut() else {
            return;
        };
        let text = match surface.handle_input() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("failed to read edit: {e}");
                return;
            }
        };
        // The echo of our own edit: clears the local flag, never rebuilds.
        if let Err(e) = surface.set_text(&text) {
            tracing::warn!("failed to settle edit: {e}");
        }
        state.text = text;
    }
    notify_change(&state);
}
