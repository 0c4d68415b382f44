//! Input listeners for the editable surface.
//!
//! The surface is plain text, so the browser is left to perform edits itself
//! and we only observe when they happened. Paste is the exception: rich
//! clipboard content is replaced with its plain text before it lands.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Event, HtmlElement, InputEvent};

use crate::dom_sync::br_is_trailing;
use crate::error::DomError;

/// Listeners attached to an editor element. Dropping the binding detaches them.
pub struct InputBinding {
    _listeners: Vec<EventListener>,
}

impl InputBinding {
    /// Call `on_input` after every user edit of `editor`.
    ///
    /// Intermediate IME composition events are skipped; the edit is reported
    /// once the composition ends.
    pub fn attach(editor: &HtmlElement, on_input: Rc<dyn Fn()>) -> Self {
        let input_cb = on_input.clone();
        let input = EventListener::new(editor, "input", move |event: &Event| {
            let composing = event
                .dyn_ref::<InputEvent>()
                .map(|e| e.is_composing())
                .unwrap_or(false);
            if composing {
                tracing::trace!("input during composition, waiting for compositionend");
                return;
            }
            input_cb();
        });

        let composition_cb = on_input.clone();
        let composition_end = EventListener::new(editor, "compositionend", move |_: &Event| {
            composition_cb();
        });

        let paste = EventListener::new_with_options(
            editor,
            "paste",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(data) = event
                    .dyn_ref::<ClipboardEvent>()
                    .and_then(|e| e.clipboard_data())
                else {
                    return;
                };
                // Rich content never lands; a paste with no plain text is a no-op.
                event.prevent_default();
                let text = data.get_data("text/plain").unwrap_or_default();
                if text.is_empty() {
                    tracing::debug!("paste without plain text ignored");
                    return;
                }
                match insert_plain_text(&text) {
                    Ok(()) => on_input(),
                    Err(e) => tracing::warn!("paste failed: {e}"),
                }
            },
        );

        Self {
            _listeners: vec![input, composition_end, paste],
        }
    }
}

/// Replace the current selection with `text`, one `<br>` per line break,
/// and leave the caret after it.
///
/// Does nothing when there is no selection.
pub fn insert_plain_text(text: &str) -> Result<(), DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;
    let selection = window
        .get_selection()?
        .ok_or(DomError::Js("no selection".into()))?;
    if selection.range_count() == 0 {
        return Ok(());
    }
    let range = selection.get_range_at(0)?;
    range.delete_contents()?;

    let normalized = text.replace("\r\n", "\n");
    // Last node in document order; the caret goes after it.
    let mut tail: Option<web_sys::Node> = None;
    // insert_node places each node at the range start, so go backwards.
    for (i, line) in normalized.split('\n').rev().enumerate() {
        if i > 0 {
            let br: web_sys::Node = document.create_element("br")?.into();
            range.insert_node(&br)?;
            tail.get_or_insert(br);
        }
        if !line.is_empty() {
            let node: web_sys::Node = document.create_text_node(line).into();
            range.insert_node(&node)?;
            tail.get_or_insert(node);
        }
    }

    if let Some(tail) = tail {
        // A line break at the end of a line needs a second `<br>` to open the
        // new line; the caret goes between the two.
        if tail.node_name().eq_ignore_ascii_case("br") && br_is_trailing(&tail) {
            if let Some(parent) = tail.parent_node() {
                let placeholder: web_sys::Node = document.create_element("br")?.into();
                parent.insert_before(&placeholder, tail.next_sibling().as_ref())?;
            }
        }
        range.set_start_after(&tail)?;
        range.collapse_with_to_start(true);
        selection.remove_all_ranges()?;
        selection.add_range(&range)?;
    }
    Ok(())
}
