//! Caret capture and restoration around a surface resync.
//!
//! The caret is carried across a rewrite as a (line, UTF-16 offset) pair,
//! the same units the DOM Selection API counts in.

use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use typoflow_core::CaretPosition;

use crate::dom_sync::caret_for_dom_point;
use crate::error::DomError;

/// Whether focus currently sits inside `editor`.
pub fn is_focused(editor: &Element) -> bool {
    let Some(active) = editor
        .owner_document()
        .and_then(|document| document.active_element())
    else {
        return false;
    };
    let active: &Node = active.as_ref();
    let editor_node: &Node = editor.as_ref();
    editor_node.contains(Some(active))
}

/// Caret of the current selection, if its focus point is inside `editor`.
pub fn caret_position(editor: &Element) -> Option<CaretPosition> {
    let selection = web_sys::window()?.get_selection().ok()??;
    let node = selection.focus_node()?;
    caret_for_dom_point(editor, &node, selection.focus_offset())
}

/// Place a collapsed selection at `caret`.
///
/// The line is the nth element child of `editor`; a caret past the last line
/// lands at the end of the last one.
pub fn restore_caret(editor: &Element, caret: CaretPosition) -> Result<(), DomError> {
    let document = editor.owner_document().ok_or(DomError::NoDocument)?;
    let window = web_sys::window().ok_or(DomError::NoWindow)?;

    let mut block = editor.first_element_child();
    let mut line = 0;
    while line < caret.line {
        match block.as_ref().and_then(|b| b.next_element_sibling()) {
            Some(next) => block = Some(next),
            None => break,
        }
        line += 1;
    }
    let Some(block) = block else {
        tracing::trace!(target: "typoflow::cursor", "restore_caret: editor has no blocks");
        return Ok(());
    };
    let offset = if line < caret.line { usize::MAX } else { caret.offset };

    let range = document.create_range()?;
    match find_text_node_at_offset(&block, offset)? {
        Some((text_node, node_offset)) => range.set_start(&text_node, node_offset as u32)?,
        // Empty line: caret goes before the placeholder.
        None => range.set_start(&block, 0)?,
    }
    range.collapse_with_to_start(true);

    tracing::trace!(
        target: "typoflow::cursor",
        line = caret.line,
        offset = caret.offset,
        "restoring caret"
    );

    let selection = window.get_selection()?.ok_or(DomError::Js("no selection".into()))?;
    selection.remove_all_ranges()?;
    selection.add_range(&range)?;
    Ok(())
}

/// Find the text node holding UTF-16 offset `target` within `container`.
///
/// Offsets past the end clamp to the end of the last text node. Returns
/// `None` when the container has no text at all.
pub fn find_text_node_at_offset(
    container: &Element,
    target: usize,
) -> Result<Option<(Node, usize)>, DomError> {
    let document = container.owner_document().ok_or(DomError::NoDocument)?;
    // NodeFilter.SHOW_TEXT
    let walker = document.create_tree_walker_with_what_to_show(container, 0x4)?;

    let mut accumulated = 0;
    let mut last: Option<(Node, usize)> = None;

    while let Some(node) = walker.next_node()? {
        let Some(text) = node.dyn_ref::<web_sys::Text>().and_then(|t| t.text_content()) else {
            continue;
        };
        let len = text.encode_utf16().count();
        if accumulated + len >= target {
            return Ok(Some((node, target - accumulated)));
        }
        accumulated += len;
        last = Some((node, len));
    }

    Ok(last)
}
