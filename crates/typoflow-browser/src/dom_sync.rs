//! DOM synchronization for the editable surface.
//!
//! Two directions:
//! - `update_block_dom` writes rendered blocks into the editor element,
//!   leaving blocks that already show the right content untouched.
//! - `extract_element_text` reads the element back into plain text, coping
//!   with the markup browsers produce while the user types (bare text nodes,
//!   `<br>` line breaks, nested `<div>`s created on Enter).

use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use typoflow_core::{BlockRender, CaretPosition, join_blocks};

use crate::error::{DomError, html_element_by_id};

/// Write `blocks` into `editor`, one `<div>` per block.
///
/// A child is reused untouched when it is already a `<div>` with exactly the
/// block's HTML, so an unchanged line keeps its text nodes (and any caret in
/// them). Stray top-level text nodes are dropped, surplus children removed
/// and missing ones appended. `force` rewrites every block.
///
/// Returns the number of blocks whose content was written.
pub fn update_block_dom(
    editor: &Element,
    blocks: &[BlockRender],
    force: bool,
) -> Result<usize, DomError> {
    let document = editor.owner_document().ok_or(DomError::NoDocument)?;

    // Element children must line up with blocks, so anything else goes.
    let mut node = editor.first_child();
    while let Some(current) = node {
        node = current.next_sibling();
        if current.node_type() != Node::ELEMENT_NODE {
            editor.remove_child(&current)?;
        }
    }

    let mut written = 0;
    let mut child = editor.first_element_child();

    for block in blocks {
        let Some(existing) = child else {
            let div = document.create_element("div")?;
            div.set_id(&block.id);
            div.set_inner_html(&block.html);
            editor.append_child(&div)?;
            written += 1;
            continue;
        };
        child = existing.next_element_sibling();

        let is_div = existing.tag_name().eq_ignore_ascii_case("div");
        if is_div && !force && existing.inner_html() == block.html {
            tracing::trace!(block_id = %block.id, "update_block_dom: block unchanged");
        } else if is_div {
            existing.set_inner_html(&block.html);
            written += 1;
        } else {
            let div = document.create_element("div")?;
            div.set_inner_html(&block.html);
            editor.replace_child(&div, &existing)?;
            div.set_id(&block.id);
            written += 1;
            continue;
        }
        existing.set_id(&block.id);
        // Browsers copy attributes onto the div they split off on Enter.
        existing.remove_attribute("style")?;
    }

    while let Some(extra) = child {
        child = extra.next_element_sibling();
        extra.remove();
    }

    tracing::debug!(
        blocks = blocks.len(),
        written,
        force,
        "update_block_dom: surface resynced"
    );
    Ok(written)
}

/// Resync the element with the given id.
pub fn update_block_dom_by_id(
    editor_id: &str,
    blocks: &[BlockRender],
    force: bool,
) -> Result<usize, DomError> {
    let editor = html_element_by_id(editor_id)?;
    update_block_dom(&editor, blocks, force)
}

/// Plain text currently shown by `editor`. Blocks become lines.
pub fn extract_element_text(editor: &Element) -> String {
    let mut walker = LineWalker::new(None);
    walker.walk_children(editor);
    walker.finish().0
}

/// Plain text of the element with the given id.
pub fn read_dom_text(editor_id: &str) -> Result<String, DomError> {
    let editor = html_element_by_id(editor_id)?;
    Ok(extract_element_text(&editor))
}

/// Map a DOM point (as found in a `Selection`) to a line/offset caret.
///
/// Returns `None` when the point is not inside `editor`.
pub fn caret_for_dom_point(editor: &Element, node: &Node, offset: u32) -> Option<CaretPosition> {
    let editor_node: &Node = editor.as_ref();
    if !editor_node.contains(Some(node)) {
        return None;
    }
    let mut walker = LineWalker::new(Some((node, offset)));
    walker.walk_children(editor);
    let (_, caret) = walker.finish();
    caret
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_uppercase().as_str(),
        "DIV"
            | "P"
            | "LI"
            | "UL"
            | "OL"
            | "PRE"
            | "BLOCKQUOTE"
            | "SECTION"
            | "ARTICLE"
            | "HEADER"
            | "FOOTER"
            | "H1"
            | "H2"
            | "H3"
            | "H4"
            | "H5"
            | "H6"
    )
}

/// A `<br>` with nothing but blocks (or nothing) after it ends no line of its
/// own: it only keeps an empty block open.
pub(crate) fn br_is_trailing(br: &Node) -> bool {
    let mut next = br.next_sibling();
    while let Some(node) = next {
        match node.node_type() {
            Node::TEXT_NODE => {
                if !node.text_content().unwrap_or_default().is_empty() {
                    return false;
                }
            }
            Node::ELEMENT_NODE => {
                return node
                    .dyn_ref::<Element>()
                    .map(|e| is_block_tag(&e.tag_name()))
                    .unwrap_or(false);
            }
            _ => {}
        }
        next = node.next_sibling();
    }
    true
}

/// Walks the editor subtree building lines, optionally locating a caret.
struct LineWalker<'a> {
    lines: Vec<String>,
    current: Option<String>,
    target: Option<(&'a Node, u32)>,
    caret: Option<CaretPosition>,
}

impl<'a> LineWalker<'a> {
    fn new(target: Option<(&'a Node, u32)>) -> Self {
        Self {
            lines: Vec::new(),
            current: None,
            target,
            caret: None,
        }
    }

    fn current_utf16_len(&self) -> usize {
        self.current
            .as_ref()
            .map(|s| s.encode_utf16().count())
            .unwrap_or(0)
    }

    fn mark(&mut self, extra: usize) {
        if self.caret.is_none() {
            self.caret = Some(CaretPosition::new(
                self.lines.len(),
                self.current_utf16_len() + extra,
            ));
        }
    }

    fn is_target(&self, node: &Node) -> Option<u32> {
        let (target, offset) = self.target?;
        target.is_same_node(Some(node)).then_some(offset)
    }

    fn walk_children(&mut self, parent: &Node) {
        let container_offset = self.is_target(parent);
        let children = parent.child_nodes();
        let len = children.length();
        for i in 0..len {
            if container_offset == Some(i) {
                self.mark(0);
            }
            let Some(child) = children.get(i) else {
                continue;
            };
            match child.node_type() {
                Node::TEXT_NODE => self.text(&child),
                Node::ELEMENT_NODE => self.element(&child),
                _ => {}
            }
        }
        if container_offset.is_some_and(|offset| offset >= len) {
            self.mark(0);
        }
    }

    fn text(&mut self, node: &Node) {
        if let Some(offset) = self.is_target(node) {
            self.mark(offset as usize);
        }
        let text = node.text_content().unwrap_or_default();
        self.current.get_or_insert_with(String::new).push_str(&text);
    }

    fn element(&mut self, node: &Node) {
        let Some(element) = node.dyn_ref::<Element>() else {
            return;
        };
        let tag = element.tag_name();

        if tag.eq_ignore_ascii_case("br") {
            if !br_is_trailing(node) {
                let line = self.current.take().unwrap_or_default();
                self.lines.push(line);
                self.current = Some(String::new());
            }
            return;
        }

        if !is_block_tag(&tag) {
            self.walk_children(node);
            return;
        }

        if let Some(line) = self.current.take() {
            self.lines.push(line);
        }
        let start = self.lines.len();
        self.walk_children(node);
        match self.current.take() {
            Some(line) => self.lines.push(line),
            // Empty block: still a line.
            None if self.lines.len() == start => self.lines.push(String::new()),
            None => {}
        }
    }

    fn finish(mut self) -> (String, Option<CaretPosition>) {
        if let Some(line) = self.current.take() {
            self.lines.push(line);
        }
        (join_blocks(&self.lines), self.caret)
    }
}
