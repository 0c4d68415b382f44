//! Block model and sync state for the editable surface.
//!
//! The document text is the source of truth. The surface renders it as one
//! block element per line and reports user edits back as plain text. Blocks
//! are keyed by position (`b-{index}`) so the DOM layer can reconcile them in
//! place.

use markdown_weaver_escape::{FmtWriter, escape_html_body_text};
use smol_str::{SmolStr, format_smolstr};

/// Placeholder content that keeps an empty block from collapsing.
pub const EMPTY_BLOCK_HTML: &str = "<br>";

/// One rendered line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRender {
    /// Positional ID for DOM reconciliation (format: `b-{index}`).
    pub id: SmolStr,
    /// Source line, without the trailing line break.
    pub line: String,
    /// Escaped HTML for the block's content (without wrapper element).
    pub html: String,
}

impl BlockRender {
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Line length in UTF-16 code units, the unit DOM selection offsets use.
    pub fn utf16_len(&self) -> usize {
        self.line.encode_utf16().count()
    }
}

/// Generate a block ID from its line index.
pub fn make_block_id(index: usize) -> SmolStr {
    format_smolstr!("b-{}", index)
}

/// Escape a line for insertion as element content.
pub fn escape_line(line: &str) -> String {
    let mut html = String::with_capacity(line.len());
    // Writing into a String cannot fail.
    let _ = escape_html_body_text(FmtWriter(&mut html), line);
    html
}

/// Split text into one block per line.
///
/// Empty lines become empty blocks rendered with a placeholder, never dropped,
/// so `"a\n\nb"` yields three blocks. Empty text yields a single empty block.
pub fn render_blocks(text: &str) -> Vec<BlockRender> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| BlockRender {
            id: make_block_id(index),
            line: line.to_string(),
            html: if line.is_empty() {
                EMPTY_BLOCK_HTML.to_string()
            } else {
                escape_line(line)
            },
        })
        .collect()
}

/// Rejoin block lines into document text.
pub fn join_blocks<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out
}

/// What the view should do with an incoming text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// DOM already shows this text. Leave it (and the caret) alone.
    Skip,
    /// Rebuild the DOM from these blocks.
    Resync(Vec<BlockRender>),
}

/// Controlled-view state for the editable surface.
///
/// Tracks the text the DOM currently shows plus a one-bit "last change was
/// local" marker. A user edit sets the marker; the next external text value
/// clears it and, when it is just the echo of that edit, skips the structural
/// re-render so the browser keeps its caret.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSync {
    rendered: Option<String>,
    local_change: bool,
}

impl SurfaceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text the DOM is known to display, if any.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn has_local_change(&self) -> bool {
        self.local_change
    }

    /// Record a user-driven edit and return the text to report upward.
    pub fn on_local_edit(&mut self, text: String) -> String {
        tracing::trace!(len = text.len(), "surface: self-originated edit");
        self.local_change = true;
        self.rendered = Some(text.clone());
        text
    }

    /// Decide whether an externally supplied text needs a DOM rebuild.
    pub fn on_external_text(&mut self, text: &str) -> SyncDecision {
        let was_local = std::mem::take(&mut self.local_change);
        if self.rendered.as_deref() == Some(text) {
            tracing::trace!(was_local, "surface: text unchanged, skipping resync");
            return SyncDecision::Skip;
        }
        if was_local {
            tracing::debug!("surface: external text diverged from local edit, resyncing");
        }
        self.rendered = Some(text.to_string());
        SyncDecision::Resync(render_blocks(text))
    }

    /// Forget what the DOM shows so the next external text always resyncs.
    pub fn invalidate(&mut self) {
        self.rendered = None;
        self.local_change = false;
    }
}

/// Caret location as a line index plus a UTF-16 offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretPosition {
    pub line: usize,
    pub offset: usize,
}

impl CaretPosition {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// Keep the caret inside a freshly rendered block list.
    pub fn clamp_to(self, blocks: &[BlockRender]) -> Self {
        let Some(last) = blocks.len().checked_sub(1) else {
            return Self::default();
        };
        let line = self.line.min(last);
        let offset = self.offset.min(blocks[line].utf16_len());
        Self { line, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(blocks: &[BlockRender]) -> Vec<&str> {
        blocks.iter().map(|b| b.line.as_str()).collect()
    }

    #[test]
    fn test_blank_line_is_its_own_block() {
        let blocks = render_blocks("hello\n\nworld");
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].is_empty());
        assert_eq!(blocks[1].html, EMPTY_BLOCK_HTML);
        assert_eq!(blocks[2].id.as_str(), "b-2");
        assert_eq!(join_blocks(lines(&blocks)), "hello\n\nworld");
    }

    #[test]
    fn test_markup_is_escaped() {
        let blocks = render_blocks("<b>bold</b> & more");
        insta::assert_snapshot!(blocks[0].html, @"&lt;b&gt;bold&lt;/b&gt; &amp; more");
        assert_eq!(blocks[0].line, "<b>bold</b> & more");
    }

    #[test]
    fn test_empty_text_is_one_empty_block() {
        let blocks = render_blocks("");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_empty());
        assert_eq!(join_blocks(lines(&blocks)), "");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "single",
            "\n",
            "\n\n\n",
            "trailing\n",
            "\nleading",
            "  indented\n\ttabbed  ",
            "mixed 中文 and English\n第二行",
            "emoji 🦀 line\n<script>alert(1)</script>",
            "crlf line\r\nnext",
        ];
        for sample in samples {
            let blocks = render_blocks(sample);
            assert_eq!(join_blocks(lines(&blocks)), sample, "sample {sample:?}");
            assert_eq!(blocks.len(), sample.matches('\n').count() + 1);
        }
    }

    #[test]
    fn test_local_edit_echo_skips_resync() {
        let mut sync = SurfaceSync::new();
        assert!(matches!(
            sync.on_external_text("hello"),
            SyncDecision::Resync(_)
        ));

        let reported = sync.on_local_edit("hello!".to_string());
        assert!(sync.has_local_change());
        assert_eq!(sync.on_external_text(&reported), SyncDecision::Skip);
        // The marker only lives for one cycle.
        assert!(!sync.has_local_change());
    }

    #[test]
    fn test_external_change_resyncs() {
        let mut sync = SurfaceSync::new();
        sync.on_external_text("old");
        match sync.on_external_text("new\ntext") {
            SyncDecision::Resync(blocks) => assert_eq!(lines(&blocks), vec!["new", "text"]),
            SyncDecision::Skip => panic!("expected resync"),
        }
        assert_eq!(sync.rendered(), Some("new\ntext"));
        assert_eq!(sync.on_external_text("new\ntext"), SyncDecision::Skip);
    }

    #[test]
    fn test_diverging_echo_still_resyncs() {
        let mut sync = SurfaceSync::new();
        sync.on_external_text("abc");
        sync.on_local_edit("abcd".to_string());
        assert!(matches!(
            sync.on_external_text("replaced"),
            SyncDecision::Resync(_)
        ));
        assert!(!sync.has_local_change());
    }

    #[test]
    fn test_invalidate_forces_resync() {
        let mut sync = SurfaceSync::new();
        sync.on_external_text("same");
        sync.invalidate();
        assert!(matches!(
            sync.on_external_text("same"),
            SyncDecision::Resync(_)
        ));
    }

    #[test]
    fn test_caret_clamp() {
        let blocks = render_blocks("ab\n🦀");
        assert_eq!(
            CaretPosition::new(5, 9).clamp_to(&blocks),
            CaretPosition::new(1, 2)
        );
        assert_eq!(
            CaretPosition::new(0, 1).clamp_to(&blocks),
            CaretPosition::new(0, 1)
        );
        assert_eq!(CaretPosition::new(3, 3).clamp_to(&[]), CaretPosition::default());
    }
}
