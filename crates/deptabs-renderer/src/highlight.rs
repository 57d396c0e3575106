//! Syntax highlighting pass run after the transform.

use deptabs_dom::DocumentTree;

/// Highlighting pass applied once to the whole document after all
/// replacements, so injected listings get highlighted too.
///
/// Any `FnMut(&mut D)` closure is a highlighter.
pub trait Highlighter<D: DocumentTree> {
    /// Highlight code listings in `document`.
    fn highlight(&mut self, document: &mut D);
}

/// Highlighter that leaves the document unchanged.
///
/// Used for static post-processing, where highlighting happens in the
/// browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHighlighter;

impl<D: DocumentTree> Highlighter<D> for NoopHighlighter {
    fn highlight(&mut self, _document: &mut D) {}
}

impl<D, F> Highlighter<D> for F
where
    D: DocumentTree,
    F: FnMut(&mut D),
{
    fn highlight(&mut self, document: &mut D) {
        self(document);
    }
}
