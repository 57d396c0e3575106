//! Document tree abstraction for post-processing rendered pages.
//!
//! Page transforms are written against the [`DocumentTree`] trait rather than
//! a concrete DOM, so they can be exercised against small in-memory trees in
//! tests and against real pages in production.
//!
//! [`HtmlDocument`] is the HTML5 implementation, backed by `html5ever` and
//! `markup5ever_rcdom`.
//!
//! # Example
//!
//! ```
//! use deptabs_dom::{DocumentTree, HtmlDocument};
//!
//! let mut doc = HtmlDocument::parse(r#"<div class="listingblock"><p>old</p></div>"#);
//! let block = doc
//!     .elements()
//!     .into_iter()
//!     .find(|n| doc.has_class(n, "listingblock"))
//!     .unwrap();
//! doc.replace_children(&block, "<p>new</p>");
//! assert_eq!(doc.text_content(&block), "new");
//! ```

mod html;

pub use html::{HtmlDocument, HtmlNode};

/// Document tree error.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// Writing the serialized document failed.
    #[error("HTML serialization failed: {0}")]
    Serialize(#[from] std::io::Error),
    /// Serializer produced bytes that are not UTF-8.
    #[error("HTML serialization produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Read and mutate access to a document's element tree.
///
/// Nodes are lightweight handles. A handle stays valid after the node is
/// removed from the document; use [`DocumentTree::contains`] to check whether
/// it is still attached.
pub trait DocumentTree {
    /// Handle to a node of the document.
    type Node: Clone;

    /// All element nodes, in document (pre-)order.
    fn elements(&self) -> Vec<Self::Node>;

    /// Lowercase tag name, or `None` for non-element nodes.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    /// Whether the element's `class` attribute lists `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Parent element, or `None` at the root or once detached.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Concatenated text of all descendant text nodes, entities decoded.
    fn text_content(&self, node: &Self::Node) -> String;

    /// Whether `node` is still attached to this document.
    fn contains(&self, node: &Self::Node) -> bool;

    /// Replace all children of `node` with the nodes parsed from `markup`.
    ///
    /// Previous children are detached from the document.
    fn replace_children(&mut self, node: &Self::Node, markup: &str);
}
