//! Build-tool tabs for Maven dependency listings.
//!
//! Rendered documentation often shows a dependency as a Maven `<dependency>`
//! snippet. [`DependencyTabsTransformer`] rewrites every such listing of a
//! page into a tab widget with the equivalent Maven, Gradle, SBT, Ivy and
//! Grapes declarations.
//!
//! # Architecture
//!
//! - [`find_first_span`] / [`is_simple_tag`] / [`Coordinate`]: substring-based
//!   extraction of the dependency coordinate.
//! - [`render_dependency_tabs`]: markup of the tab strip and panels.
//! - [`DependencyTabsTransformer`]: walks a [`deptabs_dom::DocumentTree`],
//!   checks each listing's structure and replaces eligible ones.
//! - [`Highlighter`]: syntax highlighting pass run once after the transform.
//!
//! # Example
//!
//! ```
//! use deptabs_dom::HtmlDocument;
//! use deptabs_renderer::{DependencyTabsTransformer, NoopHighlighter};
//!
//! let mut doc = HtmlDocument::parse("<p>No listings here.</p>");
//! let summary = DependencyTabsTransformer::new().run(&mut doc, &mut NoopHighlighter);
//! assert!(!summary.is_changed());
//! ```

mod gav;
mod highlight;
mod html;
mod tabs;
mod transformer;

pub use gav::{Coordinate, find_first_span, is_simple_tag};
pub use highlight::{Highlighter, NoopHighlighter};
pub use html::escape_html;
pub use tabs::{BuildTool, panel_id, render_dependency_tabs};
pub use transformer::{
    DEFAULT_ID_PREFIX, DEFAULT_SCOPE, DependencyTabsTransformer, TransformSummary,
};
