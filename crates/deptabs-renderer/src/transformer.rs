//! Dependency block transform.
//!
//! Finds listings that hold exactly one Maven `<dependency>` element and
//! replaces each with a tab widget offering the same dependency for Maven,
//! Gradle, SBT, Ivy and Grapes.
//!
//! A listing is eligible when its `code.language-xml` element sits inside
//! `pre.prettyprint` → `div.content` → `div.listingblock`. Anything else is
//! left untouched: the transform never fails, it only skips.

use deptabs_dom::DocumentTree;

use crate::gav::{Coordinate, is_simple_tag};
use crate::highlight::Highlighter;
use crate::html::GENERATED_LISTING_CLASS;
use crate::tabs::render_dependency_tabs;

/// Default prefix of generated panel ids.
pub const DEFAULT_ID_PREFIX: &str = "__generated_code_tab_";

/// Default scope for dependencies without a `<scope>` element.
pub const DEFAULT_SCOPE: &str = "compile";

/// Outcome of one [`DependencyTabsTransformer::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformSummary {
    /// Listings replaced by a tab widget.
    pub transformed: usize,
    /// XML listings left untouched.
    pub skipped: usize,
}

impl TransformSummary {
    /// Whether the document was modified.
    pub fn is_changed(&self) -> bool {
        self.transformed > 0
    }
}

/// Why a candidate listing was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
enum SkipReason {
    #[error("removed by an earlier replacement")]
    Detached,
    #[error("not a single <dependency> element")]
    NotSimpleTag,
    #[error("no .{0} ancestor")]
    MissingAncestor(&'static str),
    #[error("already a generated listing")]
    Generated,
    #[error("groupId, artifactId or version missing")]
    IncompleteCoordinate,
}

/// Replaces single-dependency listings with build-tool tabs.
///
/// # Example
///
/// ```
/// use deptabs_dom::HtmlDocument;
/// use deptabs_renderer::{DependencyTabsTransformer, NoopHighlighter};
///
/// let mut doc = HtmlDocument::parse(concat!(
///     r#"<div class="listingblock"><div class="content"><pre class="prettyprint">"#,
///     r#"<code class="language-xml">&lt;dependency&gt;&lt;groupId&gt;g&lt;/groupId&gt;"#,
///     r#"&lt;artifactId&gt;a&lt;/artifactId&gt;&lt;version&gt;1&lt;/version&gt;&lt;/dependency&gt;"#,
///     r#"</code></pre></div></div>"#,
/// ));
///
/// let summary = DependencyTabsTransformer::new().run(&mut doc, &mut NoopHighlighter);
/// assert_eq!(summary.transformed, 1);
/// assert!(doc.body_html().unwrap().contains("__generated_code_tab_gradle_0"));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyTabsTransformer {
    id_prefix: String,
    default_scope: String,
}

impl Default for DependencyTabsTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyTabsTransformer {
    /// Create a transformer with the default id prefix and scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            default_scope: DEFAULT_SCOPE.to_owned(),
        }
    }

    /// Use `prefix` for generated panel ids.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Use `scope` for dependencies that declare none.
    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    /// Transform every eligible listing of `document`, then run `highlighter`
    /// once over the whole document.
    ///
    /// Listings are numbered from 0 in document order; skipped listings do
    /// not consume a number.
    pub fn run<D, H>(&self, document: &mut D, highlighter: &mut H) -> TransformSummary
    where
        D: DocumentTree,
        H: Highlighter<D> + ?Sized,
    {
        // Collected up front so generated listings are never revisited.
        let candidates: Vec<D::Node> = document
            .elements()
            .into_iter()
            .filter(|node| {
                document.tag_name(node).as_deref() == Some("code")
                    && document.has_class(node, "language-xml")
            })
            .collect();

        let mut summary = TransformSummary::default();
        for code in &candidates {
            match self.transform_listing(document, code, summary.transformed) {
                Ok(()) => summary.transformed += 1,
                Err(reason) => {
                    tracing::debug!(%reason, "Skipping XML listing");
                    summary.skipped += 1;
                }
            }
        }

        highlighter.highlight(document);

        tracing::debug!(
            transformed = summary.transformed,
            skipped = summary.skipped,
            "Dependency tabs transform finished"
        );
        summary
    }

    fn transform_listing<D: DocumentTree>(
        &self,
        document: &mut D,
        code: &D::Node,
        index: usize,
    ) -> Result<(), SkipReason> {
        if !document.contains(code) {
            return Err(SkipReason::Detached);
        }

        let text = document.text_content(code);
        let content = text.trim();
        if !is_simple_tag(content, "dependency") {
            return Err(SkipReason::NotSimpleTag);
        }

        let listing = listing_block(document, code)?;
        if document.has_class(&listing, GENERATED_LISTING_CLASS) {
            return Err(SkipReason::Generated);
        }

        let coordinate = Coordinate::parse(content, &self.default_scope)
            .ok_or(SkipReason::IncompleteCoordinate)?;

        let markup = render_dependency_tabs(&coordinate, content, &self.id_prefix, index);
        document.replace_children(&listing, &markup);
        Ok(())
    }
}

/// Walk `code` → `.prettyprint` → `.content` → `.listingblock`.
fn listing_block<D: DocumentTree>(document: &D, code: &D::Node) -> Result<D::Node, SkipReason> {
    let mut current = code.clone();
    for class in ["prettyprint", "content", "listingblock"] {
        current = document
            .parent(&current)
            .filter(|parent| document.has_class(parent, class))
            .ok_or(SkipReason::MissingAncestor(class))?;
    }
    Ok(current)
}
