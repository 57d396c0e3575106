//! Markup helpers shared by the tab renderer.

/// Escape text for use in HTML content or double-quoted attributes.
///
/// Escapes `&`, `<`, `>` and `"`.
///
/// # Examples
///
/// ```
/// use deptabs_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Append a highlighted code listing in the site's listing block layout.
///
/// `escaped` must already be HTML-escaped.
pub(crate) fn code_listing(language: &str, escaped: &str, out: &mut String) {
    out.push_str(&format!(
        r#"<div class="listingblock {GENERATED_LISTING_CLASS}"><div class="content"><pre class="prettyprint"><code class="language-{language} hljs" data-lang="{language}">{escaped}</code></pre></div></div>"#
    ));
}

/// Class marking listing blocks that were produced by the tab renderer.
pub(crate) const GENERATED_LISTING_CLASS: &str = "dependency-sample-code";
