//! Maven coordinate extraction from `<dependency>` snippets.
//!
//! This is a substring scan, not an XML parser. Each field is the text between
//! the first `<tag>` and the first `</tag>` after it, taken verbatim (entities
//! are not decoded). Nested or repeated elements with the same name are not
//! disambiguated, and a value that itself contains the closing tag is cut at
//! the first occurrence.

/// Return the raw text between the first `<tag>` and the next `</tag>`.
///
/// The closing tag is searched starting one byte after the opening tag.
///
/// # Examples
///
/// ```
/// use deptabs_renderer::find_first_span;
///
/// assert_eq!(find_first_span("<version>1.0</version>", "version"), Some("1.0"));
/// assert_eq!(find_first_span("<version>1.0", "version"), None);
/// ```
pub fn find_first_span<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = text.find(&open)?;
    // `start` points at '<', so `start + 1` is a char boundary.
    let end = start + 1 + text[start + 1..].find(&close)?;
    text.get(start + open.len()..end)
}

/// Check that `content` is exactly one `<tag>...</tag>` element.
///
/// The text must begin with the opening tag and the first closing tag must
/// sit at the very end, so sibling elements or trailing text fail the check.
///
/// # Examples
///
/// ```
/// use deptabs_renderer::is_simple_tag;
///
/// assert!(is_simple_tag("<dependency><version>1</version></dependency>", "dependency"));
/// assert!(!is_simple_tag("<dependency></dependency><dependency></dependency>", "dependency"));
/// ```
pub fn is_simple_tag(content: &str, tag: &str) -> bool {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    content.starts_with(&open)
        && matches!(content.find(&close), Some(pos) if pos + close.len() == content.len())
}

/// Maven dependency coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: String,
}

impl Coordinate {
    /// Extract a coordinate from a `<dependency>` snippet.
    ///
    /// Returns `None` unless `groupId`, `artifactId` and `version` are all
    /// present and non-empty. A missing or empty `scope` falls back to
    /// `default_scope`.
    pub fn parse(xml: &str, default_scope: &str) -> Option<Self> {
        let fields = GavFields::extract(xml);
        Some(Self {
            group_id: fields.group_id?.to_owned(),
            artifact_id: fields.artifact_id?.to_owned(),
            version: fields.version?.to_owned(),
            scope: fields.scope.unwrap_or(default_scope).to_owned(),
        })
    }
}

/// Raw field values found in a snippet, empty values already discarded.
#[derive(Debug, Default, PartialEq, Eq)]
struct GavFields<'a> {
    group_id: Option<&'a str>,
    artifact_id: Option<&'a str>,
    version: Option<&'a str>,
    scope: Option<&'a str>,
}

impl<'a> GavFields<'a> {
    fn extract(xml: &'a str) -> Self {
        let field = |tag: &str| find_first_span(xml, tag).filter(|v| !v.is_empty());
        Self {
            group_id: field("groupId"),
            artifact_id: field("artifactId"),
            version: field("version"),
            scope: field("scope"),
        }
    }
}
