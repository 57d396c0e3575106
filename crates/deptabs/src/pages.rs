//! Page discovery and per-page processing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use deptabs_config::SiteConfig;
use deptabs_dom::HtmlDocument;
use deptabs_renderer::{DependencyTabsTransformer, NoopHighlighter, TransformSummary};

use crate::error::CliError;

/// Find pages under `site.source_dir` matching any `site.include` pattern.
///
/// Returns sorted, de-duplicated file paths. A missing source directory
/// yields no pages.
pub(crate) fn discover_pages(site: &SiteConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut pages = BTreeSet::new();
    // Only the include pattern is a glob; the directory is matched literally.
    let base = glob::Pattern::escape(&site.source_dir.to_string_lossy());
    for pattern in &site.include {
        let full = Path::new(&base).join(pattern);
        for entry in glob::glob(&full.to_string_lossy())? {
            let path = entry?;
            if path.is_file() {
                pages.insert(path);
            }
        }
    }
    Ok(pages.into_iter().collect())
}

/// Transform one page and write it to `destination`.
///
/// In-place pages without any transformed listing are left untouched on
/// disk. Nothing is written when `dry_run` is set.
pub(crate) fn process_page(
    transformer: &DependencyTabsTransformer,
    page: &Path,
    destination: &Path,
    dry_run: bool,
) -> Result<TransformSummary, CliError> {
    let html = fs::read_to_string(page).map_err(|e| CliError::page(page, e))?;
    let mut document = HtmlDocument::parse(&html);
    let summary = transformer.run(&mut document, &mut NoopHighlighter);

    tracing::info!(
        page = %page.display(),
        transformed = summary.transformed,
        skipped = summary.skipped,
        "Processed page"
    );

    if dry_run || (!summary.is_changed() && destination == page) {
        return Ok(summary);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::page(parent, e))?;
    }
    // Unchanged pages are copied verbatim rather than re-serialized.
    let contents = if summary.is_changed() {
        document.to_html()?
    } else {
        html
    };
    fs::write(destination, contents).map_err(|e| CliError::page(destination, e))?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = concat!(
        "<!DOCTYPE html><html><head><title>Install</title></head><body>",
        r#"<div class="listingblock"><div class="content"><pre class="prettyprint highlight">"#,
        r#"<code class="language-xml" data-lang="xml">&lt;dependency&gt;&lt;groupId&gt;org.example&lt;/groupId&gt;"#,
        "&lt;artifactId&gt;core&lt;/artifactId&gt;&lt;version&gt;2.1&lt;/version&gt;&lt;/dependency&gt;",
        "</code></pre></div></div></body></html>",
    );

    const PLAIN: &str = "<!DOCTYPE html><html><head></head><body><p>Nothing to do.</p></body></html>";

    fn site(source_dir: &Path, output_dir: Option<PathBuf>) -> SiteConfig {
        SiteConfig {
            source_dir: source_dir.to_path_buf(),
            output_dir,
            include: vec!["**/*.html".to_owned()],
        }
    }

    #[test]
    fn test_discover_pages_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guide")).unwrap();
        fs::write(dir.path().join("index.html"), PLAIN).unwrap();
        fs::write(dir.path().join("guide/setup.html"), PLAIN).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let pages = discover_pages(&site(dir.path(), None)).unwrap();

        assert_eq!(
            pages,
            vec![
                dir.path().join("guide/setup.html"),
                dir.path().join("index.html"),
            ]
        );
    }

    #[test]
    fn test_discover_pages_deduplicates_patterns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), PLAIN).unwrap();
        let mut site = site(dir.path(), None);
        site.include.push("*.html".to_owned());

        let pages = discover_pages(&site).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_discover_pages_source_dir_with_glob_metacharacters() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs [v1]*");
        fs::create_dir_all(source.join("guide")).unwrap();
        fs::write(source.join("guide/setup.html"), PLAIN).unwrap();

        let pages = discover_pages(&site(&source, None)).unwrap();

        assert_eq!(pages, vec![source.join("guide/setup.html")]);
    }

    #[test]
    fn test_discover_pages_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let pages = discover_pages(&site(&dir.path().join("missing"), None)).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_process_page_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.html");
        fs::write(&page, PAGE).unwrap();

        let summary =
            process_page(&DependencyTabsTransformer::new(), &page, &page, false).unwrap();

        assert_eq!(summary.transformed, 1);
        let written = fs::read_to_string(&page).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains(r#"id="__generated_code_tab_sbt_0""#));
        assert!(written.contains("<title>Install</title>"));
    }

    #[test]
    fn test_process_page_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.html");
        fs::write(&page, PAGE).unwrap();

        let summary =
            process_page(&DependencyTabsTransformer::new(), &page, &page, true).unwrap();

        assert_eq!(summary.transformed, 1);
        assert_eq!(fs::read_to_string(&page).unwrap(), PAGE);
    }

    #[test]
    fn test_process_unchanged_page_in_place_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.html");
        fs::write(&page, PLAIN).unwrap();

        let summary =
            process_page(&DependencyTabsTransformer::new(), &page, &page, false).unwrap();

        assert!(!summary.is_changed());
        assert_eq!(fs::read_to_string(&page).unwrap(), PLAIN);
    }

    #[test]
    fn test_process_page_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("site");
        fs::create_dir_all(source.join("guide")).unwrap();
        let changed = source.join("guide/install.html");
        let unchanged = source.join("index.html");
        fs::write(&changed, PAGE).unwrap();
        fs::write(&unchanged, PLAIN).unwrap();

        let site = site(&source, Some(dir.path().join("out")));
        let transformer = DependencyTabsTransformer::new().with_id_prefix("dep_");
        for page in discover_pages(&site).unwrap() {
            process_page(&transformer, &page, &site.destination(&page), false).unwrap();
        }

        let out = fs::read_to_string(dir.path().join("out/guide/install.html")).unwrap();
        assert!(out.contains(r#"id="dep_gradle_0""#));
        assert_eq!(
            fs::read_to_string(dir.path().join("out/index.html")).unwrap(),
            PLAIN
        );
        assert_eq!(fs::read_to_string(&changed).unwrap(), PAGE);
    }

    #[test]
    fn test_process_missing_page_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("missing.html");

        let err = process_page(&DependencyTabsTransformer::new(), &page, &page, false)
            .unwrap_err();

        assert!(err.to_string().contains("missing.html"));
    }
}
