//! Build-tool tab widget for a Maven dependency.
//!
//! # Output HTML Structure
//!
//! ```html
//! <ul class="nav nav-tabs flex-column flex-sm-row">
//!   <li class="nav-item"><a class="nav-link show active" data-toggle="tab"
//!       href="#__generated_code_tab_maven_0">Maven</a></li>
//!   <li class="nav-item"><a class="nav-link" data-toggle="tab"
//!       href="#__generated_code_tab_gradle_0">Gradle</a></li>
//!   <!-- SBT, Ivy, Grapes -->
//! </ul>
//! <div class="tab-content dependency-sample">
//!   <div id="__generated_code_tab_maven_0" class="tab-pane fade in show active">
//!     <!-- code listing -->
//!   </div>
//!   <div id="__generated_code_tab_gradle_0" class="tab-pane fade">
//!     <!-- code listing -->
//!   </div>
//!   <!-- SBT, Ivy, Grapes -->
//! </div>
//! ```

use crate::gav::Coordinate;
use crate::html::{code_listing, escape_html};

/// Build tool offered as a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Maven,
    Gradle,
    Sbt,
    Ivy,
    Grapes,
}

impl BuildTool {
    /// All tools, in tab order. The first one is shown by default.
    pub const ALL: [Self; 5] = [Self::Maven, Self::Gradle, Self::Sbt, Self::Ivy, Self::Grapes];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Maven => "Maven",
            Self::Gradle => "Gradle",
            Self::Sbt => "SBT",
            Self::Ivy => "Ivy",
            Self::Grapes => "Grapes",
        }
    }

    /// Panel kind used in element ids.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::Sbt => "sbt",
            Self::Ivy => "ivy",
            Self::Grapes => "grapes",
        }
    }

    /// Highlighting language of the panel's listing.
    pub fn language(self) -> &'static str {
        match self {
            Self::Maven | Self::Ivy => "xml",
            Self::Gradle | Self::Grapes => "java",
            Self::Sbt => "text",
        }
    }

    /// Unescaped declaration of `coordinate` in this tool's syntax.
    ///
    /// `maven_xml` is the original `<dependency>` snippet, reused verbatim for
    /// the Maven tab.
    pub fn declaration(self, coordinate: &Coordinate, maven_xml: &str) -> String {
        let Coordinate {
            group_id,
            artifact_id,
            version,
            scope,
        } = coordinate;
        match self {
            Self::Maven => maven_xml.to_owned(),
            Self::Gradle => format!(r#"{scope} "{group_id}:{artifact_id}:{version}""#),
            Self::Sbt => format!(
                r#"libraryDependencies += "{group_id}" % "{artifact_id}" % "{version}" % {scope}"#
            ),
            Self::Ivy => {
                format!(r#"<dependency org="{group_id}" name="{artifact_id}" rev="{version}" />"#)
            }
            Self::Grapes => format!(
                "@Grapes(\n    @Grab(group='{group_id}', module='{artifact_id}', version='{version}')\n)"
            ),
        }
    }
}

/// Element id of the panel for `tool` in the widget numbered `index`.
pub fn panel_id(id_prefix: &str, tool: BuildTool, index: usize) -> String {
    format!("{id_prefix}{}_{index}", tool.kind())
}

/// Render the tab strip and panels replacing a dependency listing.
///
/// `index` must be unique per page; it is embedded in every panel id.
pub fn render_dependency_tabs(
    coordinate: &Coordinate,
    maven_xml: &str,
    id_prefix: &str,
    index: usize,
) -> String {
    let mut output = String::with_capacity(maven_xml.len() * 2 + 2048);

    output.push_str(r#"<ul class="nav nav-tabs flex-column flex-sm-row">"#);
    for (idx, tool) in BuildTool::ALL.into_iter().enumerate() {
        let active = if idx == 0 { " show active" } else { "" };
        output.push_str(&format!(
            r##"<li class="nav-item"><a class="nav-link{active}" data-toggle="tab" href="#{}">{}</a></li>"##,
            panel_id(id_prefix, tool, index),
            tool.label()
        ));
    }
    output.push_str("</ul>");

    output.push_str(r#"<div class="tab-content dependency-sample">"#);
    for (idx, tool) in BuildTool::ALL.into_iter().enumerate() {
        let active = if idx == 0 { " in show active" } else { "" };
        output.push_str(&format!(
            r#"<div id="{}" class="tab-pane fade{active}">"#,
            panel_id(id_prefix, tool, index)
        ));
        let declaration = tool.declaration(coordinate, maven_xml);
        code_listing(tool.language(), &escape_html(&declaration), &mut output);
        output.push_str("</div>");
    }
    output.push_str("</div>");

    output
}
