//! Configuration options for conversation export.
//!
//! The `Options` struct controls assembly behavior, allowing callers to
//! choose a document layout and tune the empty-extraction threshold.

use chrono::{DateTime, Utc};

/// Overall shape of the assembled Markdown document.
///
/// Both variants render every message exactly once, in extraction order;
/// they differ only in which header block leads the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// YAML front-matter block first, then title heading and summary.
    #[default]
    FrontMatter,

    /// No front-matter; the summary section leads the document.
    SummaryHeader,
}

/// Configuration options for conversation export.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use chat2md::{Layout, Options};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     layout: Layout::SummaryHeader,
///     include_summary: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Document layout variant.
    ///
    /// Default: `Layout::FrontMatter`
    pub layout: Layout,

    /// Include the metadata/summary section (message counts, code-block count).
    ///
    /// Default: `true`
    pub include_summary: bool,

    /// Minimum combined body length (characters) for a successful export.
    ///
    /// Below this threshold `generate_markdown` reports
    /// `Error::EmptyExtraction` instead of producing a near-empty document.
    ///
    /// Default: `50`
    pub min_content_len: usize,

    /// Maximum title length used when suggesting a filename.
    ///
    /// Default: `50`
    pub max_filename_title_len: usize,

    /// Fixed generation timestamp.
    ///
    /// When `None`, `Utc::now()` is used. Setting this makes front-matter
    /// output deterministic, which the tests rely on.
    ///
    /// Default: `None`
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            layout: Layout::FrontMatter,
            include_summary: true,
            min_content_len: 50,
            max_filename_title_len: 50,
            generated_at: None,
        }
    }
}
