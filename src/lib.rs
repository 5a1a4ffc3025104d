//! # chat2md
//!
//! Converts rendered AI chat-platform pages (ChatGPT, Gemini) into structured
//! Markdown documents.
//!
//! The crate takes a page snapshot (the serialized DOM of a conversation
//! page) plus the page URL, detects which platform it belongs to, extracts
//! the ordered role-tagged message sequence, converts each message subtree to
//! Markdown (with byte-verbatim code-block preservation), resolves the
//! conversation title, and assembles everything into a single document with
//! front-matter.
//!
//! File delivery, cloud upload, and UI are external collaborators: this
//! crate's output is the Markdown string plus the extracted title and the
//! conversation list for batch callers.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat2md::export;
//!
//! let html = r#"
//!     <div data-testid="conversation-turn-1">
//!       <div data-message-author-role="user">
//!         <div class="markdown"><p>Explain ownership in Rust, briefly.</p></div>
//!       </div>
//!     </div>
//!     <div data-testid="conversation-turn-2">
//!       <div data-message-author-role="assistant">
//!         <div class="markdown"><p>Every value has a single owner.</p></div>
//!       </div>
//!     </div>
//! "#;
//!
//! let result = export(html, "https://chatgpt.com/c/abc-123")?;
//! assert_eq!(result.message_count(), 2);
//! assert!(result.markdown.contains("Every value has a single owner."));
//! # Ok::<(), chat2md::Error>(())
//! ```

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Document assembler (front-matter, summary, message sections, filenames).
pub mod document;

/// Content normalizer: DOM subtree to Markdown.
pub mod normalize;

/// Compiled regex patterns.
pub mod patterns;

/// Platform registry and detector.
pub mod platform;

/// Title resolver and conversation-list reader.
pub mod title;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{extract_messages, Exporter, Extraction};
pub use options::{Layout, Options};
pub use platform::{detect_platform, ExtractionStrategy, PageUrl, Platform, PlatformConfig};
pub use result::{ConversationListItem, ExportResult, Locator, Message, Role};

/// Export a conversation page to Markdown using default options.
///
/// # Arguments
///
/// * `html` - The page snapshot as a string slice
/// * `page_url` - The page URL (or bare hostname) the snapshot came from
///
/// # Returns
///
/// Returns `Ok(ExportResult)` on success. Returns `Error::PlatformNotDetected`
/// for unsupported pages and `Error::EmptyExtraction` when no usable
/// conversation body was found.
#[allow(clippy::missing_errors_doc)]
pub fn export(html: &str, page_url: &str) -> Result<ExportResult> {
    export_with_options(html, page_url, Options::default())
}

/// Export a conversation page to Markdown with custom options.
///
/// # Example
///
/// ```rust
/// use chat2md::{export_with_options, Layout, Options};
///
/// let html = r#"
///     <user-query>What is a tendril?</user-query>
///     <model-response>A reference-counted string buffer used by html5ever.</model-response>
/// "#;
/// let options = Options {
///     layout: Layout::SummaryHeader,
///     ..Options::default()
/// };
/// let result = export_with_options(html, "https://gemini.google.com/app", options)?;
/// assert!(result.markdown.contains("### 🤖 Gemini"));
/// # Ok::<(), chat2md::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn export_with_options(html: &str, page_url: &str, options: Options) -> Result<ExportResult> {
    Exporter::with_options(html, page_url, options)?.export()
}
