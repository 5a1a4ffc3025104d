//! Message extraction and the export pipeline.
//!
//! Two extraction strategies cover the supported page layouts:
//!
//! - **Turn-based**: one container per turn; role is decided by membership
//!   tests against the user/assistant selectors inside the container.
//! - **Paired-list**: user and assistant messages are two independent element
//!   streams, interleaved index by index. This assumes strict alternation and
//!   yields an approximation when a conversation has consecutive same-role
//!   messages; that limitation is inherent to the layout, not corrected here.
//!
//! `Exporter` wires detection, title resolution, extraction, and assembly
//! into the collaborator surface the file-delivery side consumes.

use chrono::Utc;
use dom_query::{Document, Selection};
use log::debug;

use crate::document::{assemble, ConversationDocument};
use crate::dom;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::options::Options;
use crate::platform::{detect_platform, ExtractionStrategy, PageUrl, Platform, PlatformConfig};
use crate::result::{ConversationListItem, ExportResult, Message, Role};
use crate::title;

/// Messages plus the warnings produced while recovering from per-message
/// selector misses.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Role-tagged messages in conversation order.
    pub messages: Vec<Message>,
    /// One entry per locally-recovered skip.
    pub warnings: Vec<String>,
}

impl Extraction {
    /// Combined body length across all messages, in characters.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.messages.iter().map(Message::body_len).sum()
    }
}

/// Extract the ordered message sequence from a page snapshot.
///
/// Selectors yielding zero elements produce an empty sequence; deciding
/// whether that constitutes a failed export is the caller's job (via the
/// combined-body-length threshold).
#[must_use]
pub fn extract_messages(doc: &Document, config: &PlatformConfig) -> Extraction {
    match config.strategy {
        ExtractionStrategy::TurnBased => extract_turn_based(doc, config),
        ExtractionStrategy::PairedList => extract_paired_list(doc, config),
    }
}

fn extract_turn_based(doc: &Document, config: &PlatformConfig) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, turn) in doc.select(config.selectors.turn_container).iter().enumerate() {
        let is_user = turn.select(config.selectors.user_message).exists();
        let is_assistant = turn.select(config.selectors.assistant_message).exists();

        // A turn matching neither selector is not a message (e.g. a system
        // banner rendered in the same container shape); skip it silently.
        let role = if is_user {
            Role::User
        } else if is_assistant {
            Role::Assistant
        } else {
            debug!("turn {index}: matches neither role selector, skipping");
            continue;
        };

        let content = turn.select(config.selectors.message_content);
        if !content.exists() {
            debug!("turn {index}: content subtree not found, skipping message");
            extraction
                .warnings
                .push(format!("turn {index}: content subtree not found, message skipped"));
            continue;
        }

        extraction.messages.push(Message {
            role,
            content: normalize(&content),
        });
    }

    extraction
}

fn extract_paired_list(doc: &Document, config: &PlatformConfig) -> Extraction {
    let user_sel = doc.select(config.selectors.user_message);
    let assistant_sel = doc.select(config.selectors.assistant_message);

    let users: Vec<Selection> = user_sel.iter().collect();
    let assistants: Vec<Selection> = assistant_sel.iter().collect();

    let mut extraction = Extraction::default();

    for i in 0..users.len().max(assistants.len()) {
        if let Some(user) = users.get(i) {
            extraction.messages.push(Message {
                role: Role::User,
                content: normalize(user),
            });
        }
        if let Some(assistant) = assistants.get(i) {
            extraction.messages.push(Message {
                role: Role::Assistant,
                content: normalize(assistant),
            });
        }
    }

    extraction
}

/// One conversion pipeline over a single page snapshot.
///
/// Construction detects the platform and parses the snapshot; the accessor
/// methods expose the collaborator contract (`extract_title`,
/// `generate_markdown`, `conversation_list`) consumed by the out-of-scope
/// download/upload side. Each invocation works on its own parsed document;
/// there is no shared mutable state between invocations.
pub struct Exporter {
    doc: Document,
    config: &'static PlatformConfig,
    page: PageUrl,
    options: Options,
}

impl Exporter {
    /// Build an exporter for a page snapshot with default options.
    pub fn new(html: &str, page_url: &str) -> Result<Self> {
        Self::with_options(html, page_url, Options::default())
    }

    /// Build an exporter for a page snapshot.
    ///
    /// Returns `Error::PlatformNotDetected` when the URL's hostname matches
    /// no registry entry.
    pub fn with_options(html: &str, page_url: &str, options: Options) -> Result<Self> {
        let page = PageUrl::parse(page_url);
        let config = detect_platform(&page.hostname)
            .ok_or_else(|| Error::PlatformNotDetected(page.hostname.clone()))?;

        debug!("detected platform {} for {}", config.platform.id(), page.hostname);

        Ok(Self {
            doc: dom::parse(html),
            config,
            page,
            options,
        })
    }

    /// The detected platform.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    /// Resolve the conversation title (sentinel-backed, never empty).
    #[must_use]
    pub fn extract_title(&self) -> String {
        title::resolve_title(&self.doc, self.config, &self.page)
    }

    /// Extract the ordered message sequence.
    #[must_use]
    pub fn extract_messages(&self) -> Extraction {
        extract_messages(&self.doc, self.config)
    }

    /// Read the conversation history list for batch-export callers.
    #[must_use]
    pub fn conversation_list(&self) -> Vec<ConversationListItem> {
        title::conversation_list(&self.doc, self.config, &self.page)
    }

    /// Generate the assembled Markdown document.
    ///
    /// Returns `Error::EmptyExtraction` when the combined body text falls
    /// below `Options::min_content_len`.
    pub fn generate_markdown(&self) -> Result<String> {
        Ok(self.export()?.markdown)
    }

    /// Run the full pipeline and return the structured result.
    pub fn export(&self) -> Result<ExportResult> {
        let extraction = self.extract_messages();

        let found = extraction.body_len();
        if extraction.messages.is_empty() || found < self.options.min_content_len {
            return Err(Error::EmptyExtraction {
                found,
                minimum: self.options.min_content_len,
            });
        }

        let title = self.extract_title();
        let generated_at = self.options.generated_at.unwrap_or_else(Utc::now);

        let document = ConversationDocument {
            title: title.clone(),
            config: self.config,
            messages: &extraction.messages,
            generated_at,
        };

        let markdown = assemble(&document, &self.options);
        let user_count = extraction
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count();

        Ok(ExportResult {
            markdown,
            title,
            platform: self.config.platform,
            user_count,
            assistant_count: extraction.messages.len() - user_count,
            warnings: extraction.warnings,
        })
    }
}
