//! Title resolver and conversation-list reader.
//!
//! The conversation title is resolved through a fallback chain, first
//! non-blank result wins:
//!
//! 1. The history-list entry for the active conversation, found either by
//!    matching the page path's conversation id against entry hrefs, or by
//!    sniffing a selected visual state.
//! 2. The first history-list entry, as a "probably current" guess.
//! 3. The page-level heading element.
//! 4. A sentinel fallback string.
//!
//! Every step is a best-effort heuristic against markup this crate does not
//! control; a miss simply advances the chain.

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{BACKGROUND_DECLARATION, CHATGPT_CONVERSATION_PATH, TRANSPARENT_BACKGROUND};
use crate::platform::{PageUrl, PlatformConfig, TitleHeuristic};
use crate::result::{ConversationListItem, Locator};

/// Sentinel title used when every lookup comes back empty.
pub const UNTITLED_FALLBACK: &str = "untitled conversation";

/// Resolve the conversation's display title.
///
/// Always returns a non-empty string; the sentinel fallback closes the chain.
#[must_use]
pub fn resolve_title(doc: &Document, config: &PlatformConfig, page: &PageUrl) -> String {
    active_item_title(doc, config, page)
        .or_else(|| first_entry_title(doc, config))
        .or_else(|| page_heading(doc, config))
        .unwrap_or_else(|| UNTITLED_FALLBACK.to_string())
}

/// Step 1: the history-list entry identified as the active conversation.
fn active_item_title(doc: &Document, config: &PlatformConfig, page: &PageUrl) -> Option<String> {
    match config.title_heuristic {
        TitleHeuristic::UrlPathMatch => {
            let id = CHATGPT_CONVERSATION_PATH
                .captures(&page.path)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())?;

            for entry in doc.select(config.selectors.conversation_list).iter() {
                let href = dom::attr(&entry, "href");
                if href.contains(id) {
                    if let Some(title) = entry_title(&entry, config) {
                        return Some(title);
                    }
                }
            }
            None
        }
        TitleHeuristic::SelectedState => doc
            .select(config.selectors.conversation_list)
            .iter()
            .find(looks_selected)
            .and_then(|entry| entry_title(&entry, config)),
    }
}

/// Step 2: first entry in the history list.
fn first_entry_title(doc: &Document, config: &PlatformConfig) -> Option<String> {
    doc.select(config.selectors.conversation_list)
        .iter()
        .next()
        .and_then(|entry| entry_title(&entry, config))
}

/// Step 3: page-level heading element.
fn page_heading(doc: &Document, config: &PlatformConfig) -> Option<String> {
    non_blank(dom::trimmed_text(&doc.select(config.selectors.title)))
}

/// Label text of one history-list entry, if non-blank.
fn entry_title(entry: &Selection, config: &PlatformConfig) -> Option<String> {
    non_blank(dom::trimmed_text(
        &entry.select(config.selectors.conversation_item_title),
    ))
}

/// Selected-state sniffing for platforms without stable per-conversation URLs.
///
/// Computed style does not exist outside a browser, so this inspects what a
/// DOM snapshot still carries: an inline non-transparent background-color,
/// `aria-selected`, or a class containing "selected".
fn looks_selected(entry: &Selection) -> bool {
    let style = dom::attr(entry, "style");
    if BACKGROUND_DECLARATION.is_match(&style) && !TRANSPARENT_BACKGROUND.is_match(&style) {
        return true;
    }

    if dom::attr(entry, "aria-selected") == "true" {
        return true;
    }

    dom::attr(entry, "class").contains("selected")
}

/// Read the page's conversation history list for batch-export callers.
///
/// Entry identity and locator shape follow the platform: URL-addressable
/// platforms yield the conversation id and an absolute URL; the rest yield
/// the list position as both id and in-page locator.
#[must_use]
pub fn conversation_list(
    doc: &Document,
    config: &PlatformConfig,
    page: &PageUrl,
) -> Vec<ConversationListItem> {
    let mut items = Vec::new();

    for (index, entry) in doc.select(config.selectors.conversation_list).iter().enumerate() {
        let Some(title) = entry_title(&entry, config) else {
            continue;
        };

        match config.title_heuristic {
            TitleHeuristic::UrlPathMatch => {
                let href = dom::attr(&entry, "href");
                let Some(id) = CHATGPT_CONVERSATION_PATH
                    .captures(&href)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
                else {
                    continue;
                };

                let url = if page.origin.is_empty() {
                    href
                } else {
                    format!("{}{}", page.origin, href)
                };

                items.push(ConversationListItem {
                    id,
                    title,
                    locator: Locator::Url(url),
                });
            }
            TitleHeuristic::SelectedState => {
                items.push(ConversationListItem {
                    id: index.to_string(),
                    title,
                    locator: Locator::InPage(index),
                });
            }
        }
    }

    items
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
