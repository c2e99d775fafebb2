//! Utilities for building [MessageData] structs for delivery of Telegram messages.
//!
//! Telegram's HTML parse mode has no paragraphs or line break elements; lines are separated by
//! plain newlines in both the plain and the HTML rendition.

use crate::message::{MessageData, MessageLink};
use std::fmt::Write;

const DEFAULT_BREAK: &str = "\n";
const LINK_SEPARATOR: &str = " | ";

/// Escape the characters Telegram's HTML parser treats specially.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// Hashtags may only hold letters, digits and underscores.
fn to_hashtag(tag: &str) -> Option<String> {
    let cleaned: String = tag
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("#{}", cleaned))
    }
}

/// Builds [MessageData] structs with special formatting. Forward-only.
///
/// Every method takes raw text and escapes it for the HTML rendition itself.
pub struct MessageDataBuilder {
    plain_parts: String,
    html_parts: String,
    links: Vec<MessageLink>,
    preview_url: Option<String>,
}

impl MessageDataBuilder {
    pub fn new() -> Self {
        MessageDataBuilder {
            plain_parts: String::new(),
            html_parts: String::new(),
            links: vec![],
            preview_url: None,
        }
    }

    /// Ends the current line. Calling this right after another `add_*` method leaves an empty
    /// line between two parts.
    pub fn break_character(&mut self) {
        self.plain_parts.push_str(DEFAULT_BREAK);
        self.html_parts.push_str(DEFAULT_BREAK);
    }

    /// Adds a line of space separated hashtags. Tags are sanitized; tags that end up empty are
    /// skipped, and nothing is added when no tag survives.
    pub fn add_hashtags(&mut self, tags: &[&str]) {
        let line = tags
            .iter()
            .filter_map(|t| to_hashtag(t))
            .collect::<Vec<String>>()
            .join(" ");
        if line.is_empty() {
            return;
        }
        self.add_line(&line);
    }

    /// Adds a bold line of text.
    pub fn add_title(&mut self, title: &str) {
        self.plain_parts.push_str(title);
        write!(self.html_parts, "<b>{}</b>", escape_html(title))
            .expect("Failed to write HTML String.");
        self.break_character();
    }

    /// Adds a key-value data pair to the message, followed by a line break.
    ///
    /// # Examples
    /// Plain: `key: value`
    /// Rich: `<b>key</b>: value`
    pub fn add_key_value(&mut self, key: &str, value: &str) {
        write!(self.plain_parts, "{}: {}", key, value).expect("Failed to write plain String.");
        write!(
            self.html_parts,
            "<b>{}</b>: {}",
            escape_html(key),
            escape_html(value)
        )
        .expect("Failed to write HTML String.");
        self.break_character();
    }

    /// Like [Self::add_key_value()], but the value is underlined in the HTML message.
    pub fn add_key_value_underlined(&mut self, key: &str, value: &str) {
        write!(self.plain_parts, "{}: {}", key, value).expect("Failed to write plain String.");
        write!(
            self.html_parts,
            "<b>{}</b>: <u>{}</u>",
            escape_html(key),
            escape_html(value)
        )
        .expect("Failed to write HTML String.");
        self.break_character();
    }

    /// Adds a line of text followed by [Self::break_character()].
    pub fn add_line(&mut self, line: &str) {
        self.plain_parts.push_str(line);
        self.html_parts.push_str(&escape_html(line));
        self.break_character();
    }

    /// Adds a quoted block of text. Plain messages prefix each line with `> `.
    pub fn add_quote(&mut self, text: &str) {
        let quoted = text
            .lines()
            .map(|l| format!("> {}", l))
            .collect::<Vec<String>>()
            .join(DEFAULT_BREAK);
        self.plain_parts.push_str(&quoted);
        write!(
            self.html_parts,
            "<blockquote>{}</blockquote>",
            escape_html(text)
        )
        .expect("Failed to write HTML String.");
        self.break_character();
    }

    /// Adds a line of inline links and remembers them so the notifier can also render them as
    /// buttons. Nothing is added given no links.
    pub fn add_links(&mut self, links: &[MessageLink]) {
        if links.is_empty() {
            return;
        }
        let plain = links
            .iter()
            .map(|l| format!("{}: {}", l.label, l.url))
            .collect::<Vec<String>>()
            .join(LINK_SEPARATOR);
        let html = links
            .iter()
            .map(|l| {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(&l.url),
                    escape_html(&l.label)
                )
            })
            .collect::<Vec<String>>()
            .join(LINK_SEPARATOR);
        self.plain_parts.push_str(&plain);
        self.html_parts.push_str(&html);
        self.links.extend_from_slice(links);
        self.break_character();
    }

    /// Sets the URL previewed above the message.
    pub fn preview_url(&mut self, url: &str) {
        self.preview_url = Some(String::from(url));
    }

    /// Copy the contents of this builder to a new [MessageData].
    ///
    /// Trailing whitespace and line breaks are trimmed.
    pub fn to_message_data(&self) -> MessageData {
        MessageData {
            plain: String::from(self.plain_parts.trim_end()),
            html: String::from(self.html_parts.trim_end()),
            links: self.links.clone(),
            preview_url: self.preview_url.clone(),
        }
    }
}

impl Default for MessageDataBuilder {
    fn default() -> Self {
        MessageDataBuilder::new()
    }
}
