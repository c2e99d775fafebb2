/// A labelled link, shown as a button under the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLink {
    pub label: String,
    pub url: String,
}

impl MessageLink {
    pub fn new(label: &str, url: &str) -> Self {
        MessageLink {
            label: String::from(label),
            url: String::from(url),
        }
    }
}

/// Formatted message data to send via Telegram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageData {
    /// The plain text version of the message, used for dry runs and logs.
    pub plain: String,
    /// The message marked up with the subset of HTML that Telegram understands.
    pub html: String,
    pub links: Vec<MessageLink>,
    /// Shown as the link preview above the text.
    pub preview_url: Option<String>,
}

impl MessageData {
    pub fn new(plain: &str, html: &str) -> MessageData {
        MessageData {
            plain: String::from(plain),
            html: String::from(html),
            links: vec![],
            preview_url: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }
}

impl From<&str> for MessageData {
    fn from(m: &str) -> Self {
        let escaped = crate::message::escape_html(m);
        Self::new(m, &escaped)
    }
}
