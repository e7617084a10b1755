use serde::Serialize;

/// Smallest unit of report prose. Renderers decide how emphasis looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum TextFragment {
    Plain(String),
    Strong(String),
}

impl TextFragment {
    pub fn text(&self) -> &str {
        match self {
            TextFragment::Plain(text) | TextFragment::Strong(text) => text,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, TextFragment::Strong(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub fragments: Vec<TextFragment>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(TextFragment::Plain(text.into()));
        self
    }

    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(TextFragment::Strong(text.into()));
        self
    }

    /// Layout-neutral rendition: fragments joined as-is.
    pub fn to_plain(&self) -> String {
        self.fragments.iter().map(TextFragment::text).collect()
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Paragraph::new().plain(text)
    }
}
