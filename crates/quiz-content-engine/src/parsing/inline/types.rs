use serde::Serialize;

/// A span of text within a paragraph or bullet item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum InlineRun {
    PlainText(String),
    Bold(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            InlineRun::PlainText(text) | InlineRun::Bold(text) => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, InlineRun::Bold(_))
    }
}
