use serde::Serialize;

use crate::parsing::inline::InlineRun;

/// A parsed document: ordered blocks ready for a renderer.
///
/// Built fresh for each input string and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A top-level structural unit of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// `#` to `####` heading. `level` is 1..=4.
    Heading { level: u8, text: String },
    Paragraph { runs: Vec<InlineRun> },
    BulletList { items: Vec<BulletItem> },
    /// LaTeX source without the `$` delimiters, passed verbatim to a typesetter.
    MathBlock { latex: String },
}

/// One line of a [`Block::BulletList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletItem {
    pub indent_level: usize,
    pub runs: Vec<InlineRun>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Flattens the document to readable text, one line per block or item.
    ///
    /// Bold markers are dropped, bullet items are indented two spaces per
    /// level, and math keeps its `$` delimiters.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Heading { text, .. } => lines.push(text.clone()),
                Block::Paragraph { runs } => lines.push(runs_text(runs)),
                Block::BulletList { items } => {
                    for item in items {
                        lines.push(format!(
                            "{}- {}",
                            "  ".repeat(item.indent_level),
                            runs_text(&item.runs)
                        ));
                    }
                }
                Block::MathBlock { latex } => lines.push(format!("${latex}$")),
            }
        }
        lines.join("\n")
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

pub(crate) fn runs_text(runs: &[InlineRun]) -> String {
    runs.iter().map(InlineRun::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_flattens_every_block_kind() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 2,
                text: "Journal".into(),
            },
            Block::Paragraph {
                runs: vec![
                    InlineRun::PlainText("Debit ".into()),
                    InlineRun::Bold("cash".into()),
                ],
            },
            Block::BulletList {
                items: vec![
                    BulletItem {
                        indent_level: 0,
                        runs: vec![InlineRun::PlainText("Assets".into())],
                    },
                    BulletItem {
                        indent_level: 1,
                        runs: vec![InlineRun::PlainText("Cash".into())],
                    },
                ],
            },
            Block::MathBlock {
                latex: "a=b".into(),
            },
        ]);

        assert_eq!(
            doc.plain_text(),
            "Journal\nDebit cash\n- Assets\n  - Cash\n$a=b$"
        );
    }

    #[test]
    fn serializes_with_kind_tags() {
        let doc = Document::new(vec![Block::MathBlock { latex: "x".into() }]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"blocks":[{"kind":"math_block","latex":"x"}]}"#);
    }
}
