use super::kinds::Bullet;

/// Classification of a single line of a plain chunk, using only local facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Whitespace only.
    Blank,
    /// A `-` item with its indent level and marker-free content.
    Bullet { indent_level: usize, content: &'a str },
    /// Any other line, trimmed.
    Text(&'a str),
}

impl LineClass<'_> {
    pub fn is_bullet(&self) -> bool {
        matches!(self, LineClass::Bullet { .. })
    }
}

/// Classifies one line of a plain chunk.
pub fn classify_line(line: &str) -> LineClass<'_> {
    if line.trim().is_empty() {
        return LineClass::Blank;
    }
    if Bullet::is_bullet(line) {
        return LineClass::Bullet {
            indent_level: Bullet::indent_level(line),
            content: Bullet::content(line),
        };
    }
    LineClass::Text(line.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lines() {
        assert_eq!(classify_line("   "), LineClass::Blank);
        assert_eq!(
            classify_line("  - Cash"),
            LineClass::Bullet {
                indent_level: 1,
                content: "Cash"
            }
        );
        assert_eq!(classify_line("  Total  "), LineClass::Text("Total"));
    }
}
