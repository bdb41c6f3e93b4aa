/// Dash-prefixed list item.
pub struct Bullet;

impl Bullet {
    pub const MARKER: char = '-';
    /// Leading columns per indent level.
    pub const INDENT_WIDTH: usize = 2;

    pub fn is_bullet(line: &str) -> bool {
        line.trim_start().starts_with(Self::MARKER)
    }

    /// Indent level derived from the offset of the leading dash, halved.
    pub fn indent_level(line: &str) -> usize {
        let offset = line.chars().take_while(|c| c.is_whitespace()).count();
        offset / Self::INDENT_WIDTH
    }

    /// Item text with the dash prefix and surrounding whitespace removed.
    pub fn content(line: &str) -> &str {
        line.trim_start().trim_start_matches(Self::MARKER).trim()
    }
}
