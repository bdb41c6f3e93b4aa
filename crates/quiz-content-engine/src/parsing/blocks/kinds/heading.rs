use crate::parsing::inline::kinds::Bold;

/// ATX-style heading, limited to the four levels authoring produces.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 4;

    /// Parses `# Title` through `#### Title`.
    ///
    /// Returns the level and the heading text with bold markers removed.
    /// More than four markers, or markers not followed by a space, is not a
    /// heading.
    pub fn parse(text: &str) -> Option<(u8, String)> {
        let text = text.trim_start();
        let level = text.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > usize::from(Self::MAX_LEVEL) {
            return None;
        }

        // Markers are ASCII, so `level` is also a byte offset.
        let body = text[level..].strip_prefix(' ')?;
        let level = u8::try_from(level).ok()?;
        Some((level, Bold::strip(body).trim().to_string()))
    }
}
