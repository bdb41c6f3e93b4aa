/// Bold emphasis, `**text**`.
pub struct Bold;

impl Bold {
    pub const MARKER: &'static str = "**";

    /// Removes every bold marker, keeping the enclosed text.
    pub fn strip(text: &str) -> String {
        text.replace(Self::MARKER, "")
    }
}
