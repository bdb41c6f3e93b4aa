/// A byte cursor for scanning inline markers.
///
/// Every marker the inline parser looks for is ASCII, so any position where a
/// marker matches is also a valid `char` boundary for slicing.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Finds the next occurrence of `pat` at or after the cursor, without moving.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.s.get(self.i..)?.find(pat).map(|off| self.i + off)
    }

    pub fn bump(&mut self) {
        self.i += 1;
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    pub fn seek(&mut self, i: usize) {
        self.i = i;
    }
}
