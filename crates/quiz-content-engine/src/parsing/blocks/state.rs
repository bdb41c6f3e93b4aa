/// Where the parser is in the dangling-delimiter recovery sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum MathContinuation {
    #[default]
    Idle,
    /// A lone `$` chunk was swallowed; the next chunk is the math body.
    AwaitingBody,
    /// The body was emitted; the next lone `$` chunk closes the span.
    AwaitingClose,
}

/// Math-continuation state threaded through a [`BlockParser`] by its caller.
///
/// Upstream content splitting sometimes separates `$` delimiters from the
/// math they enclose, producing the chunk sequence `["$", body, "$"]`. This
/// state lets the parser reassemble such a span across chunk boundaries.
///
/// A fresh (default) state must be used for every unrelated document; it is
/// never shared between documents. At most one of the pending flags is set
/// at any time.
///
/// [`BlockParser`]: super::BlockParser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserState {
    continuation: MathContinuation,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dangling opening `$` was swallowed and the next chunk is math.
    pub fn pending_math_open(&self) -> bool {
        self.continuation == MathContinuation::AwaitingBody
    }

    /// A math body was emitted and a dangling closing `$` is expected.
    pub fn pending_math_close(&self) -> bool {
        self.continuation == MathContinuation::AwaitingClose
    }

    /// Neither flag is set.
    pub fn is_idle(&self) -> bool {
        self.continuation == MathContinuation::Idle
    }

    pub fn reset(&mut self) {
        self.continuation = MathContinuation::Idle;
    }

    pub(crate) fn open_math(&mut self) {
        self.continuation = MathContinuation::AwaitingBody;
    }

    pub(crate) fn take_body(&mut self) {
        self.continuation = MathContinuation::AwaitingClose;
    }

    pub(crate) fn close_math(&mut self) {
        self.continuation = MathContinuation::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_no_pending_flags() {
        let state = ParserState::new();
        assert!(state.is_idle());
        assert!(!state.pending_math_open());
        assert!(!state.pending_math_close());
    }

    #[test]
    fn transitions_never_set_both_flags() {
        let mut state = ParserState::new();

        state.open_math();
        assert!(state.pending_math_open());
        assert!(!state.pending_math_close());

        state.take_body();
        assert!(!state.pending_math_open());
        assert!(state.pending_math_close());

        state.close_math();
        assert!(state.is_idle());
    }

    #[test]
    fn reset_clears_pending_flags() {
        let mut state = ParserState::new();
        state.open_math();
        state.reset();
        assert_eq!(state, ParserState::default());
    }
}
