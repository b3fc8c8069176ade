//! Per-submission identity used to discard stale responses.

/// Identifies one submission of one workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{}", _0)]
pub struct SubmissionToken(u64);

/// Issues strictly increasing tokens.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenSequence {
    last: u64,
}

impl TokenSequence {
    pub(crate) fn issue(&mut self) -> SubmissionToken {
        self.last += 1;
        SubmissionToken(self.last)
    }
}
