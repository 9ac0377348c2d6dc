//! Incremental matching of the `null`, `true`, and `false` literals.

/// Which literal is being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lit {
    Null,
    True,
    False,
}

/// What happened after feeding one more byte into the literal matcher.
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Lit),
    /// Byte did **not** match the expected one.
    Reject,
}

/// `None` while no literal is in flight, `Some((remaining, kind))` while
/// matching. The remainder survives chunk boundaries, so a literal split
/// across feeds resumes where it stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct LiteralMatcher(Option<(&'static [u8], Lit)>);

impl LiteralMatcher {
    /// No literal is in flight.
    pub(crate) fn none() -> Self {
        LiteralMatcher(None)
    }

    /// Start matching after the first byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Self {
        match first {
            b'n' => LiteralMatcher(Some((b"ull", Lit::Null))),
            b't' => LiteralMatcher(Some((b"rue", Lit::True))),
            b'f' => LiteralMatcher(Some((b"alse", Lit::False))),
            _ => LiteralMatcher::none(),
        }
    }

    /// The full literal word, for error messages.
    pub(crate) fn word(&self) -> &'static str {
        match self.0 {
            Some((_, Lit::Null)) => "null",
            Some((_, Lit::True)) => "true",
            Some((_, Lit::False)) => "false",
            None => "a literal",
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if *expected == b => {
                if rest.is_empty() {
                    Step::Done(kind)
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch; restore the state taken at the top so `word` can
                // still name the literal.
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}
