//! Numeric literal accumulation.
//!
//! Digits accumulate into a `u64` magnitude while the engine keeps the raw
//! literal bytes in its scratch buffer. Finalization decides between the
//! three numeric results: an integer inside `i64` range, a float, or the
//! verbatim literal once `i64`/`u64` range or `f64` precision is exceeded.

/// The finished form of a numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Finished {
    Int(i64),
    Float(f64),
    /// Literal kept verbatim; exceeds safe integer or float precision.
    Big,
}

/// Accumulator for one numeric literal.
///
/// Reset (not reallocated) before each number so a parser instance can be
/// reused without churn.
#[derive(Debug, Default)]
pub(crate) struct NumberAccumulator {
    neg: bool,
    int: u64,
    /// The `u64` magnitude overflowed; only the raw text is authoritative.
    overflow: bool,
    has_frac: bool,
    has_exp: bool,
}

impl NumberAccumulator {
    pub(crate) fn reset(&mut self) {
        self.neg = false;
        self.int = 0;
        self.overflow = false;
        self.has_frac = false;
        self.has_exp = false;
    }

    pub(crate) fn set_neg(&mut self) {
        self.neg = true;
    }

    pub(crate) fn mark_frac(&mut self) {
        self.has_frac = true;
    }

    pub(crate) fn mark_exp(&mut self) {
        self.has_exp = true;
    }

    /// Feeds one integer-part digit byte (`b'0'..=b'9'`).
    pub(crate) fn digit(&mut self, b: u8) {
        let d = u64::from(b - b'0');
        if self.overflow {
            return;
        }
        if self.int > (u64::MAX - d) / 10 {
            self.overflow = true;
            return;
        }
        self.int = self.int * 10 + d;
    }

    /// Decides the result for the literal held in `text`.
    ///
    /// `text` is the raw bytes of the literal as consumed, shared with the
    /// engine's scratch buffer.
    pub(crate) fn finish(&self, text: &str) -> Finished {
        if self.has_frac || self.has_exp {
            // One correctly-rounded conversion at the end; a literal whose
            // magnitude escapes f64 range stays verbatim instead.
            return match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Finished::Float(f),
                _ => Finished::Big,
            };
        }
        if self.overflow {
            return Finished::Big;
        }
        if self.neg {
            // i64::MIN has no positive counterpart, so the magnitude check
            // runs against MAX + 1.
            if self.int <= (i64::MAX as u64) + 1 {
                #[allow(clippy::cast_possible_wrap)]
                return Finished::Int((self.int as i64).wrapping_neg());
            }
        } else if self.int <= i64::MAX as u64 {
            #[allow(clippy::cast_possible_wrap)]
            return Finished::Int(self.int as i64);
        }
        Finished::Big
    }
}
