//! The core state machine.
//!
//! One byte-at-a-time, table-driven engine shared by every grammar and
//! consumption mode. Each input byte indexes the current state's classifier
//! table and the resulting action performs the transition: accumulate into
//! the scratch buffer, open or close a container, finish a token, or raise
//! the state's error. Input arrives as `(chunk, last)` pairs and may stop
//! anywhere, including mid-token; all in-flight state lives on the engine so
//! the next chunk resumes exactly where the previous one ended.

use std::io::Read;

use crate::{
    error::{Error, ErrorKind, ParseError},
    escape::{Fed, UnicodeEscape},
    literal::{Lit, LiteralMatcher, Step},
    number::{Finished, NumberAccumulator},
    options::Options,
    sink::{Flow, Sink},
    tables::{Action, ByteMap, Grammar},
};

/// Reference chunk size for reader-driven parses.
const READ_CHUNK: usize = 4096;

/// Open-container kind, one entry per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A value must follow (stream start, after `:`, after an array comma).
    Value,
    /// A value or `]` (directly after `[`).
    ValueOrClose,
    /// A key must follow (after an object comma).
    Key,
    /// A key or `}` (directly after `{`).
    KeyOrClose,
    /// `:` between key and value.
    Colon,
    /// After a value inside a container: separator or close.
    After,
    /// Inside `null`, `true`, or `false`.
    Lit,
    // Numeric sub-states.
    Neg,
    Zero,
    Digit,
    Dot,
    Frac,
    ExpSign,
    ExpZero,
    Exp,
    // String sub-states.
    Str,
    Esc,
    Hex,
    SurSlash,
    SurU,
    /// SEN bare token.
    Token,
    CommentOpen,
    Comment,
    /// After `0xEF`, expecting `0xBB`.
    BomBb,
    /// After `0xEF 0xBB`, expecting `0xBF`.
    BomBf,
    /// After a lone document: whitespace only.
    Space,
}

/// The shared parse engine. Grammar tables decide *what* the input may be,
/// the sink decides what recognizing it *does*.
pub(crate) struct Engine {
    grammar: &'static Grammar,
    comments: bool,
    pub(crate) only_one: bool,

    state: State,
    map: &'static ByteMap,
    containers: Vec<Container>,

    /// Scratch for the in-progress string, number, or token. Shared across
    /// all three and truncated, never freed, on reuse.
    scratch: Vec<u8>,
    num: NumberAccumulator,
    lit: LiteralMatcher,
    esc: UnicodeEscape,
    /// The string or token being read is an object key.
    in_key: bool,
    /// State to restore when a comment ends.
    ret: State,

    /// 1-based line of the byte being processed.
    line: usize,
    /// Global byte offset of the last newline, -1 before the first.
    noff: isize,
    /// Global byte offset of the start of the current chunk.
    goff: usize,
    /// A sink asked to stop; remaining input is ignored.
    stopped: bool,
}

impl Engine {
    pub(crate) fn new(options: &Options) -> Self {
        let grammar = Grammar::for_options(options.grammar);
        Self {
            grammar,
            comments: options.allow_comments,
            only_one: options.only_one,
            state: State::Value,
            map: &grammar.value,
            containers: Vec::new(),
            scratch: Vec::new(),
            num: NumberAccumulator::default(),
            lit: LiteralMatcher::none(),
            esc: UnicodeEscape::default(),
            in_key: false,
            ret: State::Value,
            line: 1,
            noff: -1,
            goff: 0,
            stopped: false,
        }
    }

    /// Truncates all reusable state back to stream start. Called at the
    /// beginning of every parse so an instance can be reused, including after
    /// a failed parse.
    pub(crate) fn reset(&mut self) {
        self.goto(State::Value);
        self.containers.clear();
        self.scratch.clear();
        self.num.reset();
        self.lit = LiteralMatcher::none();
        self.esc.reset();
        self.in_key = false;
        self.ret = State::Value;
        self.line = 1;
        self.noff = -1;
        self.goff = 0;
        self.stopped = false;
        log::trace!("engine reset");
    }

    fn table(&self, state: State) -> &'static ByteMap {
        let g = self.grammar;
        match state {
            State::Value => &g.value,
            State::ValueOrClose => &g.value_or_close,
            State::Key => &g.key,
            State::KeyOrClose => &g.key_or_close,
            State::Colon => &g.colon,
            State::After => &g.after,
            State::Lit => &g.literal,
            State::Neg => &g.neg,
            State::Zero => &g.zero,
            State::Digit => &g.digit,
            State::Dot => &g.dot,
            State::Frac => &g.frac,
            State::ExpSign => &g.exp_sign,
            State::ExpZero => &g.exp_zero,
            State::Exp => &g.exp,
            State::Str => &g.string,
            State::Esc => &g.esc,
            State::Hex => &g.hex,
            State::SurSlash => &g.sur_slash,
            State::SurU => &g.sur_u,
            State::Token => &g.token,
            State::CommentOpen => &g.comment_open,
            State::Comment => &g.comment,
            State::BomBb => &g.bom_bb,
            State::BomBf => &g.bom_bf,
            State::Space => &g.space,
        }
    }

    fn goto(&mut self, state: State) {
        self.state = state;
        self.map = self.table(state);
    }

    /// Consumes one chunk. `last` marks the final chunk; it triggers the
    /// end-of-input checks and may finish a trailing number or token.
    pub(crate) fn feed<S: Sink>(
        &mut self,
        buf: &[u8],
        last: bool,
        sink: &mut S,
    ) -> Result<(), ParseError> {
        let mut i = 0;
        while i < buf.len() {
            if self.stopped {
                break;
            }
            let b = buf[i];
            self.step(self.map[b as usize], b, self.goff + i, sink)?;
            i += 1;
        }
        self.goff += buf.len();
        if last && !self.stopped {
            self.finish(sink)?;
        }
        Ok(())
    }

    /// Drives the engine from a blocking reader in fixed-size chunks,
    /// setting `last` only once the reader returns end of file.
    pub(crate) fn feed_reader<R: Read, S: Sink>(
        &mut self,
        mut reader: R,
        sink: &mut S,
    ) -> Result<(), Error> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => {
                    log::trace!("reader end of input after {} bytes", self.goff);
                    self.feed(&[], true, sink)?;
                    return Ok(());
                }
                Ok(n) => self.feed(&buf[..n], false, sink)?,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
            if self.stopped {
                return Ok(());
            }
        }
    }

    /// Position-aware error for the byte at `pos`.
    fn err_at(&self, kind: ErrorKind, pos: usize) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: self.column_at(pos),
        }
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn column_at(&self, pos: usize) -> usize {
        (pos as isize - self.noff) as usize
    }

    fn newline(&mut self, pos: usize) {
        self.line += 1;
        #[allow(clippy::cast_possible_wrap)]
        {
            self.noff = pos as isize;
        }
    }

    /// Error raised when input ends in a state that cannot stop.
    pub(crate) fn incomplete(&self) -> ParseError {
        self.err_at(ErrorKind::Incomplete, self.goff)
    }

    fn begin_number(&mut self, b: u8) {
        self.scratch.clear();
        self.scratch.push(b);
        self.num.reset();
    }

    fn begin_string(&mut self, key: bool) {
        self.scratch.clear();
        self.in_key = key;
    }

    fn begin_token(&mut self, b: u8, key: bool) {
        self.scratch.clear();
        self.scratch.push(b);
        self.in_key = key;
    }

    /// Emits the number accumulated in scratch. The terminator byte, if any,
    /// is re-dispatched by the caller in the state the number leaves behind.
    fn finish_number<S: Sink>(&mut self, pos: usize, sink: &mut S) -> Result<(), ParseError> {
        let text = core::str::from_utf8(&self.scratch)
            .map_err(|_| self.err_at(ErrorKind::InvalidNumber, pos))?;
        match self.num.finish(text) {
            Finished::Int(i) => sink.int(i),
            Finished::Float(f) => sink.float(f),
            Finished::Big => sink.big_number(text),
        }
        self.value_done(sink);
        Ok(())
    }

    /// Emits a completed string. Keys transition to the colon state; values
    /// complete like any other value.
    fn finish_string<S: Sink>(&mut self, pos: usize, sink: &mut S) -> Result<(), ParseError> {
        match core::str::from_utf8(&self.scratch) {
            Ok(s) => {
                if self.in_key {
                    sink.key(s);
                } else {
                    sink.string(s);
                }
            }
            Err(_) => return Err(self.err_at(ErrorKind::InvalidUtf8, pos)),
        }
        if self.in_key {
            self.in_key = false;
            self.goto(State::Colon);
        } else {
            self.value_done(sink);
        }
        Ok(())
    }

    /// Emits a completed SEN bare token. Value tokens spelling a literal word
    /// become that literal; everything else is a string.
    fn finish_token<S: Sink>(&mut self, pos: usize, sink: &mut S) -> Result<(), ParseError> {
        match core::str::from_utf8(&self.scratch) {
            Ok(s) => {
                if self.in_key {
                    sink.key(s);
                } else {
                    match s {
                        "null" => sink.null(),
                        "true" => sink.boolean(true),
                        "false" => sink.boolean(false),
                        _ => sink.string(s),
                    }
                }
            }
            Err(_) => return Err(self.err_at(ErrorKind::InvalidUtf8, pos)),
        }
        if self.in_key {
            self.in_key = false;
            self.goto(State::Colon);
        } else {
            self.value_done(sink);
        }
        Ok(())
    }

    /// A value just completed. At depth zero the document dispatches and the
    /// engine either rearms for another document or locks to whitespace.
    fn value_done<S: Sink>(&mut self, sink: &mut S) {
        if self.containers.is_empty() {
            if sink.document_end() == Flow::Stop {
                self.stopped = true;
            }
            self.goto(if self.only_one {
                State::Space
            } else {
                State::Value
            });
        } else {
            self.goto(State::After);
        }
    }

    fn close_array<S: Sink>(&mut self, pos: usize, sink: &mut S) -> Result<(), ParseError> {
        match self.containers.pop() {
            Some(Container::Array) => {
                sink.array_end();
                self.value_done(sink);
                Ok(())
            }
            _ => Err(self.err_at(ErrorKind::UnexpectedArrayClose, pos)),
        }
    }

    fn close_object<S: Sink>(&mut self, pos: usize, sink: &mut S) -> Result<(), ParseError> {
        match self.containers.pop() {
            Some(Container::Object) => {
                sink.object_end();
                self.value_done(sink);
                Ok(())
            }
            _ => Err(self.err_at(ErrorKind::UnexpectedObjectClose, pos)),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn step<S: Sink>(
        &mut self,
        action: Action,
        b: u8,
        pos: usize,
        sink: &mut S,
    ) -> Result<(), ParseError> {
        match action {
            Action::SkipChar => Ok(()),
            Action::SkipNewline => {
                self.newline(pos);
                Ok(())
            }

            Action::OpenArray => {
                self.containers.push(Container::Array);
                sink.array_start();
                self.goto(State::ValueOrClose);
                Ok(())
            }
            Action::OpenObject => {
                self.containers.push(Container::Object);
                sink.object_start();
                self.goto(State::KeyOrClose);
                Ok(())
            }
            Action::CloseArray => self.close_array(pos, sink),
            Action::CloseObject => self.close_object(pos, sink),
            Action::Separator => match self.containers.last() {
                Some(Container::Object) => {
                    self.goto(State::Key);
                    Ok(())
                }
                Some(Container::Array) => {
                    self.goto(State::Value);
                    Ok(())
                }
                None => Err(self.err_at(ErrorKind::UnexpectedCharacter(b as char), pos)),
            },
            Action::Colon => {
                self.goto(State::Value);
                Ok(())
            }

            Action::LiteralStart => {
                self.lit = LiteralMatcher::new(b);
                self.goto(State::Lit);
                Ok(())
            }
            Action::LiteralByte => match self.lit.step(b) {
                Step::NeedMore => Ok(()),
                Step::Done(lit) => {
                    match lit {
                        Lit::Null => sink.null(),
                        Lit::True => sink.boolean(true),
                        Lit::False => sink.boolean(false),
                    }
                    self.value_done(sink);
                    Ok(())
                }
                Step::Reject => {
                    Err(self.err_at(ErrorKind::ExpectedLiteral(self.lit.word()), pos))
                }
            },

            Action::NegStart => {
                self.begin_number(b);
                self.num.set_neg();
                self.goto(State::Neg);
                Ok(())
            }
            Action::ZeroStart => {
                self.begin_number(b);
                self.num.digit(b);
                self.goto(State::Zero);
                Ok(())
            }
            Action::DigitStart => {
                self.begin_number(b);
                self.num.digit(b);
                self.goto(State::Digit);
                Ok(())
            }
            Action::NumZero => {
                self.scratch.push(b);
                self.num.digit(b);
                self.goto(State::Zero);
                Ok(())
            }
            Action::NumDigit => {
                self.scratch.push(b);
                self.num.digit(b);
                self.goto(State::Digit);
                Ok(())
            }
            Action::NumDot => {
                self.scratch.push(b);
                self.num.mark_frac();
                self.goto(State::Dot);
                Ok(())
            }
            Action::NumFracDigit => {
                self.scratch.push(b);
                self.goto(State::Frac);
                Ok(())
            }
            Action::NumExp => {
                self.scratch.push(b);
                self.num.mark_exp();
                self.goto(State::ExpSign);
                Ok(())
            }
            Action::NumExpSign => {
                self.scratch.push(b);
                self.goto(State::ExpZero);
                Ok(())
            }
            Action::NumExpDigit => {
                self.scratch.push(b);
                self.goto(State::Exp);
                Ok(())
            }
            Action::NumEnd => {
                self.finish_number(pos, sink)?;
                // The terminator plays its normal role in the state the
                // number left behind.
                self.step(self.map[b as usize], b, pos, sink)
            }

            Action::QuoteStart => {
                self.begin_string(false);
                self.goto(State::Str);
                Ok(())
            }
            Action::KeyQuote => {
                self.begin_string(true);
                self.goto(State::Str);
                Ok(())
            }
            Action::StrByte => {
                self.scratch.push(b);
                Ok(())
            }
            Action::StrQuote => self.finish_string(pos, sink),
            Action::StrEscape => {
                self.goto(State::Esc);
                Ok(())
            }
            Action::EscByte => {
                let decoded = match b {
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    _ => b,
                };
                self.scratch.push(decoded);
                self.goto(State::Str);
                Ok(())
            }
            Action::EscU => {
                self.esc.begin();
                self.goto(State::Hex);
                Ok(())
            }
            Action::HexByte => match self.esc.feed(b) {
                Fed::More => Ok(()),
                Fed::Done(c) => {
                    let mut utf8 = [0u8; 4];
                    self.scratch.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                    self.goto(State::Str);
                    Ok(())
                }
                Fed::NeedLow => {
                    self.goto(State::SurSlash);
                    Ok(())
                }
                Fed::Invalid => Err(self.err_at(ErrorKind::InvalidUnicode(b as char), pos)),
            },
            Action::SurSlash => {
                self.goto(State::SurU);
                Ok(())
            }
            Action::SurU => {
                self.esc.begin();
                self.goto(State::Hex);
                Ok(())
            }

            Action::TokenStart => {
                self.begin_token(b, false);
                self.goto(State::Token);
                Ok(())
            }
            Action::KeyTokenStart => {
                self.begin_token(b, true);
                self.goto(State::Token);
                Ok(())
            }
            Action::TokenByte => {
                self.scratch.push(b);
                Ok(())
            }
            Action::TokenFallback => {
                // A number stopped being one; in SEN it degrades to a bare
                // token. Scratch already holds the numeric prefix.
                self.scratch.push(b);
                self.goto(State::Token);
                Ok(())
            }
            Action::TokenEnd => {
                self.finish_token(pos, sink)?;
                self.step(self.map[b as usize], b, pos, sink)
            }

            Action::AfterStart => {
                // SEN reached the next token without a separator. Keys and
                // values diverge here: re-dispatch through the table the
                // enclosing container calls for.
                let grammar = self.grammar;
                let table = match self.containers.last() {
                    Some(Container::Object) => &grammar.key,
                    _ => &grammar.value,
                };
                self.step(table[b as usize], b, pos, sink)
            }

            Action::Bom => {
                if pos == 0 {
                    self.goto(State::BomBb);
                    Ok(())
                } else if self.grammar.bare_tokens {
                    self.begin_token(b, false);
                    self.goto(State::Token);
                    Ok(())
                } else {
                    Err(self.err_at(ErrorKind::UnexpectedCharacter(b as char), pos))
                }
            }
            Action::Bom2 => {
                self.goto(State::BomBf);
                Ok(())
            }
            Action::Bom3 => {
                // Column counting restarts after the consumed BOM.
                #[allow(clippy::cast_possible_wrap)]
                {
                    self.noff = pos as isize;
                }
                self.goto(State::Value);
                Ok(())
            }

            Action::CommentSlash => {
                if self.comments {
                    self.ret = self.state;
                    self.goto(State::CommentOpen);
                    Ok(())
                } else {
                    Err(self.err_at(ErrorKind::UnexpectedCharacter(b as char), pos))
                }
            }
            Action::CommentOpen => {
                self.goto(State::Comment);
                Ok(())
            }
            Action::CommentByte => Ok(()),
            Action::CommentNewline => {
                self.newline(pos);
                let ret = self.ret;
                self.goto(ret);
                Ok(())
            }

            Action::ErrChar => Err(self.err_at(ErrorKind::UnexpectedCharacter(b as char), pos)),
            Action::ErrObjectClose => Err(self.err_at(ErrorKind::UnexpectedObjectClose, pos)),
            Action::ErrNumber => Err(self.err_at(ErrorKind::InvalidNumber, pos)),
            Action::ErrKeyOrClose => {
                Err(self.err_at(ErrorKind::ExpectedKeyOrClose(b as char), pos))
            }
            Action::ErrKey => Err(self.err_at(ErrorKind::ExpectedKey(b as char), pos)),
            Action::ErrColon => Err(self.err_at(ErrorKind::ExpectedColon(b as char), pos)),
            Action::ErrEscape => Err(self.err_at(ErrorKind::InvalidEscape(b as char), pos)),
            Action::ErrHex => Err(self.err_at(ErrorKind::InvalidUnicode(b as char), pos)),
            Action::ErrControl => Err(self.err_at(ErrorKind::ControlCharacter(b), pos)),
            Action::ErrExtra => Err(self.err_at(ErrorKind::ExtraCharacters, pos)),
            Action::ErrBom => Err(self.err_at(ErrorKind::ExpectedBom, pos)),
        }
    }

    /// End-of-input checks. Only a completed document boundary or a token
    /// that closes implicitly may stop; everything else is incomplete.
    fn finish<S: Sink>(&mut self, sink: &mut S) -> Result<(), ParseError> {
        if self.state == State::Comment {
            let ret = self.ret;
            self.goto(ret);
        }
        match self.state {
            State::Space => Ok(()),
            State::Value if self.containers.is_empty() => Ok(()),
            State::Zero | State::Digit | State::Frac | State::Exp
                if self.containers.is_empty() =>
            {
                self.finish_number(self.goff, sink)
            }
            State::Token if self.containers.is_empty() => self.finish_token(self.goff, sink),
            State::Neg | State::Dot | State::ExpSign | State::ExpZero
                if self.grammar.bare_tokens && self.containers.is_empty() =>
            {
                // A number that never became one ends as a SEN token.
                self.finish_token(self.goff, sink)
            }
            _ => Err(self.incomplete()),
        }
    }
}
