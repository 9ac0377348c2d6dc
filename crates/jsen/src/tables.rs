//! Per-state byte classifier tables.
//!
//! Each parse state owns a 256-entry byte-to-action table so the hot loop
//! resolves every input byte with one indexed load. Tables start out filled
//! with the state's error action and valid bytes are overwritten, so all 256
//! values resolve to a transition, a skip, or an explicit error. The two
//! grammar descriptors below are plain statics built by `const fn`s; nothing
//! mutates them at runtime.

/// One classifier table: byte value to action.
pub(crate) type ByteMap = [Action; 256];

/// What the engine does with one byte in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    // Whitespace.
    SkipChar,
    SkipNewline,

    // Structure.
    OpenArray,
    OpenObject,
    CloseArray,
    CloseObject,
    Separator,
    Colon,

    // Value starts.
    LiteralStart,
    NegStart,
    ZeroStart,
    DigitStart,
    QuoteStart,
    KeyQuote,
    TokenStart,
    KeyTokenStart,
    AfterStart,
    Bom,
    Bom2,
    Bom3,

    // Literal continuation.
    LiteralByte,

    // Numbers.
    NumZero,
    NumDigit,
    NumDot,
    NumFracDigit,
    NumExp,
    NumExpSign,
    NumExpDigit,
    NumEnd,

    // Strings.
    StrByte,
    StrQuote,
    StrEscape,
    EscByte,
    EscU,
    HexByte,
    SurSlash,
    SurU,

    // SEN bare tokens.
    TokenByte,
    TokenFallback,
    TokenEnd,

    // Comments.
    CommentSlash,
    CommentOpen,
    CommentByte,
    CommentNewline,

    // Errors.
    ErrChar,
    ErrObjectClose,
    ErrNumber,
    ErrKeyOrClose,
    ErrKey,
    ErrColon,
    ErrEscape,
    ErrHex,
    ErrControl,
    ErrExtra,
    ErrBom,
}

use Action::*;

/// One grammar: the full table set plus the flags that distinguish SEN from
/// strict JSON.
pub(crate) struct Grammar {
    pub value: ByteMap,
    pub value_or_close: ByteMap,
    pub key: ByteMap,
    pub key_or_close: ByteMap,
    pub colon: ByteMap,
    pub after: ByteMap,

    pub neg: ByteMap,
    pub zero: ByteMap,
    pub digit: ByteMap,
    pub dot: ByteMap,
    pub frac: ByteMap,
    pub exp_sign: ByteMap,
    pub exp_zero: ByteMap,
    pub exp: ByteMap,

    pub string: ByteMap,
    pub esc: ByteMap,
    pub hex: ByteMap,
    pub sur_slash: ByteMap,
    pub sur_u: ByteMap,

    pub token: ByteMap,
    pub literal: ByteMap,

    pub comment_open: ByteMap,
    pub comment: ByteMap,
    pub space: ByteMap,
    pub bom_bb: ByteMap,
    pub bom_bf: ByteMap,

    /// Bare tokens may stand in for strings and keys.
    pub bare_tokens: bool,
}

const fn ws(mut m: ByteMap) -> ByteMap {
    m[b' ' as usize] = SkipChar;
    m[b'\t' as usize] = SkipChar;
    m[b'\r' as usize] = SkipChar;
    m[b'\n' as usize] = SkipNewline;
    m
}

const fn comments(mut m: ByteMap) -> ByteMap {
    m[b'/' as usize] = CommentSlash;
    m
}

const fn digits(mut m: ByteMap, a: Action) -> ByteMap {
    let mut b = b'0';
    while b <= b'9' {
        m[b as usize] = a;
        b += 1;
    }
    m
}

const fn hex_digits(mut m: ByteMap, a: Action) -> ByteMap {
    m = digits(m, a);
    let mut b = b'a';
    while b <= b'f' {
        m[b as usize] = a;
        m[(b - 0x20) as usize] = a;
        b += 1;
    }
    m
}

/// Marks every SEN token constituent. Reserved bytes keep their existing
/// entries; number-start bytes are included only for key positions, where no
/// numeric interpretation exists.
const fn token_bytes(mut m: ByteMap, a: Action, include_number_start: bool) -> ByteMap {
    let mut i = 0x21usize;
    while i <= 0xFF {
        let b = i as u8;
        let reserved = matches!(
            b,
            b'"' | b',' | b':' | b'[' | b']' | b'{' | b'}' | b'/' | 0xEF
        );
        let number = matches!(b, b'-' | b'0'..=b'9');
        if !reserved && (!number || include_number_start) {
            m[i] = a;
        }
        i += 1;
    }
    m
}

const fn value_starts(mut m: ByteMap) -> ByteMap {
    m[b'{' as usize] = OpenObject;
    m[b'[' as usize] = OpenArray;
    m[b'"' as usize] = QuoteStart;
    m[b'-' as usize] = NegStart;
    m[b'0' as usize] = ZeroStart;
    m = digits(m, DigitStart);
    m[b'0' as usize] = ZeroStart;
    m[0xEF] = Bom;
    m
}

/// Bytes that end a number. The byte is re-dispatched in the state the
/// finished number leaves behind, so each grammar's own rules decide what a
/// comma or close does next.
const fn num_terminators(mut m: ByteMap) -> ByteMap {
    m[b' ' as usize] = NumEnd;
    m[b'\t' as usize] = NumEnd;
    m[b'\r' as usize] = NumEnd;
    m[b'\n' as usize] = NumEnd;
    m[b',' as usize] = NumEnd;
    m[b']' as usize] = NumEnd;
    m[b'}' as usize] = NumEnd;
    m
}

const fn token_terminators(mut m: ByteMap) -> ByteMap {
    m[b' ' as usize] = TokenEnd;
    m[b'\t' as usize] = TokenEnd;
    m[b'\r' as usize] = TokenEnd;
    m[b'\n' as usize] = TokenEnd;
    m[b',' as usize] = TokenEnd;
    m[b':' as usize] = TokenEnd;
    m[b']' as usize] = TokenEnd;
    m[b'}' as usize] = TokenEnd;
    m
}

const fn controls(mut m: ByteMap, a: Action) -> ByteMap {
    let mut i = 0usize;
    while i <= 0x1F {
        m[i] = a;
        i += 1;
    }
    m
}

// ---------------------------------------------------------------------------
// Shared maps
// ---------------------------------------------------------------------------

const fn string_map() -> ByteMap {
    let mut m = [StrByte; 256];
    m = controls(m, ErrControl);
    m[b'"' as usize] = StrQuote;
    m[b'\\' as usize] = StrEscape;
    m
}

const fn esc_map() -> ByteMap {
    let mut m = [ErrEscape; 256];
    m[b'"' as usize] = EscByte;
    m[b'\\' as usize] = EscByte;
    m[b'/' as usize] = EscByte;
    m[b'b' as usize] = EscByte;
    m[b'f' as usize] = EscByte;
    m[b'n' as usize] = EscByte;
    m[b'r' as usize] = EscByte;
    m[b't' as usize] = EscByte;
    m[b'u' as usize] = EscU;
    m
}

const fn hex_map() -> ByteMap {
    hex_digits([ErrHex; 256], HexByte)
}

const fn sur_slash_map() -> ByteMap {
    let mut m = [ErrHex; 256];
    m[b'\\' as usize] = SurSlash;
    m
}

const fn sur_u_map() -> ByteMap {
    let mut m = [ErrHex; 256];
    m[b'u' as usize] = SurU;
    m
}

const fn literal_map() -> ByteMap {
    [LiteralByte; 256]
}

const fn comment_open_map() -> ByteMap {
    let mut m = [ErrChar; 256];
    m[b'/' as usize] = CommentOpen;
    m
}

const fn comment_map() -> ByteMap {
    let mut m = [CommentByte; 256];
    m[b'\n' as usize] = CommentNewline;
    m
}

const fn bom_bb_map() -> ByteMap {
    let mut m = [ErrBom; 256];
    m[0xBB] = Bom2;
    m
}

const fn bom_bf_map() -> ByteMap {
    let mut m = [ErrBom; 256];
    m[0xBF] = Bom3;
    m
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

const fn json_value() -> ByteMap {
    let mut m = ws([ErrChar; 256]);
    m = comments(m);
    m = value_starts(m);
    m[b'n' as usize] = LiteralStart;
    m[b't' as usize] = LiteralStart;
    m[b'f' as usize] = LiteralStart;
    // A close here can never match an open container, but it deserves its
    // own message.
    m[b'}' as usize] = ErrObjectClose;
    m
}

const fn json_value_or_close() -> ByteMap {
    let mut m = json_value();
    m[b']' as usize] = CloseArray;
    m
}

const fn json_key() -> ByteMap {
    let mut m = ws([ErrKey; 256]);
    m = comments(m);
    m[b'"' as usize] = KeyQuote;
    m
}

const fn json_key_or_close() -> ByteMap {
    let mut m = ws([ErrKeyOrClose; 256]);
    m = comments(m);
    m[b'"' as usize] = KeyQuote;
    m[b'}' as usize] = CloseObject;
    m
}

const fn json_colon() -> ByteMap {
    let mut m = ws([ErrColon; 256]);
    m = comments(m);
    m[b':' as usize] = Colon;
    m
}

const fn json_after() -> ByteMap {
    let mut m = ws([ErrChar; 256]);
    m = comments(m);
    m[b',' as usize] = Separator;
    m[b']' as usize] = CloseArray;
    m[b'}' as usize] = CloseObject;
    m
}

const fn json_neg() -> ByteMap {
    let mut m = digits([ErrNumber; 256], NumDigit);
    m[b'0' as usize] = NumZero;
    m
}

const fn json_zero() -> ByteMap {
    let mut m = num_terminators([ErrNumber; 256]);
    m[b'.' as usize] = NumDot;
    m[b'e' as usize] = NumExp;
    m[b'E' as usize] = NumExp;
    m
}

const fn json_digit() -> ByteMap {
    digits(json_zero(), NumDigit)
}

const fn json_dot() -> ByteMap {
    digits([ErrNumber; 256], NumFracDigit)
}

const fn json_frac() -> ByteMap {
    let mut m = num_terminators([ErrNumber; 256]);
    m = digits(m, NumFracDigit);
    m[b'e' as usize] = NumExp;
    m[b'E' as usize] = NumExp;
    m
}

const fn json_exp_sign() -> ByteMap {
    let mut m = digits([ErrNumber; 256], NumExpDigit);
    m[b'+' as usize] = NumExpSign;
    m[b'-' as usize] = NumExpSign;
    m
}

const fn json_exp_zero() -> ByteMap {
    digits([ErrNumber; 256], NumExpDigit)
}

const fn json_exp() -> ByteMap {
    let m = num_terminators([ErrNumber; 256]);
    digits(m, NumExpDigit)
}

const fn json_space() -> ByteMap {
    comments(ws([ErrExtra; 256]))
}

// ---------------------------------------------------------------------------
// SEN
// ---------------------------------------------------------------------------

const fn sen_value() -> ByteMap {
    let mut m = ws([ErrChar; 256]);
    m = comments(m);
    m = token_bytes(m, TokenStart, false);
    m = value_starts(m);
    m[b',' as usize] = SkipChar;
    m[b'}' as usize] = ErrObjectClose;
    m
}

const fn sen_value_or_close() -> ByteMap {
    let mut m = sen_value();
    m[b']' as usize] = CloseArray;
    m
}

const fn sen_key() -> ByteMap {
    let mut m = ws([ErrKey; 256]);
    m = comments(m);
    m = token_bytes(m, KeyTokenStart, true);
    m[0xEF] = KeyTokenStart;
    m[b'"' as usize] = KeyQuote;
    m[b',' as usize] = SkipChar;
    m
}

const fn sen_key_or_close() -> ByteMap {
    let mut m = ws([ErrKeyOrClose; 256]);
    m = comments(m);
    m = token_bytes(m, KeyTokenStart, true);
    m[0xEF] = KeyTokenStart;
    m[b'"' as usize] = KeyQuote;
    m[b',' as usize] = SkipChar;
    m[b'}' as usize] = CloseObject;
    m
}

const fn sen_colon() -> ByteMap {
    json_colon()
}

const fn sen_after() -> ByteMap {
    let mut m = ws([ErrChar; 256]);
    m = comments(m);
    m = token_bytes(m, AfterStart, true);
    m[0xEF] = AfterStart;
    m[b'"' as usize] = AfterStart;
    m[b'{' as usize] = AfterStart;
    m[b'[' as usize] = AfterStart;
    m[b',' as usize] = SkipChar;
    m[b']' as usize] = CloseArray;
    m[b'}' as usize] = CloseObject;
    m
}

const fn sen_neg() -> ByteMap {
    let mut m = token_terminators([TokenFallback; 256]);
    m = digits(m, NumDigit);
    m[b'0' as usize] = NumZero;
    m
}

const fn sen_zero() -> ByteMap {
    let mut m = num_terminators([TokenFallback; 256]);
    m = digits(m, ErrNumber);
    m[b'.' as usize] = NumDot;
    m[b'e' as usize] = NumExp;
    m[b'E' as usize] = NumExp;
    m
}

const fn sen_digit() -> ByteMap {
    let mut m = num_terminators([TokenFallback; 256]);
    m = digits(m, NumDigit);
    m[b'.' as usize] = NumDot;
    m[b'e' as usize] = NumExp;
    m[b'E' as usize] = NumExp;
    m
}

const fn sen_dot() -> ByteMap {
    let mut m = token_terminators([TokenFallback; 256]);
    m = digits(m, NumFracDigit);
    m
}

const fn sen_frac() -> ByteMap {
    let mut m = num_terminators([TokenFallback; 256]);
    m = digits(m, NumFracDigit);
    m[b'e' as usize] = NumExp;
    m[b'E' as usize] = NumExp;
    m
}

const fn sen_exp_sign() -> ByteMap {
    let mut m = token_terminators([TokenFallback; 256]);
    m = digits(m, NumExpDigit);
    m[b'+' as usize] = NumExpSign;
    m[b'-' as usize] = NumExpSign;
    m
}

const fn sen_exp_zero() -> ByteMap {
    let mut m = token_terminators([TokenFallback; 256]);
    m = digits(m, NumExpDigit);
    m
}

const fn sen_exp() -> ByteMap {
    let mut m = num_terminators([TokenFallback; 256]);
    m = digits(m, NumExpDigit);
    m
}

const fn sen_token() -> ByteMap {
    let mut m = controls([TokenByte; 256], ErrChar);
    token_terminators(m)
}

const fn sen_space() -> ByteMap {
    let mut m = comments(ws([ErrExtra; 256]));
    m[b',' as usize] = SkipChar;
    m
}

const UNUSED_TOKEN: ByteMap = [ErrChar; 256];

pub(crate) static JSON: Grammar = Grammar {
    value: json_value(),
    value_or_close: json_value_or_close(),
    key: json_key(),
    key_or_close: json_key_or_close(),
    colon: json_colon(),
    after: json_after(),

    neg: json_neg(),
    zero: json_zero(),
    digit: json_digit(),
    dot: json_dot(),
    frac: json_frac(),
    exp_sign: json_exp_sign(),
    exp_zero: json_exp_zero(),
    exp: json_exp(),

    string: string_map(),
    esc: esc_map(),
    hex: hex_map(),
    sur_slash: sur_slash_map(),
    sur_u: sur_u_map(),

    token: UNUSED_TOKEN,
    literal: literal_map(),

    comment_open: comment_open_map(),
    comment: comment_map(),
    space: json_space(),
    bom_bb: bom_bb_map(),
    bom_bf: bom_bf_map(),

    bare_tokens: false,
};

pub(crate) static SEN: Grammar = Grammar {
    value: sen_value(),
    value_or_close: sen_value_or_close(),
    key: sen_key(),
    key_or_close: sen_key_or_close(),
    colon: sen_colon(),
    after: sen_after(),

    neg: sen_neg(),
    zero: sen_zero(),
    digit: sen_digit(),
    dot: sen_dot(),
    frac: sen_frac(),
    exp_sign: sen_exp_sign(),
    exp_zero: sen_exp_zero(),
    exp: sen_exp(),

    string: string_map(),
    esc: esc_map(),
    hex: hex_map(),
    sur_slash: sur_slash_map(),
    sur_u: sur_u_map(),

    token: sen_token(),
    literal: literal_map(),

    comment_open: comment_open_map(),
    comment: comment_map(),
    space: sen_space(),
    bom_bb: bom_bb_map(),
    bom_bf: bom_bf_map(),

    bare_tokens: true,
};

impl Grammar {
    pub(crate) fn for_options(grammar: crate::options::Grammar) -> &'static Grammar {
        match grammar {
            crate::options::Grammar::Json => &JSON,
            crate::options::Grammar::Sen => &SEN,
        }
    }
}
