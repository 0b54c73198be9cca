//! Lexeme: a token candidate or final token

use std::cmp::Ordering;
use std::fmt;

/// Kind of lexeme produced by the segmenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    Unknown,
    /// English letter run
    English,
    /// Arabic digit run
    Arabic,
    /// Mixed alphanumeric run with connectors
    Letter,
    /// Multi-character dictionary word
    CnWord,
    /// Single Han character
    CnChar,
    /// Hiragana / Katakana / Hangul character
    OtherCjk,
    /// Chinese numeral run
    CnNum,
    /// Chinese measure word
    Count,
    /// Numeral + measure compound
    CnQuan,
}

/// A token candidate with byte and character spans.
///
/// `byte_begin`/`byte_len` are relative to the segment buffer that produced
/// the lexeme; `offset` is the global byte position of that buffer, so
/// [`begin_position`](Lexeme::begin_position) is absolute in the input
/// stream. `char_begin..=char_end` is the inclusive rune-index span. `text`
/// is empty until the lexeme is emitted to the caller.
#[derive(Debug, Clone)]
pub struct Lexeme {
    pub(crate) offset: usize,
    pub(crate) byte_begin: usize,
    pub(crate) byte_len: usize,
    pub(crate) char_begin: usize,
    pub(crate) char_end: usize,
    pub(crate) kind: LexemeKind,
    pub(crate) text: String,
}

impl Lexeme {
    pub(crate) fn new(
        offset: usize,
        byte_begin: usize,
        byte_len: usize,
        kind: LexemeKind,
        char_begin: usize,
        char_end: usize,
    ) -> Self {
        Lexeme {
            offset,
            byte_begin,
            byte_len,
            char_begin,
            char_end,
            kind,
            text: String::new(),
        }
    }

    /// Global byte offset of the segment buffer this lexeme came from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte start relative to the segment buffer.
    pub fn byte_begin(&self) -> usize {
        self.byte_begin
    }

    /// Length in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// First rune index (relative to the segment buffer).
    pub fn char_begin(&self) -> usize {
        self.char_begin
    }

    /// Last rune index, inclusive.
    pub fn char_end(&self) -> usize {
        self.char_end
    }

    /// Number of runes covered.
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_begin + 1
    }

    pub fn kind(&self) -> LexemeKind {
        self.kind
    }

    /// Token text; filled when the lexeme is emitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute byte position of the first byte in the input stream.
    pub fn begin_position(&self) -> usize {
        self.offset + self.byte_begin
    }

    /// Absolute byte position just past the last byte.
    pub fn end_position(&self) -> usize {
        self.offset + self.byte_begin + self.byte_len
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Merges `next` into `self` when the two are byte-adjacent, retagging
    /// the result as `kind`. Returns whether the merge happened.
    pub(crate) fn append(&mut self, next: &Lexeme, kind: LexemeKind) -> bool {
        if self.end_position() == next.begin_position() {
            self.byte_len += next.byte_len;
            self.char_end = next.char_end;
            self.kind = kind;
            true
        } else {
            false
        }
    }
}

// Candidate ordering: earlier start first, longer span first on ties.
// Two lexemes are duplicates when they cover the same byte range; kind is
// deliberately ignored so the candidate set stays deduplicated.
impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.byte_begin == other.byte_begin && self.byte_len == other.byte_len
    }
}

impl Eq for Lexeme {}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lexeme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.byte_begin
            .cmp(&other.byte_begin)
            .then_with(|| other.byte_len.cmp(&self.byte_len))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} : {:?} : {}",
            self.begin_position(),
            self.end_position(),
            self.kind,
            self.text
        )
    }
}
