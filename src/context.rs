//! Streaming analysis state: segment buffer, cursor, candidate set, result
//! queue

use crate::character::{adjust_to_complete_char, classify, CharType, TypedRune};
use crate::dictionary::Dictionary;
use crate::lexeme::{Lexeme, LexemeKind};
use crate::lexeme_path::LexemePath;
use crate::ordered_set::OrderedLexemeSet;
use crate::Config;
use std::collections::{BTreeMap, VecDeque};
use std::io::Read;

/// Segment buffer size in bytes.
pub(crate) const BUFF_SIZE: usize = 4096;

/// Refill is considered once the cursor gets this close (in runes) to the
/// end of the buffer. Must stay below the shortest dictionary term length,
/// or boundary matches would starve.
pub(crate) const BUFF_EXHAUST_CRITICAL: usize = 100;

/// Per-segmenter lock bits. While any is held a segmenter is mid-match and
/// the buffer must not be refilled under it.
pub(crate) const CJK_SEGMENTER_LOCK: u8 = 0x01;
pub(crate) const QUANTIFIER_SEGMENTER_LOCK: u8 = 0x02;
pub(crate) const LATIN_SEGMENTER_LOCK: u8 = 0x04;

/// All per-input mutable state of one tokenizer.
pub(crate) struct AnalyzeContext {
    segment_buff: Vec<u8>,
    typed_runes: Vec<TypedRune>,
    /// Bytes already consumed from the stream before this buffer's first byte.
    buffer_offset: usize,
    /// Current rune index.
    cursor: usize,
    /// Valid bytes ending on a complete code point.
    available: usize,
    /// Valid bytes including a partial trailing code point, which is carried
    /// into the next refill instead of being dropped.
    raw_available: usize,
    last_useless_char_num: usize,
    buffer_locker: u8,
    /// Candidates collected by the segmenters over this buffer.
    org_lexemes: OrderedLexemeSet,
    /// Arbitrated paths, keyed by starting rune index.
    path_map: BTreeMap<usize, LexemePath>,
    /// Finalized lexemes awaiting emission.
    results: VecDeque<Lexeme>,
    use_smart: bool,
    enable_lowercase: bool,
}

impl AnalyzeContext {
    pub fn new(config: &Config) -> Self {
        AnalyzeContext {
            segment_buff: vec![0; BUFF_SIZE],
            typed_runes: Vec::new(),
            buffer_offset: 0,
            cursor: 0,
            available: 0,
            raw_available: 0,
            last_useless_char_num: 0,
            buffer_locker: 0,
            org_lexemes: OrderedLexemeSet::new(),
            path_map: BTreeMap::new(),
            results: VecDeque::new(),
            use_smart: config.use_smart,
            enable_lowercase: config.enable_lowercase,
        }
    }

    /// Clears all per-input state. Buffers keep their capacity.
    pub fn reset(&mut self) {
        self.typed_runes.clear();
        self.buffer_offset = 0;
        self.cursor = 0;
        self.available = 0;
        self.raw_available = 0;
        self.last_useless_char_num = 0;
        self.buffer_locker = 0;
        self.org_lexemes.clear();
        self.path_map.clear();
        self.results.clear();
    }

    /// Fills the segment buffer from `reader`, carrying over both the
    /// unprocessed tail and any partial trailing code point. Returns the
    /// number of complete-code-point bytes available.
    pub fn fill_buffer<R: Read>(&mut self, reader: &mut R) -> std::io::Result<usize> {
        let keep_from = if self.typed_runes.is_empty() {
            self.raw_available
        } else {
            self.typed_runes[self.cursor].next_byte_position()
        };
        let tail_len = self.raw_available - keep_from;
        self.segment_buff.copy_within(keep_from..self.raw_available, 0);

        let mut filled = tail_len;
        while filled < BUFF_SIZE {
            let n = reader.read(&mut self.segment_buff[filled..BUFF_SIZE])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.raw_available = filled;
        self.available = adjust_to_complete_char(&self.segment_buff[..filled]);

        self.typed_runes.clear();
        classify(
            &self.segment_buff[..self.available],
            self.enable_lowercase,
            &mut self.typed_runes,
        );
        self.cursor = 0;
        log::trace!(
            "buffer refill: {} bytes ({} complete), {} runes, offset {}",
            self.raw_available,
            self.available,
            self.typed_runes.len(),
            self.buffer_offset
        );
        Ok(self.available)
    }

    pub fn has_runes(&self) -> bool {
        !self.typed_runes.is_empty()
    }

    /// Discards a buffer that classified to zero runes (all-malformed
    /// input) so the stream still makes progress.
    pub fn consume_raw_buffer(&mut self) {
        self.buffer_offset += self.raw_available;
        self.available = 0;
        self.raw_available = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn buffer_offset(&self) -> usize {
        self.buffer_offset
    }

    pub fn runes(&self) -> &[TypedRune] {
        &self.typed_runes
    }

    pub fn current_rune(&self) -> TypedRune {
        self.typed_runes[self.cursor]
    }

    pub fn current_char_type(&self) -> CharType {
        self.typed_runes[self.cursor].char_type
    }

    pub fn move_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.typed_runes.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn is_buffer_consumed(&self) -> bool {
        self.cursor + 1 == self.typed_runes.len()
    }

    /// True when the cursor has entered the critical tail region and no
    /// segmenter is mid-match. Locks keep partial matches from straddling a
    /// refill.
    pub fn need_refill_buffer(&self) -> bool {
        !self.is_buffer_locked()
            && self.cursor + 1 < self.typed_runes.len()
            && self.cursor + BUFF_EXHAUST_CRITICAL > self.typed_runes.len()
    }

    /// Advances the global offset past everything consumed from this buffer.
    pub fn mark_buffer_offset(&mut self) {
        if !self.typed_runes.is_empty() {
            self.buffer_offset += self.typed_runes[self.cursor].next_byte_position();
        }
    }

    pub fn lock_buffer(&mut self, flag: u8) {
        self.buffer_locker |= flag;
    }

    pub fn unlock_buffer(&mut self, flag: u8) {
        self.buffer_locker &= !flag;
    }

    pub fn is_buffer_locked(&self) -> bool {
        self.buffer_locker != 0
    }

    /// Adds a candidate to the ordered set; duplicates are dropped.
    pub fn add_lexeme(&mut self, lexeme: Lexeme) {
        self.org_lexemes.add(lexeme);
    }

    pub fn org_lexemes(&mut self) -> &mut OrderedLexemeSet {
        &mut self.org_lexemes
    }

    pub fn peek_last_candidate(&self) -> Option<&Lexeme> {
        self.org_lexemes.peek_last()
    }

    /// Indexes an arbitrated path by its starting rune.
    pub fn add_lexeme_path(&mut self, path: LexemePath) {
        if let Some(head) = path.peek_first() {
            let begin = head.char_begin;
            self.path_map.insert(begin, path);
        }
    }

    pub fn last_useless_char_num(&self) -> usize {
        self.last_useless_char_num
    }

    /// Walks the processed runes, draining arbitrated paths into the result
    /// queue and filling gaps with single-character CJK lexemes.
    pub fn output_to_result(&mut self) {
        let mut index = 0;
        while index <= self.cursor {
            if self.typed_runes[index].char_type == CharType::Useless {
                index += 1;
                self.last_useless_char_num += 1;
                continue;
            }
            self.last_useless_char_num = 0;
            if let Some(mut path) = self.path_map.remove(&index) {
                while let Some(lexeme) = path.poll_first() {
                    index = lexeme.char_end + 1;
                    self.results.push_back(lexeme);
                    if let Some(next) = path.peek_first() {
                        // Emit uncovered CJK runes between path members.
                        let next_begin = next.char_begin;
                        while index < next_begin {
                            self.output_single_cjk(index);
                            index += 1;
                        }
                    }
                }
            } else {
                self.output_single_cjk(index);
                index += 1;
            }
        }
        self.path_map.clear();
    }

    fn output_single_cjk(&mut self, index: usize) {
        let rune = self.typed_runes[index];
        let kind = match rune.char_type {
            CharType::Chinese => LexemeKind::CnChar,
            CharType::OtherCjk => LexemeKind::OtherCjk,
            _ => return,
        };
        self.results.push_back(Lexeme::new(
            self.buffer_offset,
            rune.byte_offset,
            rune.byte_len,
            kind,
            index,
            index,
        ));
    }

    /// Pops the next finalized lexeme: compound (smart mode), drop stop
    /// words, fill in the text from the segment buffer.
    pub fn next_lexeme(&mut self, dict: &Dictionary) -> Option<Lexeme> {
        let mut result = self.results.pop_front()?;
        loop {
            self.compound(&mut result);
            if dict.is_stop_word(&self.typed_runes, result.char_begin, result.char_len()) {
                result = self.results.pop_front()?;
            } else {
                let bytes = &self.segment_buff[result.byte_begin..result.byte_begin + result.byte_len];
                let mut text = String::from_utf8_lossy(bytes).into_owned();
                if self.enable_lowercase {
                    text.make_ascii_lowercase();
                }
                result.set_text(text);
                return Some(result);
            }
        }
    }

    /// Smart-mode numeral compounding: Arabic+CNum -> CNum, Arabic+Count ->
    /// CQuan, then CNum+Count -> CQuan. Merges consume the queued neighbor.
    fn compound(&mut self, lexeme: &mut Lexeme) {
        if !self.use_smart || self.results.is_empty() {
            return;
        }
        if lexeme.kind == LexemeKind::Arabic {
            let next = self.results.front().expect("checked non-empty");
            let appended = match next.kind {
                LexemeKind::CnNum => lexeme.append(next, LexemeKind::CnNum),
                LexemeKind::Count => lexeme.append(next, LexemeKind::CnQuan),
                _ => false,
            };
            if appended {
                self.results.pop_front();
            }
        }
        if lexeme.kind == LexemeKind::CnNum {
            if let Some(next) = self.results.front() {
                if next.kind == LexemeKind::Count && lexeme.append(next, LexemeKind::CnQuan) {
                    self.results.pop_front();
                }
            }
        }
    }
}
