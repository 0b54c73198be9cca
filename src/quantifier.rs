//! Chinese numeral and measure-word segmenter

use crate::character::CharType;
use crate::context::{AnalyzeContext, QUANTIFIER_SEGMENTER_LOCK};
use crate::dictionary::Dictionary;
use crate::lexeme::{Lexeme, LexemeKind};
use crate::trie::Hit;

/// Code points accepted as Chinese numerals, including the formal (banker's)
/// forms and the archaic 卅/廿.
const CHINESE_NUMBERS: &str = "一二两三四五六七八九十零壹贰叁肆伍陆柒捌玖拾百千万亿佰仟萬億兆卅廿";

fn is_chinese_number(ch: char) -> bool {
    CHINESE_NUMBERS.contains(ch)
}

/// Tracks a numeral run and measure-word dictionary hits in parallel, both
/// over Chinese runes only.
pub(crate) struct QuantifierSegmenter {
    /// Inclusive rune span of the numeral run in progress.
    number: Option<(usize, usize)>,
    /// Live measure-word prefixes.
    count_hits: Vec<Hit>,
}

impl QuantifierSegmenter {
    pub fn new() -> Self {
        QuantifierSegmenter {
            number: None,
            count_hits: Vec::new(),
        }
    }

    pub fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        self.process_cnumber(ctx);
        self.process_count(ctx, dict);

        if self.number.is_none() && self.count_hits.is_empty() {
            ctx.unlock_buffer(QUANTIFIER_SEGMENTER_LOCK);
        } else {
            ctx.lock_buffer(QUANTIFIER_SEGMENTER_LOCK);
        }
    }

    pub fn reset(&mut self) {
        self.number = None;
        self.count_hits.clear();
    }

    fn process_cnumber(&mut self, ctx: &mut AnalyzeContext) {
        let rune = ctx.current_rune();
        let is_number = rune.char_type == CharType::Chinese && is_chinese_number(rune.ch);
        match self.number {
            None => {
                if is_number {
                    self.number = Some((ctx.cursor(), ctx.cursor()));
                }
            }
            Some((start, _)) => {
                if is_number {
                    self.number = Some((start, ctx.cursor()));
                } else {
                    self.output_num_lexeme(ctx);
                    self.number = None;
                }
            }
        }

        if ctx.is_buffer_consumed() && self.number.is_some() {
            self.output_num_lexeme(ctx);
            self.number = None;
        }
    }

    fn output_num_lexeme(&self, ctx: &mut AnalyzeContext) {
        let Some((start, end)) = self.number else {
            return;
        };
        let runes = ctx.runes();
        let byte_begin = runes[start].byte_offset;
        let byte_len = runes[end].next_byte_position() - byte_begin;
        ctx.add_lexeme(Lexeme::new(
            ctx.buffer_offset(),
            byte_begin,
            byte_len,
            LexemeKind::CnNum,
            start,
            end,
        ));
    }

    fn process_count(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        if !self.need_count_scan(ctx) {
            return;
        }

        if ctx.current_char_type() == CharType::Chinese {
            let cursor = ctx.cursor();
            let mut i = 0;
            while i < self.count_hits.len() {
                let hit = &mut self.count_hits[i];
                dict.extend_in_quantifier(ctx.runes(), cursor, hit);
                if hit.is_match() {
                    let lexeme = Lexeme::new(
                        ctx.buffer_offset(),
                        hit.byte_begin,
                        hit.byte_end - hit.byte_begin,
                        LexemeKind::Count,
                        hit.char_begin,
                        hit.char_end,
                    );
                    ctx.add_lexeme(lexeme);
                }
                if self.count_hits[i].is_prefix() {
                    i += 1;
                } else {
                    self.count_hits.remove(i);
                }
            }

            let single = dict.match_in_quantifier(ctx.runes(), cursor, 1);
            if single.is_match() {
                let rune = ctx.current_rune();
                ctx.add_lexeme(Lexeme::new(
                    ctx.buffer_offset(),
                    rune.byte_offset,
                    rune.byte_len,
                    LexemeKind::Count,
                    cursor,
                    cursor,
                ));
            }
            if single.is_prefix() {
                self.count_hits.push(single);
            }
        } else {
            self.count_hits.clear();
        }

        if ctx.is_buffer_consumed() {
            self.count_hits.clear();
        }
    }

    /// The measure-word track engages only next to a numeral: a run in
    /// progress, live hits, or a numeral lexeme ending right before the
    /// cursor.
    fn need_count_scan(&self, ctx: &AnalyzeContext) -> bool {
        if self.number.is_some() || !self.count_hits.is_empty() {
            return true;
        }
        if let Some(last) = ctx.peek_last_candidate() {
            if matches!(last.kind(), LexemeKind::CnNum | LexemeKind::Arabic)
                && last.char_end() + 1 == ctx.cursor()
            {
                return true;
            }
        }
        false
    }
}
