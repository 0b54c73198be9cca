//! Dictionary-word segmenter for Han and other CJK runes

use crate::character::CharType;
use crate::context::{AnalyzeContext, CJK_SEGMENTER_LOCK};
use crate::dictionary::Dictionary;
use crate::lexeme::{Lexeme, LexemeKind};
use crate::trie::Hit;

/// Extends live dictionary prefixes across the cursor and probes for new
/// single-character matches.
pub(crate) struct CjkSegmenter {
    /// Partial dictionary prefixes anchored at earlier cursor positions.
    hits: Vec<Hit>,
}

impl CjkSegmenter {
    pub fn new() -> Self {
        CjkSegmenter { hits: Vec::new() }
    }

    pub fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        if ctx.current_char_type() != CharType::Useless {
            let cursor = ctx.cursor();
            // Extend every live hit by the current rune.
            let mut i = 0;
            while i < self.hits.len() {
                let hit = &mut self.hits[i];
                dict.extend_in_main(ctx.runes(), cursor, hit);
                if hit.is_match() {
                    let lexeme = Lexeme::new(
                        ctx.buffer_offset(),
                        hit.byte_begin,
                        hit.byte_end - hit.byte_begin,
                        LexemeKind::CnWord,
                        hit.char_begin,
                        hit.char_end,
                    );
                    ctx.add_lexeme(lexeme);
                }
                if self.hits[i].is_prefix() {
                    i += 1;
                } else {
                    self.hits.remove(i);
                }
            }

            // Probe for a fresh match starting at the cursor.
            let single = dict.match_in_main(ctx.runes(), cursor, 1);
            if single.is_match() {
                let rune = ctx.current_rune();
                ctx.add_lexeme(Lexeme::new(
                    ctx.buffer_offset(),
                    rune.byte_offset,
                    rune.byte_len,
                    LexemeKind::CnChar,
                    cursor,
                    cursor,
                ));
            }
            if single.is_prefix() {
                self.hits.push(single);
            }
        } else {
            self.reset();
        }

        if ctx.is_buffer_consumed() {
            self.reset();
        }

        if self.hits.is_empty() {
            ctx.unlock_buffer(CJK_SEGMENTER_LOCK);
        } else {
            ctx.lock_buffer(CJK_SEGMENTER_LOCK);
        }
    }

    pub fn reset(&mut self) {
        self.hits.clear();
    }
}
