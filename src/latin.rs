//! English, Arabic-digit, and mixed alphanumeric run segmenter

use crate::character::CharType;
use crate::context::{AnalyzeContext, LATIN_SEGMENTER_LOCK};
use crate::lexeme::{Lexeme, LexemeKind};

/// Connectors tolerated inside a mixed run; they extend the run.
const LETTER_CONNECTORS: &[char] = &['#', '&', '+', '-', '.', '@', '_'];
/// Connectors tolerated inside a digit run; they do not extend it.
const NUM_CONNECTORS: &[char] = &[',', '.'];

fn is_letter_connector(ch: char) -> bool {
    LETTER_CONNECTORS.contains(&ch)
}

fn is_num_connector(ch: char) -> bool {
    NUM_CONNECTORS.contains(&ch)
}

/// Three run trackers over the same rune stream: English-only, digit-only,
/// and mixed-with-connectors. Each emits when its predicate breaks.
pub(crate) struct LatinSegmenter {
    /// Inclusive rune spans of the runs in progress.
    english: Option<(usize, usize)>,
    arabic: Option<(usize, usize)>,
    mixed: Option<(usize, usize)>,
}

impl LatinSegmenter {
    pub fn new() -> Self {
        LatinSegmenter {
            english: None,
            arabic: None,
            mixed: None,
        }
    }

    pub fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        let mut active = false;
        active |= self.process_english(ctx);
        active |= self.process_arabic(ctx);
        active |= self.process_mixed(ctx);

        if active {
            ctx.lock_buffer(LATIN_SEGMENTER_LOCK);
        } else {
            ctx.unlock_buffer(LATIN_SEGMENTER_LOCK);
        }
    }

    pub fn reset(&mut self) {
        self.english = None;
        self.arabic = None;
        self.mixed = None;
    }

    fn process_english(&mut self, ctx: &mut AnalyzeContext) -> bool {
        let cursor = ctx.cursor();
        let is_english = ctx.current_char_type() == CharType::English;
        match self.english {
            None => {
                if is_english {
                    self.english = Some((cursor, cursor));
                }
            }
            Some((start, _)) => {
                if is_english {
                    self.english = Some((start, cursor));
                } else {
                    Self::emit(ctx, self.english.take(), LexemeKind::English);
                }
            }
        }
        if ctx.is_buffer_consumed() {
            Self::emit(ctx, self.english.take(), LexemeKind::English);
        }
        self.english.is_some()
    }

    fn process_arabic(&mut self, ctx: &mut AnalyzeContext) -> bool {
        let cursor = ctx.cursor();
        let rune = ctx.current_rune();
        let is_arabic = rune.char_type == CharType::Arabic;
        match self.arabic {
            None => {
                if is_arabic {
                    self.arabic = Some((cursor, cursor));
                }
            }
            Some((start, _)) => {
                if is_arabic {
                    self.arabic = Some((start, cursor));
                } else if rune.char_type == CharType::Useless && is_num_connector(rune.ch) {
                    // Interior separator: keep the run but do not extend it.
                } else {
                    Self::emit(ctx, self.arabic.take(), LexemeKind::Arabic);
                }
            }
        }
        if ctx.is_buffer_consumed() {
            Self::emit(ctx, self.arabic.take(), LexemeKind::Arabic);
        }
        self.arabic.is_some()
    }

    fn process_mixed(&mut self, ctx: &mut AnalyzeContext) -> bool {
        let cursor = ctx.cursor();
        let rune = ctx.current_rune();
        let is_alnum = matches!(rune.char_type, CharType::English | CharType::Arabic);
        match self.mixed {
            None => {
                if is_alnum {
                    self.mixed = Some((cursor, cursor));
                }
            }
            Some((start, _)) => {
                if is_alnum {
                    self.mixed = Some((start, cursor));
                } else if rune.char_type == CharType::Useless && is_letter_connector(rune.ch) {
                    // Connector joins the run and counts toward it.
                    self.mixed = Some((start, cursor));
                } else {
                    Self::emit(ctx, self.mixed.take(), LexemeKind::Letter);
                }
            }
        }
        if ctx.is_buffer_consumed() {
            Self::emit(ctx, self.mixed.take(), LexemeKind::Letter);
        }
        self.mixed.is_some()
    }

    fn emit(ctx: &mut AnalyzeContext, span: Option<(usize, usize)>, kind: LexemeKind) {
        let Some((start, end)) = span else { return };
        let runes = ctx.runes();
        let byte_begin = runes[start].byte_offset;
        let byte_len = runes[end].next_byte_position() - byte_begin;
        ctx.add_lexeme(Lexeme::new(
            ctx.buffer_offset(),
            byte_begin,
            byte_len,
            kind,
            start,
            end,
        ));
    }
}
