//! Closed set of sub-segmenters run in sequence at every cursor position

use crate::cjk::CjkSegmenter;
use crate::context::AnalyzeContext;
use crate::dictionary::Dictionary;
use crate::latin::LatinSegmenter;
use crate::quantifier::QuantifierSegmenter;

/// The three sub-segmenters. Registration order matters: the quantifier
/// segmenter inspects the latest candidate when deciding whether to scan
/// for measure words, so the Latin segmenter must run before it.
pub(crate) enum Segmenter {
    Latin(LatinSegmenter),
    Quantifier(QuantifierSegmenter),
    Cjk(CjkSegmenter),
}

impl Segmenter {
    pub fn all() -> [Segmenter; 3] {
        [
            Segmenter::Latin(LatinSegmenter::new()),
            Segmenter::Quantifier(QuantifierSegmenter::new()),
            Segmenter::Cjk(CjkSegmenter::new()),
        ]
    }

    pub fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        match self {
            Segmenter::Latin(s) => s.analyze(ctx),
            Segmenter::Quantifier(s) => s.analyze(ctx, dict),
            Segmenter::Cjk(s) => s.analyze(ctx, dict),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Segmenter::Latin(s) => s.reset(),
            Segmenter::Quantifier(s) => s.reset(),
            Segmenter::Cjk(s) => s.reset(),
        }
    }
}
