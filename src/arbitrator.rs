//! Ambiguity arbitration over crossing regions of candidate lexemes

use crate::context::AnalyzeContext;
use crate::lexeme::Lexeme;
use crate::lexeme_path::LexemePath;
use crate::ordered_set::CellId;
use std::cmp::Ordering;

/// Drains the buffer's candidate set into crossing regions and indexes one
/// path per region. In smart mode each ambiguous region is resolved by
/// [`judge`]; otherwise the full crossing path is kept.
pub(crate) fn process(ctx: &mut AnalyzeContext, use_smart: bool) {
    let mut cross_path = LexemePath::new();
    while let Some(lexeme) = ctx.org_lexemes().poll_first() {
        if !cross_path.add_cross_lexeme(&lexeme) {
            emit_path(ctx, cross_path, use_smart);
            cross_path = LexemePath::new();
            cross_path.add_cross_lexeme(&lexeme);
        }
    }
    emit_path(ctx, cross_path, use_smart);
}

fn emit_path(ctx: &mut AnalyzeContext, cross_path: LexemePath, use_smart: bool) {
    if cross_path.is_empty() {
        return;
    }
    if cross_path.size() == 1 || !use_smart {
        ctx.add_lexeme_path(cross_path);
    } else {
        ctx.add_lexeme_path(judge(&cross_path));
    }
}

/// Picks the best non-overlapping sub-path of a crossing region.
///
/// A greedy forward pass builds the first option and records every lexeme
/// it had to reject on a conflict stack. Each stacked conflict is then
/// replayed: rewind the option until the conflict fits, extend forward from
/// there, and keep the best option seen under the path quality order.
fn judge(cross_path: &LexemePath) -> LexemePath {
    let mut option = LexemePath::new();
    let mut conflict_stack = forward_path(cross_path, cross_path.head_id(), &mut option);
    let mut best = option.clone();

    while let Some(cell) = conflict_stack.pop() {
        back_path(cross_path.lexeme_at(cell), &mut option);
        forward_path(cross_path, Some(cell), &mut option);
        if option.compare(&best) == Ordering::Less {
            best = option.clone();
        }
    }
    best
}

/// Walks the crossing region from `from`, appending whatever fits without
/// overlap. Returns the cells rejected for overlap, in walk order.
fn forward_path(
    cross_path: &LexemePath,
    from: Option<CellId>,
    option: &mut LexemePath,
) -> Vec<CellId> {
    let mut conflicts = Vec::new();
    let mut cursor = from;
    while let Some(id) = cursor {
        if !option.add_not_cross_lexeme(cross_path.lexeme_at(id)) {
            conflicts.push(id);
        }
        cursor = cross_path.next_id(id);
    }
    conflicts
}

/// Rewinds the option until `lexeme` no longer overlaps it.
fn back_path(lexeme: &Lexeme, option: &mut LexemePath) {
    while option.check_cross(lexeme) {
        option.remove_tail();
    }
}
