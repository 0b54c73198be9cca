//! Mode-level properties: maximum coverage emits every hit in candidate
//! order, smart mode emits a single non-overlapping segmentation.

use hantok::{tokenize, Config, Dictionary, Lexeme, LexemeKind};
use std::sync::Arc;

fn dict() -> Arc<Dictionary> {
    Arc::new(
        Dictionary::builder()
            .main_words([
                "中华人民共和国",
                "中华人民",
                "中华",
                "华人",
                "人民共和国",
                "人民",
                "共和国",
                "共和",
                "结婚",
                "和尚",
                "尚未",
                "未结婚",
            ])
            .quantifiers(["个"])
            .stop_words(["的"])
            .build(),
    )
}

fn smart() -> Config {
    Config {
        use_smart: true,
        ..Config::default()
    }
}

fn run(config: &Config, input: &str) -> Vec<Lexeme> {
    tokenize(&dict(), config, input).unwrap()
}

#[test]
fn max_mode_emits_every_dictionary_hit() {
    let out = run(&Config::default(), "中华人民共和国");
    let texts: Vec<&str> = out.iter().map(Lexeme::text).collect();
    for term in [
        "中华人民共和国",
        "中华人民",
        "中华",
        "华人",
        "人民共和国",
        "人民",
        "共和国",
        "共和",
    ] {
        assert!(texts.contains(&term), "missing dictionary hit {term}");
    }
}

#[test]
fn max_mode_orders_by_begin_then_longest_first() {
    let out = run(&Config::default(), "中华人民共和国");
    for pair in out.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let a_key = (a.begin_position(), usize::MAX - a.byte_len());
        let b_key = (b.begin_position(), usize::MAX - b.byte_len());
        assert!(a_key <= b_key, "out of order: {a} then {b}");
    }
}

#[test]
fn smart_mode_output_never_overlaps() {
    for input in [
        "中华人民共和国",
        "结婚的和尚未结婚的",
        "中华人民共和国公民都是华人",
    ] {
        let out = run(&smart(), input);
        for pair in out.windows(2) {
            assert!(
                pair[0].end_position() <= pair[1].begin_position(),
                "overlap in {input}: {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn smart_mode_resolves_the_classic_ambiguity() {
    // 结婚的和尚未结婚的: the greedy reading would produce 和尚 across the
    // clause boundary; arbitration must settle on one non-overlapping
    // reading that still covers every Han character.
    let out = run(&smart(), "结婚的和尚未结婚的");
    let covered: usize = out.iter().map(Lexeme::byte_len).sum();
    let skipped_stop_words = 2 * "的".len();
    assert_eq!(covered + skipped_stop_words, "结婚的和尚未结婚的".len());
}

#[test]
fn stop_words_never_reach_the_caller() {
    for config in [Config::default(), smart()] {
        let out = tokenize(&dict(), &config, "人民的共和国").unwrap();
        assert!(
            out.iter().all(|l| l.text() != "的"),
            "stop word leaked in {:?} mode",
            config.use_smart
        );
    }
}

#[test]
fn both_modes_cover_all_cjk_input_bytes() {
    // Every Han byte belongs to some emitted lexeme, in either mode (no
    // stop words involved here).
    let input = "中华人民共和国成立了";
    for config in [Config::default(), smart()] {
        let out = tokenize(&dict(), &config, input).unwrap();
        let mut covered = vec![false; input.len()];
        for lexeme in &out {
            for flag in &mut covered[lexeme.begin_position()..lexeme.end_position()] {
                *flag = true;
            }
        }
        assert!(
            covered.iter().all(|&c| c),
            "uncovered bytes in mode smart={}",
            config.use_smart
        );
    }
}

#[test]
fn single_hit_regions_are_identical_across_modes() {
    // No ambiguity -> the two modes agree.
    let a = run(&Config::default(), "张三 hello 个");
    let b = run(&smart(), "张三 hello 个");
    let texts = |v: &[Lexeme]| {
        v.iter()
            .map(|l| (l.text().to_string(), l.kind()))
            .collect::<Vec<_>>()
    };
    assert_eq!(texts(&a), texts(&b));
}

#[test]
fn other_cjk_chars_emit_individually() {
    let out = run(&smart(), "こんにちは");
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|l| l.kind() == LexemeKind::OtherCjk));
    let out = run(&smart(), "한국어");
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|l| l.kind() == LexemeKind::OtherCjk));
}
