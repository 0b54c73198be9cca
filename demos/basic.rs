//! Basic usage example for hantok
//!
//! Run with: cargo run --example basic -- "中华人民共和国成立于1949年"

use hantok::{Config, Dictionary, Tokenizer};
use std::env;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = env::args()
        .nth(1)
        .unwrap_or_else(|| "中华人民共和国成立于1949年".to_string());

    // A small in-memory dictionary; production deployments load word lists
    // from files with Dictionary::load(&config).
    let dict = Arc::new(
        Dictionary::builder()
            .main_words(["中华人民共和国", "中华", "人民", "共和国", "成立"])
            .quantifiers(["年", "个"])
            .stop_words(["于"])
            .build(),
    );

    for use_smart in [false, true] {
        let mode = if use_smart { "smart" } else { "max" };
        println!("--- {mode} mode ---");
        let config = Config {
            use_smart,
            ..Config::default()
        };
        let tokenizer = Tokenizer::new(text.as_bytes(), Arc::clone(&dict), config);
        for lexeme in tokenizer {
            let lexeme = lexeme?;
            println!(
                "{:>4}-{:<4} {:?}\t{}",
                lexeme.begin_position(),
                lexeme.end_position(),
                lexeme.kind(),
                lexeme.text()
            );
        }
    }
    Ok(())
}
