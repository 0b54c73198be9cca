//! # hantok
//!
//! Pure Rust IK-style Chinese/CJK tokenizer for full-text indexing and
//! search.
//!
//! ## Features
//!
//! - 🦀 Pure Rust - no C++ dependencies
//! - 📖 Dictionary-driven: main words, measure words, stop words, extensions
//! - 🔀 Two output modes: maximum coverage (indexing) and smart (search)
//! - 🌊 Streaming: fixed 4 KiB buffer over any `Read`, matches span refills
//! - 🔢 Numeral + measure-word compounding in smart mode
//!
//! ## Example
//!
//! ```
//! use hantok::{Config, Dictionary, Tokenizer};
//! use std::sync::Arc;
//!
//! let dict = Arc::new(
//!     Dictionary::builder()
//!         .main_words(["中华人民共和国", "中华", "人民", "共和国"])
//!         .build(),
//! );
//! let config = Config { use_smart: true, ..Config::default() };
//!
//! let mut tokenizer = Tokenizer::new("中华人民共和国".as_bytes(), dict, config);
//! let lexeme = tokenizer.next_lexeme().unwrap().unwrap();
//! assert_eq!(lexeme.text(), "中华人民共和国");
//! ```
//!
//! ## Modes
//!
//! - **Maximum coverage** (`use_smart: false`): every dictionary hit and
//!   every overlap is emitted, plus single-character fillers - the right
//!   input for an inverted index.
//! - **Smart** (`use_smart: true`): ambiguous regions are resolved to one
//!   preferred segmentation and numerals are compounded with measure words -
//!   the right input for query analysis.

use rayon::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

mod arbitrator;
mod character;
mod cjk;
mod context;
mod dictionary;
mod latin;
mod lexeme;
mod lexeme_path;
mod ordered_set;
mod quantifier;
mod segmenter;
mod trie;

pub use character::{CharType, TypedRune};
pub use dictionary::{Dictionary, DictionaryBuilder};
pub use lexeme::{Lexeme, LexemeKind};

use context::AnalyzeContext;
use segmenter::Segmenter;

/// Tokenizer configuration.
///
/// The dictionary path fields are consumed by [`Dictionary::load`]; the two
/// flags drive the tokenizer itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolve ambiguity to a single segmentation and compound numerals.
    pub use_smart: bool,
    /// Fold ASCII and full-width letters to lowercase during classification
    /// and in emitted text.
    pub enable_lowercase: bool,
    /// Directory holding the dictionary files.
    pub dict_path: PathBuf,
    pub main_dict_file: String,
    pub quantifier_dict_file: String,
    pub stopword_dict_file: String,
    /// Extra word lists merged into the main dictionary.
    pub ext_dict_files: Vec<String>,
    /// Extra word lists merged into the stop-word dictionary.
    pub ext_stopword_dict_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_smart: false,
            enable_lowercase: true,
            dict_path: PathBuf::from("."),
            main_dict_file: "main.dic".to_string(),
            quantifier_dict_file: "quantifier.dic".to_string(),
            stopword_dict_file: "stopword.dic".to_string(),
            ext_dict_files: Vec::new(),
            ext_stopword_dict_files: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("{name} dictionary file not found: {}", .path.display())]
    DictionaryNotFound { name: &'static str, path: PathBuf },
}

/// Streaming tokenizer over a byte reader.
///
/// One instance serves one reader at a time; [`reset`](Tokenizer::reset)
/// rebinds it to a new reader and restarts all state. The dictionary is
/// shared read-only, so any number of tokenizers can run against the same
/// `Arc<Dictionary>` concurrently.
///
/// # Example
///
/// ```
/// use hantok::{Config, Dictionary, Tokenizer};
/// use std::sync::Arc;
///
/// let dict = Arc::new(Dictionary::builder().main_words(["你好"]).build());
/// let tokenizer = Tokenizer::new("你好".as_bytes(), dict, Config::default());
/// for lexeme in tokenizer {
///     println!("{}", lexeme.unwrap().text());
/// }
/// ```
pub struct Tokenizer<R> {
    reader: R,
    dict: Arc<Dictionary>,
    use_smart: bool,
    context: AnalyzeContext,
    segmenters: [Segmenter; 3],
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer over `reader` with a shared dictionary.
    pub fn new(reader: R, dict: Arc<Dictionary>, config: Config) -> Self {
        Tokenizer {
            reader,
            context: AnalyzeContext::new(&config),
            use_smart: config.use_smart,
            dict,
            segmenters: Segmenter::all(),
            finished: false,
        }
    }

    /// Produces the next lexeme, refilling the buffer as needed.
    ///
    /// Returns `Ok(None)` at end of input. A reader error is returned once
    /// and leaves the tokenizer terminal.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, Error> {
        if self.finished {
            return Ok(None);
        }
        loop {
            if let Some(lexeme) = self.context.next_lexeme(&self.dict) {
                return Ok(Some(lexeme));
            }

            let available = match self.context.fill_buffer(&mut self.reader) {
                Ok(n) => n,
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            };
            if available == 0 {
                self.finished = true;
                return Ok(None);
            }
            if !self.context.has_runes() {
                // Buffer held only malformed bytes; skip it wholesale.
                self.context.consume_raw_buffer();
                continue;
            }

            loop {
                for segmenter in &mut self.segmenters {
                    segmenter.analyze(&mut self.context, &self.dict);
                }
                if self.context.need_refill_buffer() {
                    break;
                }
                if !self.context.move_cursor() {
                    break;
                }
            }
            for segmenter in &mut self.segmenters {
                segmenter.reset();
            }

            arbitrator::process(&mut self.context, self.use_smart);
            self.context.output_to_result();
            self.context.mark_buffer_offset();
        }
    }

    /// Rebinds the tokenizer to a new reader and restarts all state.
    /// Tokenizing the same input again yields the same sequence.
    pub fn reset(&mut self, reader: R) {
        self.reader = reader;
        self.context.reset();
        for segmenter in &mut self.segmenters {
            segmenter.reset();
        }
        self.finished = false;
    }

    /// Number of Useless (punctuation/symbol) runes at the current end of
    /// processed input. Outer analyzers use this to correct end offsets.
    pub fn last_useless_char_num(&self) -> usize {
        self.context.last_useless_char_num()
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Lexeme, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_lexeme().transpose()
    }
}

/// Tokenizes one in-memory string.
///
/// # Example
///
/// ```
/// use hantok::{tokenize, Config, Dictionary};
/// use std::sync::Arc;
///
/// let dict = Arc::new(Dictionary::builder().main_words(["你好"]).build());
/// let lexemes = tokenize(&dict, &Config::default(), "你好").unwrap();
/// assert_eq!(lexemes[0].text(), "你好");
/// ```
pub fn tokenize(dict: &Arc<Dictionary>, config: &Config, text: &str) -> Result<Vec<Lexeme>, Error> {
    Tokenizer::new(text.as_bytes(), Arc::clone(dict), config.clone()).collect()
}

/// Tokenizes many strings in parallel against one shared dictionary.
///
/// Output order matches input order. Typical speedup is linear in cores for
/// batch indexing workloads, since the dictionary is read-only.
pub fn tokenize_batch(
    dict: &Arc<Dictionary>,
    config: &Config,
    texts: &[&str],
) -> Result<Vec<Vec<Lexeme>>, Error> {
    texts
        .par_iter()
        .map(|text| tokenize(dict, config, text))
        .collect()
}
