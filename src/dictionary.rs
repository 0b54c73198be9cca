//! Dictionary loading and lookup: main words, measure words, stop words

use crate::character::TypedRune;
use crate::trie::{DictTrie, Hit};
use crate::{Config, Error};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The three tries a tokenizer matches against. Loaded once, then shared
/// read-only across any number of tokenizers (wrap in `Arc`).
#[derive(Debug)]
pub struct Dictionary {
    main: DictTrie,
    quantifier: DictTrie,
    stop_words: DictTrie,
}

impl Dictionary {
    /// Loads the dictionaries named by `config` from `config.dict_path`.
    ///
    /// The main and quantifier dictionaries are required; a missing file is
    /// [`Error::DictionaryNotFound`]. The stop-word dictionary and all
    /// extension dictionaries are optional and skipped with a warning.
    pub fn load(config: &Config) -> Result<Self, Error> {
        let dir = &config.dict_path;
        let mut main = DictTrie::new();
        load_dict_file(&mut main, &dir.join(&config.main_dict_file), true, "main")?;
        for ext in &config.ext_dict_files {
            load_dict_file(&mut main, &dir.join(ext), false, "extension")?;
        }

        let mut quantifier = DictTrie::new();
        load_dict_file(
            &mut quantifier,
            &dir.join(&config.quantifier_dict_file),
            true,
            "quantifier",
        )?;

        let mut stop_words = DictTrie::new();
        load_dict_file(
            &mut stop_words,
            &dir.join(&config.stopword_dict_file),
            false,
            "stopword",
        )?;
        for ext in &config.ext_stopword_dict_files {
            load_dict_file(&mut stop_words, &dir.join(ext), false, "extension stopword")?;
        }

        log::debug!(
            "dictionary loaded: {} main terms, {} quantifiers, {} stop words",
            main.term_count(),
            quantifier.term_count(),
            stop_words.term_count()
        );
        Ok(Dictionary {
            main,
            quantifier,
            stop_words,
        })
    }

    /// Builder for assembling a dictionary from in-memory word lists.
    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    pub(crate) fn match_in_main(&self, runes: &[TypedRune], start: usize, count: usize) -> Hit {
        self.main.match_runes(runes, start, count)
    }

    pub(crate) fn match_in_quantifier(
        &self,
        runes: &[TypedRune],
        start: usize,
        count: usize,
    ) -> Hit {
        self.quantifier.match_runes(runes, start, count)
    }

    pub(crate) fn extend_in_main(&self, runes: &[TypedRune], index: usize, hit: &mut Hit) {
        self.main.match_extend(runes, index, hit);
    }

    pub(crate) fn extend_in_quantifier(&self, runes: &[TypedRune], index: usize, hit: &mut Hit) {
        self.quantifier.match_extend(runes, index, hit);
    }

    pub(crate) fn is_stop_word(&self, runes: &[TypedRune], start: usize, count: usize) -> bool {
        if self.stop_words.is_empty() || runes.is_empty() || start >= runes.len() {
            return false;
        }
        self.stop_words.match_runes(runes, start, count).is_match()
    }
}

/// Collects word lists and builds a [`Dictionary`] without touching the
/// filesystem. Lines follow the same protocol as dictionary files.
#[derive(Default)]
pub struct DictionaryBuilder {
    main_words: Vec<String>,
    quantifiers: Vec<String>,
    stop_words: Vec<String>,
}

impl DictionaryBuilder {
    pub fn main_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn quantifiers<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quantifiers.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Dictionary {
        let mut main = DictTrie::new();
        load_lines(&mut main, self.main_words.iter().map(String::as_str));
        let mut quantifier = DictTrie::new();
        load_lines(&mut quantifier, self.quantifiers.iter().map(String::as_str));
        let mut stop_words = DictTrie::new();
        load_lines(&mut stop_words, self.stop_words.iter().map(String::as_str));
        Dictionary {
            main,
            quantifier,
            stop_words,
        }
    }
}

fn load_dict_file(
    trie: &mut DictTrie,
    path: &Path,
    critical: bool,
    name: &'static str,
) -> Result<(), Error> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if critical {
                return Err(Error::DictionaryNotFound {
                    name,
                    path: path.to_path_buf(),
                });
            }
            log::warn!("{name} dictionary not found, skipping: {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let before = trie.term_count();
    let reader = BufReader::new(file);
    let mut first = true;
    for line in reader.lines() {
        let line = line?;
        insert_line(trie, &line, first);
        first = false;
    }
    log::debug!(
        "{name} dictionary {}: {} terms",
        path.display(),
        trie.term_count() - before
    );
    Ok(())
}

fn load_lines<'a, I: Iterator<Item = &'a str>>(trie: &mut DictTrie, lines: I) {
    let mut first = true;
    for line in lines {
        insert_line(trie, line, first);
        first = false;
    }
}

/// One line of the dictionary file protocol: optional BOM on the first
/// line, `#` comments, trailing CR stripped, empty lines ignored.
fn insert_line(trie: &mut DictTrie, line: &str, first: bool) {
    let mut line = line;
    if first {
        line = line.strip_prefix('\u{FEFF}').unwrap_or(line);
    }
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    trie.insert(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::classify;

    fn runes_of(s: &str) -> Vec<TypedRune> {
        let mut out = Vec::new();
        classify(s.as_bytes(), false, &mut out);
        out
    }

    #[test]
    fn builder_feeds_all_three_tries() {
        let dict = Dictionary::builder()
            .main_words(["中华"])
            .quantifiers(["年"])
            .stop_words(["的"])
            .build();

        let runes = runes_of("中华");
        assert!(dict.match_in_main(&runes, 0, 2).is_match());
        let runes = runes_of("年");
        assert!(dict.match_in_quantifier(&runes, 0, 1).is_match());
        let runes = runes_of("的");
        assert!(dict.is_stop_word(&runes, 0, 1));
    }

    #[test]
    fn line_protocol_strips_bom_comments_and_cr() {
        let mut trie = DictTrie::new();
        load_lines(
            &mut trie,
            ["\u{FEFF}你好", "# a comment", "", "世界\r"].into_iter(),
        );
        assert_eq!(trie.term_count(), 2);
        let runes = runes_of("你好");
        assert!(trie.match_runes(&runes, 0, 2).is_match());
        let runes = runes_of("世界");
        assert!(trie.match_runes(&runes, 0, 2).is_match());
    }

    #[test]
    fn stop_word_probe_clamps_out_of_range() {
        let dict = Dictionary::builder().stop_words(["的"]).build();
        let runes = runes_of("的");
        assert!(!dict.is_stop_word(&runes, 5, 1));
        assert!(!dict.is_stop_word(&[], 0, 1));
    }
}
