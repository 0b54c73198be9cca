//! Streaming behavior: chunked readers, inputs larger than the segment
//! buffer, reset, and reader failures.

use hantok::{tokenize, Config, Dictionary, Error, Lexeme, Tokenizer};
use std::io::{self, Read};
use std::sync::Arc;

/// Reader that hands out at most `chunk` bytes per call, to place
/// artificial read boundaries anywhere in the input.
struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    fn new(data: &str, chunk: usize) -> Self {
        ChunkedReader {
            data: data.as_bytes().to_vec(),
            pos: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that fails after a few bytes.
struct FailingReader {
    remaining: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "boom"));
        }
        let n = self.remaining.min(buf.len()).min(3);
        buf[..n].fill(b'a');
        self.remaining -= n;
        Ok(n)
    }
}

fn dict() -> Arc<Dictionary> {
    Arc::new(
        Dictionary::builder()
            .main_words(["中华人民共和国", "中华", "人民", "共和国", "数据库", "数据"])
            .quantifiers(["年", "个"])
            .build(),
    )
}

fn smart() -> Config {
    Config {
        use_smart: true,
        ..Config::default()
    }
}

fn summary(lexemes: &[Lexeme]) -> Vec<(usize, usize, String)> {
    lexemes
        .iter()
        .map(|l| (l.begin_position(), l.end_position(), l.text().to_string()))
        .collect()
}

#[test]
fn output_is_independent_of_read_chunk_size() {
    let input = "中华人民共和国的数据库有2023年的数据, search-v2 OK";
    for config in [Config::default(), smart()] {
        let whole = tokenize(&dict(), &config, input).unwrap();
        // Chunk sizes chosen to split multi-byte characters mid-sequence.
        for chunk in [1, 2, 3, 5, 7, 64] {
            let reader = ChunkedReader::new(input, chunk);
            let chunked: Vec<Lexeme> = Tokenizer::new(reader, dict(), config.clone())
                .collect::<Result<_, _>>()
                .unwrap();
            assert_eq!(
                summary(&whole),
                summary(&chunked),
                "chunk={chunk} smart={}",
                config.use_smart
            );
        }
    }
}

#[test]
fn inputs_larger_than_the_segment_buffer() {
    // ~18 KiB of alternating known words and filler, several refills deep.
    let unit = "中华人民共和国数据库x";
    let input = unit.repeat(800);
    let out = tokenize(&dict(), &smart(), &input).unwrap();

    // Per repetition: the compound word, the word 数据库, and the filler x.
    assert_eq!(out.len(), 3 * 800);
    for (i, lexeme) in out.iter().enumerate() {
        match i % 3 {
            0 => assert_eq!(lexeme.text(), "中华人民共和国"),
            1 => assert_eq!(lexeme.text(), "数据库"),
            _ => assert_eq!(lexeme.text(), "x"),
        }
        let bytes = &input.as_bytes()[lexeme.begin_position()..lexeme.end_position()];
        assert_eq!(bytes, lexeme.text().as_bytes(), "bad offsets at {i}");
    }
}

#[test]
fn long_input_offsets_survive_refills_with_chunked_reads() {
    let input = "一个数据库".repeat(1500); // 22.5 KiB
    let reader = ChunkedReader::new(&input, 113);
    let out: Vec<Lexeme> = Tokenizer::new(reader, dict(), smart())
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(!out.is_empty());
    for lexeme in &out {
        let bytes = &input.as_bytes()[lexeme.begin_position()..lexeme.end_position()];
        assert_eq!(bytes, lexeme.text().as_bytes());
    }
    let last = out.last().unwrap();
    assert_eq!(last.end_position(), input.len());
}

#[test]
fn reset_reproduces_the_same_sequence() {
    let input = "中华人民共和国有2023个数据库";
    let mut tokenizer = Tokenizer::new(input.as_bytes(), dict(), smart());
    let first: Vec<Lexeme> = (&mut tokenizer).collect::<Result<_, _>>().unwrap();
    assert!(!first.is_empty());

    tokenizer.reset(input.as_bytes());
    let second: Vec<Lexeme> = tokenizer.collect::<Result<_, _>>().unwrap();
    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn iterator_ends_cleanly_at_eof() {
    let mut tokenizer = Tokenizer::new("中华".as_bytes(), dict(), smart());
    assert!(tokenizer.next().is_some());
    assert!(tokenizer.next().is_none());
    // Fused: stays at None.
    assert!(tokenizer.next().is_none());
    assert!(tokenizer.next_lexeme().unwrap().is_none());
}

#[test]
fn reader_errors_propagate_and_terminate() {
    let mut tokenizer = Tokenizer::new(FailingReader { remaining: 5 }, dict(), smart());
    let err = tokenizer
        .next_lexeme()
        .expect_err("reader failure must surface");
    assert!(matches!(err, Error::Io(_)));
    // The tokenizer is terminal afterwards.
    assert!(tokenizer.next_lexeme().unwrap().is_none());
    assert!(tokenizer.next().is_none());
}

#[test]
fn malformed_bytes_are_skipped_not_fatal() {
    // 张 (e5 bc a0), then a stray continuation byte, then 三.
    let mut data = Vec::new();
    data.extend_from_slice("张".as_bytes());
    data.push(0xAD);
    data.extend_from_slice("三".as_bytes());
    let out: Vec<Lexeme> = Tokenizer::new(data.as_slice(), dict(), smart())
        .collect::<Result<_, _>>()
        .unwrap();
    let texts: Vec<&str> = out.iter().map(Lexeme::text).collect();
    assert_eq!(texts, vec!["张", "三"]);
    // The skipped byte shifts the second lexeme's offset by one.
    assert_eq!(out[0].begin_position(), 0);
    assert_eq!(out[1].begin_position(), 4);
}

#[test]
fn trailing_useless_chars_are_counted() {
    let mut tokenizer = Tokenizer::new("中华!!!".as_bytes(), dict(), smart());
    while tokenizer.next_lexeme().unwrap().is_some() {}
    assert_eq!(tokenizer.last_useless_char_num(), 3);
}
