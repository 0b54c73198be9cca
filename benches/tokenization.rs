use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hantok::{tokenize, tokenize_batch, Config, Dictionary};
use std::sync::Arc;

fn bench_dict() -> Arc<Dictionary> {
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
                "数据库",
                "数据",
                "搜索引擎",
                "搜索",
                "引擎",
                "全文检索",
                "检索",
                "分词器",
                "分词",
            ])
            .quantifiers(["个", "年", "月", "条", "篇"])
            .stop_words(["的", "了", "是"])
            .build(),
    )
}

fn sample_text(repeat: usize) -> String {
    "中华人民共和国的搜索引擎使用分词器对数据库里的100万条数据做全文检索, \
     latency 3.5ms, hello-world2 ok. "
        .repeat(repeat)
}

fn bench_smart(c: &mut Criterion) {
    let dict = bench_dict();
    let config = Config {
        use_smart: true,
        ..Config::default()
    };

    let mut group = c.benchmark_group("tokenize_smart");
    for repeat in &[1, 10, 100] {
        let text = sample_text(*repeat);
        group.bench_with_input(BenchmarkId::from_parameter(repeat), repeat, |b, _| {
            b.iter(|| tokenize(&dict, &config, black_box(&text)));
        });
    }
    group.finish();
}

fn bench_max(c: &mut Criterion) {
    let dict = bench_dict();
    let config = Config::default();

    let mut group = c.benchmark_group("tokenize_max");
    for repeat in &[1, 10, 100] {
        let text = sample_text(*repeat);
        group.bench_with_input(BenchmarkId::from_parameter(repeat), repeat, |b, _| {
            b.iter(|| tokenize(&dict, &config, black_box(&text)));
        });
    }
    group.finish();
}

fn bench_dictionary_build(c: &mut Criterion) {
    c.bench_function("dictionary_build", |b| {
        b.iter(|| black_box(bench_dict()));
    });
}

fn bench_batch(c: &mut Criterion) {
    let dict = bench_dict();
    let config = Config {
        use_smart: true,
        ..Config::default()
    };

    let mut group = c.benchmark_group("tokenize_batch");
    for batch_size in &[10, 100] {
        let texts: Vec<String> = (0..*batch_size).map(|_| sample_text(4)).collect();
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, _| {
                b.iter(|| tokenize_batch(&dict, &config, black_box(&text_refs)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_smart,
    bench_max,
    bench_dictionary_build,
    bench_batch
);
criterion_main!(benches);
