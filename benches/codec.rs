use criterion::{black_box, criterion_group, criterion_main, Criterion};
use luxem::{from_slice, luxem, to_string, to_string_pretty, Reader, Value};

fn sample_document() -> Vec<Value> {
    (0..100)
        .map(|index| {
            luxem!({
                "id": index,
                "count": (("int") 7),
                "name": "some moderately long primitive text",
                "path": "/usr/share/data",
                "tags": ["alpha", "beta", "gamma"],
                "nested": {
                    "blob": (("ascii16") "aabbccddeeff")
                },
                "comment": "row payload"
            })
        })
        .collect()
}

fn benchmark_write_compact(c: &mut Criterion) {
    let doc = sample_document();
    c.bench_function("write_compact", |b| {
        b.iter(|| to_string(black_box(&doc)))
    });
}

fn benchmark_write_pretty(c: &mut Criterion) {
    let doc = sample_document();
    c.bench_function("write_pretty", |b| {
        b.iter(|| to_string_pretty(black_box(&doc)))
    });
}

fn benchmark_parse_tree(c: &mut Criterion) {
    let input = to_string(&sample_document()).unwrap().into_bytes();
    c.bench_function("parse_tree", |b| {
        b.iter(|| from_slice(black_box(&input)))
    });
}

fn benchmark_tokenize_only(c: &mut Criterion) {
    struct Counter(usize);
    impl luxem::EventSink for Counter {
        fn primitive(&mut self, _text: &str) -> luxem::Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    let input = to_string(&sample_document()).unwrap().into_bytes();
    c.bench_function("tokenize_only", |b| {
        b.iter(|| {
            let mut reader = Reader::new(Counter(0));
            reader.feed(black_box(&input), true).unwrap();
            reader.into_sink().0
        })
    });
}

fn benchmark_tokenize_chunked(c: &mut Criterion) {
    let input = to_string(&sample_document()).unwrap().into_bytes();
    c.bench_function("tokenize_chunked_64", |b| {
        b.iter(|| {
            let mut reader = Reader::new(Vec::new());
            for chunk in black_box(&input).chunks(64) {
                reader.feed(chunk, false).unwrap();
            }
            reader.feed(b"", true).unwrap();
            reader.into_sink().len()
        })
    });
}

criterion_group!(
    benches,
    benchmark_write_compact,
    benchmark_write_pretty,
    benchmark_parse_tree,
    benchmark_tokenize_only,
    benchmark_tokenize_chunked,
);
criterion_main!(benches);
