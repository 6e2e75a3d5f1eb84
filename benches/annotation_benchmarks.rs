use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use vertex_ideas::annotate::spelling::replace_word;
use vertex_ideas::{AnnotationEngine, WordListDictionary};

/// Generate editor content of different patterns for benchmarking
fn generate_content(lines: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "prose" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "The quick brown fox number {} jumps over the lazy dog again.\n",
                    i
                ));
            }
        }
        "misspelled" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "Thsi line {} has sevral mispeled words and the the repeats.\n",
                    i
                ));
            }
        }
        "code" => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!("def handler_{}(value):\n", i)),
                    1 => content.push_str("    if value: return 'done'\n"),
                    2 => content.push_str("    # fall through to the default\n"),
                    3 => content.push_str("    return \"pending\"\n"),
                    _ => unreachable!(),
                }
            }
        }
        _ => {
            for i in 0..lines {
                content.push_str(&format!("line {}\n", i));
            }
        }
    }

    content
}

/// Benchmark a full annotation pass over documents of growing size
fn bench_full_pass(c: &mut Criterion) {
    let dictionary = Arc::new(WordListDictionary::builtin());
    let sizes = vec![10, 100, 1_000];
    let patterns = vec!["prose", "misspelled", "code"];

    let mut group = c.benchmark_group("annotation_pass");

    for &size in &sizes {
        for pattern in &patterns {
            let content = generate_content(size, pattern);
            let mut engine = AnnotationEngine::new(dictionary.clone(), true);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(*pattern, size),
                &content,
                |b, content| {
                    b.iter(|| {
                        engine.refresh(black_box(content));
                        black_box(engine.annotations().len())
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark syntax-only passes, the cost paid with spellcheck off
fn bench_syntax_only(c: &mut Criterion) {
    let dictionary = Arc::new(WordListDictionary::builtin());
    let content = generate_content(1_000, "code");
    let mut engine = AnnotationEngine::new(dictionary, false);

    c.bench_function("syntax_only_1000_lines", |b| {
        b.iter(|| {
            engine.refresh(black_box(&content));
            black_box(engine.annotations().len())
        })
    });
}

fn bench_candidates(c: &mut Criterion) {
    let dictionary = Arc::new(WordListDictionary::builtin());
    let engine = AnnotationEngine::new(dictionary, true);
    let words = vec!["helo", "recieve", "wrld", "xyzzy"];

    let mut group = c.benchmark_group("candidates");
    for word in words {
        group.bench_with_input(BenchmarkId::from_parameter(word), &word, |b, word| {
            b.iter(|| black_box(engine.candidates(black_box(word))))
        });
    }
    group.finish();
}

fn bench_replace_word(c: &mut Criterion) {
    let content = generate_content(1_000, "misspelled");

    c.bench_function("replace_word_1000_lines", |b| {
        b.iter(|| black_box(replace_word(black_box(&content), "sevral", "several")))
    });
}

criterion_group!(
    benches,
    bench_full_pass,
    bench_syntax_only,
    bench_candidates,
    bench_replace_word
);
criterion_main!(benches);
