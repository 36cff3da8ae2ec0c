//! Selector benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::model::{Question, QuestionKind, QuestionSource};
use quizforge_core::selector::{sample_unique, weighted_choice};

fn make_bank(n: u64) -> Vec<Question> {
    (1..=n)
        .map(|id| Question {
            id,
            topic: "bench".into(),
            text: format!("question {id}"),
            source: QuestionSource::Llm,
            active: true,
            times_shown: (id % 20) as u32,
            times_correct: ((id % 7).min(id % 20)) as u32,
            kind: QuestionKind::Freeform {
                reference_answer: "reference".into(),
            },
        })
        .collect()
}

fn bench_weighted_choice(c: &mut Criterion) {
    let bank = make_bank(1_000);
    let pool: Vec<&Question> = bank.iter().collect();
    let mut rng = StdRng::seed_from_u64(1234);

    c.bench_function("weighted_choice_1k", |b| {
        b.iter(|| weighted_choice(black_box(&pool), &mut rng).unwrap())
    });
}

fn bench_sample_unique(c: &mut Criterion) {
    let bank = make_bank(1_000);
    let pool: Vec<&Question> = bank.iter().collect();
    let mut rng = StdRng::seed_from_u64(1234);

    c.bench_function("sample_unique_50_of_1k", |b| {
        b.iter(|| sample_unique(black_box(&pool), 50, &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_weighted_choice, bench_sample_unique);
criterion_main!(benches);
