use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genpaint::{
    BlendRule, FitnessEvaluator, PixelGrid, Population, RandomNumberGenerator,
};

fn reference() -> Arc<PixelGrid> {
    Arc::new(PixelGrid::from_fn(160, 120, |x, y| {
        [(x * 255 / 160) as u8, (y * 255 / 120) as u8, 128]
    }))
}

// Fitness barrier throughput for different pool sizes.
fn bench_evaluate(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(7);
    let population = Population::random(200, 300, 160, 120, &mut rng);

    let mut group = c.benchmark_group("evaluate");
    for threads in [1, 2, 4, 8].iter() {
        let evaluator = FitnessEvaluator::new(reference(), BlendRule::Averaged, Some(*threads))
            .expect("worker pool");
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, _| {
            b.iter_batched(
                || population.clone(),
                |mut batch| {
                    evaluator
                        .evaluate(black_box(batch.individuals_mut()))
                        .expect("evaluation")
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

// One breed + evaluate + sort cycle.
fn bench_generation(c: &mut Criterion) {
    let evaluator =
        FitnessEvaluator::new(reference(), BlendRule::Averaged, None).expect("worker pool");
    let mut rng = RandomNumberGenerator::from_seed(8);
    let mut population = Population::random(200, 300, 160, 120, &mut rng);
    evaluator
        .evaluate(population.individuals_mut())
        .expect("evaluation");
    population.sort_by_fitness();

    c.bench_function("generation_200x300", |b| {
        b.iter(|| {
            population.breed(&mut rng).expect("breed");
            evaluator
                .evaluate(population.individuals_mut())
                .expect("evaluation");
            population.sort_by_fitness();
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_generation);
criterion_main!(benches);
