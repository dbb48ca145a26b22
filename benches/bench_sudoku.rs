use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evoperm::{individual::Individual, rng::RandomNumberGenerator, sudoku::Sudoku};

const NINE_BY_NINE: &str = "\
5 3 0 0 7 0 0 0 0
6 0 0 1 9 5 0 0 0
0 9 8 0 0 0 0 6 0
8 0 0 0 6 0 0 0 3
4 0 0 8 0 3 0 0 1
7 0 0 0 2 0 0 0 6
0 6 0 0 0 0 2 8 0
0 0 0 4 1 9 0 0 5
0 0 0 0 8 0 0 7 9
";

fn bench_conflict_evaluation(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(1);
    let mut sudoku = Sudoku::parse(NINE_BY_NINE).unwrap();
    sudoku.init_random(&mut rng);

    c.bench_function("conflicts_9x9", |b| {
        b.iter(|| black_box(sudoku.board()).conflicts())
    });

    c.bench_function("cell_conflicts_9x9", |b| {
        b.iter(|| black_box(sudoku.board()).cell_conflicts(black_box(5), 4, 4))
    });
}

fn bench_initialization(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(2);
    let prototype = Sudoku::parse(NINE_BY_NINE).unwrap();

    c.bench_function("init_random_9x9", |b| {
        b.iter(|| {
            let mut sudoku = prototype.clone();
            sudoku.init_random(&mut rng);
            black_box(sudoku.fitness())
        })
    });
}

fn bench_local_search(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(3);
    let prototype = Sudoku::parse(NINE_BY_NINE).unwrap();

    let mut group = c.benchmark_group("local_search");
    group.sample_size(10);
    group.bench_function("stochastic_local_search_5_passes", |b| {
        b.iter(|| {
            let mut sudoku = prototype.clone();
            sudoku.init_random(&mut rng);
            black_box(sudoku.stochastic_local_search(5, &mut rng))
        })
    });
    group.bench_function("stochastic_local_search_all_5_passes", |b| {
        b.iter(|| {
            let mut sudoku = prototype.clone();
            sudoku.init_random(&mut rng);
            black_box(sudoku.stochastic_local_search_all(5, &mut rng))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_conflict_evaluation,
    bench_initialization,
    bench_local_search
);
criterion_main!(benches);
