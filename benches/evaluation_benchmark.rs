use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use moproblem::{MOProblem, Objective, Problem, ScalarDataProblem, ScalarObjective, Variable, VectorObjective};
use ndarray::{array, Array1, Array2};

const N_VARIABLES: usize = 10;

fn dtlz2_like() -> MOProblem {
    let variables = (0..N_VARIABLES)
        .map(|i| Variable::bounded(format!("x{}", i), 0.0, 1.0).unwrap())
        .collect();
    let objectives: Vec<Objective> = vec![
        VectorObjective::new(["f1", "f2"], |x| {
            let g: f64 = x.iter().skip(2).map(|v| (v - 0.5).powi(2)).sum();
            let a = x[0] * std::f64::consts::FRAC_PI_2;
            array![(1.0 + g) * a.cos(), (1.0 + g) * a.sin()]
        })
        .unwrap()
        .into(),
        ScalarObjective::new("spread", |x| x[1]).into(),
    ];
    MOProblem::new(objectives, variables, vec![], None, None).unwrap()
}

fn batch(rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, N_VARIABLES), |(i, j)| ((i * 31 + j * 17) % 100) as f64 / 100.0)
}

/// Benchmark live evaluation throughput of a mixed-arity problem
fn bench_mixed_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_evaluation");
    let problem = dtlz2_like();

    for size in [100, 1000, 10_000].iter() {
        let decision_vectors = batch(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let results = problem.evaluate(&decision_vectors).unwrap();
                criterion::black_box(results.objectives.sum());
            });
        });
    }
    group.finish();
}

/// Benchmark nearest neighbour lookup against stored data
fn bench_data_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_lookup");

    for size in [100, 1000, 10_000].iter() {
        let decisions = batch(*size);
        let objectives = Array2::from_shape_fn((*size, 2), |(i, j)| (i + j) as f64);
        let problem = ScalarDataProblem::new(decisions, objectives).unwrap();
        let query: Array1<f64> = Array1::from_elem(N_VARIABLES, 0.42);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let results = problem.evaluate(&query).unwrap();
                criterion::black_box(results.objectives[[0, 0]]);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mixed_evaluation, bench_data_lookup);
criterion_main!(benches);
