use moproblem::*;
use ndarray::{array, Array1, Array2, ArrayView1};
use std::io::Write;
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Writer that appends formatted log lines to a shared buffer.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records WARN and above into the returned buffer.
fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

fn unit_box(n: usize) -> Vec<Variable> {
    (0..n)
        .map(|i| Variable::bounded(format!("x{}", i), 0.0, 1.0).unwrap())
        .collect()
}

/// Two-objective ZDT1 on `n` variables.
fn zdt1(n: usize) -> ScalarMOProblem {
    let f1 = ScalarObjective::new("f1", |x| x[0]);
    let f2 = ScalarObjective::new("f2", |x: ArrayView1<f64>| {
        let n = x.len() as f64;
        let g = 1.0 + 9.0 * x.iter().skip(1).sum::<f64>() / (n - 1.0);
        g * (1.0 - (x[0] / g).sqrt())
    });
    ScalarMOProblem::new(
        vec![f1, f2],
        unit_box(n),
        vec![],
        Some(array![1.0, 10.0]),
        Some(array![0.0, 0.0]),
    )
    .unwrap()
}

#[test]
fn test_sum_example() -> anyhow::Result<()> {
    init_tracing();
    let problem = ScalarMOProblem::new(
        vec![ScalarObjective::new("x0 + x1", |x| x[0] + x[1])],
        unit_box(2),
        vec![],
        None,
        None,
    )?;

    let results = problem.evaluate(&array![[0.2, 0.3], [1.0, 1.0]])?;
    assert_eq!(results.objectives, array![[0.5], [2.0]]);
    assert_eq!(results.constraints, None);
    Ok(())
}

#[test]
fn test_single_vector_matches_single_row() -> anyhow::Result<()> {
    init_tracing();
    let problem = zdt1(3);
    let vector = array![0.25, 0.5, 0.75];
    let row = array![[0.25, 0.5, 0.75]];

    assert_eq!(problem.evaluate(&vector)?, problem.evaluate(&row)?);
    assert_eq!(problem.evaluate(&vec![0.25, 0.5, 0.75])?, problem.evaluate(&row)?);
    Ok(())
}

#[test]
fn test_narrow_batch_is_rejected() {
    init_tracing();
    let err = zdt1(3).evaluate(&array![[0.1, 0.2]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Evaluation);
    assert!(err.to_string().contains("expected 3"));
    assert!(err.to_string().contains("got 2"));
}

#[test]
fn test_zdt1_front() -> anyhow::Result<()> {
    init_tracing();
    // With the tail at zero g == 1 and f2 == 1 - sqrt(f1)
    let problem = zdt1(4);
    let batch = array![[0.0, 0.0, 0.0, 0.0], [0.25, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]];
    let results = problem.evaluate(&batch)?;
    assert_eq!(results.objectives, array![[0.0, 1.0], [0.25, 0.5], [1.0, 0.0]]);
    assert_eq!(problem.nadir(), Some(&array![1.0, 10.0]));
    Ok(())
}

#[test]
fn test_reference_point_validation() {
    init_tracing();
    let build = |nadir: Option<Array1<f64>>, ideal: Option<Array1<f64>>| {
        ScalarMOProblem::new(
            vec![
                ScalarObjective::new("a", |x| x[0]),
                ScalarObjective::new("b", |x| -x[0]),
            ],
            unit_box(1),
            vec![],
            nadir,
            ideal,
        )
    };

    assert!(build(None, None).is_ok());
    assert!(build(Some(array![1.0, 1.0]), Some(array![0.0, 0.0])).is_ok());
    assert!(build(Some(array![1.0]), None).is_err());
    assert!(build(None, Some(array![0.0, 0.0, 0.0])).is_err());
    assert!(build(Some(array![1.0, 1.0]), Some(array![0.0])).is_err());
}

#[test]
fn test_mixed_arity_packing() -> anyhow::Result<()> {
    init_tracing();
    let objectives: Vec<Objective> = vec![
        ScalarObjective::new("obj0", |x| x[0]).into(),
        VectorObjective::new(["obj1_0", "obj1_1", "obj1_2"], |x| {
            array![x[0] + 1.0, x[0] + 2.0, x[0] + 3.0]
        })?
        .into(),
        ScalarObjective::new("obj2", |x| 100.0 * x[0]).into(),
    ];
    let constraints = vec![ScalarConstraint::new("obj1_2 <= 3.5", |_, f| 3.5 - f[3])];
    let problem = MOProblem::new(objectives, unit_box(1), constraints, None, None)?;

    assert_eq!(problem.n_of_objectives(), 5);
    assert_eq!(problem.n_of_constraints(), 1);
    assert_eq!(
        problem.get_objective_names(),
        vec!["obj0", "obj1_0", "obj1_1", "obj1_2", "obj2"]
    );

    let results = problem.evaluate(&array![[0.0], [1.0]])?;
    assert_eq!(
        results.objectives,
        array![[0.0, 1.0, 2.0, 3.0, 0.0], [1.0, 2.0, 3.0, 4.0, 100.0]]
    );
    assert_eq!(results.constraints, Some(array![[0.5], [-0.5]]));
    assert_eq!(results.feasible(), vec![true, false]);
    Ok(())
}

#[test]
fn test_mixed_bounds_are_closed() -> anyhow::Result<()> {
    init_tracing();
    let objectives: Vec<Objective> = vec![ScalarObjective::new("f", |x| x.sum()).into()];
    let variables = vec![Variable::new("x", 0.0, -1.0, 1.0)?, Variable::new("y", 2.0, 2.0, 3.0)?];
    let problem = MOProblem::new(objectives, variables, vec![], None, None)?;

    assert!(problem.evaluate(&array![-1.0, 2.0]).is_ok());
    assert!(matches!(
        problem.evaluate(&array![-1.0, 1.999]),
        Err(ProblemError::LowerBound { .. })
    ));
    assert!(matches!(
        problem.evaluate(&array![1.001, 2.5]),
        Err(ProblemError::UpperBound { .. })
    ));
    assert_eq!(problem.get_variable_lower_bounds(), array![-1.0, 2.0]);
    assert_eq!(problem.get_variable_upper_bounds(), array![1.0, 3.0]);
    Ok(())
}

#[test]
fn test_bad_vector_output_fails_the_call() -> anyhow::Result<()> {
    init_tracing();
    let objectives: Vec<Objective> = vec![VectorObjective::new(["a", "b"], |_| array![1.0])?.into()];
    let problem = MOProblem::new(objectives, unit_box(1), vec![], None, None)?;
    let err = problem.evaluate(&array![0.5]).unwrap_err();
    assert!(matches!(err, ProblemError::ObjectiveOutput { expected: 2, got: 1, .. }));
    Ok(())
}

#[test]
fn test_data_problem_lookup() -> anyhow::Result<()> {
    init_tracing();
    let decisions = Array2::from_shape_fn((10, 2), |(i, j)| (i * (j + 1)) as f64);
    let objectives = Array2::from_shape_fn((10, 3), |(i, j)| ((i as f64) - 4.5).powi(2) + j as f64);
    let problem = ScalarDataProblem::new(decisions.clone(), objectives.clone())?;

    assert_eq!(problem.nadir(), Some(&array![20.25, 21.25, 22.25]));
    assert_eq!(problem.ideal(), Some(&array![0.25, 1.25, 2.25]));

    for i in 0..10 {
        let results = problem.evaluate(&decisions.row(i))?;
        assert_eq!(results.objectives.row(0), objectives.row(i));
    }

    let results = problem.evaluate(&decisions)?;
    assert_eq!(results.objectives, objectives);
    Ok(())
}

#[test]
fn test_data_problem_constraints() -> anyhow::Result<()> {
    init_tracing();
    let problem = ScalarDataProblem::new(array![[0.0], [1.0], [2.0]], array![[3.0], [2.0], [1.0]])?
        .with_constraints(vec![ScalarConstraint::new("f <= 2", |_, f| 2.0 - f[0])]);

    assert_eq!(
        problem.evaluate_constraint_values()?,
        Some(array![[-1.0], [0.0], [1.0]])
    );
    let results = problem.evaluate(&array![[1.9]])?;
    assert_eq!(results.objectives, array![[1.0]]);
    assert_eq!(results.constraints, Some(array![[1.0]]));
    Ok(())
}

#[test]
fn test_function_problems_cannot_evaluate_stored_constraints() {
    init_tracing();
    let scalar = zdt1(2);
    let mixed = MOProblem::new(
        vec![ScalarObjective::new("f", |x| x[0]).into()],
        unit_box(1),
        vec![ScalarConstraint::new("c", |x, _| x[0])],
        None,
        None,
    )
    .unwrap();

    let problems: [&dyn Problem; 2] = [&scalar, &mixed];
    for problem in problems {
        let err = problem.evaluate_constraint_values().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}

#[test]
fn test_trait_objects_evaluate_batches() -> anyhow::Result<()> {
    init_tracing();
    let data = ScalarDataProblem::new(
        array![[0.0, 0.0], [1.0, 1.0]],
        array![[0.0, 1.0], [1.0, 0.0]],
    )?;
    let problems: Vec<Box<dyn Problem>> = vec![Box::new(zdt1(2)), Box::new(data)];
    let batch = array![[0.0, 0.0], [1.0, 1.0]];
    for problem in &problems {
        let results = problem.evaluate_batch(batch.view())?;
        assert_eq!(results.objectives.dim(), (2, problem.n_of_objectives()));
    }
    Ok(())
}

#[test]
fn test_results_serialize() -> anyhow::Result<()> {
    init_tracing();
    let results = zdt1(2).evaluate(&array![[0.25, 0.0]])?;
    let json = serde_json::to_string(&results)?;
    let back: EvaluationResults = serde_json::from_str(&json)?;
    assert_eq!(back, results);

    let config: DataProblemConfig = serde_json::from_str(r#"{"epsilon":0.0,"strategy":"Model"}"#)?;
    assert_eq!(config.strategy, EvaluationStrategy::Model);
    Ok(())
}

#[test]
fn test_data_problem_warns_on_every_evaluation() -> anyhow::Result<()> {
    let problem = ScalarDataProblem::new(array![[0.0], [1.0]], array![[1.0], [0.0]])?;
    let logs = capture_logs(|| {
        assert!(problem.evaluate(&array![0.2]).is_ok());
        assert!(problem.evaluate(&array![[0.9], [0.4]]).is_ok());
    });
    assert_eq!(logs.matches("closest known point").count(), 2);
    assert!(logs.contains("WARN"));
    Ok(())
}

#[test]
fn test_bound_violations_are_logged() -> anyhow::Result<()> {
    let problem = zdt1(3);
    let logs = capture_logs(|| {
        assert!(problem.evaluate(&array![-0.5, 0.0, 0.0]).is_err());
        assert!(problem.evaluate(&array![0.0, 1.5, 0.0]).is_err());
    });
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("violates its lower bound 0"));
    assert!(logs.contains("violates its upper bound 1"));
    Ok(())
}
