use ndarray::{Array2, ArrayView1, ArrayView2};
use std::fmt;

type ConstraintFn = dyn Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Send + Sync;

/// A constraint over a decision vector and its objective vector.
///
/// The wrapped function returns a signed value: non-negative means the
/// constraint holds, negative means it is violated.
pub struct ScalarConstraint {
    name: String,
    evaluator: Box<ConstraintFn>,
}

impl ScalarConstraint {
    pub fn new<F>(name: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            evaluator: Box::new(evaluator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(
        &self,
        decision_vector: ArrayView1<'_, f64>,
        objective_vector: ArrayView1<'_, f64>,
    ) -> f64 {
        (self.evaluator)(decision_vector, objective_vector)
    }

    pub fn is_satisfied(
        &self,
        decision_vector: ArrayView1<'_, f64>,
        objective_vector: ArrayView1<'_, f64>,
    ) -> bool {
        self.evaluate(decision_vector, objective_vector) >= 0.0
    }
}

impl fmt::Debug for ScalarConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarConstraint")
            .field("name", &self.name)
            .finish()
    }
}

/// Evaluate every constraint against every row pair.
///
/// Row `i` of the result holds the constraint values of `decision_vectors[i]`
/// and `objective_vectors[i]`, one column per constraint. Returns `None` when
/// there are no constraints.
pub(crate) fn evaluate_constraints(
    constraints: &[ScalarConstraint],
    decision_vectors: ArrayView2<'_, f64>,
    objective_vectors: ArrayView2<'_, f64>,
) -> Option<Array2<f64>> {
    if constraints.is_empty() {
        return None;
    }
    let shape = (decision_vectors.nrows(), constraints.len());
    Some(Array2::from_shape_fn(shape, |(row, col)| {
        constraints[col].evaluate(decision_vectors.row(row), objective_vectors.row(row))
    }))
}
