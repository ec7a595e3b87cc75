use ndarray::{Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};

/// The result of evaluating a batch of decision vectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    /// One row per decision vector, one column per objective output.
    pub objectives: Array2<f64>,
    /// One row per decision vector, one column per constraint. `None` when the
    /// problem has no constraints.
    pub constraints: Option<Array2<f64>>,
}

impl EvaluationResults {
    pub fn n_of_rows(&self) -> usize {
        self.objectives.nrows()
    }

    /// Whether each row satisfies all constraints (all values non-negative).
    /// Every row is feasible when there are no constraints.
    pub fn feasible(&self) -> Vec<bool> {
        match &self.constraints {
            Some(values) => values
                .outer_iter()
                .map(|row| row.iter().all(|&v| v >= 0.0))
                .collect(),
            None => vec![true; self.n_of_rows()],
        }
    }
}

/// Anything that can be viewed as a batch of decision vectors.
///
/// 2D arrays are used as they are, one decision vector per row. A single
/// 1D vector is treated as a batch with one row.
pub trait DecisionBatch {
    fn as_batch(&self) -> ArrayView2<'_, f64>;
}

impl<S> DecisionBatch for ArrayBase<S, Ix2>
where
    S: Data<Elem = f64>,
{
    fn as_batch(&self) -> ArrayView2<'_, f64> {
        self.view()
    }
}

impl<S> DecisionBatch for ArrayBase<S, Ix1>
where
    S: Data<Elem = f64>,
{
    fn as_batch(&self) -> ArrayView2<'_, f64> {
        self.view().insert_axis(Axis(0))
    }
}

impl DecisionBatch for [f64] {
    fn as_batch(&self) -> ArrayView2<'_, f64> {
        ArrayView1::from(self).insert_axis(Axis(0))
    }
}

impl DecisionBatch for Vec<f64> {
    fn as_batch(&self) -> ArrayView2<'_, f64> {
        self.as_slice().as_batch()
    }
}
