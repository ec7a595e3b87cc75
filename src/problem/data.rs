//! Problems backed by precomputed solutions
//!
//! A [`ScalarDataProblem`] has no objective functions. It holds a table of
//! decision vectors and the objective vectors they map to, row for row, and
//! answers evaluations by looking up the closest stored decision vector.

use super::{check_width, Problem};
use crate::common::EvaluationResults;
use crate::constraint::{evaluate_constraints, ScalarConstraint};
use crate::error::{ProblemError, ProblemResult};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Axis, Ix2};
use serde::{Deserialize, Serialize};

/// How a data based problem answers `evaluate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationStrategy {
    /// Return the objective vector of the closest stored decision vector.
    #[default]
    NearestNeighbour,
    /// Evaluate a model fitted to the data. Not available yet.
    Model,
}

/// Configuration for a [`ScalarDataProblem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataProblemConfig {
    /// Widens the reported variable bounds so boundary solutions fall inside.
    pub epsilon: f64,
    pub strategy: EvaluationStrategy,
}

impl Default for DataProblemConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            strategy: EvaluationStrategy::NearestNeighbour,
        }
    }
}

/// A problem defined by precomputed decision and objective vectors.
///
/// Row `i` of `objective_vectors` is the objective vector of row `i` of
/// `decision_vectors`. The nadir and ideal points are the column-wise
/// maximum and minimum of the objective vectors.
#[derive(Debug)]
pub struct ScalarDataProblem {
    decision_vectors: Array2<f64>,
    objective_vectors: Array2<f64>,
    nadir: Array1<f64>,
    ideal: Array1<f64>,
    constraints: Vec<ScalarConstraint>,
    config: DataProblemConfig,
}

impl ScalarDataProblem {
    pub fn new(decision_vectors: Array2<f64>, objective_vectors: Array2<f64>) -> ProblemResult<Self> {
        let decision_rows = decision_vectors.nrows();
        let objective_rows = objective_vectors.nrows();
        if decision_rows != objective_rows {
            tracing::error!(
                "Decision and objective vectors are not row aligned: {} vs {} rows",
                decision_rows,
                objective_rows
            );
            return Err(ProblemError::MisalignedData {
                decision_rows,
                objective_rows,
            });
        }
        if decision_rows == 0 {
            tracing::error!("Attempted to define a data based problem without data");
            return Err(ProblemError::EmptyData);
        }

        let nadir = objective_vectors.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| nan_max(acc, v));
        let ideal = objective_vectors.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| nan_min(acc, v));

        tracing::debug!(
            "Defined ScalarDataProblem: {} solutions, {} variables, {} objectives",
            decision_rows,
            decision_vectors.ncols(),
            objective_vectors.ncols()
        );

        Ok(Self {
            decision_vectors,
            objective_vectors,
            nadir,
            ideal,
            constraints: Vec::new(),
            config: DataProblemConfig::default(),
        })
    }

    /// Like [`ScalarDataProblem::new`] for arrays of unchecked dimensionality.
    /// Anything but a 2D array is rejected with the underlying shape error.
    pub fn from_dyn(decision_vectors: ArrayD<f64>, objective_vectors: ArrayD<f64>) -> ProblemResult<Self> {
        let decision_vectors = decision_vectors.into_dimensionality::<Ix2>().map_err(|source| {
            tracing::error!("Check the variable dimensions, is it a 2D array? {}", source);
            ProblemError::Shape {
                matrix: "decision",
                source,
            }
        })?;
        let objective_vectors = objective_vectors.into_dimensionality::<Ix2>().map_err(|source| {
            tracing::error!("Check the objective dimensions, is it a 2D array? {}", source);
            ProblemError::Shape {
                matrix: "objective",
                source,
            }
        })?;
        Self::new(decision_vectors, objective_vectors)
    }

    pub fn with_config(mut self, config: DataProblemConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_constraints(mut self, constraints: Vec<ScalarConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn set_constraints(&mut self, constraints: Vec<ScalarConstraint>) {
        self.constraints = constraints;
    }

    pub fn constraints(&self) -> &[ScalarConstraint] {
        &self.constraints
    }

    pub fn config(&self) -> &DataProblemConfig {
        &self.config
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.config.epsilon = epsilon;
    }

    pub fn decision_vectors(&self) -> ArrayView2<'_, f64> {
        self.decision_vectors.view()
    }

    pub fn objective_vectors(&self) -> ArrayView2<'_, f64> {
        self.objective_vectors.view()
    }

    /// Index of the stored decision vector closest to `query` in Euclidean
    /// distance. Ties go to the earliest row. Rows whose distance is NaN are
    /// never chosen unless every row's is.
    pub fn nearest_index(&self, query: ArrayView1<'_, f64>) -> usize {
        let mut best = 0;
        let mut best_distance = f64::NAN;
        for (i, row) in self.decision_vectors.outer_iter().enumerate() {
            let distance = euclidean_distance(row, query);
            if best_distance.is_nan() && !distance.is_nan() || distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }
}

/// Column max that returns NaN as soon as a NaN is seen.
fn nan_max(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.max(v)
    }
}

fn nan_min(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.min(v)
    }
}

/// Euclidean distance, scaled by the largest component difference so the
/// squares don't overflow for large but finite inputs.
fn euclidean_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let diffs: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).collect();
    if diffs.iter().any(|d| d.is_nan()) {
        return f64::NAN;
    }
    let scale = diffs.iter().copied().fold(0.0, f64::max);
    if scale == 0.0 || scale.is_infinite() {
        return scale;
    }
    scale * diffs.iter().map(|d| (d / scale).powi(2)).sum::<f64>().sqrt()
}

/// Nearest neighbour lookup has no meaningful answer for NaN or infinite
/// coordinates.
fn check_finite(decision_vectors: &ArrayView2<'_, f64>) -> ProblemResult<()> {
    for ((row, column), &value) in decision_vectors.indexed_iter() {
        if !value.is_finite() {
            tracing::error!(
                "Non-finite value {} at row {}, column {} of a data based problem query",
                value,
                row,
                column
            );
            return Err(ProblemError::NonFiniteInput { row, column, value });
        }
    }
    Ok(())
}

impl Problem for ScalarDataProblem {
    fn n_of_variables(&self) -> usize {
        self.decision_vectors.ncols()
    }

    fn n_of_objectives(&self) -> usize {
        self.objective_vectors.ncols()
    }

    fn n_of_constraints(&self) -> usize {
        self.constraints.len()
    }

    fn nadir(&self) -> Option<&Array1<f64>> {
        Some(&self.nadir)
    }

    fn ideal(&self) -> Option<&Array1<f64>> {
        Some(&self.ideal)
    }

    /// Column-wise `(min - epsilon, max + epsilon)` of the stored decision
    /// vectors. With `epsilon == 0` the bounds are exactly the data range.
    fn get_variable_bounds(&self) -> Option<Array2<f64>> {
        let epsilon = self.config.epsilon;
        let lower = self
            .decision_vectors
            .fold_axis(Axis(0), f64::INFINITY, |&acc, &v| nan_min(acc, v));
        let upper = self
            .decision_vectors
            .fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| nan_max(acc, v));
        Some(Array2::from_shape_fn((self.n_of_variables(), 2), |(row, col)| {
            if col == 0 {
                lower[row] - epsilon
            } else {
                upper[row] + epsilon
            }
        }))
    }

    fn get_variable_names(&self) -> Vec<String> {
        (0..self.n_of_variables()).map(|i| format!("x_{}", i)).collect()
    }

    fn get_objective_names(&self) -> Vec<String> {
        (0..self.n_of_objectives()).map(|i| format!("f_{}", i)).collect()
    }

    fn evaluate_batch(&self, decision_vectors: ArrayView2<'_, f64>) -> ProblemResult<EvaluationResults> {
        if self.config.strategy == EvaluationStrategy::Model {
            tracing::error!("Models not implemented yet for data based problems");
            return Err(ProblemError::NotImplemented(
                "model based evaluation of data based problems",
            ));
        }
        check_width(&decision_vectors, self.n_of_variables())?;
        check_finite(&decision_vectors)?;

        tracing::warn!(
            "Approximating {} decision vector(s) by the closest known point in a data based problem",
            decision_vectors.nrows()
        );
        let indices: Vec<usize> = decision_vectors
            .outer_iter()
            .map(|query| self.nearest_index(query))
            .collect();
        let objectives = self.objective_vectors.select(Axis(0), &indices);
        let constraints = evaluate_constraints(&self.constraints, decision_vectors, objectives.view());

        Ok(EvaluationResults {
            objectives,
            constraints,
        })
    }

    fn evaluate_constraint_values(&self) -> ProblemResult<Option<Array2<f64>>> {
        Ok(evaluate_constraints(
            &self.constraints,
            self.decision_vectors.view(),
            self.objective_vectors.view(),
        ))
    }
}
