//! Problem definitions
//!
//! Every problem implements [`Problem`]: it knows how many variables,
//! objectives and constraints it has, optionally carries nadir and ideal
//! points, and evaluates batches of decision vectors.
//!
//! - [`ScalarMOProblem`]: live scalar objective functions.
//! - [`MOProblem`]: live scalar and vector objective functions, packed
//!   column-wise.
//! - [`ScalarDataProblem`]: a precomputed table of solutions.

pub mod data;
pub mod mixed;
pub mod scalar;

pub use data::{DataProblemConfig, EvaluationStrategy, ScalarDataProblem};
pub use mixed::MOProblem;
pub use scalar::ScalarMOProblem;

use crate::common::{DecisionBatch, EvaluationResults};
use crate::error::{ProblemError, ProblemResult};
use crate::variable::Variable;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A multiobjective optimization problem.
pub trait Problem: Send + Sync {
    fn n_of_variables(&self) -> usize;

    /// Number of objective columns, i.e. the summed arity of all objectives.
    fn n_of_objectives(&self) -> usize;

    fn n_of_constraints(&self) -> usize;

    fn nadir(&self) -> Option<&Array1<f64>>;

    fn ideal(&self) -> Option<&Array1<f64>>;

    /// Lower and upper bound of every variable as an `(n_of_variables, 2)`
    /// table, or `None` when the problem defines no variables.
    fn get_variable_bounds(&self) -> Option<Array2<f64>>;

    fn get_variable_names(&self) -> Vec<String>;

    /// Objective names in column order.
    fn get_objective_names(&self) -> Vec<String>;

    fn get_variable_lower_bounds(&self) -> Array1<f64> {
        self.get_variable_bounds()
            .map(|bounds| bounds.column(0).to_owned())
            .unwrap_or_else(|| Array1::zeros(0))
    }

    fn get_variable_upper_bounds(&self) -> Array1<f64> {
        self.get_variable_bounds()
            .map(|bounds| bounds.column(1).to_owned())
            .unwrap_or_else(|| Array1::zeros(0))
    }

    /// Evaluate a batch, one decision vector per row.
    fn evaluate_batch(&self, decision_vectors: ArrayView2<'_, f64>) -> ProblemResult<EvaluationResults>;

    /// Evaluate a batch or a single decision vector.
    fn evaluate<B>(&self, decision_vectors: &B) -> ProblemResult<EvaluationResults>
    where
        B: DecisionBatch + ?Sized,
        Self: Sized,
    {
        self.evaluate_batch(decision_vectors.as_batch())
    }

    /// Constraint values of the solutions held by the problem itself.
    fn evaluate_constraint_values(&self) -> ProblemResult<Option<Array2<f64>>>;
}

/// Check nadir and ideal against the objective count and each other.
pub(crate) fn validate_reference_points(
    n_of_objectives: usize,
    nadir: Option<&Array1<f64>>,
    ideal: Option<&Array1<f64>>,
) -> ProblemResult<()> {
    if let Some(nadir) = nadir {
        if nadir.len() != n_of_objectives {
            tracing::error!(
                "The length of the nadir vector does not match the number of objectives: \
                 length nadir {}, number of objectives {}",
                nadir.len(),
                n_of_objectives
            );
            return Err(ProblemError::NadirLength {
                expected: n_of_objectives,
                got: nadir.len(),
            });
        }
    }
    if let Some(ideal) = ideal {
        if ideal.len() != n_of_objectives {
            tracing::error!(
                "The length of the ideal vector does not match the number of objectives: \
                 length ideal {}, number of objectives {}",
                ideal.len(),
                n_of_objectives
            );
            return Err(ProblemError::IdealLength {
                expected: n_of_objectives,
                got: ideal.len(),
            });
        }
    }
    // Implied by the two checks above.
    if let (Some(nadir), Some(ideal)) = (nadir, ideal) {
        if nadir.len() != ideal.len() {
            tracing::error!(
                "The lengths of the nadir and ideal points don't match: nadir {}, ideal {}",
                nadir.len(),
                ideal.len()
            );
            return Err(ProblemError::ReferencePointMismatch {
                nadir: nadir.len(),
                ideal: ideal.len(),
            });
        }
    }
    Ok(())
}

pub(crate) fn check_width(decision_vectors: &ArrayView2<'_, f64>, n_of_variables: usize) -> ProblemResult<()> {
    if decision_vectors.ncols() != n_of_variables {
        tracing::error!(
            "The length of the input vectors does not match the number of variables: \
             input vector length {}, number of variables {}",
            decision_vectors.ncols(),
            n_of_variables
        );
        return Err(ProblemError::InputWidth {
            expected: n_of_variables,
            got: decision_vectors.ncols(),
        });
    }
    Ok(())
}

/// Every entry must lie in the closed interval of its column's variable.
/// Assumes the width has already been checked.
pub(crate) fn check_bounds(decision_vectors: &ArrayView2<'_, f64>, variables: &[Variable]) -> ProblemResult<()> {
    for row in decision_vectors.outer_iter() {
        for (&value, variable) in row.iter().zip(variables) {
            let (lower, upper) = variable.get_bounds();
            if value < lower {
                tracing::error!(
                    "Value {} of variable '{}' violates its lower bound {}",
                    value,
                    variable.name(),
                    lower
                );
                return Err(ProblemError::LowerBound {
                    variable: variable.name().to_string(),
                    value,
                    bound: lower,
                });
            }
            if value > upper {
                tracing::error!(
                    "Value {} of variable '{}' violates its upper bound {}",
                    value,
                    variable.name(),
                    upper
                );
                return Err(ProblemError::UpperBound {
                    variable: variable.name().to_string(),
                    value,
                    bound: upper,
                });
            }
        }
    }
    Ok(())
}

/// Bounds table of a list of variables, `None` if the list is empty.
pub(crate) fn variable_bounds(variables: &[Variable], problem: &str) -> Option<Array2<f64>> {
    if variables.is_empty() {
        tracing::info!(
            "Attempted to get variable bounds for a {} with no defined variables",
            problem
        );
        return None;
    }
    Some(Array2::from_shape_fn((variables.len(), 2), |(row, col)| {
        let (lower, upper) = variables[row].get_bounds();
        if col == 0 {
            lower
        } else {
            upper
        }
    }))
}

/// Fill an `(n_rows, width)` matrix by calling `eval_row` once per input row.
///
/// With the `parallel` feature the rows are evaluated on the rayon pool; the
/// output row order is the input row order either way.
pub(crate) fn evaluate_rows<F>(
    decision_vectors: ArrayView2<'_, f64>,
    width: usize,
    eval_row: F,
) -> ProblemResult<Array2<f64>>
where
    F: Fn(ArrayView1<'_, f64>, ArrayViewMut1<'_, f64>) -> ProblemResult<()> + Sync,
{
    let mut out = Array2::zeros((decision_vectors.nrows(), width));

    #[cfg(not(feature = "parallel"))]
    for (row, out_row) in decision_vectors.outer_iter().zip(out.outer_iter_mut()) {
        eval_row(row, out_row)?;
    }

    #[cfg(feature = "parallel")]
    {
        let rows: Vec<Array1<f64>> = (0..decision_vectors.nrows())
            .into_par_iter()
            .map(|i| -> ProblemResult<Array1<f64>> {
                let mut values = Array1::zeros(width);
                eval_row(decision_vectors.row(i), values.view_mut())?;
                Ok(values)
            })
            .collect::<ProblemResult<Vec<_>>>()?;
        for (mut out_row, values) in out.outer_iter_mut().zip(rows) {
            out_row.assign(&values);
        }
    }

    Ok(out)
}
