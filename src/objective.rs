//! Objective descriptors
//!
//! An objective maps one decision vector either to a single value
//! ([`ScalarObjective`]) or to a fixed number of values
//! ([`VectorObjective`]). Problems that accept both hold them as the tagged
//! [`Objective`] enum and pack their outputs into contiguous columns.

use crate::error::{ProblemError, ProblemResult};
use ndarray::{Array1, ArrayView1, ArrayViewMut1};
use std::fmt;

type ScalarFn = dyn Fn(ArrayView1<'_, f64>) -> f64 + Send + Sync;
type VectorFn = dyn Fn(ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync;

/// An objective producing one value per decision vector.
pub struct ScalarObjective {
    name: String,
    evaluator: Box<ScalarFn>,
}

impl ScalarObjective {
    pub fn new<F>(name: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(ArrayView1<'_, f64>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            evaluator: Box::new(evaluator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, decision_vector: ArrayView1<'_, f64>) -> f64 {
        (self.evaluator)(decision_vector)
    }
}

// Closures don't implement Debug
impl fmt::Debug for ScalarObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarObjective")
            .field("name", &self.name)
            .finish()
    }
}

/// An objective producing several values per decision vector, one per name.
pub struct VectorObjective {
    names: Vec<String>,
    evaluator: Box<VectorFn>,
}

impl VectorObjective {
    /// The arity of the objective is the number of names given, which must be
    /// at least two.
    pub fn new<I, S, F>(names: I, evaluator: F) -> ProblemResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(ArrayView1<'_, f64>) -> Array1<f64> + Send + Sync + 'static,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() < 2 {
            tracing::error!("Vector objective defined with {} output(s)", names.len());
            return Err(ProblemError::InvalidArity(names.len()));
        }
        Ok(Self {
            names,
            evaluator: Box::new(evaluator),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_of_objectives(&self) -> usize {
        self.names.len()
    }

    /// Raw output of the wrapped function. Its length is not checked here.
    pub fn evaluate(&self, decision_vector: ArrayView1<'_, f64>) -> Array1<f64> {
        (self.evaluator)(decision_vector)
    }
}

impl fmt::Debug for VectorObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorObjective")
            .field("names", &self.names)
            .finish()
    }
}

/// Either kind of objective.
#[derive(Debug)]
pub enum Objective {
    Scalar(ScalarObjective),
    Vector(VectorObjective),
}

impl Objective {
    /// Number of output columns this objective occupies.
    pub fn arity(&self) -> usize {
        match self {
            Objective::Scalar(_) => 1,
            Objective::Vector(objective) => objective.n_of_objectives(),
        }
    }

    /// Column names in output order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Objective::Scalar(objective) => vec![objective.name()],
            Objective::Vector(objective) => objective.names().iter().map(String::as_str).collect(),
        }
    }

    /// Evaluate `decision_vector` and write the result into `out`, which must
    /// be exactly `arity()` wide.
    pub(crate) fn write_row(
        &self,
        decision_vector: ArrayView1<'_, f64>,
        mut out: ArrayViewMut1<'_, f64>,
    ) -> ProblemResult<()> {
        match self {
            Objective::Scalar(objective) => {
                out[0] = objective.evaluate(decision_vector);
            }
            Objective::Vector(objective) => {
                let values = objective.evaluate(decision_vector);
                if values.len() != objective.n_of_objectives() {
                    tracing::error!(
                        "Objective {:?} returned {} values instead of {}",
                        objective.names(),
                        values.len(),
                        objective.n_of_objectives()
                    );
                    return Err(ProblemError::ObjectiveOutput {
                        objective: objective.names().join(", "),
                        expected: objective.n_of_objectives(),
                        got: values.len(),
                    });
                }
                out.assign(&values);
            }
        }
        Ok(())
    }
}

impl From<ScalarObjective> for Objective {
    fn from(objective: ScalarObjective) -> Self {
        Objective::Scalar(objective)
    }
}

impl From<VectorObjective> for Objective {
    fn from(objective: VectorObjective) -> Self {
        Objective::Vector(objective)
    }
}

/// Total number of objective columns produced by `objectives`.
pub fn number_of_objectives(objectives: &[Objective]) -> usize {
    objectives.iter().map(Objective::arity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn split() -> VectorObjective {
        VectorObjective::new(["lo", "hi"], |x| array![x[0], x[1]]).unwrap()
    }

    #[test]
    fn test_arity() {
        let scalar: Objective = ScalarObjective::new("f", |x| x.sum()).into();
        let vector: Objective = split().into();
        assert_eq!(scalar.arity(), 1);
        assert_eq!(vector.arity(), 2);
        assert_eq!(number_of_objectives(&[scalar, vector]), 3);
    }

    #[test]
    fn test_names_flatten_in_order() {
        let vector: Objective = split().into();
        assert_eq!(vector.names(), vec!["lo", "hi"]);
    }

    #[test]
    fn test_single_output_vector_rejected() {
        let err = VectorObjective::new(["only"], |x| x.to_owned()).unwrap_err();
        assert!(matches!(err, ProblemError::InvalidArity(1)));
    }

    #[test]
    fn test_write_row_vector() {
        let objective: Objective = split().into();
        let mut out = Array1::zeros(2);
        objective
            .write_row(array![3.0, 4.0].view(), out.view_mut())
            .unwrap();
        assert_eq!(out, array![3.0, 4.0]);
    }

    #[test]
    fn test_write_row_wrong_length() {
        let objective: Objective = VectorObjective::new(["a", "b", "c"], |x| x.to_owned())
            .unwrap()
            .into();
        let mut out = Array1::zeros(3);
        let err = objective
            .write_row(array![1.0, 2.0].view(), out.view_mut())
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemError::ObjectiveOutput { expected: 3, got: 2, .. }
        ));
    }
}
