use super::{check_bounds, check_width, evaluate_rows, validate_reference_points, variable_bounds, Problem};
use crate::common::EvaluationResults;
use crate::constraint::{evaluate_constraints, ScalarConstraint};
use crate::error::{ProblemError, ProblemResult};
use crate::objective::ScalarObjective;
use crate::variable::Variable;
use ndarray::{Array1, Array2, ArrayView2};

/// A multiobjective problem whose objectives each return a single value.
///
/// Objective column `j` of an evaluation is objective `j` in the order the
/// objectives were given.
#[derive(Debug)]
pub struct ScalarMOProblem {
    objectives: Vec<ScalarObjective>,
    variables: Vec<Variable>,
    constraints: Vec<ScalarConstraint>,
    nadir: Option<Array1<f64>>,
    ideal: Option<Array1<f64>>,
}

impl ScalarMOProblem {
    /// Fails if `nadir` or `ideal` is given with a length other than the
    /// number of objectives.
    pub fn new(
        objectives: Vec<ScalarObjective>,
        variables: Vec<Variable>,
        constraints: Vec<ScalarConstraint>,
        nadir: Option<Array1<f64>>,
        ideal: Option<Array1<f64>>,
    ) -> ProblemResult<Self> {
        validate_reference_points(objectives.len(), nadir.as_ref(), ideal.as_ref())?;
        tracing::debug!(
            "Defined ScalarMOProblem: {} variables, {} objectives, {} constraints",
            variables.len(),
            objectives.len(),
            constraints.len()
        );
        Ok(Self {
            objectives,
            variables,
            constraints,
            nadir,
            ideal,
        })
    }

    pub fn objectives(&self) -> &[ScalarObjective] {
        &self.objectives
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[ScalarConstraint] {
        &self.constraints
    }
}

impl Problem for ScalarMOProblem {
    fn n_of_variables(&self) -> usize {
        self.variables.len()
    }

    fn n_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    fn n_of_constraints(&self) -> usize {
        self.constraints.len()
    }

    fn nadir(&self) -> Option<&Array1<f64>> {
        self.nadir.as_ref()
    }

    fn ideal(&self) -> Option<&Array1<f64>> {
        self.ideal.as_ref()
    }

    fn get_variable_bounds(&self) -> Option<Array2<f64>> {
        variable_bounds(&self.variables, "ScalarMOProblem")
    }

    fn get_variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name().to_string()).collect()
    }

    fn get_objective_names(&self) -> Vec<String> {
        self.objectives.iter().map(|o| o.name().to_string()).collect()
    }

    fn evaluate_batch(&self, decision_vectors: ArrayView2<'_, f64>) -> ProblemResult<EvaluationResults> {
        check_width(&decision_vectors, self.n_of_variables())?;
        check_bounds(&decision_vectors, &self.variables)?;

        let objectives = evaluate_rows(decision_vectors.view(), self.n_of_objectives(), |x, mut out| {
            for (col, objective) in self.objectives.iter().enumerate() {
                out[col] = objective.evaluate(x.view());
            }
            Ok(())
        })?;
        let constraints = evaluate_constraints(&self.constraints, decision_vectors, objectives.view());

        Ok(EvaluationResults {
            objectives,
            constraints,
        })
    }

    fn evaluate_constraint_values(&self) -> ProblemResult<Option<Array2<f64>>> {
        Err(ProblemError::NotSupported(
            "constraint values without decision vectors for ScalarMOProblem",
        ))
    }
}
