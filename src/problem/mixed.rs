use super::{check_bounds, check_width, evaluate_rows, validate_reference_points, variable_bounds, Problem};
use crate::common::EvaluationResults;
use crate::constraint::{evaluate_constraints, ScalarConstraint};
use crate::error::{ProblemError, ProblemResult};
use crate::objective::{number_of_objectives, Objective};
use crate::variable::Variable;
use ndarray::{s, Array1, Array2, ArrayView2};

/// A multiobjective problem mixing scalar and vector valued objectives.
///
/// Objectives are laid out left to right in definition order. A scalar
/// objective takes one column, a vector objective of arity `k` takes the
/// next `k` columns in the order it produces its values. So objectives of
/// arities `[1, 3, 1]` fill the columns
/// `[f0, f1_0, f1_1, f1_2, f2]`.
#[derive(Debug)]
pub struct MOProblem {
    objectives: Vec<Objective>,
    variables: Vec<Variable>,
    constraints: Vec<ScalarConstraint>,
    n_of_objectives: usize,
    nadir: Option<Array1<f64>>,
    ideal: Option<Array1<f64>>,
}

impl MOProblem {
    pub fn new(
        objectives: Vec<Objective>,
        variables: Vec<Variable>,
        constraints: Vec<ScalarConstraint>,
        nadir: Option<Array1<f64>>,
        ideal: Option<Array1<f64>>,
    ) -> ProblemResult<Self> {
        let n_of_objectives = number_of_objectives(&objectives);
        validate_reference_points(n_of_objectives, nadir.as_ref(), ideal.as_ref())?;
        tracing::debug!(
            "Defined MOProblem: {} variables, {} objective functions ({} columns), {} constraints",
            variables.len(),
            objectives.len(),
            n_of_objectives,
            constraints.len()
        );
        Ok(Self {
            objectives,
            variables,
            constraints,
            n_of_objectives,
            nadir,
            ideal,
        })
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[ScalarConstraint] {
        &self.constraints
    }
}

impl Problem for MOProblem {
    fn n_of_variables(&self) -> usize {
        self.variables.len()
    }

    fn n_of_objectives(&self) -> usize {
        self.n_of_objectives
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
        variable_bounds(&self.variables, "MOProblem")
    }

    fn get_variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name().to_string()).collect()
    }

    fn get_objective_names(&self) -> Vec<String> {
        self.objectives
            .iter()
            .flat_map(Objective::names)
            .map(str::to_string)
            .collect()
    }

    fn evaluate_batch(&self, decision_vectors: ArrayView2<'_, f64>) -> ProblemResult<EvaluationResults> {
        check_width(&decision_vectors, self.n_of_variables())?;
        check_bounds(&decision_vectors, &self.variables)?;

        let objectives = evaluate_rows(decision_vectors.view(), self.n_of_objectives, |x, mut out| {
            let mut column = 0;
            for objective in &self.objectives {
                let arity = objective.arity();
                objective.write_row(x.view(), out.slice_mut(s![column..column + arity]))?;
                column += arity;
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
            "constraint values without decision vectors for MOProblem",
        ))
    }
}
