//! Multiobjective optimization problems
//!
//! Defines problems as a mapping from decision vectors to objective vectors
//! (and optionally constraint values), and evaluates batches of decision
//! vectors against them. Optimization algorithms live elsewhere and talk to
//! a problem only through the [`Problem`] trait.
//!
//! ```
//! use moproblem::{Problem, ScalarMOProblem, ScalarObjective, Variable};
//! use ndarray::array;
//!
//! let problem = ScalarMOProblem::new(
//!     vec![ScalarObjective::new("sum", |x| x[0] + x[1])],
//!     vec![
//!         Variable::bounded("x0", 0.0, 1.0).unwrap(),
//!         Variable::bounded("x1", 0.0, 1.0).unwrap(),
//!     ],
//!     vec![],
//!     None,
//!     None,
//! )
//! .unwrap();
//!
//! let results = problem.evaluate(&array![[0.2, 0.3], [1.0, 1.0]]).unwrap();
//! assert_eq!(results.objectives, array![[0.5], [2.0]]);
//! assert!(results.constraints.is_none());
//! ```

pub mod common;
pub mod constraint;
pub mod error;
pub mod objective;
pub mod problem;
pub mod variable;

/// Re-export common types
pub use common::{DecisionBatch, EvaluationResults};
pub use constraint::ScalarConstraint;
pub use error::{ErrorKind, ProblemError, ProblemResult};
pub use objective::{number_of_objectives, Objective, ScalarObjective, VectorObjective};
pub use problem::{
    DataProblemConfig, EvaluationStrategy, MOProblem, Problem, ScalarDataProblem, ScalarMOProblem,
};
pub use variable::Variable;

/// Initialize the problem library
pub fn init() {
    tracing::info!("Multiobjective problem library initialized");
}
