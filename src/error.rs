//! Error types for problem definition and evaluation

use ndarray::ShapeError;
use thiserror::Error;

/// Coarse classification of a [`ProblemError`], so callers can branch on the
/// outcome without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The problem itself is ill formed. Raised by constructors.
    Definition,
    /// The problem is fine but the input to one evaluation call is not.
    Evaluation,
    /// The operation is not available for this kind of problem.
    Unsupported,
}

/// Errors that can occur while defining or evaluating a problem
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("Nadir length mismatch: expected {expected} objectives, got {got}")]
    NadirLength { expected: usize, got: usize },

    #[error("Ideal length mismatch: expected {expected} objectives, got {got}")]
    IdealLength { expected: usize, got: usize },

    #[error("Nadir and ideal lengths differ: nadir {nadir}, ideal {ideal}")]
    ReferencePointMismatch { nadir: usize, ideal: usize },

    #[error("Malformed {matrix} matrix, expected a 2D array: {source}")]
    Shape {
        matrix: &'static str,
        #[source]
        source: ShapeError,
    },

    #[error("Data rows are not aligned: {decision_rows} decision rows, {objective_rows} objective rows")]
    MisalignedData {
        decision_rows: usize,
        objective_rows: usize,
    },

    #[error("A data based problem needs at least one stored solution")]
    EmptyData,

    #[error("Invalid bounds for variable '{name}': lower {lower} is greater than upper {upper}")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    #[error("Initial value {value} of variable '{name}' lies outside [{lower}, {upper}]")]
    InitialValueOutOfBounds {
        name: String,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("A vector objective needs at least two outputs, got {0}")]
    InvalidArity(usize),

    #[error("Input width mismatch: expected {expected} variables, got {got}")]
    InputWidth { expected: usize, got: usize },

    #[error("Value {value} of variable '{variable}' violates its lower bound {bound}")]
    LowerBound {
        variable: String,
        value: f64,
        bound: f64,
    },

    #[error("Value {value} of variable '{variable}' violates its upper bound {bound}")]
    UpperBound {
        variable: String,
        value: f64,
        bound: f64,
    },

    #[error("Non-finite value {value} at row {row}, column {column} of the input")]
    NonFiniteInput { row: usize, column: usize, value: f64 },

    #[error("Objective '{objective}' produced {got} values, expected {expected}")]
    ObjectiveOutput {
        objective: String,
        expected: usize,
        got: usize,
    },

    #[error("Not supported: {0}")]
    NotSupported(&'static str),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

impl ProblemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProblemError::NadirLength { .. }
            | ProblemError::IdealLength { .. }
            | ProblemError::ReferencePointMismatch { .. }
            | ProblemError::Shape { .. }
            | ProblemError::MisalignedData { .. }
            | ProblemError::EmptyData
            | ProblemError::InvalidBounds { .. }
            | ProblemError::InitialValueOutOfBounds { .. }
            | ProblemError::InvalidArity(_) => ErrorKind::Definition,
            ProblemError::InputWidth { .. }
            | ProblemError::LowerBound { .. }
            | ProblemError::UpperBound { .. }
            | ProblemError::NonFiniteInput { .. }
            | ProblemError::ObjectiveOutput { .. } => ErrorKind::Evaluation,
            ProblemError::NotSupported(_) | ProblemError::NotImplemented(_) => {
                ErrorKind::Unsupported
            }
        }
    }
}

pub type ProblemResult<T> = Result<T, ProblemError>;
