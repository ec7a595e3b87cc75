use crate::error::{ProblemError, ProblemResult};
use serde::{Deserialize, Serialize};

/// A bounded, real valued decision variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VariableDef")]
pub struct Variable {
    name: String,
    initial_value: f64,
    lower_bound: f64,
    upper_bound: f64,
}

impl Variable {
    /// Create a variable. Fails if `lower_bound > upper_bound` (or either is
    /// NaN), or if `initial_value` lies outside the bounds.
    pub fn new(
        name: impl Into<String>,
        initial_value: f64,
        lower_bound: f64,
        upper_bound: f64,
    ) -> ProblemResult<Self> {
        let name = name.into();
        if !(lower_bound <= upper_bound) {
            return Err(ProblemError::InvalidBounds {
                name,
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        if !(lower_bound..=upper_bound).contains(&initial_value) {
            return Err(ProblemError::InitialValueOutOfBounds {
                name,
                value: initial_value,
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        Ok(Self {
            name,
            initial_value,
            lower_bound,
            upper_bound,
        })
    }

    /// Create a variable whose initial value is the midpoint of its bounds.
    /// With one infinite bound the finite one is used, with both infinite
    /// the initial value is `0.0`.
    pub fn bounded(name: impl Into<String>, lower_bound: f64, upper_bound: f64) -> ProblemResult<Self> {
        let initial_value = match (lower_bound.is_finite(), upper_bound.is_finite()) {
            (true, true) => lower_bound + (upper_bound - lower_bound) / 2.0,
            (true, false) => lower_bound,
            (false, true) => upper_bound,
            (false, false) => 0.0,
        };
        Self::new(name, initial_value, lower_bound, upper_bound)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// `(lower, upper)`
    pub fn get_bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Closed interval membership.
    pub fn contains(&self, value: f64) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&value)
    }
}

/// Wire form of [`Variable`], validated through [`Variable::new`].
#[derive(Deserialize)]
struct VariableDef {
    name: String,
    initial_value: f64,
    lower_bound: f64,
    upper_bound: f64,
}

impl TryFrom<VariableDef> for Variable {
    type Error = ProblemError;

    fn try_from(def: VariableDef) -> ProblemResult<Self> {
        Variable::new(def.name, def.initial_value, def.lower_bound, def.upper_bound)
    }
}
