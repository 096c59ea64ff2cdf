//! Parameters controlling the seed decomposition.
//!
//! Every numerical tolerance the algorithm relies on lives here so that runs
//! are reproducible from the options alone. Defaults work for scenes measured
//! in metres; scale the tolerances with the scene if coordinates are much
//! larger or smaller.

use serde::Deserialize;

use crate::error::DecompError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecompOptions {
    /// Initial guess for the number of generated hyperplanes. The capacity
    /// driver doubles it and reruns until the result fits, so a low value only
    /// costs reruns while a high value costs up-front allocation.
    pub max_poly: usize,
    /// Maximum number of decomposition attempts the capacity driver makes.
    pub max_retries: usize,
    /// Relative pull-back of each tangency point from its obstacle towards the
    /// ellipsoid center. Must lie in `(0, 1)`.
    pub boundary_margin: f64,
    /// Obstacles closer than this to the seed make the seed degenerate. Also the
    /// smallest ellipsoid semi-axis tolerated during shrinking.
    pub degenerate_tolerance: f64,
    /// Run the redundancy pass on the result.
    pub remove_redundant: bool,
    /// Slack used by the redundancy pass when testing vertex feasibility.
    pub redundancy_tolerance: f64,
}

impl Default for DecompOptions {
    fn default() -> Self {
        Self {
            max_poly: 1,
            max_retries: 32,
            boundary_margin: 1e-6,
            degenerate_tolerance: 1e-9,
            remove_redundant: false,
            redundancy_tolerance: 1e-9,
        }
    }
}

impl DecompOptions {
    /// Parses options from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, DecompError> {
        let options: DecompOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_max_poly(mut self, max_poly: usize) -> Self {
        self.max_poly = max_poly;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_remove_redundant(mut self, remove_redundant: bool) -> Self {
        self.remove_redundant = remove_redundant;
        self
    }

    pub fn validate(&self) -> Result<(), DecompError> {
        if self.max_retries == 0 {
            return Err(DecompError::InvalidOptions("max_retries must be at least 1".into()));
        }
        if !(self.boundary_margin > 0.0 && self.boundary_margin < 1.0) {
            return Err(DecompError::InvalidOptions(format!(
                "boundary_margin must lie in (0, 1), got {}",
                self.boundary_margin
            )));
        }
        if !(self.degenerate_tolerance.is_finite() && self.degenerate_tolerance >= 0.0) {
            return Err(DecompError::InvalidOptions(format!(
                "degenerate_tolerance must be finite and non-negative, got {}",
                self.degenerate_tolerance
            )));
        }
        if !(self.redundancy_tolerance.is_finite() && self.redundancy_tolerance >= 0.0) {
            return Err(DecompError::InvalidOptions(format!(
                "redundancy_tolerance must be finite and non-negative, got {}",
                self.redundancy_tolerance
            )));
        }
        Ok(())
    }

    /// `max_poly` with zero promoted to one.
    pub(crate) fn initial_capacity(&self) -> usize {
        self.max_poly.max(1)
    }
}
