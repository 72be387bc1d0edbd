//! New-volatility solver (Glickman, step 5)
//!
//! Finds the root of
//!
//! ```text
//! f(x) = e^x (delta² - phi² - v - e^x) / (2 (delta² + phi² + v)²) - (x - a) / tau²
//! ```
//!
//! with the Illinois variant of regula falsi. The new volatility is
//! `exp(A / 2)` once the bracket `[A, B]` has shrunk below the tolerance.

use crate::error::{RatingError, Result};
use crate::rating::scale::ScaledRating;
use tracing::{error, trace};

/// Iteration cap for both the bracketing search and the Illinois loop
pub const ITERATION_LIMIT: usize = 100_000;

/// Bracket width at which the Illinois loop stops
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Solver for the volatility equation of one rating period
#[derive(Debug, Clone)]
pub struct VolatilitySolver {
    tau: f64,
    /// ln(sigma²)
    a: f64,
    /// Estimated variance of the period's evidence
    v: f64,
    sq_delta: f64,
    sq_phi: f64,
}

/// Whether the volatility equation stays finite for these period estimates
pub(crate) fn solvable(phi: f64, accuracy: f64, improvement: f64) -> bool {
    let sum = improvement * improvement + phi * phi + 1.0 / accuracy;
    (sum * sum).is_finite()
}

impl VolatilitySolver {
    /// Build the solver from the fixed rating and the period's accumulated
    /// accuracy (v⁻¹) and improvement (delta).
    pub fn new(fixed: &ScaledRating, accuracy: f64, improvement: f64, tau: f64) -> Result<Self> {
        if !(accuracy > 0.0 && accuracy.is_finite()) {
            return Err(RatingError::invalid_parameter(format!(
                "accuracy must be positive to solve for volatility, got {}",
                accuracy
            )));
        }
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(RatingError::invalid_parameter(format!(
                "tau must be a positive number, got {}",
                tau
            )));
        }

        if !solvable(fixed.phi, accuracy, improvement) {
            return Err(RatingError::invalid_parameter(format!(
                "volatility equation overflows for accuracy {} and improvement {}",
                accuracy, improvement
            )));
        }

        Ok(Self {
            tau,
            a: (fixed.sigma * fixed.sigma).ln(),
            v: 1.0 / accuracy,
            sq_delta: improvement * improvement,
            sq_phi: fixed.phi * fixed.phi,
        })
    }

    /// Solve for the new volatility sigma'
    pub fn solve(&self) -> Result<f64> {
        let mut a = self.a;
        let mut b = self.upper_bound()?;
        let mut fa = self.f(a);
        let mut fb = self.f(b);

        for iteration in 0..ITERATION_LIMIT {
            if (b - a).abs() <= CONVERGENCE_TOLERANCE {
                trace!(iteration, sigma = (a / 2.0).exp(), "Volatility solver converged");
                return Ok((a / 2.0).exp());
            }

            let c = a + (a - b) * fa / (fb - fa);
            let fc = self.f(c);
            if fc * fb <= 0.0 {
                a = b;
                fa = fb;
            } else {
                fa /= 2.0;
            }
            b = c;
            fb = fc;
        }

        if (b - a).abs() <= CONVERGENCE_TOLERANCE {
            return Ok((a / 2.0).exp());
        }

        error!(
            tau = self.tau,
            v = self.v,
            "Volatility solver exceeded the iteration limit"
        );
        Err(RatingError::SolverNonConvergence {
            stage: "illinois iteration",
            iterations: ITERATION_LIMIT,
        })
    }

    /// Second end of the initial bracket (step 5.2)
    fn upper_bound(&self) -> Result<f64> {
        let excess = self.sq_delta - self.sq_phi - self.v;
        if excess > 0.0 {
            return Ok(excess.ln());
        }

        for k in 1..=ITERATION_LIMIT {
            let candidate = self.a - k as f64 * self.tau;
            if self.f(candidate) >= 0.0 {
                trace!(k, "Volatility bracket found");
                return Ok(candidate);
            }
        }

        error!(
            tau = self.tau,
            v = self.v,
            "Volatility bracket search exceeded the iteration limit"
        );
        Err(RatingError::SolverNonConvergence {
            stage: "bracketing",
            iterations: ITERATION_LIMIT,
        })
    }

    fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        let sum = self.sq_delta + self.sq_phi + self.v;
        let diff = self.sq_delta - self.sq_phi - self.v;
        ex * (diff - ex) / (2.0 * sum * sum) - (x - self.a) / (self.tau * self.tau)
    }
}
