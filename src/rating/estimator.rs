//! Pairwise estimators of the Glicko-2 model
//!
//! All inputs are on the internal scale.

use std::f64::consts::PI;

/// Weighting factor `g(phi)`: discounts an opponent's influence by their
/// uncertainty.
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score `E(mu, mu_j, phi_j)` of a competitor at `mu` against an
/// opponent at `mu_j` with deviation `phi_j`.
pub fn expected_score(mu: f64, opponent_mu: f64, opponent_phi: f64) -> f64 {
    1.0 / (1.0 + (-g(opponent_phi) * (mu - opponent_mu)).exp())
}
