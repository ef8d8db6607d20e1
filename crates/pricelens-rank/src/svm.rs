//! Linear-kernel C-support vector classifier.
//!
//! Solves the standard C-SVC dual with sequential minimal optimization,
//! choosing the maximal violating pair at every step:
//!
//! ```text
//! min_a  1/2 a'Qa - e'a   s.t.  y'a = 0,  0 <= a_i <= C,  Q_ij = y_i y_j <x_i, x_j>
//! ```
//!
//! The primal weights are recovered as `w = sum_i a_i y_i x_i` and the
//! intercept from the KKT conditions. Working-set selection breaks ties on
//! the lowest index, so a fit is fully deterministic for a given input.

use crate::error::RankError;

/// Floor for the curvature of a two-variable subproblem.
const TAU: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvmParams {
    /// Soft-margin penalty.
    pub c: f64,
    /// Stopping tolerance on the maximal KKT violation.
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-3,
            max_iter: 100_000,
        }
    }
}

/// A fitted separating hyperplane `w·x + b = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSvm {
    weights: Vec<f64>,
    bias: f64,
    iterations: usize,
}

impl LinearSvm {
    /// Fits the classifier on `rows` with `positive[i]` marking class +1.
    ///
    /// # Errors
    ///
    /// - [`RankError::InvalidParams`] for a non-positive `c` or `tolerance`,
    ///   or rows of differing dimension.
    /// - [`RankError::LengthMismatch`] when `rows` and `positive` differ in length.
    /// - [`RankError::SingleClass`] when only one class is present.
    /// - [`RankError::NonFiniteFeatures`] when any feature is NaN or infinite.
    /// - [`RankError::NotConverged`] when `max_iter` is exhausted.
    /// - [`RankError::DegenerateHyperplane`] when the weight norm does not
    ///   exceed `tolerance`.
    pub fn fit<R: AsRef<[f64]>>(
        rows: &[R],
        positive: &[bool],
        params: &SvmParams,
    ) -> Result<Self, RankError> {
        validate(rows, positive, params)?;

        let n = rows.len();
        let c = params.c;
        let y: Vec<f64> = positive
            .iter()
            .map(|&p| if p { 1.0 } else { -1.0 })
            .collect();

        let q: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| y[i] * y[j] * dot(rows[i].as_ref(), rows[j].as_ref()))
                    .collect()
            })
            .collect();

        let mut alpha = vec![0.0_f64; n];
        let mut grad = vec![-1.0_f64; n];

        let mut iterations = 0usize;
        loop {
            let Some((i, j)) = select_working_set(&y, &alpha, &grad, c, params.tolerance) else {
                break;
            };
            if iterations >= params.max_iter {
                return Err(RankError::NotConverged {
                    max_iter: params.max_iter,
                });
            }
            iterations += 1;

            let (old_i, old_j) = (alpha[i], alpha[j]);
            update_pair(&q, &y, &grad, &mut alpha, c, i, j);

            let (delta_i, delta_j) = (alpha[i] - old_i, alpha[j] - old_j);
            for (t, g) in grad.iter_mut().enumerate() {
                *g += q[t][i] * delta_i + q[t][j] * delta_j;
            }
        }

        let rho = intercept(&y, &alpha, &grad, c);

        let dim = rows[0].as_ref().len();
        let mut weights = vec![0.0_f64; dim];
        for (t, row) in rows.iter().enumerate() {
            let coef = alpha[t] * y[t];
            if coef != 0.0 {
                for (w, x) in weights.iter_mut().zip(row.as_ref()) {
                    *w += coef * x;
                }
            }
        }

        // Below the stopping tolerance the direction of w is solver noise.
        let norm = dot(&weights, &weights).sqrt();
        if !norm.is_finite() || norm <= params.tolerance.max(TAU) {
            return Err(RankError::DegenerateHyperplane);
        }

        Ok(Self {
            weights,
            bias: -rho,
            iterations,
        })
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Decision value `w·x + b`; positive on the +1 side.
    #[must_use]
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        dot(&self.weights, x) + self.bias
    }

    /// Geometric distance of `x` to the hyperplane, signed like
    /// [`LinearSvm::decision_function`].
    #[must_use]
    pub fn signed_distance(&self, x: &[f64]) -> f64 {
        self.decision_function(x) / dot(&self.weights, &self.weights).sqrt()
    }
}

fn validate<R: AsRef<[f64]>>(
    rows: &[R],
    positive: &[bool],
    params: &SvmParams,
) -> Result<(), RankError> {
    if !(params.c.is_finite() && params.c > 0.0) {
        return Err(RankError::InvalidParams(format!(
            "c must be positive and finite, got {}",
            params.c
        )));
    }
    if !(params.tolerance.is_finite() && params.tolerance > 0.0) {
        return Err(RankError::InvalidParams(format!(
            "tolerance must be positive and finite, got {}",
            params.tolerance
        )));
    }
    if rows.len() != positive.len() {
        return Err(RankError::LengthMismatch {
            rows: rows.len(),
            labels: positive.len(),
        });
    }
    if !positive.iter().any(|&p| p) || positive.iter().all(|&p| p) {
        return Err(RankError::SingleClass);
    }

    let dim = rows[0].as_ref().len();
    if rows.iter().any(|r| r.as_ref().len() != dim) {
        return Err(RankError::InvalidParams(
            "feature rows differ in dimension".to_string(),
        ));
    }
    if rows
        .iter()
        .any(|r| r.as_ref().iter().any(|v| !v.is_finite()))
    {
        return Err(RankError::NonFiniteFeatures);
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn in_upper_set(y: f64, alpha: f64, c: f64) -> bool {
    (y > 0.0 && alpha < c) || (y < 0.0 && alpha > 0.0)
}

fn in_lower_set(y: f64, alpha: f64, c: f64) -> bool {
    (y > 0.0 && alpha > 0.0) || (y < 0.0 && alpha < c)
}

/// Returns the maximal violating pair, or `None` once the KKT gap is below
/// `tolerance`.
fn select_working_set(
    y: &[f64],
    alpha: &[f64],
    grad: &[f64],
    c: f64,
    tolerance: f64,
) -> Option<(usize, usize)> {
    let mut up: Option<(usize, f64)> = None;
    let mut low: Option<(usize, f64)> = None;

    for t in 0..y.len() {
        let v = -y[t] * grad[t];
        if in_upper_set(y[t], alpha[t], c) && up.is_none_or(|(_, best)| v > best) {
            up = Some((t, v));
        }
        if in_lower_set(y[t], alpha[t], c) && low.is_none_or(|(_, best)| v < best) {
            low = Some((t, v));
        }
    }

    match (up, low) {
        (Some((i, m)), Some((j, big_m))) if m - big_m >= tolerance => Some((i, j)),
        _ => None,
    }
}

/// Analytic solution of the two-variable subproblem, clipped to the box.
fn update_pair(
    q: &[Vec<f64>],
    y: &[f64],
    grad: &[f64],
    alpha: &mut [f64],
    c: f64,
    i: usize,
    j: usize,
) {
    if (y[i] - y[j]).abs() > f64::EPSILON {
        let quad = (q[i][i] + q[j][j] + 2.0 * q[i][j]).max(TAU);
        let delta = (-grad[i] - grad[j]) / quad;
        let diff = alpha[i] - alpha[j];
        alpha[i] += delta;
        alpha[j] += delta;

        if diff > 0.0 {
            if alpha[j] < 0.0 {
                alpha[j] = 0.0;
                alpha[i] = diff;
            }
        } else if alpha[i] < 0.0 {
            alpha[i] = 0.0;
            alpha[j] = -diff;
        }
        if diff > 0.0 {
            if alpha[i] > c {
                alpha[i] = c;
                alpha[j] = c - diff;
            }
        } else if alpha[j] > c {
            alpha[j] = c;
            alpha[i] = c + diff;
        }
    } else {
        let quad = (q[i][i] + q[j][j] - 2.0 * q[i][j]).max(TAU);
        let delta = (grad[i] - grad[j]) / quad;
        let sum = alpha[i] + alpha[j];
        alpha[i] -= delta;
        alpha[j] += delta;

        if sum > c {
            if alpha[i] > c {
                alpha[i] = c;
                alpha[j] = sum - c;
            }
        } else if alpha[j] < 0.0 {
            alpha[j] = 0.0;
            alpha[i] = sum;
        }
        if sum > c {
            if alpha[j] > c {
                alpha[j] = c;
                alpha[i] = sum - c;
            }
        } else if alpha[i] < 0.0 {
            alpha[i] = 0.0;
            alpha[j] = sum;
        }
    }
}

/// The offset `rho` of the decision function `sum a_i y_i K(x_i, x) - rho`.
///
/// Averages `y_i * grad_i` over free support vectors; with none free, takes
/// the midpoint of the feasible interval.
fn intercept(y: &[f64], alpha: &[f64], grad: &[f64], c: f64) -> f64 {
    let mut upper = f64::INFINITY;
    let mut lower = f64::NEG_INFINITY;
    let mut free_count = 0usize;
    let mut free_sum = 0.0;

    for t in 0..y.len() {
        let yg = y[t] * grad[t];
        if alpha[t] >= c {
            if y[t] < 0.0 {
                upper = upper.min(yg);
            } else {
                lower = lower.max(yg);
            }
        } else if alpha[t] <= 0.0 {
            if y[t] > 0.0 {
                upper = upper.min(yg);
            } else {
                lower = lower.max(yg);
            }
        } else {
            free_count += 1;
            free_sum += yg;
        }
    }

    if free_count > 0 {
        #[allow(clippy::cast_precision_loss)]
        let denom = free_count as f64;
        free_sum / denom
    } else {
        (upper + lower) / 2.0
    }
}
