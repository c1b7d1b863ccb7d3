//! Linear contextual bandit (LinUCB) with per-arm ridge regression state.
//!
//! Each round the caller supplies a fixed-length feature vector ("context"),
//! the agent scores every arm, and after acting the caller feeds the realized
//! payoff back into the chosen arm's model. Per arm `a` the agent maintains
//! the ridge-regression sufficient statistics
//!
//! ```text
//!   A_a = I + Σ x_t x_t^T    (ridge matrix)
//!   b_a = Σ r_t x_t          (payoff vector)
//!   θ_a = A_a^{-1} b_a       (coefficient estimate)
//!   UCB_a(x) = x^T θ_a + α √(x^T A_a^{-1} x)
//! ```
//!
//! ## Design
//!
//! - **Deterministic**: no randomness anywhere. Same construction + same
//!   call sequence → same selections and bit-identical internal state.
//!   Ties go to the lowest-indexed arm (first-occurrence argmax).
//! - **Exact inverses**: `A_a^{-1}` is recomputed by direct matrix inversion
//!   on every scoring pass, for every arm, regardless of which arms were
//!   updated since the last pass. No Sherman–Morrison shortcut: incremental
//!   rank-1 inverse updates drift from the direct inverse under accumulated
//!   rounding, and the direct inverse is the behavior tests pin down.
//! - **Fixed arm set**: the number of arms and the context dimension are set
//!   at construction and never change.
//! - **Fixed confidence**: the exploration coefficient is derived once from
//!   the confidence failure probability `δ = 0.05` as
//!   `α = 1 + sqrt(ln(2/δ)/2)` and is constant thereafter.
//!
//! Methods take `&mut self` (the inverse cache is refreshed in place); an
//! agent instance serves one decision loop at a time. Callers exposing it to
//! concurrent loops must wrap the whole agent in their own lock: scoring
//! reads every arm's ridge matrix and must not interleave with an in-flight
//! update on any arm.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

use crate::error::{BanditError, Result};

/// Confidence failure probability the exploration coefficient is derived from.
const DELTA: f64 = 0.05;

/// Per-arm score tuple: `(ucb, mean, bonus)`.
pub type LinUcbScore = (f64, f64, f64);

/// Sufficient statistics for one arm.
#[derive(Debug, Clone, PartialEq)]
struct ArmState {
    /// Regularized design matrix `A = I + Σ x x^T` (d×d, symmetric
    /// positive-definite, hence always invertible).
    ridge: DMatrix<f64>,
    /// Cached `A^{-1}`. Refreshed from `ridge` at the top of every scoring
    /// pass; stale between an update and the next pass.
    ridge_inv: DMatrix<f64>,
    /// Accumulated payoff-weighted context sum `b = Σ r x` (d).
    payoff: DVector<f64>,
}

impl ArmState {
    fn new(dim: usize) -> Self {
        Self {
            ridge: DMatrix::identity(dim, dim),
            ridge_inv: DMatrix::identity(dim, dim),
            payoff: DVector::zeros(dim),
        }
    }
}

/// Deterministic LinUCB agent over a fixed set of arms.
///
/// Usage:
/// - call [`select_arm`](Self::select_arm) with the round's context to get an
///   arm index
/// - call [`update_model`](Self::update_model) with the same context and the
///   observed payoff after acting
///
/// The two calls may come in any order and any ratio; the intended usage
/// alternates them once per round.
#[derive(Debug, Clone)]
pub struct BanditAgent {
    n_arms: usize,
    dim: usize,
    alpha: f64,
    arms: Vec<ArmState>,
}

impl BanditAgent {
    /// Create an agent with `n_arms` arms and `dim`-dimensional contexts.
    ///
    /// Every arm starts neutral: identity ridge matrix, zero payoff vector.
    /// Returns `InvalidArgument` if either count is zero.
    pub fn new(n_arms: usize, dim: usize) -> Result<Self> {
        if n_arms == 0 {
            return Err(BanditError::InvalidArgument("n_arms must be >= 1"));
        }
        if dim == 0 {
            return Err(BanditError::InvalidArgument("dim must be >= 1"));
        }
        let alpha = 1.0 + ((2.0 / DELTA).ln() / 2.0).sqrt();
        Ok(Self {
            n_arms,
            dim,
            alpha,
            arms: (0..n_arms).map(|_| ArmState::new(dim)).collect(),
        })
    }

    /// Number of arms (fixed at construction).
    pub fn n_arms(&self) -> usize {
        self.n_arms
    }

    /// Context dimensionality (fixed at construction).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Exploration coefficient `α = 1 + sqrt(ln(2/δ)/2)` with `δ = 0.05`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Validate a context slice and lift it into a column vector.
    ///
    /// Non-finite components are rejected, not zeroed: silently defaulting
    /// would make a precondition violation unobservable downstream.
    fn check_context(&self, context: &[f64]) -> Result<DVector<f64>> {
        if context.len() != self.dim {
            return Err(BanditError::DimensionMismatch {
                expected: self.dim,
                actual: context.len(),
            });
        }
        if !context.iter().all(|v| v.is_finite()) {
            return Err(BanditError::InvalidArgument(
                "context vector contains non-finite values",
            ));
        }
        Ok(DVector::from_column_slice(context))
    }

    /// Recompute every arm's cached inverse by direct inversion.
    ///
    /// Runs unconditionally for all arms, updated or not. Identity
    /// initialization plus positive-semidefinite rank-1 updates keep every
    /// ridge matrix invertible, so a `None` from `try_inverse` can only mean
    /// state corruption; it is surfaced, never papered over.
    fn refresh_inverses(&mut self) -> Result<()> {
        for st in &mut self.arms {
            st.ridge_inv = st
                .ridge
                .clone()
                .try_inverse()
                .ok_or(BanditError::NumericalFailure("ridge matrix is singular"))?;
        }
        Ok(())
    }

    fn score(&self, st: &ArmState, x: &DVector<f64>) -> LinUcbScore {
        // mean = x^T (A^{-1} b)
        let theta = &st.ridge_inv * &st.payoff;
        let mean = x.dot(&theta);

        // bonus = α sqrt(x^T A^{-1} x); the quadratic form is non-negative
        // for a positive-definite A^{-1}, so a small negative value can only
        // be rounding noise. Clamp before the square root.
        let ax = &st.ridge_inv * x;
        let var = x.dot(&ax).max(0.0);
        let bonus = self.alpha * var.sqrt();

        (mean + bonus, mean, bonus)
    }

    /// Per-arm `(ucb, mean, bonus)` scores for a context, indexed by arm.
    ///
    /// Refreshes the inverse cache exactly like [`select_arm`](Self::select_arm),
    /// so the two agree bit-for-bit on the same state.
    pub fn scores(&mut self, context: &[f64]) -> Result<Vec<LinUcbScore>> {
        let x = self.check_context(context)?;
        self.refresh_inverses()?;
        let mut out = Vec::with_capacity(self.n_arms);
        for st in &self.arms {
            let sc = self.score(st, &x);
            if !sc.0.is_finite() {
                return Err(BanditError::NumericalFailure("non-finite arm score"));
            }
            out.push(sc);
        }
        Ok(out)
    }

    /// Select the arm with the highest UCB score for this context.
    ///
    /// Ties break to the lowest-indexed arm. The only state touched is the
    /// inverse cache; ridge matrices and payoff vectors are read-only here.
    pub fn select_arm(&mut self, context: &[f64]) -> Result<usize> {
        let (arm, _scores) = self.select_with_scores(context)?;
        Ok(arm)
    }

    /// Select an arm and also return the per-arm scores that drove the choice.
    pub fn select_with_scores(&mut self, context: &[f64]) -> Result<(usize, Vec<LinUcbScore>)> {
        let scores = self.scores(context)?;

        // First-occurrence argmax: strict `>` leaves ties with the earlier arm.
        let mut best = 0usize;
        let mut best_ucb = scores[0].0;
        for (i, sc) in scores.iter().enumerate().skip(1) {
            if sc.0 > best_ucb {
                best = i;
                best_ucb = sc.0;
            }
        }

        debug!(arm = best, ucb = best_ucb, "selected arm");
        Ok((best, scores))
    }

    /// Fold an observed payoff into the chosen arm's model.
    ///
    /// Exact effect: `A_arm += x x^T` and `b_arm += payoff · x`. Only the
    /// addressed arm changes; its cached inverse goes stale until the next
    /// scoring pass recomputes it.
    pub fn update_model(&mut self, arm: usize, context: &[f64], payoff: f64) -> Result<()> {
        if arm >= self.n_arms {
            return Err(BanditError::InvalidArgument("arm index out of range"));
        }
        if !payoff.is_finite() {
            return Err(BanditError::InvalidArgument("payoff must be finite"));
        }
        let x = self.check_context(context)?;

        let st = &mut self.arms[arm];
        st.ridge += &x * x.transpose();
        st.payoff += &x * payoff;

        trace!(arm, payoff, "updated arm model");
        Ok(())
    }

    /// Per-arm coefficient vectors `θ_a = A_a^{-1} b_a`.
    ///
    /// The matrix of theta vectors (arms × dim) is the agent's learned
    /// response surface; useful for diagnosing whether arms have genuinely
    /// different context-dependent behavior. Refreshes the inverse cache.
    pub fn theta_vectors(&mut self) -> Result<Vec<Vec<f64>>> {
        self.refresh_inverses()?;
        Ok(self
            .arms
            .iter()
            .map(|st| (&st.ridge_inv * &st.payoff).iter().copied().collect())
            .collect())
    }
}
