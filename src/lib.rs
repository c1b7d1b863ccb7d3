//! `linucb`: a deterministic linear contextual bandit (LinUCB).
//!
//! Designed for repeated "arm selection" problems with side information: a
//! fixed set of N arms, a D-dimensional context vector per round, and a
//! scalar payoff observed after acting. The agent keeps per-arm ridge
//! regression sufficient statistics and each round picks the arm maximizing
//!
//! ```text
//!   UCB_a(x) = x^T θ_a + α √(x^T A_a^{-1} x)
//! ```
//!
//! with `θ_a = A_a^{-1} b_a` and a fixed exploration coefficient
//! `α = 1 + sqrt(ln(2/δ)/2)` for confidence failure probability `δ = 0.05`.
//!
//! **Goals:**
//! - **Deterministic**: no randomness; same call sequence → same selections
//!   and bit-identical state. Ties break to the lowest-indexed arm.
//! - **Exact reference semantics**: every arm's `A_a^{-1}` is recomputed by
//!   direct matrix inversion on every scoring pass (no incremental
//!   Sherman–Morrison approximation of the inverse).
//! - **Small, closed surface**: construct with `(n_arms, dim)`, then
//!   alternate [`BanditAgent::select_arm`] and [`BanditAgent::update_model`].
//!
//! **Non-goals:** no runtime arm-set changes, no persistence of learned
//! state, no parallel training, no alternative bandit policies
//! (epsilon-greedy, Thompson sampling, EXP3).
//!
//! ```rust
//! use linucb::BanditAgent;
//!
//! let mut agent = BanditAgent::new(3, 2)?;
//! let ctx = [1.0, 0.5];
//! let arm = agent.select_arm(&ctx)?;
//! // ... act, observe payoff ...
//! agent.update_model(arm, &ctx, 0.8)?;
//! # Ok::<(), linucb::BanditError>(())
//! ```

pub mod agent;
pub mod error;

pub use agent::{BanditAgent, LinUcbScore};
pub use error::{BanditError, Result};
