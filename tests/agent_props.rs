//! Property tests for the public agent surface.

use linucb::{BanditAgent, BanditError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fresh_agents_are_neutral_for_any_context(
        n_arms in 1usize..8,
        dim in 1usize..8,
        ctx_raw in proptest::collection::vec(-100.0f64..100.0, 8),
    ) {
        let mut agent = BanditAgent::new(n_arms, dim).unwrap();
        let ctx = &ctx_raw[..dim];

        // All arms share identity ridge state, so scores are equal and the
        // first-occurrence argmax lands on arm 0.
        prop_assert_eq!(agent.select_arm(ctx).unwrap(), 0);

        let scores = agent.scores(ctx).unwrap();
        for sc in &scores[1..] {
            prop_assert_eq!(*sc, scores[0]);
        }
    }

    #[test]
    fn two_agents_stay_in_lockstep_under_identical_driving(
        n_arms in 1usize..5,
        dim in 1usize..5,
        rounds in proptest::collection::vec(
            (proptest::collection::vec(-10.0f64..10.0, 5), -2.0f64..2.0),
            0..40
        ),
    ) {
        let mut a = BanditAgent::new(n_arms, dim).unwrap();
        let mut b = BanditAgent::new(n_arms, dim).unwrap();

        for (ctx_raw, payoff) in &rounds {
            let ctx = &ctx_raw[..dim];
            let (arm_a, scores_a) = a.select_with_scores(ctx).unwrap();
            let (arm_b, scores_b) = b.select_with_scores(ctx).unwrap();
            prop_assert_eq!(arm_a, arm_b);
            prop_assert_eq!(scores_a, scores_b);

            a.update_model(arm_a, ctx, *payoff).unwrap();
            b.update_model(arm_b, ctx, *payoff).unwrap();
        }

        prop_assert_eq!(a.theta_vectors().unwrap(), b.theta_vectors().unwrap());
    }

    #[test]
    fn wrong_length_contexts_are_always_rejected(
        dim in 1usize..6,
        len in 0usize..12,
        payoff in -1.0f64..1.0,
    ) {
        prop_assume!(len != dim);
        let mut agent = BanditAgent::new(3, dim).unwrap();
        let ctx = vec![0.5; len];

        let want = BanditError::DimensionMismatch { expected: dim, actual: len };
        prop_assert_eq!(agent.select_arm(&ctx).unwrap_err(), want.clone());
        prop_assert_eq!(agent.update_model(0, &ctx, payoff).unwrap_err(), want);
    }

    #[test]
    fn out_of_range_arms_are_always_rejected(
        n_arms in 1usize..6,
        excess in 0usize..10,
    ) {
        let mut agent = BanditAgent::new(n_arms, 2).unwrap();
        let err = agent.update_model(n_arms + excess, &[1.0, 1.0], 0.0).unwrap_err();
        prop_assert!(matches!(err, BanditError::InvalidArgument(_)));
    }
}
