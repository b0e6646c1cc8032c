use turboq::prelude::*;

#[test]
fn prelude_covers_a_full_run() {
    let router = Router::new(RouterConfig::default()).unwrap();
    let run = router.run(&RunOptions::new(49.0, 200).with_seed(42)).unwrap();

    let comparison = TheoreticalComparison::new(run.config(), run.stats());
    assert_eq!(comparison.simulated_loss_probability, run.stats().drop_probability);

    let distribution = StateDistribution::from_history(run.occupancy());
    assert!(distribution.probabilities.len() <= run.config().capacity + 1);

    let summary = replicate(&router, &RunOptions::new(49.0, 200), &[1, 2, 3]).unwrap();
    assert_eq!(summary.seeds, vec![1, 2, 3]);
}

#[cfg(feature = "viz")]
#[test]
fn report_is_available_with_viz() {
    let run = Router::with_policy(RouterConfig::default(), FixedRatePolicy::new(3.0))
        .unwrap()
        .simulate(49.0, 200, Some(1))
        .unwrap();
    assert!(RunReport::new(&run).to_string().contains("fixed policy"));
}
