//! End-to-end properties of the pricing engine.
//!
//! # Test Categories
//!
//! 1. **Analytic**: reference values and put-call parity
//! 2. **Lattices**: early-exercise premium, convergence, barrier dominance
//! 3. **Monte Carlo**: convergence, reproducibility, jump dynamics
//! 4. **Greeks**: finite-difference deltas against closed form
//! 5. **Validation and configuration**

use approx::assert_relative_eq;
use pricer_core::config::EngineConfig;
use pricer_core::greeks::Greek;
use pricer_core::traits::OptionPricer;
use pricer_core::types::{Contract, OptionSide, PricingError, ValidationError};
use pricer_models::analytical::BlackScholes;
use pricer_models::lattice::{BinomialTree, TrinomialBarrier};
use pricer_pricing::mc::{JumpParams, MonteCarloConfig, MonteCarloEngine, PathSimulation};
use pricer_pricing::PricingModel;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn reference(side: OptionSide) -> Contract {
    Contract::new(100.0, 100.0, 1.0, 0.2, 0.05, 0.0, side).unwrap()
}

// ============================================================================
// Analytic
// ============================================================================

#[test]
fn test_reference_call() {
    init_tracing();
    let model = PricingModel::analytic(reference(OptionSide::Call));
    let valuation = model.valuation().unwrap();
    assert_relative_eq!(valuation.price, 10.4506, epsilon = 1e-4);
    assert_relative_eq!(valuation.greeks.get(Greek::Delta).unwrap(), 0.6368, epsilon = 1e-4);
    assert_relative_eq!(valuation.greeks.get(Greek::Vega).unwrap(), 0.3752, epsilon = 1e-4);
    assert!(valuation.std_error.is_none());
}

#[test]
fn test_reference_put() {
    let price = PricingModel::analytic(reference(OptionSide::Put)).price().unwrap();
    assert_relative_eq!(price, 5.5735, epsilon = 1e-4);
    assert_relative_eq!(price, 10.4506 - 100.0 + 100.0 * (-0.05_f64).exp(), epsilon = 1e-3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_put_call_parity(
        spot in 50.0..150.0_f64,
        strike in 50.0..150.0_f64,
        maturity in 0.05..3.0_f64,
        volatility in 0.05..0.8_f64,
        rate in -0.02..0.1_f64,
        dividend in 0.0..0.06_f64,
    ) {
        let call = Contract::new(spot, strike, maturity, volatility, rate, dividend, OptionSide::Call).unwrap();
        let bs = BlackScholes::new(call);
        let lhs = bs.price_call() - bs.price_put();
        let rhs = spot * (-dividend * maturity).exp() - strike * (-rate * maturity).exp();
        prop_assert!((lhs - rhs).abs() < 1e-8, "{} vs {}", lhs, rhs);
    }
}

// ============================================================================
// Lattices
// ============================================================================

#[test]
fn test_early_exercise_premium_deep_itm_put() {
    init_tracing();
    let put = Contract::new(70.0, 100.0, 1.0, 0.25, 0.12, 0.0, OptionSide::Put).unwrap();
    let american = BinomialTree::new(put, 500).unwrap().price().unwrap();
    let european = BlackScholes::new(put).price_put();
    assert!(american >= european, "{} < {}", american, european);
    assert!(american >= 30.0 - 1e-9);
}

#[test]
fn test_early_exercise_premium_dividend_call() {
    let call = Contract::new(120.0, 100.0, 1.0, 0.2, 0.02, 0.1, OptionSide::Call).unwrap();
    let american = BinomialTree::new(call, 500).unwrap().price().unwrap();
    assert!(american >= BlackScholes::new(call).price_call());
}

#[test]
fn test_binomial_converges_to_analytic() {
    let call = reference(OptionSide::Call);
    let price = BinomialTree::new(call, 2000).unwrap().price().unwrap();
    assert!((price - BlackScholes::new(call).price_call()).abs() < 0.01);
}

#[test]
fn test_barrier_dominance() {
    init_tracing();
    let call = reference(OptionSide::Call);
    let vanilla = BlackScholes::new(call).price_call();
    for barrier in [105.0, 115.0, 130.0, 160.0, 250.0] {
        let knock_out = TrinomialBarrier::new(call, barrier, 200).unwrap().price().unwrap();
        assert!(knock_out <= vanilla * 1.01 + 0.05, "barrier {}: {}", barrier, knock_out);
        assert!(knock_out >= 0.0);
    }

    let put = reference(OptionSide::Put);
    let vanilla = BlackScholes::new(put).price_put();
    for barrier in [60.0, 80.0, 95.0] {
        let knock_out = TrinomialBarrier::new(put, barrier, 200).unwrap().price().unwrap();
        assert!(knock_out <= vanilla * 1.01 + 0.05, "barrier {}: {}", barrier, knock_out);
    }
}

#[test]
fn test_spot_past_barrier_is_worthless() {
    let call = Contract::new(140.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
    let price = TrinomialBarrier::new(call, 130.0, 100).unwrap().price().unwrap();
    assert_eq!(price, 0.0);
}

// ============================================================================
// Monte Carlo
// ============================================================================

#[test]
fn test_monte_carlo_converges_to_analytic() {
    init_tracing();
    let call = reference(OptionSide::Call);
    let config = MonteCarloConfig::builder()
        .n_paths(50_000)
        .n_steps(10)
        .seed(42)
        .jumps(JumpParams::new(0.0, 0.0, 0.0).unwrap())
        .build()
        .unwrap();
    let estimate = PathSimulation::european(call, config).estimate().unwrap();
    let analytic = BlackScholes::new(call).price_call();
    assert!(
        (estimate.price - analytic).abs() <= 3.0 * estimate.std_error,
        "{} ± {} vs {}",
        estimate.price,
        estimate.std_error,
        analytic
    );
}

#[test]
fn test_seeded_runs_are_bit_identical() {
    let config = MonteCarloConfig::builder()
        .n_paths(10_000)
        .n_steps(20)
        .seed(7)
        .build()
        .unwrap();
    let first = PathSimulation::asian(reference(OptionSide::Put), config).estimate().unwrap();
    let second = PathSimulation::asian(reference(OptionSide::Put), config).estimate().unwrap();
    assert_eq!(first.price.to_bits(), second.price.to_bits());
    assert_eq!(first.std_error.to_bits(), second.std_error.to_bits());
}

#[test]
fn test_parallel_and_sequential_agree() {
    let build = |parallel| {
        MonteCarloConfig::builder()
            .n_paths(9_000)
            .n_steps(12)
            .seed(11)
            .chunk_size(512)
            .parallel(parallel)
            .jumps(JumpParams::new(0.8, -0.05, 0.1).unwrap())
            .build()
            .unwrap()
    };
    let call = reference(OptionSide::Call);
    let parallel = MonteCarloEngine::new(call, build(true)).price_european(OptionSide::Call);
    let sequential = MonteCarloEngine::new(call, build(false)).price_european(OptionSide::Call);
    assert_eq!(parallel.unwrap(), sequential.unwrap());
}

#[test]
fn test_unseeded_runs_differ() {
    let config = MonteCarloConfig::builder().n_paths(1_000).n_steps(5).build().unwrap();
    let engine = MonteCarloEngine::new(reference(OptionSide::Call), config);
    let a = engine.price_european(OptionSide::Call).unwrap();
    let b = engine.price_european(OptionSide::Call).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_positive_jumps_raise_call_value() {
    let call = reference(OptionSide::Call);
    let build = |jumps: Option<JumpParams>| {
        let mut builder = MonteCarloConfig::builder().n_paths(20_000).n_steps(10).seed(3);
        if let Some(j) = jumps {
            builder = builder.jumps(j);
        }
        builder.build().unwrap()
    };
    let (plain, _) = MonteCarloEngine::new(call, build(None))
        .price_european(OptionSide::Call)
        .unwrap();
    let (jumpy, _) = MonteCarloEngine::new(call, build(Some(JumpParams::new(1.0, 0.1, 0.1).unwrap())))
        .price_european(OptionSide::Call)
        .unwrap();
    assert!(jumpy > plain + 2.0, "{} vs {}", jumpy, plain);
}

#[test]
fn test_generated_paths_shape() {
    let config = MonteCarloConfig::builder().n_paths(100).n_steps(30).seed(1).build().unwrap();
    let paths = MonteCarloEngine::new(reference(OptionSide::Call), config)
        .generate_paths()
        .unwrap();
    assert_eq!(paths.as_slice().len(), 100 * 31);
    assert!(paths.iter().all(|p| p[0] == 100.0 && p.iter().all(|s| *s > 0.0)));
}

// ============================================================================
// Greeks
// ============================================================================

#[test]
fn test_lattice_deltas_match_closed_form() {
    init_tracing();
    let call = reference(OptionSide::Call);
    let analytic = BlackScholes::new(call).delta();

    let binomial = BinomialTree::new(call, 1000).unwrap().greeks().unwrap();
    assert!((binomial.delta.unwrap() - analytic).abs() < 1e-2);

    let trinomial = TrinomialBarrier::new(call, 1000.0, 1000).unwrap().greeks().unwrap();
    assert!((trinomial.delta.unwrap() - analytic).abs() < 1e-2);
    assert!(trinomial.vega.is_none() && trinomial.theta.is_none() && trinomial.rho.is_none());
}

#[test]
fn test_theta_is_per_day_decay() {
    let call = reference(OptionSide::Call);
    let analytic = BlackScholes::new(call).theta();
    let binomial = BinomialTree::new(call, 1000).unwrap().greeks().unwrap();
    assert!(analytic < 0.0);
    assert!((binomial.theta.unwrap() - analytic).abs() < 1e-3);
}

#[test]
fn test_asian_greek_mapping() {
    let config = EngineConfig::default();
    let model = PricingModel::asian_simulation(reference(OptionSide::Call), &config).unwrap();
    let greeks = model.greeks().unwrap();
    let names: Vec<&str> = greeks.iter().map(|(g, _)| g.name()).collect();
    assert_eq!(names, vec!["delta", "vega"]);
}

// ============================================================================
// Validation and configuration
// ============================================================================

#[test]
fn test_invalid_inputs_fail_fast() {
    assert!(matches!(
        Contract::new(-1.0, 100.0, 1.0, 0.2, 0.05, 0.0, OptionSide::Call),
        Err(ValidationError::NonPositive { name: "spot", .. })
    ));
    assert!(BinomialTree::new(reference(OptionSide::Call), 0).is_err());
    assert!(TrinomialBarrier::new(reference(OptionSide::Call), 0.0, 100).is_err());
    assert!(MonteCarloConfig::builder().n_paths(0).build().is_err());
    assert!(JumpParams::new(-1.0, 0.0, 0.1).is_err());
    assert!(JumpParams::new(1.0, 0.0, -0.1).is_err());
}

#[test]
fn test_theta_inside_last_day_is_validation_error() {
    let short = Contract::new(100.0, 100.0, 0.5 / 365.0, 0.2, 0.05, 0.0, OptionSide::Call).unwrap();
    let config = MonteCarloConfig::builder().n_paths(100).n_steps(2).seed(1).build().unwrap();
    let result = PathSimulation::european(short, config).greeks();
    assert!(matches!(result, Err(PricingError::Validation(_))));
}

#[test]
fn test_config_file_drives_models() {
    let path = std::env::temp_dir().join(format!("engine_config_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[binomial]\nsteps = 250\n\n[monte_carlo]\nn_paths = 2000\nn_steps = 5\nseed = 9\n",
    )
    .unwrap();
    let config = EngineConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let call = reference(OptionSide::Call);
    match PricingModel::binomial(call, &config).unwrap() {
        PricingModel::Binomial(tree) => assert_eq!(tree.steps(), 250),
        other => panic!("Expected binomial, got {}", other.name()),
    }
    let sim = PricingModel::european_simulation(call, &config).unwrap();
    assert_eq!(sim.price().unwrap(), sim.price().unwrap());
}
