//! Lattice prices and Greeks against independently computed values.
//!
//! All cases share S = 41, K = 40, T = 1, q = 0.01, σ = 0.3, r = 0.03.
//!
//! # Test Categories
//!
//! 1. **Plain lattice**: European and American, calls and puts
//! 2. **Accelerated estimators**: averaged, hybrid, Richardson
//! 3. **Down-and-out barrier**: knock-out at B = 35
//! 4. **Closed form**: Black-Scholes-Merton limits of the same contract

use approx::assert_relative_eq;
use lattice_models::analytical::BlackScholesMerton;
use lattice_models::instruments::{ExerciseKind, OptionContract, OptionType};
use lattice_pricing::{
    price_averaged, price_binomial, price_hybrid, price_richardson, LatticeParams, LatticeResult,
};

const RATE: f64 = 0.03;

fn contract(option_type: OptionType, exercise: ExerciseKind) -> OptionContract<f64> {
    let builder = OptionContract::builder()
        .spot(41.0)
        .strike(40.0)
        .maturity(1.0)
        .dividend_yield(0.01)
        .volatility(0.3)
        .option_type(option_type)
        .exercise(exercise);
    match exercise {
        ExerciseKind::DownAndOut => builder.barrier(35.0).build().unwrap(),
        _ => builder.build().unwrap(),
    }
}

fn assert_matches(result: LatticeResult<f64>, expected: [f64; 4], tolerance: f64) {
    let (price, delta, gamma, theta) = result.greeks().expect("Greeks requested");
    assert_relative_eq!(price, expected[0], epsilon = tolerance);
    assert_relative_eq!(delta, expected[1], epsilon = tolerance);
    assert_relative_eq!(gamma, expected[2], epsilon = tolerance);
    assert_relative_eq!(theta, expected[3], epsilon = 10.0 * tolerance);
}

// ============================================================================
// Plain Lattice
// ============================================================================

#[test]
fn test_european_put_five_steps() {
    let put = contract(OptionType::Put, ExerciseKind::European);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_binomial(&put, &params, true).unwrap(),
        [
            4.120_381_209_391_777,
            -0.379_018_001_637_436_15,
            0.032_370_880_752_682_06,
            -2.035_256_693_947_296,
        ],
        1e-10,
    );
}

#[test]
fn test_european_call_five_steps() {
    let call = contract(OptionType::Call, ExerciseKind::European);
    let params = LatticeParams::new(5, RATE, &call).unwrap();
    assert_matches(
        price_binomial(&call, &params, true).unwrap(),
        [
            5.894_603_051_167_343,
            0.613_013_913_199_624_2,
            0.032_370_880_752_682_046,
            -2.800_073_218_687_917_4,
        ],
        1e-10,
    );
}

#[test]
fn test_american_put_five_steps() {
    let put = contract(OptionType::Put, ExerciseKind::American);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_binomial(&put, &params, true).unwrap(),
        [
            4.205_487_001_378_676,
            -0.389_751_204_247_060_67,
            0.033_769_749_632_467_58,
            -2.130_670_491_648_245_5,
        ],
        1e-10,
    );
}

#[test]
fn test_european_put_two_steps() {
    // Smallest lattice with a full stencil: root, depth 1 and terminal layer
    let put = contract(OptionType::Put, ExerciseKind::European);
    let params = LatticeParams::new(2, RATE, &put).unwrap();
    assert_matches(
        price_binomial(&put, &params, true).unwrap(),
        [
            3.582_506_953_392_967_7,
            -0.392_019_806_661_843_66,
            0.051_862_989_156_648_776,
            -3.582_506_953_392_967_7,
        ],
        1e-10,
    );
}

// ============================================================================
// Accelerated Estimators
// ============================================================================

#[test]
fn test_averaged_european_put() {
    let put = contract(OptionType::Put, ExerciseKind::European);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_averaged(&put, &params, true).unwrap(),
        [
            3.980_517_800_683_436,
            -0.381_002_133_973_035_56,
            0.033_366_209_486_201_1,
            -2.111_984_175_351_941_5,
        ],
        1e-10,
    );
}

#[test]
fn test_hybrid_european_put() {
    let put = contract(OptionType::Put, ExerciseKind::European);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_hybrid(&put, &params, true).unwrap(),
        [
            3.958_970_376_470_169_6,
            -0.381_188_024_749_226_2,
            0.034_461_905_173_431_9,
            -2.198_036_993_558_031,
        ],
        1e-10,
    );
}

#[test]
fn test_hybrid_american_put() {
    let put = contract(OptionType::Put, ExerciseKind::American);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_hybrid(&put, &params, true).unwrap(),
        [
            4.025_762_063_011_594,
            -0.390_373_118_331_514_95,
            0.035_844_718_362_691_34,
            -2.294_054_386_670_903_8,
        ],
        1e-10,
    );
}

#[test]
fn test_richardson_european_put() {
    let put = contract(OptionType::Put, ExerciseKind::European);
    let params = LatticeParams::new(10, RATE, &put).unwrap();
    assert_matches(
        price_richardson(&put, &params, true).unwrap(),
        [
            3.910_404_218_729_11,
            -0.378_224_647_070_560_7,
            0.029_907_022_091_162_243,
            -1.833_193_231_296_258_7,
        ],
        1e-10,
    );
}

#[test]
fn test_richardson_american_put() {
    let put = contract(OptionType::Put, ExerciseKind::American);
    let params = LatticeParams::new(10, RATE, &put).unwrap();
    assert_matches(
        price_richardson(&put, &params, true).unwrap(),
        [
            3.975_877_247_141_352_4,
            -0.387_958_464_400_305_4,
            0.031_250_727_058_797_77,
            -1.924_875_467_667_083_4,
        ],
        1e-10,
    );
}

// ============================================================================
// Down-and-Out Barrier
// ============================================================================

#[test]
fn test_down_and_out_call() {
    let call = contract(OptionType::Call, ExerciseKind::DownAndOut);
    let params = LatticeParams::new(5, RATE, &call).unwrap();
    assert_matches(
        price_binomial(&call, &params, true).unwrap(),
        [
            5.694_075_844_850_746_5,
            0.648_266_871_850_720_4,
            0.025_346_831_010_442_224,
            -2.298_755_202_896_425_3,
        ],
        1e-10,
    );
}

#[test]
fn test_down_and_out_put() {
    // Knock-out zeroes the put exactly where it would be deepest in the money
    let put = contract(OptionType::Put, ExerciseKind::DownAndOut);
    let params = LatticeParams::new(5, RATE, &put).unwrap();
    assert_matches(
        price_binomial(&put, &params, true).unwrap(),
        [
            0.650_513_301_608_820_5,
            0.028_174_122_380_020_83,
            -0.013_282_615_713_536_625,
            1.010_831_462_955_923_4,
        ],
        1e-10,
    );
}

// ============================================================================
// Closed Form
// ============================================================================

#[test]
fn test_black_scholes_merton_reference() {
    let bsm = BlackScholesMerton::new(41.0, RATE, 0.01, 0.3).unwrap();

    assert_relative_eq!(bsm.d1(40.0, 1.0), 0.298_975_375_301_238_1, epsilon = 1e-12);
    assert_relative_eq!(bsm.price_call(40.0, 1.0), 5.673_378_900_706_059, epsilon = 1e-12);
    assert_relative_eq!(bsm.price_put(40.0, 1.0), 3.899_157_058_930_491_4, epsilon = 1e-12);
}
