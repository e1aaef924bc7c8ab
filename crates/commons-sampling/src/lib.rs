//! Commons Sampling
//!
//! Seedable sampling functions consumed by the network engine and the
//! simulation driver. Every factory returns an `FnMut() -> f64` that owns its
//! own generator, so each call consumes exactly one value from that stream.
//!
//! # Reproducibility
//!
//! Passing `Some(seed)` makes a sampler deterministic: two samplers built from
//! the same factory and seed yield identical sequences. `None` seeds from the
//! operating system.
//!
//! # Examples
//!
//! ```
//! use commons_sampling::new_random_number_func;
//!
//! let mut a = new_random_number_func(Some(7));
//! let mut b = new_random_number_func(Some(7));
//! assert_eq!(a(), b());
//! ```

#![warn(missing_docs)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma};

/// Shape of the default gamma distribution (funds requested by new proposals)
pub const GAMMA_SHAPE: f64 = 3.0;

/// Location offset of the default gamma distribution
pub const GAMMA_LOC: f64 = 0.001;

/// Scale of the default gamma distribution
pub const GAMMA_SCALE: f64 = 10_000.0;

/// Build a generator from an optional seed
fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniform probability in [0.0, 1.0)
pub fn new_probability_func(seed: Option<u64>) -> impl FnMut() -> f64 {
    let mut rng = seeded_rng(seed);
    move || rng.gen::<f64>()
}

/// Uniform random number in [0.0, 1.0), used for affinities and conflict rolls
pub fn new_random_number_func(seed: Option<u64>) -> impl FnMut() -> f64 {
    let mut rng = seeded_rng(seed);
    move || rng.gen::<f64>()
}

/// Standard exponential draw (rate 1, so mean 1.0), always >= 0.0
pub fn new_exponential_func(seed: Option<u64>) -> impl FnMut() -> f64 {
    new_exponential_func_with(seed, 0.0, 1.0)
}

/// Exponential draw shifted by `loc` and stretched by `scale`
///
/// # Panics
/// Panics if `scale` is not strictly positive and finite
pub fn new_exponential_func_with(seed: Option<u64>, loc: f64, scale: f64) -> impl FnMut() -> f64 {
    assert!(
        scale.is_finite() && scale > 0.0,
        "Exponential scale must be finite and positive"
    );

    let mut rng = seeded_rng(seed);
    let exp = Exp::new(1.0 / scale).expect("rate checked positive above");
    move || loc + exp.sample(&mut rng)
}

/// Gamma draw with the default shape, location and scale
pub fn new_gamma_func(seed: Option<u64>) -> impl FnMut() -> f64 {
    new_gamma_func_with(seed, GAMMA_SHAPE, GAMMA_LOC, GAMMA_SCALE)
}

/// Gamma draw with explicit `shape`, shifted by `loc` and stretched by `scale`
///
/// # Panics
/// Panics if `shape` or `scale` is not strictly positive and finite
pub fn new_gamma_func_with(
    seed: Option<u64>,
    shape: f64,
    loc: f64,
    scale: f64,
) -> impl FnMut() -> f64 {
    assert!(
        shape.is_finite() && shape > 0.0,
        "Gamma shape must be finite and positive"
    );
    assert!(
        scale.is_finite() && scale > 0.0,
        "Gamma scale must be finite and positive"
    );

    let mut rng = seeded_rng(seed);
    let gamma = Gamma::new(shape, scale).expect("parameters checked positive above");
    move || loc + gamma.sample(&mut rng)
}

/// Odd multiplier spreading stream offsets across the seed space
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// The four samplers a bootstrap needs, built together
///
/// Each sampler gets its own stream derived from the base seed, so drawing
/// from one never shifts the sequence of another.
pub struct Samplers {
    /// Probability sampler
    pub probability: Box<dyn FnMut() -> f64>,

    /// Uniform random number sampler
    pub random_number: Box<dyn FnMut() -> f64>,

    /// Gamma sampler
    pub gamma: Box<dyn FnMut() -> f64>,

    /// Exponential sampler
    pub exponential: Box<dyn FnMut() -> f64>,
}

impl Samplers {
    /// Build all four samplers from one optional base seed
    pub fn seeded(seed: Option<u64>) -> Self {
        let derive = |offset: u64| seed.map(|s| s ^ offset.wrapping_mul(STREAM_MIX));

        Self {
            probability: Box::new(new_probability_func(derive(0))),
            random_number: Box::new(new_random_number_func(derive(1))),
            gamma: Box::new(new_gamma_func(derive(2))),
            exponential: Box::new(new_exponential_func(derive(3))),
        }
    }
}

impl std::fmt::Debug for Samplers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Samplers").finish_non_exhaustive()
    }
}
