use rand::{
    SeedableRng,
    distr::{Distribution, Uniform},
};
use rand_chacha::ChaCha8Rng;

use crate::{
    math::Pose,
    sensors::{RangeSensor, SensorError},
};

/// A base distance disturbed by uniform noise in `[-noise, noise]`.
///
/// `period` is the number of trials averaged into one reading; zero is treated
/// as a single trial.
#[derive(Debug, Clone)]
pub struct NoisyRange {
    pub name: Option<String>,
    pub range: f64,
    noise: f64,
    band: Uniform<f64>,
    rng: ChaCha8Rng,
}

impl NoisyRange {
    /// Fails when `noise` is not finite or `2 * noise` overflows.
    pub fn new(range: f64, noise: f64, seed: u64) -> Result<Self, SensorError> {
        let noise = noise.abs();
        let band = Uniform::new_inclusive(-noise, noise)
            .map_err(|_| SensorError::InvalidNoise(noise))?;

        Ok(Self {
            name: None,
            range,
            noise,
            band,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    fn sample(&mut self) -> f64 {
        self.range + self.band.sample(&mut self.rng)
    }
}

impl RangeSensor for NoisyRange {
    fn read(&mut self, period: u32, _pose: Pose) -> f64 {
        let trials = period.max(1);
        let total: f64 = (0..trials).map(|_| self.sample()).sum();

        let reading = total / trials as f64;
        log::trace!("{:?} averaged {trials} trials: {reading}", self.name);

        reading
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
