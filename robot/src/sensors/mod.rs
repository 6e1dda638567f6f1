use std::fmt::Debug;

use crate::math::Pose;

pub mod fixed;
pub mod func;
pub mod noisy;

/// A distance/proximity sensor an agent can carry.
///
/// What `period` means is up to each variant: a polling interval, a number of
/// trials to average, a time window. The carrying agent hands over its current
/// pose on every read; variants that measure purely internal state can ignore it.
pub trait RangeSensor: Debug + Send {
    fn read(&mut self, period: u32, pose: Pose) -> f64;

    /// Label used for name-based lookup on the agent.
    fn name(&self) -> Option<&str> {
        None
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("Invalid Noise: {0} does not give a finite sampling band")]
    InvalidNoise(f64),
}
