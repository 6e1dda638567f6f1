use std::fmt;

use crate::{math::Pose, sensors::RangeSensor};

/// Sensor backed by a closure, for readings that depend on where the agent is.
pub struct FnSensor<F> {
    name: Option<String>,
    f: F,
}

impl<F> FnSensor<F>
where
    F: FnMut(u32, Pose) -> f64 + Send,
{
    pub fn new(f: F) -> Self {
        Self { name: None, f }
    }

    pub fn named(name: impl Into<String>, f: F) -> Self {
        Self {
            name: Some(name.into()),
            f,
        }
    }
}

impl<F> fmt::Debug for FnSensor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSensor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> RangeSensor for FnSensor<F>
where
    F: FnMut(u32, Pose) -> f64 + Send,
{
    fn read(&mut self, period: u32, pose: Pose) -> f64 {
        (self.f)(period, pose)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
