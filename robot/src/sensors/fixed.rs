use crate::{math::Pose, sensors::RangeSensor};

/// Always reports the same distance.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRange {
    pub name: Option<String>,
    pub range: f64,
}

impl FixedRange {
    pub fn new(range: f64) -> Self {
        Self { name: None, range }
    }

    pub fn named(name: impl Into<String>, range: f64) -> Self {
        Self {
            name: Some(name.into()),
            range,
        }
    }
}

impl RangeSensor for FixedRange {
    fn read(&mut self, _period: u32, _pose: Pose) -> f64 {
        self.range
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
