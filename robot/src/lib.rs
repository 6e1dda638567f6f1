pub mod agent;
pub mod math;
pub mod sensors;

pub use agent::{Robot2D, RobotError, SharedRobot2D};
pub use math::Pose;
pub use sensors::{RangeSensor, SensorError, fixed::FixedRange, func::FnSensor, noisy::NoisyRange};
