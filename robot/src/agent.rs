use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    math::{Pose, wrap_angle},
    sensors::RangeSensor,
};

pub type SharedRobot2D = Arc<Mutex<Robot2D>>;

/// A point robot on the plane carrying any number of range sensors.
///
/// Every motion call is an instantaneous transition taking one implicit unit
/// of time, so after a translation `speed` holds the distance covered.
/// `rotate` keeps `orientation` in `(-π, π]`; the constructors store the value
/// they are given as-is.
#[derive(Debug, Default)]
pub struct Robot2D {
    pose: Pose,
    speed: f64,
    sensors: Vec<Box<dyn RangeSensor>>,
}

impl Robot2D {
    pub fn new(x: f64, y: f64, orientation: f64) -> Self {
        Self::from_pose(Pose::new(x, y, orientation))
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.)
    }

    pub fn with_orientation(orientation: f64) -> Self {
        Self::new(0., 0., orientation)
    }

    pub fn from_pose(pose: Pose) -> Self {
        Self {
            pose,
            speed: 0.,
            sensors: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedRobot2D {
        Arc::new(Mutex::new(self))
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn position(&self) -> glam::DVec2 {
        self.pose.position
    }

    #[inline]
    pub fn orientation(&self) -> f64 {
        self.pose.orientation
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Negative distances move backwards.
    pub fn move_forward(&mut self, distance: f64) {
        self.pose.position += self.pose.heading() * distance;
        self.speed = distance.abs();

        log::debug!(
            "Moved {distance} to ({}, {})",
            self.pose.position.x,
            self.pose.position.y
        );
    }

    pub fn move_backward(&mut self, distance: f64) {
        self.move_forward(-distance);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.pose.orientation = wrap_angle(self.pose.orientation + degrees.to_radians());

        log::debug!("Rotated {degrees} deg to {} rad", self.pose.orientation);
    }

    pub fn add_sensor(&mut self, sensor: Box<dyn RangeSensor>) {
        log::debug!("Attaching sensor #{}: {:?}", self.sensors.len(), sensor);
        self.sensors.push(sensor);
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn sensors(&self) -> impl Iterator<Item = &dyn RangeSensor> {
        self.sensors.iter().map(|sensor| sensor.as_ref())
    }

    /// Reads the first attached sensor.
    pub fn sensor_reading(&mut self, period: u32) -> Result<f64, RobotError> {
        if self.sensors.is_empty() {
            log::warn!("Reading requested with no sensors attached");
            return Err(RobotError::NoSensor);
        }

        self.sensor_reading_at(0, period)
    }

    pub fn sensor_reading_at(&mut self, index: usize, period: u32) -> Result<f64, RobotError> {
        let pose = self.pose;
        let count = self.sensors.len();

        let Some(sensor) = self.sensors.get_mut(index) else {
            log::warn!("Sensor index {index} requested but only {count} attached");
            return Err(if count == 0 {
                RobotError::NoSensor
            } else {
                RobotError::SensorIndexOutOfRange { index, count }
            });
        };

        let reading = sensor.read(period, pose);
        log::trace!("Sensor #{index} read {reading} over period {period}");

        Ok(reading)
    }

    /// Reads the first sensor labelled `name`.
    pub fn sensor_reading_named(&mut self, name: &str, period: u32) -> Result<f64, RobotError> {
        let index = self
            .sensors
            .iter()
            .position(|sensor| sensor.name() == Some(name))
            .ok_or_else(|| {
                log::warn!("No sensor named {name:?}");
                RobotError::UnknownSensor(name.to_owned())
            })?;

        self.sensor_reading_at(index, period)
    }

    /// One reading per sensor, in attachment order.
    pub fn sensor_readings(&mut self, period: u32) -> Vec<f64> {
        let pose = self.pose;

        self.sensors
            .iter_mut()
            .map(|sensor| sensor.read(period, pose))
            .collect()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RobotError {
    #[error("No sensor available: none attached")]
    NoSensor,
    #[error("Sensor Index Out Of Range: Got {index} but only {count} attached")]
    SensorIndexOutOfRange { index: usize, count: usize },
    #[error("Unknown Sensor: no sensor named {0:?}")]
    UnknownSensor(String),
}

#[cfg(test)]
mod test {
    use std::{
        f64::consts::{FRAC_PI_2, PI},
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use approx::assert_abs_diff_eq;

    use crate::{
        agent::{Robot2D, RobotError},
        math::{Pose, angle_difference},
        sensors::{RangeSensor, fixed::FixedRange, func::FnSensor},
    };

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_construction() {
        let poses = [(0., 0., 0.), (1.5, -2.25, 0.3), (-1e6, 3e5, 7.), (2., 2., -PI)];
        for (x, y, orientation) in poses {
            let robot = Robot2D::new(x, y, orientation);
            assert_eq!(robot.position(), glam::dvec2(x, y));
            assert_eq!(robot.orientation(), orientation);
            assert_eq!(robot.speed(), 0.);
            assert_eq!(robot.sensor_count(), 0);
        }

        let default = Robot2D::default();
        assert_eq!(default.pose(), Pose::new(0., 0., 0.));
        assert_eq!(default.speed(), 0.);

        assert_eq!(Robot2D::at(3., 4.).pose(), Pose::new(3., 4., 0.));
        assert_eq!(Robot2D::with_orientation(1.25).pose(), Pose::new(0., 0., 1.25));
    }

    #[test]
    fn test_forward_round_trip() {
        for orientation in [0., 0.7, FRAC_PI_2, -2.9, PI] {
            for d in [0., 1., -3.5, 1234.5] {
                let mut robot = Robot2D::new(1., -2., orientation);
                let start = robot.position();

                robot.move_forward(d);
                robot.move_forward(-d);

                assert_abs_diff_eq!(robot.position().x, start.x, epsilon = EPSILON);
                assert_abs_diff_eq!(robot.position().y, start.y, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn test_forward_equals_negated_backward() {
        for orientation in [0., 0.7, -2.9] {
            for d in [2., -3.5, 0.] {
                let mut forward = Robot2D::new(0.5, 0.5, orientation);
                let mut backward = Robot2D::new(0.5, 0.5, orientation);

                forward.move_forward(d);
                backward.move_backward(-d);

                assert_eq!(forward.position(), backward.position());
                assert_eq!(forward.speed(), backward.speed());
            }
        }
    }

    #[test]
    fn test_rotation_is_additive() {
        for (a, b) in [(30., 45.), (170., 170.), (-90., 400.), (720., -1.)] {
            let mut twice = Robot2D::default();
            twice.rotate(a);
            twice.rotate(b);

            let mut once = Robot2D::default();
            once.rotate(a + b);

            assert_abs_diff_eq!(
                angle_difference(twice.orientation(), once.orientation()),
                0.,
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_full_turn_restores_orientation() {
        for orientation in [0., 0.5, -1.2, PI] {
            let mut robot = Robot2D::with_orientation(orientation);
            robot.rotate(360.);
            assert_abs_diff_eq!(
                angle_difference(robot.orientation(), orientation),
                0.,
                epsilon = EPSILON
            );

            robot.rotate(-720.);
            assert_abs_diff_eq!(
                angle_difference(robot.orientation(), orientation),
                0.,
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_rotation_stays_normalized() {
        let mut robot = Robot2D::default();

        for _ in 0..100 {
            robot.rotate(97.);
            assert!(robot.orientation() > -PI && robot.orientation() <= PI);
        }
    }

    #[test]
    fn test_square_path() {
        let mut robot = Robot2D::new(0., 0., 0.);

        robot.move_forward(5.);
        assert_abs_diff_eq!(robot.position().x, 5., epsilon = EPSILON);
        assert_abs_diff_eq!(robot.position().y, 0., epsilon = EPSILON);

        robot.rotate(90.);
        assert_abs_diff_eq!(robot.orientation(), FRAC_PI_2, epsilon = EPSILON);

        robot.move_forward(5.);
        assert_abs_diff_eq!(robot.position().x, 5., epsilon = EPSILON);
        assert_abs_diff_eq!(robot.position().y, 5., epsilon = EPSILON);
    }

    #[test]
    fn test_backward_facing_up() {
        let mut robot = Robot2D::new(0., 0., FRAC_PI_2);
        robot.move_backward(3.);

        assert_abs_diff_eq!(robot.position().x, 0., epsilon = EPSILON);
        assert_abs_diff_eq!(robot.position().y, -3., epsilon = EPSILON);
    }

    #[test]
    fn test_speed_tracks_last_move() {
        let mut robot = Robot2D::default();

        robot.move_forward(2.5);
        assert_eq!(robot.speed(), 2.5);

        robot.move_backward(4.);
        assert_eq!(robot.speed(), 4.);

        robot.rotate(45.);
        assert_eq!(robot.speed(), 4.);

        robot.move_forward(0.);
        assert_eq!(robot.speed(), 0.);
    }

    #[test]
    fn test_reading_without_sensors() {
        let mut robot = Robot2D::default();

        assert_eq!(robot.sensor_reading(1), Err(RobotError::NoSensor));
        assert_eq!(robot.sensor_reading_at(0, 1), Err(RobotError::NoSensor));
        assert!(robot.sensor_readings(1).is_empty());
    }

    #[test]
    fn test_reading_selection() {
        let mut robot = Robot2D::default();
        robot.add_sensor(Box::new(FixedRange::named("front", 1.)));
        robot.add_sensor(Box::new(FixedRange::new(2.)));
        robot.add_sensor(Box::new(FixedRange::named("rear", 3.)));
        assert_eq!(robot.sensor_count(), 3);

        assert_eq!(robot.sensor_reading(10), Ok(1.));
        assert_eq!(robot.sensor_reading_at(1, 10), Ok(2.));
        assert_eq!(robot.sensor_reading_named("rear", 10), Ok(3.));
        assert_eq!(robot.sensor_readings(10), vec![1., 2., 3.]);

        assert_eq!(
            robot.sensor_reading_at(3, 10),
            Err(RobotError::SensorIndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            robot.sensor_reading_named("left", 10),
            Err(RobotError::UnknownSensor("left".to_owned()))
        );

        let names: Vec<_> = robot.sensors().map(|sensor| sensor.name()).collect();
        assert_eq!(names, vec![Some("front"), None, Some("rear")]);
    }

    #[test]
    fn test_repeated_name_reads_first() {
        let mut robot = Robot2D::default();
        robot.add_sensor(Box::new(FixedRange::new(0.5)));
        robot.add_sensor(Box::new(FixedRange::named("sonar", 1.)));
        robot.add_sensor(Box::new(FixedRange::named("sonar", 2.)));

        assert_eq!(robot.sensor_reading_named("sonar", 1), Ok(1.));
        assert_eq!(robot.sensor_reading_at(2, 1), Ok(2.));
    }

    #[test]
    fn test_sensor_sees_pose_and_period() {
        let mut robot = Robot2D::default();
        robot.add_sensor(Box::new(FnSensor::new(|period: u32, pose: Pose| {
            (10. - pose.position.x) * period as f64
        })));

        robot.move_forward(4.);
        assert_abs_diff_eq!(robot.sensor_reading(2).unwrap(), 12., epsilon = EPSILON);
    }

    #[derive(Debug)]
    struct Counted(Arc<AtomicUsize>);

    impl RangeSensor for Counted {
        fn read(&mut self, _period: u32, _pose: Pose) -> f64 {
            0.
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_sensors_dropped_with_robot() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let mut robot = Robot2D::default();

        for _ in 0..5 {
            robot.add_sensor(Box::new(Counted(Arc::clone(&dropped))));
        }
        assert_eq!(robot.sensor_count(), 5);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);

        drop(robot);
        assert_eq!(dropped.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_shared_robot() {
        let shared = Robot2D::default().into_shared();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let robot = Arc::clone(&shared);
                std::thread::spawn(move || robot.lock().move_forward(1.))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_abs_diff_eq!(shared.lock().position().x, 4., epsilon = EPSILON);
    }
}
