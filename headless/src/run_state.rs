use std::{path::Path, time::Instant};

use robot::{Robot2D, RobotError, SensorError};

use crate::run_file::{Command, ReadFile, RunFile, SensorSelector};

#[derive(thiserror::Error, Debug)]
pub enum RunLoadError {
    #[error("IOError: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Deserialize: {0}")]
    DeserializeError(#[from] serde_norway::Error),
    #[error("SensorError: {0}")]
    SensorError(#[from] SensorError),
}

/// The outcome of one `read` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRecord {
    pub step: usize,
    pub request: ReadFile,
    pub result: Result<f64, RobotError>,
}

#[derive(Debug)]
pub struct RunState {
    pub robot: Robot2D,
    pub commands: Vec<Command>,
    pub readings: Vec<ReadRecord>,
}

impl RunState {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RunLoadError> {
        log::info!("Loading Path: {path:?}", path = path.as_ref());

        let file = std::fs::File::open(path.as_ref())?;
        let run_file: RunFile = serde_norway::from_reader(file)?;

        Self::new(run_file)
    }

    pub fn new(run_file: RunFile) -> Result<Self, RunLoadError> {
        let mut robot = Robot2D::from_pose(run_file.pose);
        for sensor in &run_file.sensors {
            robot.add_sensor(sensor.build()?);
        }

        log::info!(
            "Robot at {:?} with {} sensors and {} commands queued",
            robot.pose(),
            robot.sensor_count(),
            run_file.commands.len()
        );

        Ok(Self {
            robot,
            commands: run_file.commands,
            readings: Vec::new(),
        })
    }

    /// Replays every queued command. Failed reads are recorded and the run
    /// carries on.
    pub fn run(&mut self) {
        let start = Instant::now();

        for (step, command) in self.commands.iter().enumerate() {
            match command {
                Command::Forward(distance) => self.robot.move_forward(*distance),
                Command::Backward(distance) => self.robot.move_backward(*distance),
                Command::Rotate(degrees) => self.robot.rotate(*degrees),
                Command::Read(request) => {
                    let result = match &request.sensor {
                        None => self.robot.sensor_reading(request.period),
                        Some(SensorSelector::Index(index)) => {
                            self.robot.sensor_reading_at(*index, request.period)
                        }
                        Some(SensorSelector::Name(name)) => {
                            self.robot.sensor_reading_named(name, request.period)
                        }
                    };

                    match &result {
                        Ok(reading) => log::info!("Step {step}: read {reading}"),
                        Err(e) => log::error!("Step {step}: {e}"),
                    }

                    self.readings.push(ReadRecord {
                        step,
                        request: request.clone(),
                        result,
                    });
                }
            }
        }

        log::trace!(
            "Took {} ms to replay {} commands",
            start.elapsed().as_millis(),
            self.commands.len()
        );
    }
}
