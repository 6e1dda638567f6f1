use robot::{FixedRange, NoisyRange, Pose, RangeSensor, SensorError};
use serde::Deserialize;

#[derive(serde::Deserialize, Debug, Default)]
pub struct RunFile {
    #[serde(default, deserialize_with = "pose")]
    pub pose: Pose,
    #[serde(default)]
    pub sensors: Vec<SensorFile>,
    /// Written as single-key maps, `- forward: 5`.
    #[serde(default, with = "serde_norway::with::singleton_map_recursive")]
    pub commands: Vec<Command>,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SensorFile {
    Fixed {
        name: Option<String>,
        range: f64,
    },
    Noisy {
        name: Option<String>,
        range: f64,
        noise: f64,
        #[serde(default)]
        seed: u64,
    },
}

impl SensorFile {
    pub fn build(&self) -> Result<Box<dyn RangeSensor>, SensorError> {
        Ok(match self {
            SensorFile::Fixed { name, range } => Box::new(FixedRange {
                name: name.clone(),
                range: *range,
            }),
            SensorFile::Noisy {
                name,
                range,
                noise,
                seed,
            } => {
                let sensor = NoisyRange::new(*range, *noise, *seed)?;
                match name {
                    Some(name) => Box::new(sensor.with_name(name)),
                    None => Box::new(sensor),
                }
            }
        })
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Forward(f64),
    Backward(f64),
    /// Degrees.
    Rotate(f64),
    Read(ReadFile),
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SensorSelector {
    Index(usize),
    Name(String),
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ReadFile {
    #[serde(default = "default_period")]
    pub period: u32,
    #[serde(default)]
    pub sensor: Option<SensorSelector>,
}

fn default_period() -> u32 {
    1
}

/// `[x, y]`, `[x, y, orientation]` or `{ x, y, orientation }`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PoseFile {
    Point(f64, f64),
    Placed(f64, f64, f64),
    Map {
        x: f64,
        y: f64,
        #[serde(default)]
        orientation: f64,
    },
}

fn pose<'de, D>(d: D) -> Result<Pose, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match PoseFile::deserialize(d)? {
        PoseFile::Point(x, y) => Pose::new(x, y, 0.),
        PoseFile::Placed(x, y, orientation) | PoseFile::Map { x, y, orientation } => {
            Pose::new(x, y, orientation)
        }
    })
}
