//! Simulation-side data model consumed by feature, target, and MDP builders.
use serde::{Deserialize, Serialize};

/// Recording interval of the ground-truth future poses in a [`Scene`], in seconds.
pub const SCENE_DT: f64 = 0.1;

/// Width of the ego-status feature vector: velocity (2) + acceleration (2) + command (4).
pub const EGO_STATUS_DIM: i64 = 8;

/// Discretization of future ego poses for supervision and prediction.
///
/// Fixed at agent construction and shared by the model and the target
/// builder, so both always agree on the number of predicted poses.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySampling {
    /// How far into the future poses are sampled, in seconds.
    pub time_horizon: f64,
    /// Time between consecutive sampled poses, in seconds.
    pub interval_length: f64,
}

impl Default for TrajectorySampling {
    fn default() -> Self {
        Self {
            time_horizon: 4.0,
            interval_length: 0.5,
        }
    }
}

impl TrajectorySampling {
    /// Number of future poses sampled over the horizon.
    #[must_use]
    pub fn num_poses(&self) -> i64 {
        (self.time_horizon / self.interval_length).round() as i64
    }

    /// Number of recorded scene steps between consecutive sampled poses.
    #[must_use]
    pub fn scene_stride(&self) -> usize {
        (self.interval_length / SCENE_DT).round() as usize
    }
}

/// Which frames of a sensor stream the harness should load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorSelection {
    /// Do not load this sensor.
    None,
    /// Load every available frame.
    All,
    /// Load only the listed history-frame indices.
    Frames(Vec<usize>),
}

/// Per-sensor loading selection for a simulation sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    pub cam_front: SensorSelection,
    pub cam_left: SensorSelection,
    pub cam_right: SensorSelection,
    pub cam_back: SensorSelection,
    pub lidar: SensorSelection,
}

impl SensorConfig {
    /// Configuration with every sensor fully enabled.
    #[must_use]
    pub const fn all_sensors() -> Self {
        Self {
            cam_front: SensorSelection::All,
            cam_left: SensorSelection::All,
            cam_right: SensorSelection::All,
            cam_back: SensorSelection::All,
            lidar: SensorSelection::All,
        }
    }

    /// Configuration with every sensor disabled.
    #[must_use]
    pub const fn no_sensors() -> Self {
        Self {
            cam_front: SensorSelection::None,
            cam_left: SensorSelection::None,
            cam_right: SensorSelection::None,
            cam_back: SensorSelection::None,
            lidar: SensorSelection::None,
        }
    }
}

/// A 2D ego pose in the local coordinate frame of the current ego position.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EgoPose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

/// High-level routing command for the current scene.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingCommand {
    TurnLeft,
    Straight,
    TurnRight,
    Unknown,
}

impl DrivingCommand {
    /// One-hot encoding, in declaration order.
    #[must_use]
    pub const fn one_hot(self) -> [f32; 4] {
        match self {
            Self::TurnLeft => [1.0, 0.0, 0.0, 0.0],
            Self::Straight => [0.0, 1.0, 0.0, 0.0],
            Self::TurnRight => [0.0, 0.0, 1.0, 0.0],
            Self::Unknown => [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Kinematic state of the ego vehicle at the current frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgoStatus {
    /// Velocity in the local frame, m/s.
    pub velocity: [f32; 2],
    /// Acceleration in the local frame, m/s^2.
    pub acceleration: [f32; 2],
    /// Routing command issued by the planner above.
    pub command: DrivingCommand,
}

/// One annotated simulation sample.
///
/// Produced by the harness from logs or closed-loop rollouts; builders turn
/// it into the tensors the model trains on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Current ego kinematic state.
    pub ego_status: EgoStatus,
    /// Scene embedding from the perception stack, fixed width per config.
    pub scene_embedding: Vec<f32>,
    /// Ground-truth future poses, one per [`SCENE_DT`] starting at `SCENE_DT`.
    pub future_poses: Vec<EgoPose>,
    /// Per-step reward annotations from closed-loop scoring.
    pub step_rewards: Vec<f32>,
}

#[cfg(test)]
mod trajectory_sampling {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.0, 0.5, 8)]
    #[case(8.0, 0.5, 16)]
    #[case(4.0, 1.0, 4)]
    #[case(3.0, 0.1, 30)]
    fn num_poses(#[case] time_horizon: f64, #[case] interval_length: f64, #[case] expected: i64) {
        let sampling = TrajectorySampling {
            time_horizon,
            interval_length,
        };
        assert_eq!(sampling.num_poses(), expected);
    }

    #[test]
    fn default_is_eight_poses() {
        let sampling = TrajectorySampling::default();
        assert_eq!(sampling.num_poses(), 8);
        assert_eq!(sampling.scene_stride(), 5);
    }
}

#[cfg(test)]
mod sensor_config {
    use super::*;

    #[test]
    fn all_sensors_enables_everything() {
        let config = SensorConfig::all_sensors();
        for selection in [
            &config.cam_front,
            &config.cam_left,
            &config.cam_right,
            &config.cam_back,
            &config.lidar,
        ] {
            assert_eq!(*selection, SensorSelection::All);
        }
    }
}
