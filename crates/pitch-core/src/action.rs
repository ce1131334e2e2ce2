use serde::{Deserialize, Serialize};

use crate::{Pose, RoleId};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Foot {
    #[default]
    Left,
    Right,
}

/// Parameters of a walk request. Also used to stand (all zeros, bend 0).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WalkCommand {
    /// Forward speed in mm/s
    pub forward: f64,
    /// Leftward speed in mm/s
    pub left: f64,
    /// Turn rate in rad/s, counter-clockwise positive
    pub turn: f64,
    pub power: f64,
    /// 1 walks with bent knees, 0 stands straight
    pub bend: f64,
    /// Fraction of the maximum walk speed, in [0, 1]
    pub speed: f64,
    pub foot: Foot,
    /// Short sideways-safe steps, used when something is in front of us
    pub use_shuffle: bool,
    pub left_arm_behind: bool,
    pub right_arm_behind: bool,
    pub blocking: bool,
}

impl WalkCommand {
    pub fn new(forward: f64, left: f64, turn: f64) -> Self {
        Self {
            forward,
            left,
            turn,
            power: 0.0,
            bend: 1.0,
            speed: 1.0,
            foot: Foot::Left,
            use_shuffle: false,
            left_arm_behind: false,
            right_arm_behind: false,
            blocking: false,
        }
    }

    pub fn stand() -> Self {
        Self {
            power: 0.1,
            bend: 0.0,
            ..Self::new(0.0, 0.0, 0.0)
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_shuffle(mut self, use_shuffle: bool) -> Self {
        self.use_shuffle = use_shuffle;
        self
    }
}

/// Motions that take no parameters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAction {
    StandStraight,
    Sit,
    Initial,
    MotionCalibrate,
    GoalieDiveLeft,
    GoalieDiveRight,
    GoalieCentre,
    GoalieUncentre,
    GoalieStand,
    DefenderCentre,
    TestArms,
    RaiseArm,
    SignalKickInLeft,
    SignalKickInRight,
    SignalGoalKickLeft,
    SignalGoalKickRight,
    SignalCornerKickLeft,
    SignalCornerKickRight,
    SignalGoalLeft,
    SignalGoalRight,
    SignalPushingFreeKickLeft,
    SignalPushingFreeKickRight,
    SignalFullTime,
}

/// What the legs should do this cycle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum BodyCommand {
    Walk(WalkCommand),
    Kick {
        power: f64,
        foot: Foot,
        turn: f64,
        extra_stable: bool,
    },
    Special {
        action: SpecialAction,
    },
}

impl Default for BodyCommand {
    fn default() -> Self {
        BodyCommand::Walk(WalkCommand::stand())
    }
}

/// Where the head should look this cycle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct HeadCommand {
    /// Neck yaw in radians
    pub yaw: f64,
    /// Neck pitch in radians
    pub pitch: f64,
    /// Whether yaw and pitch are offsets from the current joint angles
    pub is_relative: bool,
    /// Fraction of the maximum yaw speed
    pub yaw_speed: f64,
    /// Fraction of the maximum pitch speed
    pub pitch_speed: f64,
}

impl Default for HeadCommand {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            is_relative: false,
            yaw_speed: 1.0,
            pitch_speed: 1.0,
        }
    }
}

/// State this robot broadcasts to its teammates.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BehaviourSharedData {
    /// The positioning role this robot occupies
    pub role: RoleId,
    pub playing_ball: bool,
    pub need_assistance: bool,
    pub is_assisting: bool,
    /// Negative if we never kicked
    pub seconds_since_last_kick: f64,
    pub is_kicked_off: bool,
    /// The pose this robot is heading for
    pub walking_to: Pose,
    pub kick_notification: bool,
}

/// Human-readable traces of the nodes that ran this cycle.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BehaviourDebugInfo {
    pub body_behaviour_hierarchy: String,
    pub head_behaviour_hierarchy: String,
}

/// The full output of one behaviour cycle.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ActionRequest {
    pub body: BodyCommand,
    pub head: HeadCommand,
    pub shared: BehaviourSharedData,
    pub debug: BehaviourDebugInfo,
}
