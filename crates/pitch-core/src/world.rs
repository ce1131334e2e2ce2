use serde::{Deserialize, Serialize};

use crate::{geom::ROBOTS_PER_TEAM, PlayerNumber, Pose, RoleId, Vector2};

/// Age reported for an estimate that was never observed.
pub const NEVER_SEEN_SECONDS: f64 = 100_000.0;

/// Game state as announced by the game controller.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Initial,
    Ready,
    Set,
    Playing,
    Finished,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Normal,
    PenaltyShoot,
    Overtime,
    Timeout,
}

/// The set play currently in progress, if any.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetPlay {
    #[default]
    None,
    GoalKick,
    PushingFreeKick,
    CornerKick,
    KickIn,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct GameStateData {
    /// The state of the current game
    pub state: GameState,
    pub phase: GamePhase,
    pub set_play: SetPlay,
    /// Whether our team is the one taking the current kick-off or set play
    pub we_are_kicking_team: bool,
    /// Whether this robot is currently penalised
    pub penalised: bool,
}

/// The ball as estimated by this robot alone.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct EgoBall {
    /// Position in the field frame, in mm
    pub position: Vector2,
    /// Velocity in the field frame, in mm/s
    pub velocity: Vector2,
    /// Seconds since this robot last saw the ball
    pub lost_seconds: f64,
}

impl Default for EgoBall {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            lost_seconds: NEVER_SEEN_SECONDS,
        }
    }
}

/// The ball as estimated from the whole team's broadcasts.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TeamBall {
    /// Position in the field frame, in mm
    pub position: Vector2,
    /// Velocity in the field frame, in mm/s
    pub velocity: Vector2,
    /// Seconds since a teammate last broadcast a ball observation
    pub seconds_since_update: f64,
}

impl Default for TeamBall {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            seconds_since_update: NEVER_SEEN_SECONDS,
        }
    }
}

/// What we last heard from a teammate.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TeammateData {
    pub number: PlayerNumber,
    pub pose: Pose,
    /// The teammate's own ball estimate, in the field frame
    pub ego_ball: Vector2,
    /// Seconds since the teammate last reported seeing the ball
    pub seconds_since_ball_update: f64,
    /// Whether the teammate claims to be playing the ball
    pub playing_ball: bool,
    /// The positioning role the teammate broadcast
    pub role: RoleId,
    /// Penalised, fallen over, or not communicating
    pub incapacitated: bool,
}

impl Default for TeammateData {
    fn default() -> Self {
        Self {
            number: PlayerNumber::new(0),
            pose: Pose::default(),
            ego_ball: Vector2::zeros(),
            seconds_since_ball_update: NEVER_SEEN_SECONDS,
            playing_ball: false,
            role: RoleId::NONE,
            incapacitated: false,
        }
    }
}

/// Raw sensor readings the behaviours react to.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SensorData {
    /// Either bumper of the left foot is pressed
    pub left_foot_bumper: bool,
    /// Either bumper of the right foot is pressed
    pub right_foot_bumper: bool,
    /// Distance to the nearest echo of the left sonar, in metres
    pub sonar_left: f64,
    /// Distance to the nearest echo of the right sonar, in metres
    pub sonar_right: f64,
    /// Measured head yaw joint angle, in radians
    pub head_yaw: f64,
    /// Measured head pitch joint angle, in radians
    pub head_pitch: f64,
}

impl Default for SensorData {
    fn default() -> Self {
        Self {
            left_foot_bumper: false,
            right_foot_bumper: false,
            sonar_left: 2.55,
            sonar_right: 2.55,
            head_yaw: 0.0,
            head_pitch: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct KinematicsParameters {
    /// Calibration offset of the bottom camera pitch, in degrees
    pub camera_pitch_bottom: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct PoseUncertainty {
    /// Standard deviation of the position estimate, in mm
    pub position: f64,
    /// Standard deviation of the heading estimate, in radians
    pub heading: f64,
}

/// Everything the behaviours may read during one control cycle.
///
/// Built once per tick by the host and never mutated by the behaviours.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct WorldSnapshot {
    /// Monotonic time of this cycle, in seconds
    pub timestamp: f64,
    /// Our own jersey number
    pub player_number: PlayerNumber,
    pub pose: Pose,
    pub pose_uncertainty: PoseUncertainty,
    pub ego_ball: EgoBall,
    pub team_ball: TeamBall,
    /// Teammates we heard from. Missing numbers count as incapacitated.
    pub teammates: Vec<TeammateData>,
    pub game: GameStateData,
    pub sensors: SensorData,
    pub kinematics: KinematicsParameters,
}

impl Default for WorldSnapshot {
    fn default() -> Self {
        Self {
            timestamp: 0.0,
            player_number: PlayerNumber::new(2),
            pose: Pose::default(),
            pose_uncertainty: PoseUncertainty::default(),
            ego_ball: EgoBall::default(),
            team_ball: TeamBall::default(),
            teammates: Vec::new(),
            game: GameStateData::default(),
            sensors: SensorData::default(),
            kinematics: KinematicsParameters::default(),
        }
    }
}

impl WorldSnapshot {
    /// Whether the team ball is more trustworthy than our own estimate.
    ///
    /// `time_padding` biases the decision towards the ego ball and absorbs the
    /// team's limited broadcast rate.
    pub fn believe_more_in_team_ball(&self, time_padding: f64) -> bool {
        self.ego_ball.lost_seconds > self.team_ball.seconds_since_update + time_padding
    }

    /// The ball position we act on.
    pub fn ball_position(&self, time_padding: f64) -> Vector2 {
        if self.believe_more_in_team_ball(time_padding) {
            self.team_ball.position
        } else {
            self.ego_ball.position
        }
    }

    /// Seconds since this robot last saw the ball.
    pub fn ball_lost_seconds(&self) -> f64 {
        self.ego_ball.lost_seconds
    }

    /// Seconds since anyone on the team saw the ball.
    pub fn seconds_since_any_ball(&self) -> f64 {
        self.ego_ball
            .lost_seconds
            .min(self.team_ball.seconds_since_update)
    }

    pub fn teammate(&self, number: PlayerNumber) -> Option<&TeammateData> {
        self.teammates.iter().find(|t| t.number == number)
    }

    /// The pose of any player on our team, including ourselves.
    pub fn player_pose(&self, number: PlayerNumber) -> Option<Pose> {
        if number == self.player_number {
            Some(self.pose)
        } else {
            self.teammate(number).map(|t| t.pose)
        }
    }

    pub fn player_is_incapacitated(&self, number: PlayerNumber) -> bool {
        if number == self.player_number {
            return false;
        }
        self.teammate(number).map_or(true, |t| t.incapacitated)
    }

    /// Jersey numbers of every player that is able to play, in ascending order.
    pub fn active_player_numbers(&self) -> Vec<PlayerNumber> {
        (1..=ROBOTS_PER_TEAM)
            .map(PlayerNumber::new)
            .filter(|n| !self.player_is_incapacitated(*n))
            .collect()
    }

    pub fn in_goal_kick(&self) -> bool {
        self.game.set_play == SetPlay::GoalKick
    }

    pub fn in_pushing_free_kick(&self) -> bool {
        self.game.set_play == SetPlay::PushingFreeKick
    }

    pub fn in_kick_in(&self) -> bool {
        self.game.set_play == SetPlay::KickIn
    }

    pub fn we_are_kicking_team(&self) -> bool {
        self.game.we_are_kicking_team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Angle;

    fn teammate(number: u8, incapacitated: bool) -> TeammateData {
        TeammateData {
            number: PlayerNumber::new(number),
            pose: Pose::new(100.0 * number as f64, 0.0, Angle::ZERO),
            incapacitated,
            ..Default::default()
        }
    }

    #[test]
    fn test_believe_more_in_team_ball() {
        let mut world = WorldSnapshot::default();
        world.ego_ball.position = Vector2::new(1.0, 0.0);
        world.team_ball.position = Vector2::new(2.0, 0.0);
        world.ego_ball.lost_seconds = 3.0;
        world.team_ball.seconds_since_update = 1.0;

        assert!(world.believe_more_in_team_ball(1.5));
        assert_eq!(world.ball_position(1.5).x, 2.0);
        assert!(!world.believe_more_in_team_ball(2.5));
        assert_eq!(world.ball_position(2.5).x, 1.0);
    }

    #[test]
    fn test_active_player_numbers() {
        let mut world = WorldSnapshot::default();
        world.player_number = PlayerNumber::new(3);
        world.teammates = vec![teammate(1, false), teammate(2, true), teammate(5, false)];

        let active: Vec<u8> = world
            .active_player_numbers()
            .iter()
            .map(|n| n.as_u8())
            .collect();
        assert_eq!(active, vec![1, 3, 5]);
    }

    #[test]
    fn test_player_pose_includes_self() {
        let mut world = WorldSnapshot::default();
        world.player_number = PlayerNumber::new(4);
        world.pose = Pose::new(-1.0, -2.0, Angle::ZERO);
        world.teammates = vec![teammate(1, false)];

        assert_eq!(world.player_pose(PlayerNumber::new(4)), Some(world.pose));
        assert_eq!(world.player_pose(PlayerNumber::new(1)).map(|p| p.position.x), Some(100.0));
        assert_eq!(world.player_pose(PlayerNumber::new(6)), None);
    }

    #[test]
    fn test_deserialize_partial_snapshot() {
        let json = r#"{
            "timestamp": 12.5,
            "player_number": 3,
            "pose": { "position": [100.0, -200.0], "heading": 0.5 },
            "game": { "state": "playing", "set_play": "kick_in" }
        }"#;
        let world: WorldSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(world.player_number, PlayerNumber::new(3));
        assert_eq!(world.pose.position.y, -200.0);
        assert!(world.in_kick_in());
        assert_eq!(world.game.state, GameState::Playing);
        assert!(world.teammates.is_empty());
    }
}
