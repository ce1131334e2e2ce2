use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Rates of the turn-walk-turn travel time estimate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    /// Turn rate used to face the target, in rad/s.
    pub turn_rate: f64,
    /// Straight-line walk speed, in mm/s.
    pub walk_rate: f64,
    /// Rate of the final circle-strafe onto the target heading, in rad/s.
    pub circle_strafe_rate: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            turn_rate: 60.0f64.to_radians(),
            walk_rate: 300.0,
            circle_strafe_rate: 40.0f64.to_radians(),
        }
    }
}

/// Which team positioning the field players use while the ball is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositioningKind {
    #[default]
    AgainstKickingTeam,
    AgainstDribbleTeam,
}

/// Tuning of the behaviour layer, loaded by the host before the first tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourSettings {
    /// Name of the body skill to run.
    pub body_skill: String,
    /// Name of the head skill to run.
    pub head_skill: String,
    /// Extra seconds the team ball must be fresher than our own ball before we
    /// trust it instead.
    pub team_ball_time_padding: f64,
    /// A teammate's own ball estimate older than this (in seconds) is replaced by
    /// ours when bidding for roles.
    pub stale_teammate_ball_seconds: f64,
    /// Cap on the walk speed fraction, in [0, 1].
    pub walk_speed_cap: f64,
    /// Seconds without any ball sighting before field players spread out to search.
    pub find_ball_after_seconds: f64,
    pub positioning: PositioningKind,
    pub cost: CostSettings,
}

impl Default for BehaviourSettings {
    fn default() -> Self {
        Self {
            body_skill: "Game".to_string(),
            head_skill: "HeadFindBall".to_string(),
            team_ball_time_padding: 1.5,
            stale_teammate_ball_seconds: 5.0,
            walk_speed_cap: 0.6,
            find_ball_after_seconds: 6.0,
            positioning: PositioningKind::default(),
            cost: CostSettings::default(),
        }
    }
}

impl BehaviourSettings {
    /// Load the settings from the given file, or write the defaults there if it
    /// does not exist yet.
    pub fn load_or_insert(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    log::error!("Failed to parse behaviour settings: {}", err);
                    Ok(Self::default())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.store(path)?;
                Ok(settings)
            }
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read behaviour settings from {}", path.display())
            }),
        }
    }

    /// Store the settings in the given file.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write behaviour settings to {}", path.display()))
    }
}
