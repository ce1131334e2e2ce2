use pitch_core::{Angle, BehaviourSettings, CostSettings, Pose, RoleId, Vector2, WorldSnapshot};

use super::{
    solve_minimax, time_to_reach_pose, Positioning, PositioningDecision, RoleCatalog,
    RoleDefinition, RoleEvaluator, RoleTarget,
};
use crate::behaviour::BehaviourError;

pub const FINDER: RoleId = RoleId::new(20);

/// Most finders the spread tables cover.
const MAX_FINDERS: usize = 5;

/// Search spots spread along the field, one table per number of finders.
fn search_positions(finders: usize) -> Vec<Vector2> {
    let spots: &[(f64, f64)] = match finders {
        2 => &[(-3500.0, 500.0), (-1500.0, -500.0)],
        3 => &[(-3500.0, 500.0), (-1500.0, -500.0), (1000.0, 500.0)],
        4 => &[(-3500.0, 500.0), (-2000.0, -500.0), (1000.0, 500.0), (3000.0, -500.0)],
        5 => &[
            (-4000.0, 500.0),
            (-2500.0, -500.0),
            (500.0, 500.0),
            (2000.0, -500.0),
            (3000.0, 500.0),
        ],
        _ => &[(-3000.0, 0.0)],
    };
    spots.iter().map(|(x, y)| Vector2::new(*x, *y)).collect()
}

/// Spreads every robot that lost the ball over the field.
pub struct Finder {
    rates: CostSettings,
}

impl Finder {
    pub fn new(rates: CostSettings) -> Self {
        Self { rates }
    }

    /// This robot at `robot_pos` first, then the teammates that broadcast the
    /// finder role.
    fn finder_poses(robot_pos: Vector2, world: &WorldSnapshot) -> Vec<Pose> {
        let mut poses = vec![Pose {
            position: robot_pos,
            heading: world.pose.heading,
        }];
        for number in world.active_player_numbers() {
            if number == world.player_number {
                continue;
            }
            if let Some(teammate) = world.teammate(number) {
                if teammate.role == FINDER {
                    poses.push(teammate.pose);
                }
            }
        }
        if poses.len() > MAX_FINDERS {
            log::debug!("{} finders, only spreading the first {}", poses.len(), MAX_FINDERS);
            poses.truncate(MAX_FINDERS);
        }
        poses
    }
}

impl RoleEvaluator for Finder {
    fn evaluate(
        &mut self,
        robot_pos: Vector2,
        _ball_pos: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        let poses = Self::finder_poses(robot_pos, world);
        let spots = search_positions(poses.len());
        let costs: Vec<Vec<f64>> = poses
            .iter()
            .map(|pose| {
                spots
                    .iter()
                    .map(|spot| time_to_reach_pose(pose, *spot, None, &self.rates))
                    .collect()
            })
            .collect();

        let assignment = solve_minimax(&costs)?;
        let spot = assignment
            .role_of(0)
            .and_then(|index| spots.get(index))
            .ok_or(BehaviourError::AssignmentDegenerate {
                agents: poses.len(),
                roles: spots.len(),
            })?;
        Ok(RoleTarget {
            position: *spot,
            heading: Angle::ZERO,
            position_error: 400.0,
            heading_error: Angle::from_degrees(30.0),
        })
    }
}

/// Positioning used while nobody on the team knows where the ball is.
pub struct PositioningFindBall {
    catalog: RoleCatalog,
}

impl PositioningFindBall {
    pub fn new(rates: CostSettings) -> Result<Self, BehaviourError> {
        let catalog =
            RoleCatalog::new(vec![RoleDefinition::new("finder", FINDER, Finder::new(rates))])?;
        Ok(Self { catalog })
    }
}

impl Positioning for PositioningFindBall {
    fn name(&self) -> &'static str {
        "PositioningFindBall"
    }

    fn evaluate(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<PositioningDecision, BehaviourError> {
        let ball = world.ball_position(settings.team_ball_time_padding);
        let target = self.catalog.evaluate(0, world.pose.position, ball, world)?;
        Ok(PositioningDecision {
            role_name: "finder",
            role_id: FINDER,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use pitch_core::{PlayerNumber, TeammateData};

    use super::*;

    fn finder_mate(number: u8, x: f64, y: f64) -> TeammateData {
        TeammateData {
            number: PlayerNumber::new(number),
            pose: Pose::new(x, y, Angle::ZERO),
            role: FINDER,
            ..Default::default()
        }
    }

    #[test]
    fn test_lone_finder() {
        let world = WorldSnapshot::default();
        let mut positioning = PositioningFindBall::new(CostSettings::default()).unwrap();
        let decision = positioning
            .evaluate(&world, &BehaviourSettings::default())
            .unwrap();
        assert_eq!(decision.role_id, FINDER);
        assert_eq!(decision.target.position, Vector2::new(-3000.0, 0.0));
        assert_eq!(decision.target.heading, Angle::ZERO);
    }

    #[test]
    fn test_finders_split_the_field() {
        let mut world = WorldSnapshot::default();
        world.pose = Pose::new(-3400.0, 500.0, Angle::ZERO);
        world.teammates.push(finder_mate(3, -1600.0, -500.0));
        let mut positioning = PositioningFindBall::new(CostSettings::default()).unwrap();
        let decision = positioning
            .evaluate(&world, &BehaviourSettings::default())
            .unwrap();
        assert_eq!(decision.target.position, Vector2::new(-3500.0, 500.0));

        world.pose = Pose::new(-1400.0, -500.0, Angle::ZERO);
        world.teammates[0].pose = Pose::new(-3600.0, 500.0, Angle::ZERO);
        let decision = positioning
            .evaluate(&world, &BehaviourSettings::default())
            .unwrap();
        assert_eq!(decision.target.position, Vector2::new(-1500.0, -500.0));
    }

    #[test]
    fn test_spread_is_capped() {
        let mut world = WorldSnapshot::default();
        world.player_number = PlayerNumber::GOALIE;
        for number in 2..=6 {
            world
                .teammates
                .push(finder_mate(number, -4000.0 + 1000.0 * f64::from(number), 0.0));
        }
        let poses = Finder::finder_poses(Vector2::zeros(), &world);
        assert_eq!(poses.len(), MAX_FINDERS);

        let target = Finder::new(CostSettings::default())
            .evaluate(Vector2::zeros(), Vector2::zeros(), &world)
            .unwrap();
        assert!(search_positions(MAX_FINDERS).contains(&target.position));
    }

    #[test]
    fn test_teammates_in_other_roles_are_ignored() {
        let mut world = WorldSnapshot::default();
        let mut mate = finder_mate(3, 0.0, 0.0);
        mate.role = RoleId::new(10);
        world.teammates.push(mate);
        assert_eq!(Finder::finder_poses(Vector2::zeros(), &world).len(), 1);
    }
}
