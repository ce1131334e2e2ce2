//! Positioning against teams that dribble the ball rather than kick it.
//!
//! Two supporters and the ball player form a triangle around the ball, a
//! shooter waits where a cleared ball would land and a sweeper stays behind the
//! triangle. The goalie bids like everyone else:
//!
//! | bidders | roles                                                |
//! |---------|------------------------------------------------------|
//! | 1       | right_supporter                                      |
//! | 2       | right_supporter, shooter                             |
//! | 3       | right_supporter, shooter, left_supporter             |
//! | 4       | right_supporter, shooter, left_supporter, sweeper    |

use pitch_core::{
    geom::{enemy_goal_centre, is_in_our_goal_box, our_goal_centre, GOAL_BOX_LENGTH},
    math::{clamp, interpolate_clamped, vector_from_dist_heading},
    Angle, BehaviourSettings, RoleId, Vector2, WorldSnapshot,
};

use super::{
    kicking_team::{
        facing_ball, left_side_flag, our_corner_flag, supporter_corner_position,
        supporter_default_position, supporter_near_box_position, supporter_set_play_position,
    },
    DeadZoneHysteresis, Positioning, PositioningDecision, RoleBidding, RoleCatalog,
    RoleDefinition, RoleEvaluator, RoleTarget,
};
use crate::behaviour::BehaviourError;

pub const RIGHT_SUPPORTER: RoleId = RoleId::new(30);
pub const SHOOTER: RoleId = RoleId::new(31);
pub const LEFT_SUPPORTER: RoleId = RoleId::new(32);
pub const SWEEPER: RoleId = RoleId::new(33);

/// Sticky "is the sweeper inside our goal box" check. `None` while no active
/// teammate broadcasts the sweeper role.
fn sweeper_in_goal_box(was_inside: bool, world: &WorldSnapshot) -> Option<bool> {
    let sweeper = world
        .active_player_numbers()
        .into_iter()
        .filter(|number| *number != world.player_number)
        .filter_map(|number| world.teammate(number))
        .find(|teammate| teammate.role == SWEEPER)?;
    let buff = if was_inside { 200.0 } else { 0.0 };
    Some(is_in_our_goal_box(sweeper.pose.position, buff, buff))
}

/// One corner of the triangle around the ball. Positions like the supporter
/// against kicking teams, shifted sideways by `y_offset`, with the sweeper
/// standing in for the goalie.
pub struct SideSupporter {
    y_offset: f64,
    in_left_side: DeadZoneHysteresis,
    in_our_corner: DeadZoneHysteresis,
    near_our_goal_box: bool,
    sweeper_in_goal_box: bool,
}

impl SideSupporter {
    const MIN_X_WHEN_SWEEPER_IN_BOX: f64 = -3500.0;
    const MAX_ABS_Y: f64 = 2700.0;

    fn new(y_offset: f64) -> Self {
        Self {
            y_offset,
            in_left_side: left_side_flag(300.0),
            in_our_corner: our_corner_flag(),
            near_our_goal_box: false,
            sweeper_in_goal_box: false,
        }
    }

    pub fn right() -> Self {
        Self::new(-750.0)
    }

    pub fn left() -> Self {
        Self::new(750.0)
    }

    fn update_flags(&mut self, ball: Vector2, world: &WorldSnapshot) {
        self.in_left_side.evaluate(ball.y);
        self.in_our_corner
            .evaluate(Angle::between_points(our_goal_centre(), ball).abs());
        let buff = if self.near_our_goal_box { 300.0 } else { 100.0 };
        self.near_our_goal_box = is_in_our_goal_box(ball, buff, buff);
        if let Some(inside) = sweeper_in_goal_box(self.sweeper_in_goal_box, world) {
            self.sweeper_in_goal_box = inside;
        }
    }
}

impl RoleEvaluator for SideSupporter {
    fn evaluate(
        &mut self,
        _robot_pos: Vector2,
        ball: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        self.update_flags(ball, world);
        let left = self.in_left_side.is_above();
        let sweeper_in_box = self.sweeper_in_goal_box;

        let mut position = if let Some(position) = supporter_set_play_position(ball, world, left) {
            position
        } else if self.near_our_goal_box {
            supporter_near_box_position(ball, sweeper_in_box, left)
        } else if self.in_our_corner.is_above() {
            supporter_corner_position(sweeper_in_box, GOAL_BOX_LENGTH, left)
        } else {
            supporter_default_position(ball, sweeper_in_box, left)
        };

        position.y += self.y_offset;
        if sweeper_in_box {
            position.x = position.x.max(Self::MIN_X_WHEN_SWEEPER_IN_BOX);
        }
        position.y = clamp(position.y, -Self::MAX_ABS_Y, Self::MAX_ABS_Y);
        Ok(facing_ball(position, ball, 200.0, 15.0))
    }
}

/// Waits up the field where the ball is most likely cleared to, off to the
/// other side of the ball, turned partly towards the enemy goal.
pub struct Shooter;

impl Shooter {
    const MAX_X: f64 = 3250.0;
    const MAX_ABS_Y: f64 = 2000.0;
    const SIDE_STEP: f64 = 1250.0;

    fn position(ball: Vector2) -> Vector2 {
        let goal_to_ball = (ball - enemy_goal_centre()).norm();
        let dist_to_ball = interpolate_clamped(goal_to_ball, 2000.0, 1200.0, 6000.0, 4000.0);
        let heading = Angle::between_points(ball, enemy_goal_centre());
        let mut position = ball + vector_from_dist_heading(dist_to_ball, heading);

        // A ball on the centre line counts as on the right
        if ball.y > 1.1 {
            position.y -= Self::SIDE_STEP;
        } else {
            position.y += Self::SIDE_STEP;
        }
        position.x = position.x.min(Self::MAX_X);
        position.y = clamp(position.y, -Self::MAX_ABS_Y, Self::MAX_ABS_Y);
        position
    }
}

impl RoleEvaluator for Shooter {
    fn evaluate(
        &mut self,
        _robot_pos: Vector2,
        ball: Vector2,
        _world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        let position = Self::position(ball);
        let to_ball = Angle::between_points(position, ball);
        let heading = if to_ball.radians() > 0.0 {
            to_ball - Angle::from_degrees(30.0)
        } else {
            to_ball + Angle::from_degrees(30.0)
        };
        Ok(RoleTarget {
            position,
            heading,
            position_error: 400.0,
            heading_error: Angle::from_degrees(20.0),
        })
    }
}

/// Stays between the ball and our goal, behind the triangle, and never crosses
/// the centre line.
pub struct Sweeper;

impl Sweeper {
    fn position(ball: Vector2) -> Vector2 {
        if ball.x < -2000.0 {
            return our_goal_centre() + Vector2::new(300.0, 0.0);
        }

        let ball_to_goal = our_goal_centre() - ball;
        let distance = ball_to_goal.norm().min(4000.0);
        let mut position =
            ball + vector_from_dist_heading(distance, Angle::of_vector(&ball_to_goal));
        if position.x > 0.0 {
            position.x = -1000.0;
        }
        if position.x < -4500.0 {
            position.x = -4300.0;
        }
        position
    }
}

impl RoleEvaluator for Sweeper {
    fn evaluate(
        &mut self,
        _robot_pos: Vector2,
        ball: Vector2,
        _world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        Ok(facing_ball(Self::position(ball), ball, 400.0, 15.0))
    }
}

pub struct PositioningAgainstDribbleTeam {
    bidding: RoleBidding,
}

impl PositioningAgainstDribbleTeam {
    pub fn new() -> Result<Self, BehaviourError> {
        let catalog = RoleCatalog::new(vec![
            RoleDefinition::new("right_supporter", RIGHT_SUPPORTER, SideSupporter::right()),
            RoleDefinition::new("shooter", SHOOTER, Shooter),
            RoleDefinition::new("left_supporter", LEFT_SUPPORTER, SideSupporter::left()),
            RoleDefinition::new("sweeper", SWEEPER, Sweeper),
        ])?;
        Ok(Self {
            bidding: RoleBidding::new(catalog, true),
        })
    }
}

impl Positioning for PositioningAgainstDribbleTeam {
    fn name(&self) -> &'static str {
        "PositioningAgainstDribbleTeam"
    }

    fn evaluate(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<PositioningDecision, BehaviourError> {
        self.bidding.evaluate(world, settings)
    }
}
