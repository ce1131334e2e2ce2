//! Positioning against teams that mostly kick the ball up the field.
//!
//! Besides the ball player, the field players fill these roles in priority order:
//!
//! | field players | roles                            |
//! |---------------|----------------------------------|
//! | 1             | supporter                        |
//! | 2             | supporter, defender              |
//! | 3             | supporter, defender, upfielder   |
//!
//! When several robots claim the ball, the surplus ball players take the
//! highest priority roles off the list, so the others keep their roles.

use pitch_core::{
    geom::{
        enemy_goal_centre, enemy_left_post, enemy_right_post, is_in_opponent_goal_box,
        is_in_our_goal_box, is_in_our_penalty_box, our_goal_centre, our_left_post,
        our_right_post, GOAL_BOX_LENGTH, GOAL_POST_ABS_Y, HALF_FIELD_LENGTH, PENALTY_AREA_LENGTH,
    },
    math::{clamp, closest_point_on_segment, interpolate_clamped, vector_from_dist_heading},
    Angle, BehaviourSettings, PlayerNumber, RoleId, Vector2, WorldSnapshot,
};

use super::{
    DeadZoneHysteresis, Positioning, PositioningDecision, RoleBidding, RoleCatalog,
    RoleDefinition, RoleEvaluator, RoleTarget,
};
use crate::behaviour::BehaviourError;

pub const SUPPORTER: RoleId = RoleId::new(10);
pub const DEFENDER: RoleId = RoleId::new(11);
pub const UPFIELDER: RoleId = RoleId::new(12);

/// Set play positions stay this far inside the goal lines.
const SET_PLAY_MAX_ABS_X: f64 = HALF_FIELD_LENGTH - 400.0;

pub(super) fn left_side_flag(margin: f64) -> DeadZoneHysteresis {
    DeadZoneHysteresis::new(-margin, margin, false)
}

pub(super) fn our_corner_flag() -> DeadZoneHysteresis {
    DeadZoneHysteresis::new(60f64.to_radians(), 70f64.to_radians(), false)
}

/// Sign of the y offsets that depend on which half the ball is in.
pub(super) fn side(in_left_side: bool) -> f64 {
    if in_left_side {
        1.0
    } else {
        -1.0
    }
}

/// Offset perpendicular to `heading`, to the right when the ball is on the left
/// side and to the left otherwise.
fn side_offset(distance: f64, heading: Angle, in_left_side: bool) -> Vector2 {
    let turn = if in_left_side { -90.0 } else { 90.0 };
    vector_from_dist_heading(distance, heading + Angle::from_degrees(turn))
}

/// Sticky "is the goalie inside this box" check. `stay_buff` grows the box once
/// the goalie is inside.
fn goalie_in_box(
    was_inside: bool,
    world: &WorldSnapshot,
    stay_buff: f64,
    in_box: fn(Vector2, f64, f64) -> bool,
) -> bool {
    if world.player_is_incapacitated(PlayerNumber::GOALIE) {
        return false;
    }
    let Some(goalie) = world.player_pose(PlayerNumber::GOALIE) else {
        return false;
    };
    let buff = if was_inside { stay_buff } else { 0.0 };
    in_box(goalie.position, buff, buff)
}

pub(super) fn facing_ball(
    position: Vector2,
    ball: Vector2,
    position_error: f64,
    heading_error_deg: f64,
) -> RoleTarget {
    RoleTarget {
        position,
        heading: Angle::between_points(position, ball),
        position_error,
        heading_error: Angle::from_degrees(heading_error_deg),
    }
}

/// Behind the ball on the line to our goal, offset to one side of the goal.
/// Stays nearer the goal centre line while `goalie_in_goal_box` is false.
pub(super) fn supporter_default_position(
    ball: Vector2,
    goalie_in_goal_box: bool,
    left: bool,
) -> Vector2 {
    let goal_to_ball = ball - our_goal_centre();
    let dist_to_ball = interpolate_clamped(goal_to_ball.norm(), 2000.0, 800.0, 4000.0, 1500.0);
    let position =
        ball + vector_from_dist_heading(dist_to_ball, Angle::of_vector(&-goal_to_ball));

    let offset = if goalie_in_goal_box { 300.0 } else { 200.0 };
    position + side_offset(offset, Angle::of_vector(&goal_to_ball), left)
}

/// With the ball in our corner: just outside the box the goalie guards, which
/// ends `box_length` in front of our goal line, or at the near post without one.
pub(super) fn supporter_corner_position(
    goalie_in_box: bool,
    box_length: f64,
    left: bool,
) -> Vector2 {
    if goalie_in_box {
        Vector2::new(-HALF_FIELD_LENGTH + box_length + 300.0, 400.0 * side(left))
    } else {
        let post = if left { our_left_post() } else { our_right_post() };
        post + Vector2::new(250.0, -200.0 * side(left))
    }
}

pub(super) fn supporter_near_box_position(
    ball: Vector2,
    goalie_in_box: bool,
    left: bool,
) -> Vector2 {
    if goalie_in_box {
        // Beside the ball, out of the goalie's way
        let y = if left {
            clamp(ball.y - 700.0, -400.0, 100.0)
        } else {
            clamp(ball.y + 700.0, -100.0, 400.0)
        };
        return Vector2::new(ball.x, y);
    }

    let x = if ball.y.abs() < GOAL_POST_ABS_Y - 200.0 {
        clamp(ball.x - 200.0, -HALF_FIELD_LENGTH - 100.0, -HALF_FIELD_LENGTH + 50.0)
    } else {
        -HALF_FIELD_LENGTH + 50.0
    };
    let max_y_abs = GOAL_POST_ABS_Y - 250.0;
    Vector2::new(x, clamp(ball.y, -max_y_abs, max_y_abs))
}

/// The supporter spot of the running set play, if there is one.
pub(super) fn supporter_set_play_position(
    ball: Vector2,
    world: &WorldSnapshot,
    left: bool,
) -> Option<Vector2> {
    let kicking = world.we_are_kicking_team();
    let goal_to_ball = Angle::between_points(our_goal_centre(), ball);

    let ball_from_supporter = if world.in_goal_kick() {
        if kicking {
            Vector2::new(500.0, 1000.0 * side(left))
        } else {
            Vector2::new(1600.0, 300.0 * side(left))
        }
    } else if world.in_pushing_free_kick() {
        if kicking {
            Vector2::new(500.0, 1000.0 * side(left))
        } else {
            goal_to_ball * Vector2::new(1600.0, 500.0 * side(left))
        }
    } else if world.in_kick_in() {
        if kicking {
            goal_to_ball * Vector2::new(500.0, 1000.0 * side(left))
        } else {
            // Block the path to the far post
            let post = if left { our_right_post() } else { our_left_post() };
            Angle::between_points(post, ball) * Vector2::new(2000.0, 0.0)
        }
    } else {
        return None;
    };

    let mut position = ball - ball_from_supporter;
    position.x = clamp(position.x, -SET_PLAY_MAX_ABS_X, SET_PLAY_MAX_ABS_X);
    Some(position)
}

/// Supports the ball player from slightly behind the ball, covering one side of
/// our goal. Takes special spots during set plays.
pub struct Supporter {
    in_left_side: DeadZoneHysteresis,
    in_our_corner: DeadZoneHysteresis,
    near_our_penalty_box: bool,
    goalie_in_goal_box: bool,
    goalie_in_penalty_box: bool,
}

impl Default for Supporter {
    fn default() -> Self {
        Self {
            in_left_side: left_side_flag(300.0),
            in_our_corner: our_corner_flag(),
            near_our_penalty_box: false,
            goalie_in_goal_box: false,
            goalie_in_penalty_box: false,
        }
    }
}

impl Supporter {
    const MIN_X_WHEN_GOALIE_IN_BOX: f64 = -HALF_FIELD_LENGTH + PENALTY_AREA_LENGTH + 200.0;

    fn update_flags(&mut self, ball: Vector2, world: &WorldSnapshot) {
        self.in_left_side.evaluate(ball.y);
        self.in_our_corner
            .evaluate(Angle::between_points(our_goal_centre(), ball).abs());
        let buff = if self.near_our_penalty_box { 300.0 } else { 100.0 };
        self.near_our_penalty_box = is_in_our_goal_box(ball, buff, buff);
        self.goalie_in_goal_box =
            goalie_in_box(self.goalie_in_goal_box, world, 200.0, is_in_our_goal_box);
        self.goalie_in_penalty_box =
            goalie_in_box(self.goalie_in_penalty_box, world, 200.0, is_in_our_penalty_box);
    }
}

impl RoleEvaluator for Supporter {
    fn evaluate(
        &mut self,
        _robot_pos: Vector2,
        ball: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        self.update_flags(ball, world);
        let left = self.in_left_side.is_above();

        let mut position = if let Some(position) = supporter_set_play_position(ball, world, left) {
            position
        } else if self.near_our_penalty_box {
            supporter_near_box_position(ball, self.goalie_in_penalty_box, left)
        } else if self.in_our_corner.is_above() {
            supporter_corner_position(self.goalie_in_penalty_box, PENALTY_AREA_LENGTH, left)
        } else {
            supporter_default_position(ball, self.goalie_in_goal_box, left)
        };

        if self.goalie_in_penalty_box {
            position.x = position.x.max(Self::MIN_X_WHEN_GOALIE_IN_BOX);
        }
        Ok(facing_ball(position, ball, 300.0, 15.0))
    }
}

/// Stands between the ball and our goal, blocking one side of the goal and the
/// crossing paths from our corners.
pub struct Defender {
    in_left_side: DeadZoneHysteresis,
    in_our_corner: DeadZoneHysteresis,
    near_our_goal_box: bool,
    goalie_in_goal_box: bool,
}

impl Default for Defender {
    fn default() -> Self {
        Self {
            in_left_side: left_side_flag(300.0),
            in_our_corner: our_corner_flag(),
            near_our_goal_box: false,
            goalie_in_goal_box: false,
        }
    }
}

impl Defender {
    const MIN_X_WHEN_GOALIE_IN_BOX: f64 = -HALF_FIELD_LENGTH + GOAL_BOX_LENGTH + 200.0;
    /// How far the strongest opponent kick travels, in mm.
    const MAX_OPPONENT_KICK_DISTANCE: f64 = 5000.0;

    fn update_flags(&mut self, ball: Vector2, world: &WorldSnapshot) {
        self.in_left_side.evaluate(ball.y);
        self.in_our_corner
            .evaluate(Angle::between_points(our_goal_centre(), ball).abs());
        let buff = if self.near_our_goal_box { 700.0 } else { 500.0 };
        self.near_our_goal_box = is_in_our_goal_box(ball, buff, buff);
        self.goalie_in_goal_box =
            goalie_in_box(self.goalie_in_goal_box, world, 200.0, is_in_our_goal_box);
    }

    fn near_our_goal_box_position(&self) -> Vector2 {
        let x = if self.goalie_in_goal_box {
            -HALF_FIELD_LENGTH + GOAL_BOX_LENGTH + 200.0
        } else {
            -HALF_FIELD_LENGTH
        };
        Vector2::new(x, -400.0 * side(self.in_left_side.is_above()))
    }

    fn our_corner_position(&self) -> Vector2 {
        let extra = if self.goalie_in_goal_box { 300.0 } else { 0.0 };
        Vector2::new(-HALF_FIELD_LENGTH + GOAL_BOX_LENGTH + extra, 0.0)
    }

    /// Where the opponent's strongest kick would just reach us, clamped to how far
    /// the defender may come out of the goal.
    fn close_and_far_points(&self, ball: Vector2) -> (Vector2, Vector2) {
        let goal_to_ball = ball - our_goal_centre();
        let beyond_kick = goal_to_ball.norm() - Self::MAX_OPPONENT_KICK_DISTANCE;
        let far_min = if self.goalie_in_goal_box { 1200.0 } else { 900.0 };
        let close = clamp(beyond_kick, 800.0, 3000.0);
        let far = clamp(beyond_kick, far_min, 3200.0);

        let heading = Angle::of_vector(&goal_to_ball);
        (
            our_goal_centre() + vector_from_dist_heading(close, heading),
            our_goal_centre() + vector_from_dist_heading(far, heading),
        )
    }

    fn default_position(&self, robot_pos: Vector2, ball: Vector2) -> Vector2 {
        let (close, far) = self.close_and_far_points(ball);
        let on_segment = closest_point_on_segment(robot_pos, close, far);
        let heading = Angle::between_points(our_goal_centre(), ball);
        on_segment + side_offset(300.0, heading, self.in_left_side.is_above())
    }
}

impl RoleEvaluator for Defender {
    fn evaluate(
        &mut self,
        robot_pos: Vector2,
        ball: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        self.update_flags(ball, world);

        let mut position = if self.near_our_goal_box {
            self.near_our_goal_box_position()
        } else if self.in_our_corner.is_above() {
            self.our_corner_position()
        } else {
            self.default_position(robot_pos, ball)
        };

        if self.goalie_in_goal_box {
            position.x = position.x.max(Self::MIN_X_WHEN_GOALIE_IN_BOX);
        }
        Ok(facing_ball(position, ball, 300.0, 10.0))
    }
}

/// Waits between the ball and an enemy post, off the shooting line, to follow up
/// on blocked shots and receive crosses.
pub struct Upfielder {
    in_left_side: DeadZoneHysteresis,
    in_enemy_corner: DeadZoneHysteresis,
    inside_enemy_goal_box: bool,
}

impl Default for Upfielder {
    fn default() -> Self {
        Self {
            in_left_side: left_side_flag(500.0),
            in_enemy_corner: DeadZoneHysteresis::new(
                40f64.to_radians(),
                60f64.to_radians(),
                false,
            ),
            inside_enemy_goal_box: false,
        }
    }
}

impl Upfielder {
    fn update_flags(&mut self, ball: Vector2) {
        self.in_left_side.evaluate(ball.y);
        self.in_enemy_corner
            .evaluate(Angle::between_points(ball, enemy_goal_centre()).abs());
        let buff = if self.inside_enemy_goal_box { 100.0 } else { -100.0 };
        self.inside_enemy_goal_box = is_in_opponent_goal_box(ball, buff, buff);
    }

    fn default_position(&self, robot_pos: Vector2, ball: Vector2) -> Vector2 {
        let left = self.in_left_side.is_above();
        let post = if left { enemy_right_post() } else { enemy_left_post() };

        let ball_to_post = post - ball;
        let distance = ball_to_post.norm();
        let heading = Angle::of_vector(&ball_to_post);
        let close = ball + vector_from_dist_heading((distance - 1200.0).min(4000.0), heading);
        let far = ball + vector_from_dist_heading((distance - 800.0).min(6000.0), heading);

        closest_point_on_segment(robot_pos, close, far) + side_offset(400.0, heading, left)
    }
}

impl RoleEvaluator for Upfielder {
    fn evaluate(
        &mut self,
        robot_pos: Vector2,
        ball: Vector2,
        _world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        self.update_flags(ball);

        let position = if self.in_enemy_corner.is_above() {
            Vector2::new(3500.0, 0.0)
        } else if self.inside_enemy_goal_box {
            ball - Vector2::new(800.0, 0.0)
        } else {
            self.default_position(robot_pos, ball)
        };
        Ok(facing_ball(position, ball, 400.0, 15.0))
    }
}

/// The goalie stays out of the bidding.
pub struct PositioningAgainstKickingTeam {
    bidding: RoleBidding,
}

impl PositioningAgainstKickingTeam {
    pub fn new() -> Result<Self, BehaviourError> {
        let catalog = RoleCatalog::new(vec![
            RoleDefinition::new("supporter", SUPPORTER, Supporter::default()),
            RoleDefinition::new("defender", DEFENDER, Defender::default()),
            RoleDefinition::new("upfielder", UPFIELDER, Upfielder::default()),
        ])?;
        Ok(Self {
            bidding: RoleBidding::new(catalog, false),
        })
    }
}

impl Positioning for PositioningAgainstKickingTeam {
    fn name(&self) -> &'static str {
        "PositioningAgainstKickingTeam"
    }

    fn evaluate(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<PositioningDecision, BehaviourError> {
        self.bidding.evaluate(world, settings)
    }
}
