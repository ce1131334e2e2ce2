use pitch_core::{math::clamp, Pose, PositioningKind};

use super::{Stand, Walk, WalkToPoint};
use crate::{
    behaviour::{
        BehaviourError, Composite, SubTasks, TaskNode, TaskStatus, TickArgs, WalkArgs,
        WalkToPointArgs, World,
    },
    positioning::{
        DeadZoneHysteresis, Positioning, PositioningAgainstDribbleTeam,
        PositioningAgainstKickingTeam, PositioningDecision, PositioningFindBall,
    },
};

/// Once at the target, we only walk again when this many times the role's
/// tolerance away from it.
const LEAVE_TOLERANCE_FACTOR: f64 = 1.5;
/// rad/s
const TURN_RATE: f64 = 1.5;
const TIME_TO_FIX_HEADING: f64 = 1.0;

/// A field player without the ball: takes a role and holds its pose.
pub struct FieldPlayer {
    against_kicking_team: PositioningAgainstKickingTeam,
    against_dribble_team: PositioningAgainstDribbleTeam,
    find_ball: PositioningFindBall,
    decision: Option<PositioningDecision>,
    far_from_target: DeadZoneHysteresis,
    facing_away: DeadZoneHysteresis,
}

impl FieldPlayer {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        let task = FieldPlayer {
            against_kicking_team: PositioningAgainstKickingTeam::new()?,
            against_dribble_team: PositioningAgainstDribbleTeam::new()?,
            find_ball: PositioningFindBall::new(world.settings().cost.clone())?,
            decision: None,
            far_from_target: DeadZoneHysteresis::new(0.0, 0.0, true),
            facing_away: DeadZoneHysteresis::new(0.0, 0.0, true),
        };
        TaskNode::composite(
            world,
            task,
            vec![
                ("WalkToPoint", WalkToPoint::build(world)?),
                ("Walk", Walk::build(world)?),
                ("Stand", Stand::build(world)?),
            ],
            "WalkToPoint",
        )
    }

    fn positioning(&mut self, world: &World) -> &mut dyn Positioning {
        let settings = world.settings();
        if world.snapshot().seconds_since_any_ball() > settings.find_ball_after_seconds {
            return &mut self.find_ball;
        }
        match settings.positioning {
            PositioningKind::AgainstKickingTeam => &mut self.against_kicking_team,
            PositioningKind::AgainstDribbleTeam => &mut self.against_dribble_team,
        }
    }
}

impl Composite for FieldPlayer {
    fn name(&self) -> &'static str {
        "FieldPlayer"
    }

    fn reset(&mut self, _world: &World) {
        self.far_from_target = DeadZoneHysteresis::new(0.0, 0.0, true);
        self.facing_away = DeadZoneHysteresis::new(0.0, 0.0, true);
    }

    fn transition(
        &mut self,
        world: &World,
        sub_tasks: &mut SubTasks,
    ) -> Result<(), BehaviourError> {
        let positioning = self.positioning(world);
        let strategy = positioning.name();
        let decision = positioning.evaluate(world.snapshot(), world.settings())?;
        let previous_role = self.decision.as_ref().map(|d| d.role_id);
        if previous_role != Some(decision.role_id) {
            log::info!(
                "{}: positioning as {} ({})",
                strategy,
                decision.role_name,
                decision.role_id
            );
        }

        let pose = world.snapshot().pose;
        let target = decision.target;
        let position_error = target.position_error;
        let heading_error = target.heading_error.abs();
        self.far_from_target
            .set_bounds(position_error, position_error * LEAVE_TOLERANCE_FACTOR);
        self.facing_away
            .set_bounds(heading_error, heading_error * LEAVE_TOLERANCE_FACTOR);

        let far = self
            .far_from_target
            .evaluate((target.position - pose.position).norm());
        let facing_away = self.facing_away.evaluate((target.heading - pose.heading).abs());
        self.decision = Some(decision);

        if far {
            sub_tasks.select("WalkToPoint")
        } else if facing_away {
            sub_tasks.select("Walk")
        } else {
            sub_tasks.select("Stand")
        }
    }

    fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
        sub_tasks: &mut SubTasks,
    ) -> Result<TaskStatus, BehaviourError> {
        args.none(self.name())?;
        let Some(decision) = self.decision.as_ref() else {
            return Ok(TaskStatus::Failure);
        };
        let target = decision.target;
        world.request.shared.role = decision.role_id;
        world.request.shared.walking_to = Pose {
            position: target.position,
            heading: target.heading,
        };

        let sub_args = match sub_tasks.current() {
            "WalkToPoint" => TickArgs::WalkToPoint(WalkToPointArgs::new(target.position)),
            "Walk" => {
                let error = target.heading - world.snapshot().pose.heading;
                let turn = clamp(error.radians() / TIME_TO_FIX_HEADING, -TURN_RATE, TURN_RATE);
                TickArgs::Walk(WalkArgs::new(0.0, 0.0, turn))
            }
            _ => TickArgs::None,
        };
        sub_tasks.tick_current(world, sub_args)?;
        Ok(TaskStatus::Running)
    }
}
