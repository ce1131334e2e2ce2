use pitch_core::{Angle, Vector2};

use super::{walk_vec_with_avoidance, Walk};
use crate::{
    behaviour::{
        BehaviourError, Composite, SubTasks, TaskNode, TaskStatus, TickArgs, WalkArgs, World,
    },
    positioning::DeadZoneHysteresis,
};

/// mm
const CLOSE_DISTANCE: f64 = 50.0;
/// mm
const NOT_CLOSE_DISTANCE: f64 = 150.0;
/// Below this distance (mm) we walk at half speed.
const SLOW_DOWN_DISTANCE: f64 = 200.0;
/// mm/s
const WALK_SPEED: f64 = 300.0;
/// rad/s
const TURN_RATE: f64 = 1.5;
const HEADING_ERROR_TO_ONLY_TURN_DEG: f64 = 40.0;
const HEADING_ERROR_TO_ADJUST_DEG: f64 = 15.0;
/// Seconds we allow to correct a moderate heading error while walking.
const TIME_TO_FIX_HEADING: f64 = 1.0;

/// Walks to a global point.
///
/// With a large heading error the robot first turns on the spot to face the
/// point. With a moderate one it walks forwards while correcting over a second.
/// With a small one it walks straight for the fastest, most stable walk.
pub struct WalkToPoint {
    far: DeadZoneHysteresis,
}

impl WalkToPoint {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        TaskNode::composite(
            world,
            WalkToPoint {
                far: DeadZoneHysteresis::new(CLOSE_DISTANCE, NOT_CLOSE_DISTANCE, true),
            },
            vec![("Walk", Walk::build(world)?)],
            "Walk",
        )
    }

    fn walk_args(&mut self, world: &World, final_pos: Vector2, use_avoidance: bool) -> WalkArgs {
        let pose = world.snapshot().pose;
        let to_target = final_pos - pose.position;
        let distance = to_target.norm();
        let heading_error = Angle::of_vector(&to_target) - pose.heading;

        if !self.far.evaluate(distance) {
            return WalkArgs::new(0.0, 0.0, 0.0);
        }
        if heading_error.abs() > HEADING_ERROR_TO_ONLY_TURN_DEG.to_radians() {
            return WalkArgs::new(0.0, 0.0, TURN_RATE * heading_error.signum());
        }

        let mut walk = Vector2::new(WALK_SPEED, 0.0);
        if distance < SLOW_DOWN_DISTANCE {
            walk *= 0.5;
        }
        if use_avoidance {
            walk = walk_vec_with_avoidance(world, walk);
        }
        let turn = if heading_error.abs() > HEADING_ERROR_TO_ADJUST_DEG.to_radians() {
            heading_error.radians() / TIME_TO_FIX_HEADING
        } else {
            0.0
        };
        WalkArgs::new(walk.x, walk.y, turn)
    }
}

impl Composite for WalkToPoint {
    fn name(&self) -> &'static str {
        "WalkToPoint"
    }

    fn reset(&mut self, _world: &World) {
        self.far = DeadZoneHysteresis::new(CLOSE_DISTANCE, NOT_CLOSE_DISTANCE, true);
    }

    fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
        sub_tasks: &mut SubTasks,
    ) -> Result<TaskStatus, BehaviourError> {
        let args = args.walk_to_point(self.name())?;
        let walk = self
            .walk_args(world, args.final_pos, args.use_avoidance)
            .with_speed(args.speed);
        sub_tasks.tick_current(world, TickArgs::Walk(walk))?;

        Ok(if self.far.is_above() {
            TaskStatus::Running
        } else {
            TaskStatus::Success
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use pitch_core::{BehaviourSettings, BodyCommand, Pose, WalkCommand, WorldSnapshot};

    use super::*;
    use crate::behaviour::WalkToPointArgs;

    fn world_at(pose: Pose) -> World {
        let mut snapshot = WorldSnapshot {
            pose,
            ..Default::default()
        };
        snapshot.ego_ball.position = Vector2::new(4000.0, 3000.0);
        World::new(Arc::new(snapshot), Arc::new(BehaviourSettings::default()))
    }

    fn walk_command(world: &World) -> WalkCommand {
        match world.request.body {
            BodyCommand::Walk(walk) => walk,
            other => panic!("expected a walk, got {:?}", other),
        }
    }

    fn tick_towards(world: &mut World, node: &mut TaskNode, x: f64, y: f64) -> TaskStatus {
        node.tick(world, TickArgs::WalkToPoint(WalkToPointArgs::new(Vector2::new(x, y))))
            .unwrap()
    }

    #[test]
    fn test_turns_on_the_spot_first() {
        let mut world = world_at(Pose::new(0.0, 0.0, Angle::ZERO));
        let mut node = WalkToPoint::build(&world).unwrap();
        assert_eq!(tick_towards(&mut world, &mut node, 0.0, 1000.0), TaskStatus::Running);
        let command = walk_command(&world);
        assert_eq!(command.forward, 0.0);
        assert_eq!(command.turn, TURN_RATE);
        assert_eq!(world.take_hierarchy(), "WalkToPoint.Walk.");
    }

    #[test]
    fn test_walks_and_corrects_heading() {
        let mut world = world_at(Pose::new(0.0, 0.0, Angle::ZERO));
        let mut node = WalkToPoint::build(&world).unwrap();
        tick_towards(&mut world, &mut node, 1000.0, 364.0);
        let command = walk_command(&world);
        assert_eq!(command.forward, WALK_SPEED);
        assert_relative_eq!(command.turn, 364.0f64.atan2(1000.0), epsilon = 1e-9);

        tick_towards(&mut world, &mut node, 1000.0, 0.0);
        assert_eq!(walk_command(&world).turn, 0.0);
    }

    #[test]
    fn test_slows_down_then_stops_when_close() {
        let mut world = world_at(Pose::new(0.0, 0.0, Angle::ZERO));
        let mut node = WalkToPoint::build(&world).unwrap();
        tick_towards(&mut world, &mut node, 150.0, 0.0);
        assert_eq!(walk_command(&world).forward, WALK_SPEED / 2.0);

        assert_eq!(tick_towards(&mut world, &mut node, 40.0, 0.0), TaskStatus::Success);
        assert_eq!(walk_command(&world).forward, 0.0);

        // Inside the dead zone we stay put
        assert_eq!(tick_towards(&mut world, &mut node, 120.0, 0.0), TaskStatus::Success);
        assert_eq!(tick_towards(&mut world, &mut node, 160.0, 0.0), TaskStatus::Running);
    }
}
