use pitch_core::{BodyCommand, WalkCommand};

use crate::behaviour::{BehaviourError, Leaf, TaskNode, TaskStatus, TickArgs, World};

/// Shuffle while a sonar obstacle was seen within this many seconds.
const SHUFFLE_SONAR_CLEAR_SECONDS: f64 = 2.0;

/// Writes a walk request with the given velocities.
pub struct Walk;

impl Walk {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        Ok(TaskNode::leaf(world, Walk))
    }
}

impl Leaf for Walk {
    fn name(&self) -> &'static str {
        "Walk"
    }

    fn tick(&mut self, world: &mut World, args: TickArgs) -> Result<TaskStatus, BehaviourError> {
        let args = args.walk(self.name())?;
        let speed = if args.cap_speed {
            args.speed.min(world.settings().walk_speed_cap)
        } else {
            args.speed
        };
        let use_shuffle =
            args.allow_shuffle && world.obstacles().sonar_obstacle(SHUFFLE_SONAR_CLEAR_SECONDS);

        world.request.body = BodyCommand::Walk(
            WalkCommand::new(args.forward, args.left, args.turn)
                .with_speed(speed)
                .with_shuffle(use_shuffle),
        );
        Ok(TaskStatus::Running)
    }
}

/// Stands still with straight legs.
pub struct Stand;

impl Stand {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        Ok(TaskNode::leaf(world, Stand))
    }
}

impl Leaf for Stand {
    fn name(&self) -> &'static str {
        "Stand"
    }

    fn tick(&mut self, world: &mut World, args: TickArgs) -> Result<TaskStatus, BehaviourError> {
        args.none(self.name())?;
        world.request.body = BodyCommand::Walk(WalkCommand::stand());
        Ok(TaskStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pitch_core::{BehaviourSettings, WorldSnapshot};

    use super::*;
    use crate::behaviour::{HeadArgs, WalkArgs};

    fn world(sonar_left: f64) -> World {
        let mut snapshot = WorldSnapshot::default();
        snapshot.sensors.sonar_left = sonar_left;
        World::new(Arc::new(snapshot), Arc::new(BehaviourSettings::default()))
    }

    fn walk_command(world: &World) -> WalkCommand {
        match world.request.body {
            BodyCommand::Walk(walk) => walk,
            other => panic!("expected a walk, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_caps_speed() {
        let mut world = world(2.55);
        let mut walk = Walk::build(&world).unwrap();
        walk.tick(&mut world, TickArgs::Walk(WalkArgs::new(300.0, 0.0, 0.5)))
            .unwrap();
        let command = walk_command(&world);
        assert_eq!(command.forward, 300.0);
        assert_eq!(command.turn, 0.5);
        assert_eq!(command.speed, 0.6);
        assert!(!command.use_shuffle);

        let uncapped = WalkArgs {
            cap_speed: false,
            ..WalkArgs::new(300.0, 0.0, 0.0)
        };
        walk.tick(&mut world, TickArgs::Walk(uncapped)).unwrap();
        assert_eq!(walk_command(&world).speed, 1.0);
    }

    #[test]
    fn test_walk_shuffles_near_sonar_obstacle() {
        let mut world = world(0.2);
        let mut walk = Walk::build(&world).unwrap();
        walk.tick(&mut world, TickArgs::None).unwrap();
        assert!(walk_command(&world).use_shuffle);
    }

    #[test]
    fn test_stand_rejects_arguments() {
        let mut world = world(2.55);
        let mut stand = Stand::build(&world).unwrap();
        assert!(stand.tick(&mut world, TickArgs::Head(HeadArgs::default())).is_err());
        assert_eq!(stand.tick(&mut world, TickArgs::None).unwrap(), TaskStatus::Success);
        assert_eq!(walk_command(&world).bend, 0.0);
    }
}
