use std::collections::VecDeque;

use pitch_core::{math::stdev, HeadCommand};

use crate::behaviour::{BehaviourError, Leaf, TaskNode, TaskStatus, TickArgs, World};

const RECORD_LENGTH: usize = 10;
const SETTLED_STDEV_DEG: f64 = 0.1;
const SIMILAR_DEG: f64 = 4.0;

fn similar(a: f64, b: f64) -> bool {
    (a - b).abs() < SIMILAR_DEG.to_radians()
}

/// Holds the head at a fixed neck yaw and pitch.
///
/// Succeeds once the joints reached the aim, or stopped moving short of it.
#[derive(Default)]
pub struct HeadFixedYawAndPitch {
    yaw: f64,
    pitch: f64,
    current_yaw: f64,
    current_pitch: f64,
    yaw_record: VecDeque<f64>,
    pitch_record: VecDeque<f64>,
}

impl HeadFixedYawAndPitch {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        Ok(TaskNode::leaf(world, HeadFixedYawAndPitch::default()))
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn arrived(&self) -> bool {
        similar(self.current_yaw, self.yaw) && similar(self.current_pitch, self.pitch)
    }

    /// The joints have not moved over the whole record.
    pub fn cant_move_more(&self) -> bool {
        let settled = SETTLED_STDEV_DEG.to_radians();
        let yaws: Vec<f64> = self.yaw_record.iter().copied().collect();
        let pitches: Vec<f64> = self.pitch_record.iter().copied().collect();
        yaws.len() == RECORD_LENGTH
            && pitches.len() == RECORD_LENGTH
            && stdev(&yaws) < settled
            && stdev(&pitches) < settled
    }
}

fn record(history: &mut VecDeque<f64>, value: f64) {
    history.push_back(value);
    if history.len() > RECORD_LENGTH {
        history.pop_front();
    }
}

impl Leaf for HeadFixedYawAndPitch {
    fn name(&self) -> &'static str {
        "HeadFixedYawAndPitch"
    }

    fn reset(&mut self, _world: &World) {
        self.clear();
    }

    fn tick(&mut self, world: &mut World, args: TickArgs) -> Result<TaskStatus, BehaviourError> {
        let args = args.head(self.name())?;
        if !(similar(args.yaw, self.yaw) && similar(args.pitch, self.pitch)) {
            self.clear();
        }
        self.yaw = args.yaw;
        self.pitch = args.pitch;

        let sensors = &world.snapshot().sensors;
        self.current_yaw = sensors.head_yaw;
        self.current_pitch = sensors.head_pitch;
        record(&mut self.yaw_record, self.current_yaw);
        record(&mut self.pitch_record, self.current_pitch);

        world.request.head = HeadCommand {
            yaw: args.yaw,
            pitch: args.pitch,
            is_relative: false,
            yaw_speed: args.yaw_speed,
            pitch_speed: args.pitch_speed,
        };

        Ok(if self.arrived() || self.cant_move_more() {
            TaskStatus::Success
        } else {
            TaskStatus::Running
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pitch_core::{BehaviourSettings, WorldSnapshot};

    use super::*;
    use crate::behaviour::HeadArgs;

    fn world(head_yaw: f64) -> World {
        let mut snapshot = WorldSnapshot::default();
        snapshot.sensors.head_yaw = head_yaw;
        World::new(Arc::new(snapshot), Arc::new(BehaviourSettings::default()))
    }

    fn aim(yaw: f64) -> TickArgs {
        TickArgs::Head(HeadArgs {
            yaw,
            ..Default::default()
        })
    }

    #[test]
    fn test_arrives_when_joints_match() {
        let mut world = world(0.5);
        let mut head = HeadFixedYawAndPitch::default();
        assert_eq!(head.tick(&mut world, aim(0.5)).unwrap(), TaskStatus::Success);
        assert_eq!(world.request.head.yaw, 0.5);
        assert_eq!(world.request.head.yaw_speed, 0.75);
        assert_eq!(world.request.head.pitch_speed, 0.25);
        assert!(!world.request.head.is_relative);
    }

    #[test]
    fn test_gives_up_when_joints_stop_short() {
        let mut world = world(0.3);
        let mut head = HeadFixedYawAndPitch::default();
        for _ in 0..RECORD_LENGTH - 1 {
            assert_eq!(head.tick(&mut world, aim(1.0)).unwrap(), TaskStatus::Running);
        }
        assert_eq!(head.tick(&mut world, aim(1.0)).unwrap(), TaskStatus::Success);
        assert!(head.cant_move_more());
        assert!(!head.arrived());

        // A new aim starts a new record
        assert_eq!(head.tick(&mut world, aim(-1.0)).unwrap(), TaskStatus::Running);
        assert!(!head.cant_move_more());
    }
}
