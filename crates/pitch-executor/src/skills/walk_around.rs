use super::Walk;
use crate::behaviour::{
    BehaviourError, Composite, SubTasks, TaskNode, TaskStatus, TickArgs, Timer, WalkArgs, World,
};

const WALK_SECONDS: f64 = 3.0;

/// Test skill: walk forwards for a few seconds, then keep turning.
pub struct WalkAround {
    timer: Timer,
}

impl WalkAround {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        TaskNode::composite(
            world,
            WalkAround {
                timer: Timer::new(WALK_SECONDS, world.now()),
            },
            vec![("Walk", Walk::build(world)?)],
            "Walk",
        )
    }
}

impl Composite for WalkAround {
    fn name(&self) -> &'static str {
        "WalkAround"
    }

    fn reset(&mut self, world: &World) {
        self.timer.restart(world.now());
    }

    fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
        sub_tasks: &mut SubTasks,
    ) -> Result<TaskStatus, BehaviourError> {
        args.none(self.name())?;
        let walk = if self.timer.finished(world.now()) {
            WalkArgs::new(0.0, 0.0, 1.0)
        } else {
            WalkArgs::new(200.0, 0.0, 0.0)
        };
        sub_tasks.tick_current(world, TickArgs::Walk(walk))
    }
}
