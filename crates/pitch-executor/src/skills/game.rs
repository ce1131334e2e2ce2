use super::FieldPlayer;
use crate::behaviour::{BehaviourError, Composite, TaskNode, World};

/// The skill run during a real game.
pub struct Game;

impl Game {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        TaskNode::composite(
            world,
            Game,
            vec![("FieldPlayer", FieldPlayer::build(world)?)],
            "FieldPlayer",
        )
    }
}

impl Composite for Game {
    fn name(&self) -> &'static str {
        "Game"
    }

    fn reset(&mut self, world: &World) {
        log::info!(
            "Behaviours running as player {}. Try a single skill with --skill WalkAround",
            world.snapshot().player_number
        );
    }
}
