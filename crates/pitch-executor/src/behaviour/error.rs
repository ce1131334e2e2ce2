use pitch_core::{PlayerNumber, RoleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviourError {
    #[error("Skill: {skill} not found in behaviour packages {packages:?}")]
    UnknownSkill {
        skill: String,
        packages: Vec<&'static str>,
    },
    #[error("Behaviour exception at {trace}: {source}")]
    Tick {
        trace: String,
        #[source]
        source: Box<BehaviourError>,
    },
    #[error("{task} has no sub task named {child}")]
    UnknownChild { task: &'static str, child: String },
    #[error("{task} declares no sub tasks")]
    NoChildren { task: &'static str },
    #[error("{task} cannot be ticked with {args} arguments")]
    UnexpectedArgs {
        task: &'static str,
        args: &'static str,
    },
    #[error("Role catalog contains two roles named {name}")]
    DuplicateRole { name: &'static str },
    #[error("Role catalog contains two roles with id {id}")]
    DuplicateRoleId { id: RoleId },
    #[error("No role at index {index} in a catalog of {roles} roles")]
    UnknownRole { index: usize, roles: usize },
    #[error("Cannot assign {agents} agents to {roles} roles")]
    AssignmentDegenerate { agents: usize, roles: usize },
    #[error("Player {number} is active but missing from the world snapshot")]
    MissingPlayer { number: PlayerNumber },
}
