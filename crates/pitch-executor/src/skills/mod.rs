//! Skills and the packages they are looked up in by name.

mod field_player;
mod game;
mod head_find_ball;
mod head_fixed_yaw_and_pitch;
mod obstacle_avoidance;
mod walk;
mod walk_around;
mod walk_to_point;

pub use field_player::*;
pub use game::*;
pub use head_find_ball::*;
pub use head_fixed_yaw_and_pitch::*;
pub use obstacle_avoidance::*;
pub use walk::*;
pub use walk_around::*;
pub use walk_to_point::*;

use crate::behaviour::{BehaviourError, TaskNode, World};

/// Builds a fresh instance of a skill's tree.
pub type SkillFactory = fn(&World) -> Result<TaskNode, BehaviourError>;

/// A named group of skills. Body and head skills are resolved from different
/// package lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviourPackage {
    BodyRoles,
    BodySkills,
    BodyTest,
    Head,
}

impl BehaviourPackage {
    /// Where body skills are looked up, in order.
    pub const BODY: [BehaviourPackage; 3] = [
        BehaviourPackage::BodyRoles,
        BehaviourPackage::BodySkills,
        BehaviourPackage::BodyTest,
    ];
    /// Where head skills are looked up.
    pub const HEAD: [BehaviourPackage; 1] = [BehaviourPackage::Head];

    pub fn path(&self) -> &'static str {
        match self {
            BehaviourPackage::BodyRoles => "body.roles",
            BehaviourPackage::BodySkills => "body.skills",
            BehaviourPackage::BodyTest => "body.test",
            BehaviourPackage::Head => "head",
        }
    }

    pub fn skills(&self) -> &'static [(&'static str, SkillFactory)] {
        match self {
            BehaviourPackage::BodyRoles => BODY_ROLE_SKILLS,
            BehaviourPackage::BodySkills => BODY_SKILLS,
            BehaviourPackage::BodyTest => BODY_TEST_SKILLS,
            BehaviourPackage::Head => HEAD_SKILLS,
        }
    }
}

static BODY_ROLE_SKILLS: &[(&str, SkillFactory)] = &[("FieldPlayer", FieldPlayer::build)];

static BODY_SKILLS: &[(&str, SkillFactory)] = &[
    ("Game", Game::build),
    ("Stand", Stand::build),
    ("Walk", Walk::build),
    ("WalkToPoint", WalkToPoint::build),
];

static BODY_TEST_SKILLS: &[(&str, SkillFactory)] = &[("WalkAround", WalkAround::build)];

static HEAD_SKILLS: &[(&str, SkillFactory)] = &[
    ("HeadFindBall", HeadFindBall::build),
    ("HeadFixedYawAndPitch", HeadFixedYawAndPitch::build),
];

/// Find a skill by name in the first package that has it.
pub fn resolve_skill(
    name: &str,
    packages: &[BehaviourPackage],
) -> Result<SkillFactory, BehaviourError> {
    for package in packages {
        if let Some((_, factory)) = package.skills().iter().find(|(skill, _)| *skill == name) {
            log::info!("Found {} in {}", name, package.path());
            return Ok(*factory);
        }
        log::debug!("{} is not in {}, skipping", name, package.path());
    }
    Err(BehaviourError::UnknownSkill {
        skill: name.to_string(),
        packages: packages.iter().map(BehaviourPackage::path).collect(),
    })
}
