//! Team positioning: each field player bids for a role and walks to the pose the
//! role asks for.

mod assignment;
mod bidding;
mod cost;
mod dribble_team;
mod find_ball;
mod hysteresis;
mod kicking_team;

use std::collections::HashSet;

pub use assignment::*;
pub use bidding::*;
pub use cost::*;
pub use dribble_team::*;
pub use find_ball::*;
pub use hysteresis::*;
pub use kicking_team::*;

use pitch_core::{Angle, BehaviourSettings, RoleId, Vector2, WorldSnapshot};

use crate::behaviour::BehaviourError;

/// Where a role wants its robot, and how close is close enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleTarget {
    pub position: Vector2,
    pub heading: Angle,
    /// mm
    pub position_error: f64,
    pub heading_error: Angle,
}

/// Computes the target pose of a role for a robot at `robot_pos` that believes
/// the ball is at `ball_pos`.
///
/// Evaluators may keep hysteresis state between calls.
pub trait RoleEvaluator: Send {
    fn evaluate(
        &mut self,
        robot_pos: Vector2,
        ball_pos: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError>;
}

pub struct RoleDefinition {
    pub name: &'static str,
    pub id: RoleId,
    evaluator: Box<dyn RoleEvaluator>,
}

impl RoleDefinition {
    pub fn new(
        name: &'static str,
        id: RoleId,
        evaluator: impl RoleEvaluator + 'static,
    ) -> Self {
        Self {
            name,
            id,
            evaluator: Box::new(evaluator),
        }
    }
}

/// An ordered list of roles, most important first. Names and ids are unique.
pub struct RoleCatalog {
    roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<RoleDefinition>) -> Result<Self, BehaviourError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for role in &roles {
            if !names.insert(role.name) {
                return Err(BehaviourError::DuplicateRole { name: role.name });
            }
            if !ids.insert(role.id) {
                return Err(BehaviourError::DuplicateRoleId { id: role.id });
            }
        }
        Ok(Self { roles })
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.roles.get(index).map(|role| role.name)
    }

    pub fn id(&self, index: usize) -> Option<RoleId> {
        self.roles.get(index).map(|role| role.id)
    }

    pub fn name_to_id(&self, name: &str) -> Option<RoleId> {
        self.roles.iter().find(|role| role.name == name).map(|role| role.id)
    }

    pub fn id_to_name(&self, id: RoleId) -> Option<&'static str> {
        self.roles.iter().find(|role| role.id == id).map(|role| role.name)
    }

    pub fn evaluate(
        &mut self,
        index: usize,
        robot_pos: Vector2,
        ball_pos: Vector2,
        world: &WorldSnapshot,
    ) -> Result<RoleTarget, BehaviourError> {
        let roles = self.roles.len();
        let role = self
            .roles
            .get_mut(index)
            .ok_or(BehaviourError::UnknownRole { index, roles })?;
        role.evaluator.evaluate(robot_pos, ball_pos, world)
    }
}

/// The role this robot settled on this cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PositioningDecision {
    pub role_name: &'static str,
    pub role_id: RoleId,
    pub target: RoleTarget,
}

/// A team positioning strategy.
pub trait Positioning: Send {
    fn name(&self) -> &'static str;

    fn evaluate(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<PositioningDecision, BehaviourError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vector2);

    impl RoleEvaluator for Fixed {
        fn evaluate(
            &mut self,
            _robot_pos: Vector2,
            _ball_pos: Vector2,
            _world: &WorldSnapshot,
        ) -> Result<RoleTarget, BehaviourError> {
            Ok(RoleTarget {
                position: self.0,
                heading: Angle::ZERO,
                position_error: 100.0,
                heading_error: Angle::from_degrees(10.0),
            })
        }
    }

    #[test]
    fn test_catalog_lookups() {
        let mut catalog = RoleCatalog::new(vec![
            RoleDefinition::new("first", RoleId::new(1), Fixed(Vector2::new(1.0, 0.0))),
            RoleDefinition::new("second", RoleId::new(2), Fixed(Vector2::new(2.0, 0.0))),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name_to_id("second"), Some(RoleId::new(2)));
        assert_eq!(catalog.id_to_name(RoleId::new(1)), Some("first"));
        assert_eq!(catalog.id_to_name(RoleId::new(3)), None);

        let world = WorldSnapshot::default();
        let target = catalog
            .evaluate(1, Vector2::zeros(), Vector2::zeros(), &world)
            .unwrap();
        assert_eq!(target.position, Vector2::new(2.0, 0.0));
        assert!(matches!(
            catalog.evaluate(2, Vector2::zeros(), Vector2::zeros(), &world),
            Err(BehaviourError::UnknownRole { index: 2, roles: 2 })
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let names = RoleCatalog::new(vec![
            RoleDefinition::new("same", RoleId::new(1), Fixed(Vector2::zeros())),
            RoleDefinition::new("same", RoleId::new(2), Fixed(Vector2::zeros())),
        ]);
        assert!(matches!(names, Err(BehaviourError::DuplicateRole { name: "same" })));

        let ids = RoleCatalog::new(vec![
            RoleDefinition::new("a", RoleId::new(7), Fixed(Vector2::zeros())),
            RoleDefinition::new("b", RoleId::new(7), Fixed(Vector2::zeros())),
        ]);
        assert!(matches!(ids, Err(BehaviourError::DuplicateRoleId { .. })));
    }
}
