use pitch_core::{BehaviourSettings, RoleId, WorldSnapshot};

use super::{assign_roles, Candidate, PositioningDecision, RoleCatalog};
use crate::behaviour::BehaviourError;

/// Role name of a robot the team assignment left without a role.
pub const UNASSIGNED: &str = "unassigned";

/// Players that bid for roles, with this robot first, and the number of
/// teammates that claim to play the ball. The goalie only bids when
/// `goalie_bids` is set.
pub fn bidding_candidates(
    world: &WorldSnapshot,
    settings: &BehaviourSettings,
    goalie_bids: bool,
) -> Result<(Vec<Candidate>, usize), BehaviourError> {
    let our_ball = world.ball_position(settings.team_ball_time_padding);
    let mut candidates = vec![Candidate {
        player: world.player_number,
        pose: world.pose,
        ball: our_ball,
    }];
    let mut ball_players = 0;

    for number in world.active_player_numbers() {
        if number == world.player_number || (number.is_goalie() && !goalie_bids) {
            continue;
        }
        let teammate = world
            .teammate(number)
            .ok_or(BehaviourError::MissingPlayer { number })?;
        if teammate.playing_ball {
            ball_players += 1;
            continue;
        }
        let ball = if teammate.seconds_since_ball_update > settings.stale_teammate_ball_seconds {
            our_ball
        } else {
            teammate.ego_ball
        };
        candidates.push(Candidate {
            player: number,
            pose: teammate.pose,
            ball,
        });
    }
    Ok((candidates, ball_players))
}

/// A priority-ordered role catalog the team bids for.
///
/// Every robot solves one assignment for all the bidding teammates, so robots
/// that see the same world agree on who takes which role. Robots left over when
/// there are more bidders than roles broadcast [`RoleId::NONE`] and wait at the
/// spot of the lowest priority role.
pub struct RoleBidding {
    catalog: RoleCatalog,
    goalie_bids: bool,
    my_role: Option<usize>,
}

impl RoleBidding {
    pub fn new(catalog: RoleCatalog, goalie_bids: bool) -> Self {
        Self {
            catalog,
            goalie_bids,
            my_role: None,
        }
    }

    /// This robot's role index, `None` when the team has no role left for it.
    fn decide_role(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<Option<usize>, BehaviourError> {
        let (candidates, ball_players) = bidding_candidates(world, settings, self.goalie_bids)?;

        // Surplus ball players take roles off the top, but at least one role is left
        let excess = ball_players
            .saturating_sub(1)
            .min(self.catalog.len().saturating_sub(1));
        let assignment =
            assign_roles(&mut self.catalog, excess, &candidates, world, &settings.cost)?;
        Ok(assignment.role_of(0).map(|role| role + excess))
    }

    fn role_name(&self, role: Option<usize>) -> &'static str {
        role.and_then(|index| self.catalog.name(index))
            .unwrap_or(UNASSIGNED)
    }

    pub fn evaluate(
        &mut self,
        world: &WorldSnapshot,
        settings: &BehaviourSettings,
    ) -> Result<PositioningDecision, BehaviourError> {
        let role = self.decide_role(world, settings)?;
        if role != self.my_role {
            log::info!(
                "Switching role from {} to {}",
                self.role_name(self.my_role),
                self.role_name(role),
            );
            self.my_role = role;
        }

        // Evaluate again from our own point of view, the bidding left the role
        // with the last candidate's view
        let ball = world.ball_position(settings.team_ball_time_padding);
        let index = role.unwrap_or(self.catalog.len().saturating_sub(1));
        let target = self
            .catalog
            .evaluate(index, world.pose.position, ball, world)?;
        Ok(PositioningDecision {
            role_name: self.role_name(role),
            role_id: role
                .and_then(|index| self.catalog.id(index))
                .unwrap_or(RoleId::NONE),
            target,
        })
    }
}
