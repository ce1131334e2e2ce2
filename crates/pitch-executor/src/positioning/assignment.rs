use std::cmp::Ordering;

use pitch_core::{geom::ROBOTS_PER_TEAM, CostSettings, PlayerNumber, Pose, Vector2, WorldSnapshot};

use super::{time_to_reach_pose, RoleCatalog};
use crate::behaviour::BehaviourError;

/// Most agents the exhaustive search accepts, a full team.
pub const MAX_ASSIGNMENT_AGENTS: usize = ROBOTS_PER_TEAM as usize;

/// Cost of a column that stands for no role. Larger than any travel time, so
/// these columns go to the agents the real roles can spare.
pub const UNFILLED_ROLE_COST: f64 = 10_000_000.0;

/// A robot bidding for a role, as this robot believes it to be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub player: PlayerNumber,
    pub pose: Pose,
    /// The ball position the candidate acts on
    pub ball: Vector2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// `roles[agent]` is the column given to that agent.
    pub roles: Vec<usize>,
    /// Columns from this one on stand for no role.
    pub unfilled_from: usize,
    /// The agents' costs for their roles, most expensive first.
    pub sorted_costs: Vec<f64>,
}

impl Assignment {
    /// The column given to `agent`, `None` when it was left without a role.
    pub fn role_of(&self, agent: usize) -> Option<usize> {
        self.roles
            .get(agent)
            .copied()
            .filter(|column| *column < self.unfilled_from)
    }
}

/// Assign the candidates to the roles of `catalog` starting at `role_offset`.
///
/// Roles are evaluated from each candidate's own point of view, then
/// [`solve_minimax`] picks the assignment. With more candidates than roles
/// left, the matrix is padded with [`UNFILLED_ROLE_COST`] columns: all of the
/// candidates take part and the spare ones end up without a role.
pub fn assign_roles(
    catalog: &mut RoleCatalog,
    role_offset: usize,
    candidates: &[Candidate],
    world: &WorldSnapshot,
    rates: &CostSettings,
) -> Result<Assignment, BehaviourError> {
    let agents = candidates.len();
    if role_offset >= catalog.len() {
        return Err(BehaviourError::AssignmentDegenerate { agents, roles: 0 });
    }
    let roles = (catalog.len() - role_offset).min(agents);

    let mut costs = Vec::with_capacity(agents);
    for candidate in candidates {
        let mut row = Vec::with_capacity(agents);
        for role in role_offset..role_offset + roles {
            let target = catalog.evaluate(role, candidate.pose.position, candidate.ball, world)?;
            row.push(time_to_reach_pose(
                &candidate.pose,
                target.position,
                Some(target.heading),
                rates,
            ));
        }
        row.resize(agents, UNFILLED_ROLE_COST);
        costs.push(row);
    }

    let mut assignment = solve_minimax(&costs)?;
    assignment.unfilled_from = roles;
    Ok(assignment)
}

/// Lexicographic minimax assignment of agents (rows) to roles (columns).
///
/// Minimises the largest cost, then the second largest, and so on. Permutations
/// are visited in lexicographic order and the first one found wins ties.
pub fn solve_minimax(costs: &[Vec<f64>]) -> Result<Assignment, BehaviourError> {
    let agents = costs.len();
    if agents == 0 || agents > MAX_ASSIGNMENT_AGENTS {
        return Err(BehaviourError::AssignmentDegenerate {
            agents,
            roles: costs.first().map_or(0, Vec::len),
        });
    }
    if let Some(row) = costs.iter().find(|row| row.len() != agents) {
        return Err(BehaviourError::AssignmentDegenerate {
            agents,
            roles: row.len(),
        });
    }

    let mut permutation: Vec<usize> = (0..agents).collect();
    let mut best_roles = permutation.clone();
    let mut best_costs = sorted_costs(costs, &permutation);
    while next_permutation(&mut permutation) {
        let candidate = sorted_costs(costs, &permutation);
        if lexicographic_cmp(&candidate, &best_costs) == Ordering::Less {
            best_roles.copy_from_slice(&permutation);
            best_costs = candidate;
        }
    }

    Ok(Assignment {
        roles: best_roles,
        unfilled_from: agents,
        sorted_costs: best_costs,
    })
}

fn sorted_costs(costs: &[Vec<f64>], permutation: &[usize]) -> Vec<f64> {
    let mut sorted: Vec<f64> = permutation
        .iter()
        .enumerate()
        .map(|(agent, role)| costs[agent][*role])
        .collect();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

fn lexicographic_cmp(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Advance to the next permutation in lexicographic order. Returns false after
/// the last one.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pitch_core::{Angle, RoleId};

    use super::*;
    use crate::positioning::{RoleDefinition, RoleEvaluator, RoleTarget};

    /// Small deterministic generator so the brute force checks are repeatable.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> f64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((self.0 >> 33) % 1000) as f64 / 10.0
        }
    }

    fn all_permutations(n: usize) -> Vec<Vec<usize>> {
        let mut perm: Vec<usize> = (0..n).collect();
        let mut all = vec![perm.clone()];
        while next_permutation(&mut perm) {
            all.push(perm.clone());
        }
        all
    }

    #[test]
    fn test_permutations_are_lexicographic() {
        let all = all_permutations(3);
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
        assert_eq!(all_permutations(5).len(), 120);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = Lcg(7);
        for n in 1..=MAX_ASSIGNMENT_AGENTS {
            for _ in 0..20 {
                let costs: Vec<Vec<f64>> = (0..n)
                    .map(|_| (0..n).map(|_| rng.next()).collect())
                    .collect();
                let assignment = solve_minimax(&costs).unwrap();

                let mut seen = assignment.roles.clone();
                seen.sort_unstable();
                assert_eq!(seen, (0..n).collect::<Vec<_>>());

                let first_best = all_permutations(n)
                    .into_iter()
                    .min_by(|a, b| {
                        lexicographic_cmp(&sorted_costs(&costs, a), &sorted_costs(&costs, b))
                    })
                    .unwrap();
                assert_eq!(
                    lexicographic_cmp(
                        &sorted_costs(&costs, &first_best),
                        &assignment.sorted_costs
                    ),
                    Ordering::Equal
                );
                assert_eq!(assignment, solve_minimax(&costs).unwrap());
            }
        }
    }

    #[test]
    fn test_ties_pick_first_permutation() {
        let costs = vec![vec![1.0; 4]; 4];
        let assignment = solve_minimax(&costs).unwrap();
        assert_eq!(assignment.roles, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_minimax_prefers_smaller_worst_case() {
        // Total cost would prefer [0, 1] (1 + 9 = 10), but its worst case is 9.
        let costs = vec![vec![1.0, 5.0], vec![6.0, 9.0]];
        let assignment = solve_minimax(&costs).unwrap();
        assert_eq!(assignment.roles, vec![1, 0]);
        assert_eq!(assignment.sorted_costs, vec![6.0, 5.0]);
    }

    #[test]
    fn test_rejects_degenerate_matrices() {
        assert!(matches!(
            solve_minimax(&[]),
            Err(BehaviourError::AssignmentDegenerate { agents: 0, .. })
        ));
        assert!(matches!(
            solve_minimax(&[vec![1.0, 2.0], vec![3.0]]),
            Err(BehaviourError::AssignmentDegenerate { agents: 2, roles: 1 })
        ));
        let too_many = vec![vec![0.0; 7]; 7];
        assert!(solve_minimax(&too_many).is_err());
    }

    struct Fixed(RoleTarget);

    impl RoleEvaluator for Fixed {
        fn evaluate(
            &mut self,
            _robot_pos: Vector2,
            _ball_pos: Vector2,
            _world: &WorldSnapshot,
        ) -> Result<RoleTarget, BehaviourError> {
            Ok(self.0)
        }
    }

    fn fixed(x: f64, y: f64, heading: Angle) -> Fixed {
        Fixed(RoleTarget {
            position: Vector2::new(x, y),
            heading,
            position_error: 100.0,
            heading_error: Angle::from_degrees(10.0),
        })
    }

    fn candidate(number: u8, x: f64, y: f64, heading: Angle) -> Candidate {
        Candidate {
            player: PlayerNumber::new(number),
            pose: Pose::new(x, y, heading),
            ball: Vector2::zeros(),
        }
    }

    #[test]
    fn test_two_robots_keep_their_spots() {
        let rates = CostSettings::default();
        let mut catalog = RoleCatalog::new(vec![
            RoleDefinition::new("a", RoleId::new(1), fixed(0.0, 0.0, Angle::ZERO)),
            RoleDefinition::new("b", RoleId::new(2), fixed(1000.0, 0.0, Angle::ZERO)),
        ])
        .unwrap();
        let candidates = [
            candidate(2, 0.0, 0.0, Angle::ZERO),
            candidate(3, 1000.0, 0.0, Angle::PI),
        ];
        let assignment = assign_roles(
            &mut catalog,
            0,
            &candidates,
            &WorldSnapshot::default(),
            &rates,
        )
        .unwrap();
        assert_eq!(assignment.roles, vec![0, 1]);
        assert_relative_eq!(
            assignment.sorted_costs[0],
            std::f64::consts::PI / rates.circle_strafe_rate,
            epsilon = 1e-9
        );
        assert_relative_eq!(assignment.sorted_costs[1], 0.0);
    }

    #[test]
    fn test_single_robot_single_role() {
        let mut catalog = RoleCatalog::new(vec![RoleDefinition::new(
            "only",
            RoleId::new(1),
            fixed(1000.0, 0.0, Angle::ZERO),
        )])
        .unwrap();
        let rates = CostSettings::default();
        let assignment = assign_roles(
            &mut catalog,
            0,
            &[candidate(2, 0.0, 0.0, Angle::ZERO)],
            &WorldSnapshot::default(),
            &rates,
        )
        .unwrap();
        assert_eq!(assignment.roles, vec![0]);
        assert_eq!(assignment.role_of(0), Some(0));
        assert_relative_eq!(assignment.sorted_costs[0], 1000.0 / rates.walk_rate, epsilon = 1e-9);
    }

    #[test]
    fn test_spare_robots_are_left_without_a_role() {
        let mut catalog = RoleCatalog::new(vec![
            RoleDefinition::new("a", RoleId::new(1), fixed(0.0, 0.0, Angle::ZERO)),
            RoleDefinition::new("b", RoleId::new(2), fixed(1000.0, 0.0, Angle::ZERO)),
        ])
        .unwrap();
        // The robot far away from both spots is the one left over
        let candidates = [
            candidate(2, 3000.0, 2000.0, Angle::ZERO),
            candidate(3, 0.0, 0.0, Angle::ZERO),
            candidate(4, 1000.0, 0.0, Angle::ZERO),
        ];
        let assignment = assign_roles(
            &mut catalog,
            0,
            &candidates,
            &WorldSnapshot::default(),
            &CostSettings::default(),
        )
        .unwrap();
        assert_eq!(assignment.unfilled_from, 2);
        assert_eq!(assignment.role_of(0), None);
        assert_eq!(assignment.role_of(1), Some(0));
        assert_eq!(assignment.role_of(2), Some(1));
        assert_eq!(assignment.sorted_costs[0], UNFILLED_ROLE_COST);
    }

    #[test]
    fn test_role_offset_must_fit_catalog() {
        let mut catalog = RoleCatalog::new(vec![
            RoleDefinition::new("a", RoleId::new(1), fixed(0.0, 0.0, Angle::ZERO)),
            RoleDefinition::new("b", RoleId::new(2), fixed(1000.0, 0.0, Angle::ZERO)),
        ])
        .unwrap();
        let candidates = [
            candidate(2, 0.0, 0.0, Angle::ZERO),
            candidate(3, 1000.0, 0.0, Angle::ZERO),
        ];
        let result = assign_roles(
            &mut catalog,
            2,
            &candidates,
            &WorldSnapshot::default(),
            &CostSettings::default(),
        );
        assert!(matches!(
            result,
            Err(BehaviourError::AssignmentDegenerate { agents: 2, roles: 0 })
        ));
    }
}
