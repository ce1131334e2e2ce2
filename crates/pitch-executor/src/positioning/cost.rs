use pitch_core::{Angle, CostSettings, Pose, Vector2};

/// Below this distance (mm) the target counts as reached and there is no
/// direction to turn towards.
const COINCIDENT_DISTANCE: f64 = 1e-6;

/// Estimated seconds to walk from `from` to `target`.
///
/// The robot turns to face the target, walks there in a straight line, then
/// circle-strafes onto `target_heading` if one is given.
pub fn time_to_reach_pose(
    from: &Pose,
    target: Vector2,
    target_heading: Option<Angle>,
    rates: &CostSettings,
) -> f64 {
    let to_target = target - from.position;
    let distance = to_target.norm();
    let travel_heading = if distance < COINCIDENT_DISTANCE {
        from.heading
    } else {
        Angle::of_vector(&to_target)
    };

    let mut cost = (travel_heading - from.heading).abs() / rates.turn_rate;
    cost += distance / rates.walk_rate;
    if let Some(heading) = target_heading {
        cost += (travel_heading - heading).abs() / rates.circle_strafe_rate;
    }
    cost
}
