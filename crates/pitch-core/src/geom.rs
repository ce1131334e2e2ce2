//! SPL field dimensions and landmarks.
//!
//! All values are in millimetres in the field frame: `+x` points at the enemy goal,
//! `+y` to the left when facing it, origin at the centre spot.

use crate::Vector2;

/// Distance between the goal lines.
pub const FIELD_LENGTH: f64 = 9010.0;
pub const HALF_FIELD_LENGTH: f64 = FIELD_LENGTH / 2.0;
pub const FIELD_LINE_WIDTH: f64 = 50.0;

pub const GOAL_BOX_LENGTH: f64 = 615.0;
pub const GOAL_BOX_WIDTH: f64 = 2220.0;

/// Measured from the inside of the goal line to the outside of the penalty box line.
pub const PENALTY_AREA_LENGTH: f64 = 1650.0;
pub const PENALTY_AREA_WIDTH: f64 = 4000.0;

/// End-to-end from the middle of the goal posts.
pub const GOAL_WIDTH: f64 = 1565.0;
pub const GOAL_POST_DIAMETER: f64 = 90.0;
/// The front of the goal post lines up with the goal line.
pub const GOAL_POST_ABS_X: f64 =
    HALF_FIELD_LENGTH - FIELD_LINE_WIDTH / 2.0 + GOAL_POST_DIAMETER / 2.0;
pub const GOAL_POST_ABS_Y: f64 = GOAL_WIDTH / 2.0;

pub const ROBOTS_PER_TEAM: u8 = 6;

pub fn our_goal_centre() -> Vector2 {
    Vector2::new(-HALF_FIELD_LENGTH, 0.0)
}

pub fn enemy_goal_centre() -> Vector2 {
    Vector2::new(HALF_FIELD_LENGTH, 0.0)
}

pub fn our_left_post() -> Vector2 {
    Vector2::new(-GOAL_POST_ABS_X, GOAL_POST_ABS_Y)
}

pub fn our_right_post() -> Vector2 {
    Vector2::new(-GOAL_POST_ABS_X, -GOAL_POST_ABS_Y)
}

pub fn enemy_left_post() -> Vector2 {
    Vector2::new(GOAL_POST_ABS_X, GOAL_POST_ABS_Y)
}

pub fn enemy_right_post() -> Vector2 {
    Vector2::new(GOAL_POST_ABS_X, -GOAL_POST_ABS_Y)
}

/// Whether `pos` is inside our goal box, grown by `buff_x` towards the centre line and
/// `buff_y` on each side. Negative buffers shrink the box.
pub fn is_in_our_goal_box(pos: Vector2, buff_x: f64, buff_y: f64) -> bool {
    pos.x < -HALF_FIELD_LENGTH + GOAL_BOX_LENGTH + buff_x
        && pos.y.abs() < GOAL_BOX_WIDTH / 2.0 + buff_y
}

/// Whether `pos` is inside the opponent goal box. See [`is_in_our_goal_box`].
pub fn is_in_opponent_goal_box(pos: Vector2, buff_x: f64, buff_y: f64) -> bool {
    pos.x > HALF_FIELD_LENGTH - GOAL_BOX_LENGTH - buff_x
        && pos.y.abs() < GOAL_BOX_WIDTH / 2.0 + buff_y
}

/// Whether `pos` is inside our penalty box. See [`is_in_our_goal_box`].
pub fn is_in_our_penalty_box(pos: Vector2, buff_x: f64, buff_y: f64) -> bool {
    pos.x < -HALF_FIELD_LENGTH + PENALTY_AREA_LENGTH + buff_x
        && pos.y.abs() < PENALTY_AREA_WIDTH / 2.0 + buff_y
}

/// Whether `pos` is inside the opponent penalty box. See [`is_in_our_goal_box`].
pub fn is_in_opponent_penalty_box(pos: Vector2, buff_x: f64, buff_y: f64) -> bool {
    pos.x > HALF_FIELD_LENGTH - PENALTY_AREA_LENGTH - buff_x
        && pos.y.abs() < PENALTY_AREA_WIDTH / 2.0 + buff_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_box_buffers() {
        let just_outside = Vector2::new(-HALF_FIELD_LENGTH + GOAL_BOX_LENGTH + 50.0, 0.0);
        assert!(!is_in_our_goal_box(just_outside, 0.0, 0.0));
        assert!(is_in_our_goal_box(just_outside, 100.0, 100.0));
        assert!(!is_in_opponent_goal_box(just_outside, 100.0, 100.0));
    }

    #[test]
    fn test_opponent_boxes_mirror_ours() {
        let p = Vector2::new(-4000.0, 1500.0);
        let mirrored = Vector2::new(4000.0, -1500.0);
        assert_eq!(
            is_in_our_penalty_box(p, 0.0, 0.0),
            is_in_opponent_penalty_box(mirrored, 0.0, 0.0)
        );
        assert!(is_in_our_penalty_box(p, 0.0, 0.0));
        assert!(!is_in_our_goal_box(p, 0.0, 0.0));
    }

    #[test]
    fn test_negative_buffer_shrinks_box() {
        let edge = Vector2::new(HALF_FIELD_LENGTH - GOAL_BOX_LENGTH + 50.0, 0.0);
        assert!(is_in_opponent_goal_box(edge, 0.0, 0.0));
        assert!(!is_in_opponent_goal_box(edge, -100.0, -100.0));
    }
}
