//! Side-stepping around obstacles felt by the foot bumpers or heard by the sonars.
//!
//! Obstacles are treated as walls facing us at a fixed heading per sensor. If
//! the walk runs into a wall, we walk along it instead.

use std::f64::consts::FRAC_PI_2;

use pitch_core::{geom::enemy_goal_centre, Angle, Vector2, WorldSnapshot};

use crate::behaviour::World;

/// Keep avoiding a bumper obstacle for this long after the bumper is released.
const BUMPER_CLEAR_SECONDS: f64 = 1.0;
/// Keep avoiding a sonar obstacle for this long after it disappears.
const SONAR_CLEAR_SECONDS: f64 = 0.2;

const LEFT_BUMPER_HEADING_DEG: f64 = 10.0;
const RIGHT_BUMPER_HEADING_DEG: f64 = -10.0;
const LEFT_SONAR_HEADING_DEG: f64 = 30.0;
const RIGHT_SONAR_HEADING_DEG: f64 = -30.0;

/// Echoes closer than this (m) count as a nearby object.
const SONAR_NEARBY_DISTANCE: f64 = 0.5;
const SONAR_FILTER_LIMIT: i32 = 10;

/// Counts consecutive near and far sonar readings.
#[derive(Clone, Copy, Debug, Default)]
struct SonarFilter {
    value: i32,
}

impl SonarFilter {
    fn update(&mut self, distance: f64) {
        if distance < SONAR_NEARBY_DISTANCE {
            self.value = (self.value + 1).min(SONAR_FILTER_LIMIT);
        } else {
            self.value = (self.value - 1).max(-SONAR_FILTER_LIMIT);
        }
    }

    fn has_object(&self) -> bool {
        self.value > 0
    }
}

/// When each obstacle sensor last fired, on the snapshot clock.
#[derive(Clone, Debug)]
pub struct ObstacleMemory {
    now: f64,
    left_bumper_at: f64,
    right_bumper_at: f64,
    left_sonar_at: f64,
    right_sonar_at: f64,
    left_sonar: SonarFilter,
    right_sonar: SonarFilter,
}

impl Default for ObstacleMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleMemory {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            left_bumper_at: f64::NEG_INFINITY,
            right_bumper_at: f64::NEG_INFINITY,
            left_sonar_at: f64::NEG_INFINITY,
            right_sonar_at: f64::NEG_INFINITY,
            left_sonar: SonarFilter::default(),
            right_sonar: SonarFilter::default(),
        }
    }

    pub fn update(&mut self, snapshot: &WorldSnapshot) {
        self.now = snapshot.timestamp;
        let sensors = &snapshot.sensors;
        if sensors.left_foot_bumper {
            self.left_bumper_at = self.now;
        }
        if sensors.right_foot_bumper {
            self.right_bumper_at = self.now;
        }

        self.left_sonar.update(sensors.sonar_left);
        self.right_sonar.update(sensors.sonar_right);
        if self.left_sonar.has_object() {
            self.left_sonar_at = self.now;
        }
        if self.right_sonar.has_object() {
            self.right_sonar_at = self.now;
        }
    }

    pub fn left_bumper_clear_seconds(&self) -> f64 {
        self.now - self.left_bumper_at
    }

    pub fn right_bumper_clear_seconds(&self) -> f64 {
        self.now - self.right_bumper_at
    }

    pub fn left_sonar_clear_seconds(&self) -> f64 {
        self.now - self.left_sonar_at
    }

    pub fn right_sonar_clear_seconds(&self) -> f64 {
        self.now - self.right_sonar_at
    }

    pub fn sonar_left_obstacle(&self, clear_seconds: f64) -> bool {
        self.left_sonar_clear_seconds() < clear_seconds
    }

    pub fn sonar_right_obstacle(&self, clear_seconds: f64) -> bool {
        self.right_sonar_clear_seconds() < clear_seconds
    }

    pub fn sonar_obstacle(&self, clear_seconds: f64) -> bool {
        self.sonar_left_obstacle(clear_seconds) || self.sonar_right_obstacle(clear_seconds)
    }
}

/// An active obstacle: its heading relative to us and how long it has been clear.
type Sighting = (Angle, f64);

fn sighting(heading_deg: f64, clear_seconds: f64, threshold: f64) -> Option<Sighting> {
    (clear_seconds < threshold).then(|| (Angle::from_degrees(heading_deg), clear_seconds))
}

/// Deflect `walk` along the wall of whichever of the left and right obstacles
/// blocks it. If both do, the one seen more recently wins.
fn avoid(walk: Vector2, left: Option<Sighting>, right: Option<Sighting>) -> Option<Vector2> {
    let walk_heading = Angle::of_vector(&walk);
    let diff = |heading: Angle| (walk_heading - heading).radians();

    let left = left.filter(|(heading, _)| {
        let d = diff(*heading);
        -FRAC_PI_2 < d && d < FRAC_PI_2
    });
    let right = right.filter(|(heading, _)| {
        let d = diff(*heading);
        -FRAC_PI_2 <= d && d < FRAC_PI_2
    });
    let (left, right) = match (left, right) {
        (Some(l), Some(r)) if l.1 > r.1 => (None, Some(r)),
        (Some(l), Some(_)) => (Some(l), None),
        other => other,
    };

    let forwards = Vector2::new(walk.norm(), 0.0);
    for (heading, _) in left.into_iter().chain(right) {
        let d = diff(heading);
        if (0.0..FRAC_PI_2).contains(&d) {
            return Some((heading + Angle::PI_2) * forwards);
        } else if -FRAC_PI_2 < d && d < 0.0 {
            return Some((heading - Angle::PI_2) * forwards);
        }
    }
    None
}

/// The walk vector (forward, left in mm/s) adjusted for nearby obstacles.
///
/// Bumpers take precedence over sonars. Nothing is avoided while lining up a
/// shot right in front of the enemy goal.
pub fn walk_vec_with_avoidance(world: &World, walk: Vector2) -> Vector2 {
    let snapshot = world.snapshot();
    let pose = snapshot.pose;
    let ball_distance = (world.ball_position() - pose.position).norm();
    let heading = pose.heading.degrees();
    if ball_distance < 350.0
        && snapshot.ball_lost_seconds() < 2.0
        && (enemy_goal_centre() - pose.position).norm() < 1300.0
        && heading > -60.0
        && heading < 60.0
    {
        return walk;
    }

    let memory = world.obstacles();
    let bumpers = avoid(
        walk,
        sighting(
            LEFT_BUMPER_HEADING_DEG,
            memory.left_bumper_clear_seconds(),
            BUMPER_CLEAR_SECONDS,
        ),
        sighting(
            RIGHT_BUMPER_HEADING_DEG,
            memory.right_bumper_clear_seconds(),
            BUMPER_CLEAR_SECONDS,
        ),
    );
    if let Some(deflected) = bumpers {
        return deflected;
    }

    avoid(
        walk,
        sighting(
            LEFT_SONAR_HEADING_DEG,
            memory.left_sonar_clear_seconds(),
            SONAR_CLEAR_SECONDS,
        ),
        sighting(
            RIGHT_SONAR_HEADING_DEG,
            memory.right_sonar_clear_seconds(),
            SONAR_CLEAR_SECONDS,
        ),
    )
    .unwrap_or(walk)
}
