use pitch_core::Vector2;

use super::BehaviourError;

/// Arguments of a walk request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkArgs {
    /// mm/s
    pub forward: f64,
    /// mm/s
    pub left: f64,
    /// rad/s
    pub turn: f64,
    pub speed: f64,
    pub allow_shuffle: bool,
    pub cap_speed: bool,
}

impl WalkArgs {
    pub fn new(forward: f64, left: f64, turn: f64) -> Self {
        Self {
            forward,
            left,
            turn,
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

impl Default for WalkArgs {
    fn default() -> Self {
        Self {
            forward: 0.0,
            left: 0.0,
            turn: 0.0,
            speed: 1.0,
            allow_shuffle: true,
            cap_speed: true,
        }
    }
}

/// Arguments of a walk to a global point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkToPointArgs {
    pub final_pos: Vector2,
    pub use_avoidance: bool,
    pub speed: f64,
}

impl WalkToPointArgs {
    pub fn new(final_pos: Vector2) -> Self {
        Self {
            final_pos,
            use_avoidance: true,
            speed: 1.0,
        }
    }
}

impl Default for WalkToPointArgs {
    fn default() -> Self {
        Self::new(Vector2::zeros())
    }
}

/// Arguments of a head motion. Angles in radians, speeds as fractions of the maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadArgs {
    pub yaw: f64,
    pub pitch: f64,
    pub yaw_speed: f64,
    pub pitch_speed: f64,
}

impl Default for HeadArgs {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            yaw_speed: 0.75,
            pitch_speed: 0.25,
        }
    }
}

/// The arguments a parent passes down when ticking a sub task.
///
/// `None` means "use your defaults". Any other variant must match the kind of
/// task being ticked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TickArgs {
    #[default]
    None,
    Walk(WalkArgs),
    WalkToPoint(WalkToPointArgs),
    Head(HeadArgs),
}

impl TickArgs {
    pub fn kind(&self) -> &'static str {
        match self {
            TickArgs::None => "no",
            TickArgs::Walk(_) => "walk",
            TickArgs::WalkToPoint(_) => "walk-to-point",
            TickArgs::Head(_) => "head",
        }
    }

    pub fn walk(self, task: &'static str) -> Result<WalkArgs, BehaviourError> {
        match self {
            TickArgs::None => Ok(WalkArgs::default()),
            TickArgs::Walk(args) => Ok(args),
            other => Err(other.unexpected(task)),
        }
    }

    pub fn walk_to_point(self, task: &'static str) -> Result<WalkToPointArgs, BehaviourError> {
        match self {
            TickArgs::None => Ok(WalkToPointArgs::default()),
            TickArgs::WalkToPoint(args) => Ok(args),
            other => Err(other.unexpected(task)),
        }
    }

    pub fn head(self, task: &'static str) -> Result<HeadArgs, BehaviourError> {
        match self {
            TickArgs::None => Ok(HeadArgs::default()),
            TickArgs::Head(args) => Ok(args),
            other => Err(other.unexpected(task)),
        }
    }

    /// For tasks that take no arguments at all.
    pub fn none(self, task: &'static str) -> Result<(), BehaviourError> {
        match self {
            TickArgs::None => Ok(()),
            other => Err(other.unexpected(task)),
        }
    }

    fn unexpected(&self, task: &'static str) -> BehaviourError {
        BehaviourError::UnexpectedArgs {
            task,
            args: self.kind(),
        }
    }
}
