use super::HeadFixedYawAndPitch;
use crate::behaviour::{
    BehaviourError, Composite, HeadArgs, SubTasks, TaskNode, TaskStatus, TickArgs, Timer, World,
};

/// Degrees of neck yaw, scanned right after a reset.
const SEQUENCE_NARROW_DEG: [f64; 2] = [40.0, -40.0];
/// Degrees of neck yaw, scanned once the narrow period is over.
const SEQUENCE_WIDE_DEG: [f64; 5] = [-60.0, -30.0, 30.0, 60.0, 0.0];
const NARROW_PERIOD_SECONDS: f64 = 2.0;
const STARE_SECONDS: f64 = 0.4;
/// Neck pitch in degrees, before adding the camera calibration.
const PITCH_DEG: f64 = 19.0;
const YAW_SPEED: f64 = 0.8;
const PITCH_SPEED: f64 = 1.0;

/// Scans for the ball, narrow first and then wide, staring at each yaw for a
/// moment.
pub struct HeadFindBall {
    pitch: f64,
    stare_timer: Timer,
    started_at: f64,
    yaw_aim: f64,
    sequence_counter: usize,
    currently_moving: bool,
    /// The head reached or gave up on the last aim.
    settled: bool,
}

impl HeadFindBall {
    pub fn build(world: &World) -> Result<TaskNode, BehaviourError> {
        TaskNode::composite(
            world,
            HeadFindBall {
                pitch: 0.0,
                stare_timer: Timer::new(STARE_SECONDS, world.now()),
                started_at: world.now(),
                yaw_aim: 0.0,
                sequence_counter: 0,
                currently_moving: false,
                settled: false,
            },
            vec![("FixedYawAndPitch", HeadFixedYawAndPitch::build(world)?)],
            "FixedYawAndPitch",
        )
    }

    fn sequence(&self, now: f64) -> &'static [f64] {
        if now - self.started_at < NARROW_PERIOD_SECONDS {
            &SEQUENCE_NARROW_DEG
        } else {
            &SEQUENCE_WIDE_DEG
        }
    }
}

impl Composite for HeadFindBall {
    fn name(&self) -> &'static str {
        "HeadFindBall"
    }

    fn reset(&mut self, world: &World) {
        let now = world.now();
        self.pitch = (PITCH_DEG + world.snapshot().kinematics.camera_pitch_bottom).to_radians();
        self.stare_timer = Timer::new(STARE_SECONDS, now);
        self.started_at = now;
        self.yaw_aim = 0.0;
        self.sequence_counter = 0;
        self.currently_moving = false;
        self.settled = false;
    }

    fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
        sub_tasks: &mut SubTasks,
    ) -> Result<TaskStatus, BehaviourError> {
        args.none(self.name())?;
        let now = world.now();
        let sequence = self.sequence(now);

        if self.currently_moving && self.settled {
            self.stare_timer.restart(now);
            self.currently_moving = false;
        }
        if !self.currently_moving && self.stare_timer.finished(now) {
            self.sequence_counter = (self.sequence_counter + 1) % sequence.len();
            self.yaw_aim = sequence[self.sequence_counter].to_radians();
            self.currently_moving = true;
        }

        let status = sub_tasks.tick_current(
            world,
            TickArgs::Head(HeadArgs {
                yaw: self.yaw_aim,
                pitch: self.pitch,
                yaw_speed: YAW_SPEED,
                pitch_speed: PITCH_SPEED,
            }),
        )?;
        self.settled = status == TaskStatus::Success;
        Ok(TaskStatus::Running)
    }
}
