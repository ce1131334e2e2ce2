use super::{BehaviourError, TickArgs, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    Success,
    Failure,
    #[default]
    Running,
}

/// A behaviour without sub tasks.
pub trait Leaf: Send {
    fn name(&self) -> &'static str;

    /// Put the task back into its initial state.
    fn reset(&mut self, _world: &World) {}

    fn tick(&mut self, world: &mut World, args: TickArgs) -> Result<TaskStatus, BehaviourError>;
}

/// A behaviour that delegates to exactly one of its named sub tasks at a time.
pub trait Composite: Send {
    fn name(&self) -> &'static str;

    /// Put the task's own state back into its initial state. The active sub task
    /// is reset separately.
    fn reset(&mut self, _world: &World) {}

    /// Choose the active sub task for this tick. Called before [`Composite::tick`].
    fn transition(
        &mut self,
        _world: &World,
        _sub_tasks: &mut SubTasks,
    ) -> Result<(), BehaviourError> {
        Ok(())
    }

    /// Forwards to the active sub task unless overridden.
    fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
        sub_tasks: &mut SubTasks,
    ) -> Result<TaskStatus, BehaviourError> {
        sub_tasks.tick_current(world, args)
    }
}

/// A node of the behaviour tree. Each node exclusively owns its sub tasks.
pub enum TaskNode {
    Leaf(Box<dyn Leaf>),
    Composite {
        task: Box<dyn Composite>,
        sub_tasks: SubTasks,
    },
}

impl TaskNode {
    /// Wrap a leaf, resetting it once.
    pub fn leaf(world: &World, mut task: impl Leaf + 'static) -> Self {
        task.reset(world);
        TaskNode::Leaf(Box::new(task))
    }

    /// Wrap a composite around its already constructed sub tasks and reset it
    /// once. `initial` names the sub task that is active until the first
    /// transition picks another one.
    pub fn composite(
        world: &World,
        mut task: impl Composite + 'static,
        sub_tasks: Vec<(&'static str, TaskNode)>,
        initial: &str,
    ) -> Result<Self, BehaviourError> {
        let sub_tasks = SubTasks::new(task.name(), sub_tasks, initial)?;
        task.reset(world);
        Ok(TaskNode::Composite {
            task: Box::new(task),
            sub_tasks,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskNode::Leaf(task) => task.name(),
            TaskNode::Composite { task, .. } => task.name(),
        }
    }

    /// The key of the active sub task, `None` for leaves.
    pub fn active_sub_task(&self) -> Option<&'static str> {
        match self {
            TaskNode::Leaf(_) => None,
            TaskNode::Composite { sub_tasks, .. } => Some(sub_tasks.current()),
        }
    }

    /// Reset this node, then its active sub task. The active sub task is kept.
    pub fn reset(&mut self, world: &World) {
        match self {
            TaskNode::Leaf(task) => task.reset(world),
            TaskNode::Composite { task, sub_tasks } => {
                task.reset(world);
                sub_tasks.current_task_mut().reset(world);
            }
        }
    }

    /// Run one cycle of this node.
    ///
    /// The node's name is appended to the world's hierarchy trace first. A
    /// composite then transitions, and a newly selected sub task is reset
    /// before anything ticks it.
    pub fn tick(
        &mut self,
        world: &mut World,
        args: TickArgs,
    ) -> Result<TaskStatus, BehaviourError> {
        world.push_hierarchy(self.name());
        match self {
            TaskNode::Leaf(task) => task.tick(world, args),
            TaskNode::Composite { task, sub_tasks } => {
                let previous = sub_tasks.current;
                task.transition(world, sub_tasks)?;
                if sub_tasks.current != previous {
                    log::debug!(
                        "{} switched from {} to {}",
                        task.name(),
                        sub_tasks.tasks[previous].0,
                        sub_tasks.current()
                    );
                    sub_tasks.current_task_mut().reset(world);
                }
                task.tick(world, args, sub_tasks)
            }
        }
    }
}

/// The named sub tasks of a composite and which one is active.
pub struct SubTasks {
    owner: &'static str,
    tasks: Vec<(&'static str, TaskNode)>,
    current: usize,
}

impl SubTasks {
    fn new(
        owner: &'static str,
        tasks: Vec<(&'static str, TaskNode)>,
        initial: &str,
    ) -> Result<Self, BehaviourError> {
        if tasks.is_empty() {
            return Err(BehaviourError::NoChildren { task: owner });
        }
        let current = Self::position(owner, &tasks, initial)?;
        Ok(Self {
            owner,
            tasks,
            current,
        })
    }

    fn position(
        owner: &'static str,
        tasks: &[(&'static str, TaskNode)],
        name: &str,
    ) -> Result<usize, BehaviourError> {
        tasks
            .iter()
            .position(|(key, _)| *key == name)
            .ok_or_else(|| BehaviourError::UnknownChild {
                task: owner,
                child: name.to_string(),
            })
    }

    /// Key of the active sub task.
    pub fn current(&self) -> &'static str {
        self.tasks[self.current].0
    }

    /// Make the named sub task the active one.
    pub fn select(&mut self, name: &str) -> Result<(), BehaviourError> {
        self.current = Self::position(self.owner, &self.tasks, name)?;
        Ok(())
    }

    pub fn tick_current(
        &mut self,
        world: &mut World,
        args: TickArgs,
    ) -> Result<TaskStatus, BehaviourError> {
        self.current_task_mut().tick(world, args)
    }

    fn current_task_mut(&mut self) -> &mut TaskNode {
        &mut self.tasks[self.current].1
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use pitch_core::{BehaviourSettings, WorldSnapshot};

    use super::*;

    type EventLog = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        events: EventLog,
        ticks: Arc<AtomicUsize>,
    }

    impl Leaf for Recorder {
        fn name(&self) -> &'static str {
            "Recorder"
        }

        fn reset(&mut self, _world: &World) {
            self.events.lock().unwrap().push(format!("{}.reset", self.label));
        }

        fn tick(
            &mut self,
            _world: &mut World,
            _args: TickArgs,
        ) -> Result<TaskStatus, BehaviourError> {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            self.events.lock().unwrap().push(format!("{}.tick", self.label));
            Ok(TaskStatus::Running)
        }
    }

    /// Switches from A to B once `threshold` seconds passed since its reset.
    struct Switcher {
        threshold: f64,
        started_at: f64,
        target: &'static str,
    }

    impl Composite for Switcher {
        fn name(&self) -> &'static str {
            "Switcher"
        }

        fn reset(&mut self, world: &World) {
            self.started_at = world.now();
        }

        fn transition(
            &mut self,
            world: &World,
            sub_tasks: &mut SubTasks,
        ) -> Result<(), BehaviourError> {
            if world.now() - self.started_at > self.threshold {
                sub_tasks.select(self.target)?;
            }
            Ok(())
        }
    }

    fn world_at(timestamp: f64) -> World {
        World::new(
            Arc::new(WorldSnapshot {
                timestamp,
                ..Default::default()
            }),
            Arc::new(BehaviourSettings::default()),
        )
    }

    fn advance(world: &mut World, timestamp: f64) {
        world.update(Arc::new(WorldSnapshot {
            timestamp,
            ..Default::default()
        }));
    }

    fn switcher(
        world: &World,
        events: &EventLog,
        target: &'static str,
    ) -> (TaskNode, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let a_ticks = Arc::new(AtomicUsize::new(0));
        let b_ticks = Arc::new(AtomicUsize::new(0));
        let a = TaskNode::leaf(
            world,
            Recorder {
                label: "A",
                events: events.clone(),
                ticks: a_ticks.clone(),
            },
        );
        let b = TaskNode::leaf(
            world,
            Recorder {
                label: "B",
                events: events.clone(),
                ticks: b_ticks.clone(),
            },
        );
        let node = TaskNode::composite(
            world,
            Switcher {
                threshold: 2.5,
                started_at: 0.0,
                target,
            },
            vec![("A", a), ("B", b)],
            "A",
        )
        .unwrap();
        (node, a_ticks, b_ticks)
    }

    #[test]
    fn test_construction_resets_each_leaf_once() {
        let world = world_at(0.0);
        let events = EventLog::default();
        let (node, _, _) = switcher(&world, &events, "B");
        assert_eq!(*events.lock().unwrap(), vec!["A.reset", "B.reset"]);
        assert_eq!(node.active_sub_task(), Some("A"));
    }

    #[test]
    fn test_switch_resets_new_child_once_before_ticking() {
        let mut world = world_at(0.0);
        let events = EventLog::default();
        let (mut node, a_ticks, b_ticks) = switcher(&world, &events, "B");
        events.lock().unwrap().clear();

        for t in [0.0, 1.0, 2.0] {
            advance(&mut world, t);
            node.tick(&mut world, TickArgs::None).unwrap();
        }
        assert_eq!(a_ticks.load(Ordering::SeqCst), 3);
        assert_eq!(b_ticks.load(Ordering::SeqCst), 0);
        assert_eq!(*events.lock().unwrap(), vec!["A.tick", "A.tick", "A.tick"]);

        events.lock().unwrap().clear();
        for t in [3.0, 4.0] {
            advance(&mut world, t);
            node.tick(&mut world, TickArgs::None).unwrap();
        }
        assert_eq!(a_ticks.load(Ordering::SeqCst), 3);
        assert_eq!(b_ticks.load(Ordering::SeqCst), 2);
        assert_eq!(*events.lock().unwrap(), vec!["B.reset", "B.tick", "B.tick"]);
        assert_eq!(node.active_sub_task(), Some("B"));
    }

    #[test]
    fn test_reset_keeps_active_child() {
        let mut world = world_at(0.0);
        let events = EventLog::default();
        let (mut node, _, _) = switcher(&world, &events, "B");
        advance(&mut world, 3.0);
        node.tick(&mut world, TickArgs::None).unwrap();
        events.lock().unwrap().clear();

        node.reset(&world);
        assert_eq!(*events.lock().unwrap(), vec!["B.reset"]);
        assert_eq!(node.active_sub_task(), Some("B"));
    }

    #[test]
    fn test_tick_traces_hierarchy() {
        let mut world = world_at(0.0);
        let events = EventLog::default();
        let (mut node, _, _) = switcher(&world, &events, "B");
        node.tick(&mut world, TickArgs::None).unwrap();
        assert_eq!(world.take_hierarchy(), "Switcher.Recorder.");
        assert_eq!(world.hierarchy(), "");
    }

    #[test]
    fn test_unknown_child_fails_the_tick() {
        let mut world = world_at(0.0);
        let events = EventLog::default();
        let (mut node, _, _) = switcher(&world, &events, "C");
        advance(&mut world, 3.0);
        let err = node.tick(&mut world, TickArgs::None).unwrap_err();
        assert!(matches!(err, BehaviourError::UnknownChild { task: "Switcher", .. }));
    }

    #[test]
    fn test_composite_needs_children() {
        let world = world_at(0.0);
        let result = TaskNode::composite(
            &world,
            Switcher {
                threshold: 1.0,
                started_at: 0.0,
                target: "A",
            },
            Vec::new(),
            "A",
        );
        assert!(matches!(result, Err(BehaviourError::NoChildren { task: "Switcher" })));
    }
}
