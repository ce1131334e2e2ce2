use std::sync::Arc;

use pitch_core::{ActionRequest, BehaviourDebugInfo, BehaviourSettings, WorldSnapshot};

use crate::{
    behaviour::{BehaviourError, TaskNode, TickArgs, World},
    skills::{resolve_skill, BehaviourPackage},
};

/// A loaded skill tree and the world it runs in.
struct SkillInstance {
    root: TaskNode,
    world: World,
}

impl SkillInstance {
    fn load(
        name: &str,
        packages: &[BehaviourPackage],
        snapshot: Arc<WorldSnapshot>,
        settings: Arc<BehaviourSettings>,
    ) -> Result<Self, BehaviourError> {
        let factory = resolve_skill(name, packages)?;
        let world = World::new(snapshot, settings);
        let root = factory(&world)?;
        log::info!("Loaded skill {}", name);
        Ok(Self { root, world })
    }

    /// Tick the tree once, returning the request it produced and its trace.
    fn tick(
        &mut self,
        request: ActionRequest,
    ) -> (Result<ActionRequest, BehaviourError>, String) {
        self.world.request = request;
        let result = self.root.tick(&mut self.world, TickArgs::None);
        let trace = self.world.take_hierarchy();
        let request = std::mem::take(&mut self.world.request);
        (result.map(|_| request), trace)
    }
}

/// Drives the body and head skills once per control cycle.
///
/// Both skills are resolved on the first tick and kept for the lifetime of the
/// ticker. The body writes a fresh request, which is then handed to the head.
pub struct Ticker {
    settings: Arc<BehaviourSettings>,
    body: Option<SkillInstance>,
    head: Option<SkillInstance>,
}

impl Ticker {
    pub fn new(settings: BehaviourSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            body: None,
            head: None,
        }
    }

    pub fn settings(&self) -> &BehaviourSettings {
        &self.settings
    }

    /// Run one cycle on the given snapshot.
    ///
    /// A failure inside either tree is logged with the trace collected up to
    /// that point and returned. Nothing from the failed cycle carries over.
    pub fn tick(&mut self, snapshot: WorldSnapshot) -> Result<ActionRequest, BehaviourError> {
        let snapshot = Arc::new(snapshot);
        let body = Self::prepare(
            &mut self.body,
            &self.settings.body_skill,
            &BehaviourPackage::BODY,
            &snapshot,
            &self.settings,
        )?;
        let (request, body_trace) = body.tick(ActionRequest::default());
        let request = request.map_err(|err| Self::failed(body_trace.clone(), err))?;

        let head = Self::prepare(
            &mut self.head,
            &self.settings.head_skill,
            &BehaviourPackage::HEAD,
            &snapshot,
            &self.settings,
        )?;
        let (request, head_trace) = head.tick(request);
        let mut request = request.map_err(|err| Self::failed(head_trace.clone(), err))?;

        request.debug = BehaviourDebugInfo {
            body_behaviour_hierarchy: body_trace,
            head_behaviour_hierarchy: head_trace,
        };
        Ok(request)
    }

    /// Load the skill into `slot` if needed, otherwise feed it the snapshot.
    fn prepare<'a>(
        slot: &'a mut Option<SkillInstance>,
        name: &str,
        packages: &[BehaviourPackage],
        snapshot: &Arc<WorldSnapshot>,
        settings: &Arc<BehaviourSettings>,
    ) -> Result<&'a mut SkillInstance, BehaviourError> {
        let instance = match slot.take() {
            Some(mut instance) => {
                instance.world.update(Arc::clone(snapshot));
                instance
            }
            None => {
                SkillInstance::load(name, packages, Arc::clone(snapshot), Arc::clone(settings))
                    .map_err(|err| {
                        log::error!("Failed to load skill {}: {}", name, err);
                        err
                    })?
            }
        };
        Ok(slot.insert(instance))
    }

    fn failed(trace: String, source: BehaviourError) -> BehaviourError {
        log::error!("Behaviour failed in {}: {}", trace, source);
        BehaviourError::Tick {
            trace,
            source: Box::new(source),
        }
    }
}
