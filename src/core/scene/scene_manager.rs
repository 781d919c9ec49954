//=========================================================================
// Scene Manager
//=========================================================================
//
// Scene registration, stack operations, and lifecycle callbacks.
//
// Scenes live in a HashMap by key; the stack holds keys only, so a
// scene keeps its state while it is off the stack (a paused overlay can
// be pushed and removed any number of times).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::core::input::Action;
use crate::core::render::FrameSnapshot;

//=== Scene Transition ====================================================

/// Scene stack operation, applied at the tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a scene to the top of the stack.
    Push(K),

    /// Removes a scene from the stack wherever it is.
    Remove(K),

    /// Swaps one scene for another at the same stack position.
    Replace(K, K),

    /// Empties the stack. With nothing left to run, the engine stops.
    Clear,

    #[default]
    Empty,
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers, usually a game-side enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

pub struct SceneManager<S: SceneKey, A: Action> {
    scenes: HashMap<S, Box<dyn Scene<S, A>>>,
    stack: Vec<S>,
}

impl<S: SceneKey, A: Action> SceneManager<S, A> {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene. Registering a key twice replaces the scene.
    pub fn register_scene(&mut self, key: S, scene: Box<dyn Scene<S, A>>) {
        if self.scenes.insert(key, scene).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Stack Queries ----------------------------------------------------

    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn top(&self) -> Option<S> {
        self.stack.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Pushes the initial scene and runs its `on_enter`.
    pub fn start(&mut self, initial: S, context: &mut GlobalContext<S, A>) {
        debug!("Starting scene manager with initial scene: {:?}", initial);
        self.push_internal(initial, context);
    }

    /// Exits every scene on the stack, top first.
    pub fn shutdown(&mut self, context: &mut GlobalContext<S, A>) {
        self.clear_internal(context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all transparent scenes on top and the first opaque one.
    pub fn update(&mut self, context: &mut GlobalContext<S, A>) {
        for key in self.collect_active_scenes() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    /// Renders every scene on the stack, bottom-up.
    pub fn render(&self, frame: &mut FrameSnapshot) {
        for key in &self.stack {
            if let Some(scene) = self.scenes.get(key) {
                scene.render(frame);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies queued transitions in FIFO order.
    ///
    /// Transitions queued from inside `on_enter`/`on_exit` run on the
    /// next tick.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S, A>) {
        for transition in context.scene_transitions.take() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear_internal(context),
                SceneTransition::Empty => {}
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &mut GlobalContext<S, A>) {
        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!("Attempted to push unregistered scene {:?}", key);
            return;
        };

        debug!("Pushing scene {:?}", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &mut GlobalContext<S, A>) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!("Scene {:?} not in stack, skipping removal", key);
            return;
        };

        debug!("Removing scene {:?} at position {}", key, pos);
        self.stack.remove(pos);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext<S, A>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!("Scene {:?} not in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!("Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!("Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        debug!("Replacing scene {:?} with {:?}", old_key, new_key);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn clear_internal(&mut self, context: &mut GlobalContext<S, A>) {
        if self.stack.is_empty() {
            return;
        }
        debug!("Clearing scene stack ({} scenes)", self.stack.len());

        while let Some(key) = self.stack.pop() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.on_exit(context);
            }
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Top-down, stop after the first opaque scene
        for &key in self.stack.iter().rev() {
            active.push(key);

            let transparent = self
                .scenes
                .get(&key)
                .map(|scene| scene.is_transparent())
                .unwrap_or(false);
            if !transparent {
                break;
            }
        }

        // Lower scenes update first
        active.reverse();
        active
    }
}

impl<S: SceneKey, A: Action> Default for SceneManager<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::render::SpriteKind;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        C,
    }

    impl SceneKey for TestScene {}

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestAction {
        Jump,
    }

    impl Action for TestAction {}

    type Log = Arc<Mutex<Vec<String>>>;

    /// Records every lifecycle call into a shared log.
    struct Recorder {
        name: &'static str,
        transparent: bool,
        log: Log,
    }

    impl Recorder {
        fn boxed(name: &'static str, transparent: bool, log: &Log) -> Box<Self> {
            Box::new(Self { name, transparent, log: Arc::clone(log) })
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, what));
        }
    }

    impl Scene<TestScene, TestAction> for Recorder {
        fn on_enter(&mut self, _context: &mut GlobalContext<TestScene, TestAction>) {
            self.record("enter");
        }

        fn on_exit(&mut self, _context: &mut GlobalContext<TestScene, TestAction>) {
            self.record("exit");
        }

        fn update(&mut self, _context: &mut GlobalContext<TestScene, TestAction>) {
            self.record("update");
        }

        fn render(&self, frame: &mut FrameSnapshot) {
            frame.push(Rect::default(), [0, 0, 0], SpriteKind::Platform);
        }

        fn is_transparent(&self) -> bool {
            self.transparent
        }
    }

    fn setup(transparent_b: bool) -> (SceneManager<TestScene, TestAction>, GlobalContext<TestScene, TestAction>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::A, Recorder::boxed("A", false, &log));
        manager.register_scene(TestScene::B, Recorder::boxed("B", transparent_b, &log));
        manager.register_scene(TestScene::C, Recorder::boxed("C", false, &log));
        (manager, GlobalContext::new(1.0 / 60.0), log)
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    //--- SceneTransition Tests --------------------------------------------

    #[test]
    fn transition_default_is_empty() {
        let transition: SceneTransition<TestScene> = SceneTransition::default();
        assert_eq!(transition, SceneTransition::Empty);
    }

    //--- SceneManager Tests -----------------------------------------------

    #[test]
    fn start_enters_initial_scene() {
        let (mut manager, mut context, log) = setup(false);
        manager.start(TestScene::A, &mut context);

        assert_eq!(manager.stack(), &[TestScene::A]);
        assert_eq!(drain(&log), vec!["A:enter"]);
    }

    #[test]
    fn opaque_top_blocks_lower_updates() {
        let (mut manager, mut context, log) = setup(false);
        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        manager.process_transitions(&mut context);
        drain(&log);

        manager.update(&mut context);
        assert_eq!(drain(&log), vec!["B:update"]);
    }

    #[test]
    fn transparent_top_lets_lower_scene_update_first() {
        let (mut manager, mut context, log) = setup(true);
        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        manager.process_transitions(&mut context);
        drain(&log);

        manager.update(&mut context);
        assert_eq!(drain(&log), vec!["A:update", "B:update"]);
    }

    #[test]
    fn render_visits_whole_stack() {
        let (mut manager, mut context, _log) = setup(false);
        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        manager.process_transitions(&mut context);

        let mut frame = FrameSnapshot::default();
        manager.render(&mut frame);
        assert_eq!(frame.sprites.len(), 2);
    }

    #[test]
    fn remove_and_replace_run_lifecycle_hooks() {
        let (mut manager, mut context, log) = setup(false);
        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        context.scene_transitions.push(SceneTransition::Remove(TestScene::B));
        context.scene_transitions.push(SceneTransition::Replace(TestScene::A, TestScene::C));
        manager.process_transitions(&mut context);

        assert_eq!(manager.stack(), &[TestScene::C]);
        assert_eq!(
            drain(&log),
            vec!["A:enter", "B:enter", "B:exit", "A:exit", "C:enter"]
        );
    }

    #[test]
    fn duplicate_and_unregistered_pushes_are_ignored() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::<TestScene, TestAction>::new();
        manager.register_scene(TestScene::A, Recorder::boxed("A", false, &log));
        let mut context = GlobalContext::new(1.0 / 60.0);

        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::A));
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        manager.process_transitions(&mut context);

        assert_eq!(manager.stack(), &[TestScene::A]);
        assert!(!manager.is_registered(TestScene::B));
    }

    #[test]
    fn clear_and_shutdown_exit_top_first() {
        let (mut manager, mut context, log) = setup(false);
        manager.start(TestScene::A, &mut context);
        context.scene_transitions.push(SceneTransition::Push(TestScene::B));
        manager.process_transitions(&mut context);
        drain(&log);

        manager.shutdown(&mut context);
        assert!(manager.is_empty());
        assert_eq!(manager.top(), None);
        assert_eq!(drain(&log), vec!["B:exit", "A:exit"]);
    }
}
