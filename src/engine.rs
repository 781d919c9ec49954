//=========================================================================
// Engine
//
// Main entry point: wires the logic thread to the platform thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(): bind keys, register scenes
//         ├─ with_channel_capacity() └─ run(): spawns logic thread,
//         ├─ with_title()                      runs platform,
//         ├─ with_window_size()                blocks until exit
//         └─ with_presenter()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::render::{LogPresenter, Presenter};
use crate::core::{Action, CoreSystemsOrchestrator, GlobalSystems, SceneKey};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second, dt = 1 / TPS)
/// - **Channel capacity**: 128 messages per direction
/// - **Window**: 800x600, titled "Runner"
/// - **Presenter**: [`LogPresenter`]
///
/// # Examples
///
/// ```no_run
/// use runner_platformer::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Scenes { Main }
/// impl SceneKey for Scenes {}
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Actions { Jump }
/// impl Action for Actions {}
///
/// EngineBuilder::<Scenes, Actions>::new()
///     .with_tps(120.0)
///     .with_window_size(1024, 768)
///     .build()
///     .init(|systems| {
///         systems.input.bind_key(KeyCode::Space, Actions::Jump, InputContext::Primary);
///     })
///     .run()
///     .expect("engine failed");
/// ```
pub struct EngineBuilder<S: SceneKey, A: Action> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    presenter: Option<Box<dyn Presenter>>,
    _phantom: std::marker::PhantomData<(S, A)>,
}

impl<S: SceneKey, A: Action> EngineBuilder<S, A> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig::default(),
            presenter: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the ticks per second of the logic thread.
    ///
    /// The simulation step is `1 / tps` seconds regardless of how fast
    /// the platform redraws.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0` or is not finite.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps.is_finite() && tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of both thread channels.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the logical window size in pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Replaces the default [`LogPresenter`].
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Builds the engine. Call [`Engine::init`] before [`Engine::run`].
    pub fn build(self) -> Engine<S, A> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.tps),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
            presenter: self.presenter.unwrap_or_else(|| Box::new(LogPresenter)),
        }
    }
}

impl<S: SceneKey, A: Action> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime created by [`EngineBuilder`].
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, SceneManager
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Buffering, Presenter
///
/// Communication: bounded crossbeam channels
///   PlatformEvent ──> core, CoreEvent ──> platform
/// ```
pub struct Engine<S: SceneKey, A: Action> {
    orchestrator: CoreSystemsOrchestrator<S, A>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    presenter: Box<dyn Presenter>,
}

impl<S: SceneKey, A: Action> Engine<S, A> {
    //--- Initialization ---------------------------------------------------

    /// Configures engine systems (key bindings, scenes, initial scene).
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the game requests exit.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the two bounded channels
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop on this thread
    /// 4. Joins the logic thread
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running. A panicking logic thread is logged only.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Channels ---------------------------------------------------
        let (platform_tx, platform_rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let (core_tx, core_rx): (Sender<CoreEvent>, Receiver<CoreEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Logic thread -----------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(platform_rx, core_tx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Platform ---------------------------------------------------
        let platform = Platform::new(platform_tx, core_rx, self.window, self.presenter);
        let result = platform.run();

        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Join -------------------------------------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
