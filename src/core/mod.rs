//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for everything that runs on the logic thread.
//
// Responsibilities:
// - Own the GlobalSystems (input, scenes) and the GlobalContext
// - Receive platform events and publish frame snapshots (crossbeam)
// - Keep deterministic pacing: fixed TPS, fixed dt = 1 / TPS
//
// Notes:
// The simulation is single-threaded. The logic thread is the only owner
// of game state; the platform thread only sees immutable snapshots.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, trace, warn};

//=== Public Modules ======================================================

pub mod geometry;
pub mod globals;
pub mod input;
pub mod render;
pub mod scene;

pub(crate) mod platform_bridge;

//=== Re-exports ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use input::Action;
pub use platform_bridge::PlatformError;
pub use scene::SceneKey;

use input::InputEvent;
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext<S, A>,
    started: bool,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(tps: f64) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new((1.0 / tps) as f32),
            started: false,
        }
    }

    /// Gives the game a chance to bind keys and register scenes.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        init_fn(&mut self.systems);
    }

    //--- Tick -------------------------------------------------------------

    /// Runs exactly one simulation tick over the given input.
    ///
    /// Returns `Exit` once a scene requested it or the stack is empty.
    pub(crate) fn tick(&mut self, batches: Vec<Vec<InputEvent>>, focus_lost: bool) -> TickControl {
        if !self.started {
            self.systems.start(&mut self.context);
            self.started = true;
        }

        self.context.frame_events = batches;
        self.context.focus_lost = focus_lost;
        self.systems.update(&mut self.context);

        if self.context.exit_requested() || self.systems.scene_manager.is_empty() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> &GlobalContext<S, A> {
        &self.context
    }

    fn shutdown(&mut self) {
        self.systems.scene_manager.shutdown(&mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collect platform events (Exit on window close)
    //  2. Run the tick
    //  3. Publish the snapshot (dropped if the platform lags behind)
    //  4. Sleep to keep the fixed rate
    //
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        sender: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);

            loop {
                let tick_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_tick() == TickControl::Exit {
                    info!("Platform closed, core thread exiting");
                    break;
                }

                //--- Step 2: Simulate --------------------------------------
                let focus_lost = collector.focus_lost();
                let control = self.tick(collector.take_batches(), focus_lost);

                //--- Step 3: Publish ---------------------------------------
                let frame = self.context.frame.clone();
                match sender.try_send(CoreEvent::Frame(frame)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        trace!("Presenter lagging, dropped frame {}", self.context.tick());
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        warn!("Platform channel disconnected, core thread exiting");
                        break;
                    }
                }

                if control == TickControl::Exit {
                    info!("Game requested exit after {} ticks", self.context.tick());
                    // Blocking send: the platform must see this to close
                    if sender.send(CoreEvent::Shutdown).is_err() {
                        debug!("Platform already gone at shutdown");
                    }
                    break;
                }

                //--- Step 4: Fixed pacing ----------------------------------
                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                } else {
                    trace!("Tick overran budget by {:?}", elapsed - tick_duration);
                }
            }

            self.shutdown();
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
