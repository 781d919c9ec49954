//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the logic thread via crossbeam.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  InputSystem     │
//  │   └─ Converts Winit keys │    │  ↓               │
//  │   ↓                      │    │  Scenes          │
//  │  InputBuffer             │    │  ↓               │
//  │   ↓                      │    │  FrameSnapshot   │
//  │  RedrawRequested ────────┼───>│                  │
//  │   (flush)  PlatformEvent │    └────────┬─────────┘
//  │                          │             │
//  │  Presenter <─────────────┼─────────────┘
//  │            CoreEvent     │
//  └──────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent as one batch
//    → Newest snapshot handed to the presenter
//    → Core runs at fixed TPS (independent of refresh rate)
// ```
//
// Notes:
// - Key repeat is dropped here so KeyDown always means a real press
// - Focus loss is forwarded so the core can release held keys
// - Runs on the thread that called `Engine::run()` (Winit requirement)
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::render::{FrameSnapshot, Presenter};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window creation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Runner".to_string(),
            width: 800,
            height: 600,
        }
    }
}

//=== Platform ============================================================

/// Window owner, input aggregator and frame presenter.
///
/// Not `Send`: stays on the main thread. Talks to the logic thread only
/// through its two channel ends.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
    window_config: WindowConfig,

    /// Buffers key events until the frame boundary.
    buffer: InputBuffer,
    input_processor: InputProcessor,

    event_sender: Sender<PlatformEvent>,
    core_receiver: Receiver<CoreEvent>,
    presenter: Box<dyn Presenter>,

    /// Set once the core sent Shutdown or went away.
    core_finished: bool,

    /// Fatal error raised inside a winit callback, returned by `run()`.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        core_receiver: Receiver<CoreEvent>,
        window_config: WindowConfig,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_config,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            core_receiver,
            presenter,
            core_finished: false,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the core
    /// shuts down.
    ///
    /// # Errors
    ///
    /// [`PlatformError::EventLoopCreation`] if no event loop can be
    /// created (e.g. no display), [`PlatformError::WindowCreation`] if the
    /// window cannot be opened, [`PlatformError::EventLoopExecution`]
    /// if the loop fails while running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        let outcome = event_loop.run_app(&mut self);
        self.conclude(outcome)
    }

    /// A failure recorded during the loop takes precedence over the
    /// loop's own result.
    fn conclude(
        &mut self,
        outcome: Result<(), winit::error::EventLoopError>,
    ) -> Result<(), PlatformError> {
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }
        outcome.map_err(PlatformError::EventLoopExecution)
    }

    /// Records a fatal error and tells the core to stop. The caller exits
    /// the event loop.
    fn fail(&mut self, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.notify_closed();
        self.failure = Some(error);
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core as one batch. Empty buffers are
    /// not sent.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            let count = events.len();
            trace!(target: "platform::input", "Flushing {} key events", count);

            if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    count
                );
            }
        }
    }

    /// Drains core messages and returns the newest frame, if any.
    fn poll_core(&mut self) -> Option<FrameSnapshot> {
        let mut latest = None;

        loop {
            match self.core_receiver.try_recv() {
                Ok(CoreEvent::Frame(frame)) => latest = Some(frame),
                Ok(CoreEvent::Shutdown) => {
                    info!(target: "platform", "Core requested shutdown");
                    self.core_finished = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.core_finished {
                        warn!(target: "platform", "Core thread disconnected");
                    }
                    self.core_finished = true;
                    break;
                }
            }
        }

        latest
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Core already gone at window close");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                self.fail(PlatformError::WindowCreation(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform::input", "Focus lost, releasing keys");
                self.buffer.clear();
                if self.event_sender.send(PlatformEvent::FocusLost).is_err() {
                    warn!(target: "platform::input", "Channel disconnected, focus loss dropped");
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush input, present the newest tick
                self.flush_input_buffer();

                if let Some(frame) = self.poll_core() {
                    self.presenter.present(&frame);
                }

                if self.core_finished {
                    info!(target: "platform", "Core finished, leaving event loop");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};
    use winit::error::EventLoopError;

    /// Records the ticks of presented frames.
    struct Recording(Arc<Mutex<Vec<u64>>>);

    impl Presenter for Recording {
        fn present(&mut self, frame: &FrameSnapshot) {
            self.0.lock().unwrap().push(frame.tick);
        }
    }

    fn platform() -> (Platform, Receiver<PlatformEvent>, Sender<CoreEvent>) {
        let (event_tx, event_rx) = unbounded();
        let (core_tx, core_rx) = unbounded();
        let presenter = Box::new(Recording(Arc::new(Mutex::new(Vec::new()))));
        let platform = Platform::new(event_tx, core_rx, WindowConfig::default(), presenter);
        (platform, event_rx, core_tx)
    }

    fn frame(tick: u64) -> FrameSnapshot {
        FrameSnapshot {
            tick,
            ..FrameSnapshot::default()
        }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (platform, _rx, _tx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn default_window_matches_game_defaults() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx, _tx) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (mut platform, rx, _tx) = platform();
        platform.buffer.push(InputEvent::KeyDown { key: KeyCode::Space });

        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(events)) => assert_eq!(events.len(), 1),
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx, _tx) = platform();
        platform.buffer.push(InputEvent::KeyDown { key: KeyCode::Space });
        drop(rx);

        // Logs a warning instead of panicking
        platform.flush_input_buffer();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (mut platform, rx, _tx) = platform();
        platform.buffer.push(InputEvent::KeyDown { key: KeyCode::KeyA });

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn poll_core_keeps_only_newest_frame() {
        let (mut platform, _rx, tx) = platform();
        tx.send(CoreEvent::Frame(frame(1))).unwrap();
        tx.send(CoreEvent::Frame(frame(2))).unwrap();
        tx.send(CoreEvent::Frame(frame(3))).unwrap();

        assert_eq!(platform.poll_core().map(|f| f.tick), Some(3));
        assert!(platform.poll_core().is_none());
        assert!(!platform.core_finished);
    }

    #[test]
    fn poll_core_marks_shutdown() {
        let (mut platform, _rx, tx) = platform();
        tx.send(CoreEvent::Frame(frame(7))).unwrap();
        tx.send(CoreEvent::Shutdown).unwrap();

        assert_eq!(platform.poll_core().map(|f| f.tick), Some(7));
        assert!(platform.core_finished);
    }

    #[test]
    fn poll_core_detects_disconnected_core() {
        let (mut platform, _rx, tx) = platform();
        drop(tx);

        assert!(platform.poll_core().is_none());
        assert!(platform.core_finished);
    }

    #[test]
    fn presenter_receives_polled_frame() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let (event_tx, _event_rx) = unbounded();
        let (core_tx, core_rx) = unbounded();
        let mut platform = Platform::new(
            event_tx,
            core_rx,
            WindowConfig::default(),
            Box::new(Recording(Arc::clone(&ticks))),
        );

        core_tx.send(CoreEvent::Frame(frame(4))).unwrap();
        if let Some(frame) = platform.poll_core() {
            platform.presenter.present(&frame);
        }

        assert_eq!(*ticks.lock().unwrap(), vec![4]);
    }

    #[test]
    fn recorded_failure_is_returned_after_the_loop() {
        let (mut platform, rx, _tx) = platform();

        platform.fail(PlatformError::EventLoopExecution(EventLoopError::RecreationAttempt));

        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::WindowClosed)));
        assert!(matches!(
            platform.conclude(Ok(())),
            Err(PlatformError::EventLoopExecution(EventLoopError::RecreationAttempt))
        ));
        assert!(platform.conclude(Ok(())).is_ok(), "Failure is reported once");
    }

    #[test]
    fn clean_loop_exit_is_ok() {
        let (mut platform, _rx, _tx) = platform();
        assert!(platform.conclude(Ok(())).is_ok());
        assert!(matches!(
            platform.conclude(Err(EventLoopError::ExitFailure(2))),
            Err(PlatformError::EventLoopExecution(EventLoopError::ExitFailure(2)))
        ));
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
