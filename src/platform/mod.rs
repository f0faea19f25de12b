//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's logic thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │   ↓              │
//  │  InputProcessor          │    │  FrameDriver     │
//  │   ├─ Converts Winit      │    │   ├─ Registry    │
//  │   └─ Tracks held keys    │    │   └─ Scenes      │
//  │   ↓                      │    │                  │
//  │  InputBuffer             │    │                  │
//  │   ├─ discrete: Vec<>     │    │                  │
//  │   └─ continuous: Vec<>   │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  crossbeam channel ──────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → Core ticks at fixed FPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: batches input atomically,
//   keeping arrival order even with high event rates
// - **Focus loss**: held keys are forgotten here and a `FocusLost` event
//   tells the registry to release them
// - **Graceful channel disconnect**: if the core thread dies, the platform
//   logs a warning but keeps running so the window can be closed
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::geometry::{Point, Size};
use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window parameters chosen through the engine builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub size: Size,
    pub position: Point,
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread and sends batched events to the core thread
/// over the crossbeam channel.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, sender)`
/// 2. **Execution**: `platform.run()` starts the event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: user closes window → `WindowClosed` sent → loop exits
///
/// # Thread Safety
///
/// This type is NOT Send/Sync; it must remain on the main thread.
pub(crate) struct Platform {
    config: WindowConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Channel to send events to core thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance. The window is created lazily.
    pub(crate) fn new(config: WindowConfig, event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    ///
    /// # Panics
    ///
    /// Winit panics if this is called off the main thread on macOS/iOS.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core thread as one `Inputs` message.
    ///
    /// If the channel is disconnected (core thread exited or panicked) the
    /// events are dropped with a warning so the window stays closable.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Records a converted window event.
    fn buffer_event(&mut self, event: InputEvent) {
        if event.is_discrete() {
            self.buffer.push_discrete(event);
        } else {
            self.buffer.push_continuous(event);
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        let WindowConfig { title, size, position } = &self.config;

        WindowAttributes::default()
            .with_title(title.as_str())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_position(LogicalPosition::new(position.x, position.y))
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume (mobile may resume repeatedly).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                let inner = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    inner.width,
                    inner.height,
                    window.scale_factor()
                );

                // Scenes see the real drawable size from the first frame.
                self.buffer.push_continuous(InputEvent::Resized {
                    width: inner.width,
                    height: inner.height,
                });

                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer_event(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer_event(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer_event(event);
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform::input", "Focus lost, releasing {} held keys", self.input_processor.held_count());
                self.input_processor.reset();
                self.buffer_event(InputEvent::FocusLost);
            }

            WindowEvent::Resized(size) => {
                self.buffer_event(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

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
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    fn config() -> WindowConfig {
        WindowConfig {
            title: "test".to_owned(),
            size: Size::new(320, 240),
            position: Point::new(10, 20),
        }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(config(), tx);
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(config(), tx);

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(config(), tx);

        platform.buffer_event(InputEvent::KeyDown(KeyCode::Space));
        platform.buffer_event(InputEvent::MouseMoved { x: 1.0, y: 2.0 });
        platform.buffer_event(InputEvent::FocusLost);

        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, [InputEvent::KeyDown(KeyCode::Space), InputEvent::FocusLost]);
                assert_eq!(continuous, [InputEvent::MouseMoved { x: 1.0, y: 2.0 }]);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(config(), tx);
        platform.buffer_event(InputEvent::KeyDown(KeyCode::Space));

        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(config(), tx);

        platform.buffer_event(InputEvent::KeyDown(KeyCode::KeyA));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn window_attributes_follow_config() {
        let (tx, _rx) = unbounded();
        let platform = Platform::new(config(), tx);

        let attrs = platform.window_attributes();

        assert_eq!(attrs.title, "test");
        assert!(attrs.inner_size.is_some());
        assert!(attrs.position.is_some());
    }
}
