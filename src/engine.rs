//=========================================================================
// Vertex Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                                        │
//         ├─ with_fps()              └─ FrameDriver (scenes + context)        ├─ logic thread
//         ├─ with_size() / title                                              ├─ winit window
//         └─ with_channel_capacity()                                          └─ blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::frame::FrameDriver;
use crate::core::geometry::{Point, Size};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::surface::{Color, FrameBuffer};
use crate::core::widget::VisibilityPolicy;
use crate::core::CoreSystemsOrchestrator;
use crate::error::Error;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **FPS**: 60.0 (logic ticks per second)
/// - **Window**: "VertexEngine", 800x600 at (0, 0)
/// - **Background**: rgb(50, 50, 100)
/// - **Channel capacity**: 128 messages
/// - **Visibility policy**: [`VisibilityPolicy::DrawOnly`]
///
/// # Examples
///
/// ```no_run
/// use vertex_engine::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_fps(120.0)
///     .with_title("Demo")
///     .with_size(1024, 768)
///     .build()
///     .run()
///     .expect("engine failed");
/// ```
pub struct EngineBuilder {
    fps: f64,
    size: Size,
    position: Point,
    title: String,
    background: Color,
    channel_capacity: usize,
    visibility_policy: VisibilityPolicy,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fps: 60.0,
            size: Size::new(800, 600),
            position: Point::ORIGIN,
            title: "VertexEngine".to_owned(),
            background: FrameDriver::DEFAULT_BACKGROUND,
            channel_capacity: 128,
            visibility_policy: VisibilityPolicy::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "FPS must be positive, got {}", fps);
        self.fps = fps;
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.size = Size::new(width, height);
        self
    }

    /// Sets the initial window position (top-left of the screen is (0, 0)).
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Colour the surface is cleared to before each draw.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Chooses whether hidden widgets also skip update and events.
    pub fn with_visibility_policy(mut self, policy: VisibilityPolicy) -> Self {
        self.visibility_policy = policy;
        self
    }

    /// Builds the engine instance.
    ///
    /// Call [`Engine::init`] to install a scene and bindings, then
    /// [`Engine::run`].
    pub fn build(self) -> Engine {
        info!(
            "Building engine (FPS: {}, window: {}x{}, channel: {})",
            self.fps, self.size.width, self.size.height, self.channel_capacity
        );

        let driver = FrameDriver::new(self.size, self.background)
            .with_visibility_policy(self.visibility_policy);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(driver),
            fps: self.fps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig {
                title: self.title,
                size: self.size,
                position: self.position,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Vertex Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ FPS)
///   │     └─► FrameDriver: InputRegistry, SceneManager
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
///
/// # Examples
///
/// ```no_run
/// use vertex_engine::prelude::*;
///
/// struct Title;
/// impl Scene for Title {}
///
/// fn main() -> Result<(), vertex_engine::Error> {
///     EngineBuilder::new()
///         .build()
///         .init(|driver| {
///             driver.input().bind("start", "enter").expect("known key");
///             driver.set_scene(Box::new(Title));
///         })
///         .run()
/// }
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    fps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the frame driver before the logic thread starts.
    ///
    /// This is where the first scene is installed and actions and
    /// shortcuts are bound.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut FrameDriver),
    {
        info!("Initializing engine systems");

        init_fn(self.orchestrator.driver_mut());

        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns the logic thread ticking at the configured FPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` is sent, the logic thread exits
    ///    and is joined
    ///
    /// # Errors
    ///
    /// [`Error::Platform`] if the event loop fails, [`Error::CoreThreadPanicked`]
    /// if the logic thread panicked.
    pub fn run(self) -> Result<(), Error> {
        info!("Starting engine runtime (FPS: {})", self.fps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let surface = Box::new(FrameBuffer::new(self.window.size));
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.fps, surface);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(self.window, tx);
        info!("Platform initialized, entering event loop");

        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread ----------------------
        // The sender was moved into (and dropped with) the platform, so the
        // logic thread sees a disconnect even if WindowClosed was never sent.
        if core_handle.join().is_err() {
            error!("Core thread panicked");
            return Err(Error::CoreThreadPanicked);
        }

        info!("Engine shutdown complete");
        platform_result.map_err(Error::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.fps, 60.0);
        assert_eq!(builder.size, Size::new(800, 600));
        assert_eq!(builder.position, Point::ORIGIN);
        assert_eq!(builder.title, "VertexEngine");
        assert_eq!(builder.background, Color::rgb(50, 50, 100));
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.visibility_policy, VisibilityPolicy::DrawOnly);
    }

    #[test]
    fn builder_with_fps() {
        let builder = EngineBuilder::new().with_fps(120.0);
        assert_eq!(builder.fps, 120.0);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_zero() {
        EngineBuilder::new().with_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_negative() {
        EngineBuilder::new().with_fps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_size_panics_on_zero() {
        EngineBuilder::new().with_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_fps(120.0)
            .with_size(1024, 768)
            .with_position(40, 30)
            .with_title("Demo")
            .with_channel_capacity(256)
            .build();

        assert_eq!(engine.fps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(
            engine.window,
            WindowConfig {
                title: "Demo".to_owned(),
                size: Size::new(1024, 768),
                position: Point::new(40, 30),
            }
        );
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    struct Menu;
    impl Scene for Menu {}

    #[test]
    fn init_configures_driver() {
        let mut engine = EngineBuilder::new()
            .with_size(320, 240)
            .with_background(Color::WHITE)
            .with_visibility_policy(VisibilityPolicy::SuppressAll)
            .build()
            .init(|driver| {
                driver.input().bind("start", "enter").unwrap();
                driver.shortcuts.bind("ctrl+q", |ctx| ctx.clear_scene()).unwrap();
                driver.set_scene(Box::new(Menu));
            });

        let driver = engine.orchestrator.driver_mut();
        assert!(driver.context.input.has_action("start"));
        assert_eq!(driver.shortcuts.len(), 1);
        assert!(!driver.scenes.is_empty());
        assert_eq!(driver.background(), Color::WHITE);
        assert_eq!(driver.context.screen_size(), Size::new(320, 240));
        assert_eq!(driver.context.visibility_policy(), VisibilityPolicy::SuppressAll);
    }
}
