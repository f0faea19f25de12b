//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the scene/input core running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the FrameDriver (scene manager + global context)
// - Receive platform events through the crossbeam channel
// - Maintain fixed pacing at the configured frame rate
// - Shut down on window close or channel disconnect
//
// Notes:
// The orchestrator runs independently from the platform layer. The only
// communication with the window thread is the PlatformEvent channel.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod frame;
pub mod geometry;
pub mod globals;
pub mod input;
pub mod platform_bridge;
pub mod scene;
pub mod surface;
pub mod widget;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Modules ====================================================

use frame::FrameDriver;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use surface::Surface;

//=== CoreSystemsOrchestrator =============================================
//
// Moves the frame driver onto the logic thread and ticks it at a fixed
// rate until the platform signals shutdown.
//
pub(crate) struct CoreSystemsOrchestrator {
    driver: FrameDriver,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(driver: FrameDriver) -> Self {
        Self { driver }
    }

    pub(crate) fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (bounded drain)
    //  2. Runs one FrameDriver tick over the collected batches
    //  3. Sleeps to maintain fixed pacing
    //  4. Exits cleanly when a shutdown signal is received
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        fps: f64,
        mut surface: Box<dyn Surface>,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / fps);

        thread::spawn(move || {
            let mut driver = self.driver;
            let mut collector = EventCollector::new(receiver);

            info!("Core thread started ({:.1} FPS)", fps);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting after {} frames", driver.context.frame());
                    break;
                }

                //--- Step 2: Run one frame ---------------------------------
                let batches = collector.take_batches();
                driver.tick(&batches, surface.as_mut());

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Frame {} overran by {:?}", driver.context.frame(), elapsed - frame_duration);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
