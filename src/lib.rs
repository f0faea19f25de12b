//=========================================================================
// Vertex Engine — Library Root
//
// Scene, widget and input layer for small 2D applications.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder` / `Engine`)
// - Expose the scene/widget/input core for applications and tests
// - Keep the window integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use vertex_engine::prelude::*;
//
// struct Title;
// impl Scene for Title {}
//
// fn main() -> Result<(), vertex_engine::Error> {
//     EngineBuilder::new()
//         .build()
//         .init(|driver| { driver.set_scene(Box::new(Title)); })
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the input registry, widget tree, scenes and frame driver.
// Everything in it runs without a window, so applications can tick a
// `FrameDriver` directly in tests.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event conversion and is kept
// private, as it is not part of the public API surface.
//
mod engine;
mod error;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use error::Error;
