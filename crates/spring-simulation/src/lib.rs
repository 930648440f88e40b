//! # Spring Simulation
//!
//! The world aggregate that owns bodies, links, grounds and pinned forces,
//! drives the fixed-step tick, and exposes the editor commands a UI layer
//! calls between ticks.

pub mod editor;
pub mod params;
pub mod scene;
pub mod world;

pub use editor::*;
pub use params::*;
pub use scene::*;
pub use world::*;
