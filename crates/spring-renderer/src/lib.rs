//! # Spring Renderer
//!
//! Camera and screen-space draw data for the mass-spring sandbox. The actual
//! drawing backend lives outside this workspace; it consumes the `Pod`
//! instance buffers in [`DrawList`] and the world<->screen transforms on
//! [`Camera`].

pub mod camera;
pub mod draw;
pub mod palette;

pub use camera::*;
pub use draw::*;
pub use palette::*;
