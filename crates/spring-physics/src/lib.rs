//! # Spring Physics
//!
//! Point masses, spring links, ground planes and pinned forces for a 2D
//! mass-spring sandbox. Everything here is plain data plus the per-body
//! force/integration contract; the tick ordering lives in `spring-simulation`.

pub mod body;
pub mod color;
pub mod constants;
pub mod error;
pub mod force;
pub mod ground;
pub mod id;
pub mod link;
pub mod vector;

pub use body::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use force::*;
pub use ground::*;
pub use id::*;
pub use link::*;
pub use vector::*;
