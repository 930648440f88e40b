//! Default physical constants and editor scales for the sandbox
//!
//! Units are loosely "meters, kilograms, seconds" but the scenes are sized
//! for a 900x500 pixel canvas at zoom 1, so a meter is drawn as one pixel.

use glam::DVec2;

/// Gravitational acceleration (points down the world y axis)
pub const DEFAULT_GRAVITY: DVec2 = DVec2::new(0.0, -9.8);

/// Quadratic air drag coefficient
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.001;

/// Fixed simulation step while running
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Spring constant used when a link is created without an explicit one
pub const DEFAULT_STIFFNESS: f64 = 1000.0;

/// Mass used when a point is created without an explicit one
pub const DEFAULT_MASS: f64 = 1.0;

/// Mouse drag displacement (world units) to force conversion
pub const FORCE_DRAG_SCALE: f64 = 0.01;

/// Force to arrow length conversion, used for drawing and picking forces
pub const FORCE_ARROW_SCALE: f64 = 100.0;

/// Camera pan step in screen pixels (scaled by zoom into world units)
pub const PAN_STEP_PIXELS: f64 = 30.0;

/// Multiplicative zoom step
pub const ZOOM_STEP: f64 = 2.0;

/// Default canvas size in pixels
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 900.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 500.0;

/// Lengths below this are treated as zero when normalizing
pub const LENGTH_EPSILON: f64 = 1e-12;
